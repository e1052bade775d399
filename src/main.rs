//! spotgrab - download tracks, albums, playlists and podcast episodes
//! from Spotify as tagged audio files.
//!
//! The heavy lifting is delegated: librespot owns the streaming session
//! and decryption, ffmpeg owns transcoding, lofty owns tag writing. This
//! binary sequences them.

pub mod api;
pub mod cli;
pub mod config;
pub mod convert;
pub mod downloader;
pub mod error;
pub mod fetch;
pub mod link;
pub mod output;
pub mod session;
pub mod tags;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("spotgrab=info".parse()?))
        .init();

    // Try to run a CLI command
    if cli::run_command(&args)? {
        return Ok(());
    }

    // No command specified
    cli::Cli::command().print_help()?;
    Ok(())
}
