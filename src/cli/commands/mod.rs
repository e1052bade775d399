//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `download`: resolve a link and download it
//! - `search`: interactive catalog search
//! - `library`: liked songs and the playlist picker
//! - `tools`: logout and environment checks

mod download;
mod library;
mod search;
mod tools;

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tokio::runtime::Runtime;

pub use download::cmd_download;
pub use library::{cmd_liked, cmd_playlists};
pub use search::cmd_search;
pub use tools::{cmd_check_tools, cmd_logout};

use crate::config::{self, Config};
use crate::convert::{self, AudioFormat};

/// spotgrab CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Root directory for songs (overrides config)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Root directory for podcast episodes (overrides config)
    #[arg(long, global = true)]
    pub root_podcast: Option<PathBuf>,

    /// Target audio format (overrides config)
    #[arg(long, global = true, value_enum)]
    pub format: Option<AudioFormat>,

    /// Re-download files that already exist
    #[arg(long, global = true)]
    pub force: bool,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Download a track, album, playlist or episode by URL or URI
    Download {
        /// A https://open.spotify.com/... URL or spotify:...: URI
        url: String,
    },
    /// Search the catalog and download a selection
    Search {
        /// Search terms; prompts interactively when omitted
        query: Vec<String>,
        /// Results shown per category
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Download all of your liked songs
    Liked,
    /// Pick one of your playlists and download it
    Playlists,
    /// Remove cached login credentials
    Logout,
    /// Check that external tools and credentials are in place
    CheckTools,
}

/// Run the specified CLI command.
///
/// Returns `Ok(true)` if a command was run, `Ok(false)` if no command was
/// specified.
pub fn run_command(cli: &Cli) -> anyhow::Result<bool> {
    let rt = Runtime::new()?;

    match &cli.command {
        Some(Commands::Download { url }) => {
            cmd_download(&rt, cli, url)?;
            Ok(true)
        }
        Some(Commands::Search { query, limit }) => {
            cmd_search(&rt, cli, query, *limit)?;
            Ok(true)
        }
        Some(Commands::Liked) => {
            cmd_liked(&rt, cli)?;
            Ok(true)
        }
        Some(Commands::Playlists) => {
            cmd_playlists(&rt, cli)?;
            Ok(true)
        }
        Some(Commands::Logout) => {
            cmd_logout()?;
            Ok(true)
        }
        Some(Commands::CheckTools) => {
            cmd_check_tools()?;
            Ok(true)
        }
        None => Ok(false),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Load config and apply command-line overrides
pub(crate) fn effective_config(cli: &Cli) -> Config {
    let mut config = config::load();

    if let Some(root) = &cli.root {
        config.output.root = root.clone();
    }
    if let Some(root_podcast) = &cli.root_podcast {
        config.output.root_podcast = root_podcast.clone();
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if cli.force {
        config.output.force = true;
    }

    config
}

/// Bail out early when the chosen format needs ffmpeg and it's missing
pub(crate) fn ensure_converter(format: AudioFormat) {
    if format != AudioFormat::Ogg && !convert::is_ffmpeg_available() {
        convert::print_ffmpeg_install_instructions();
        std::process::exit(1);
    }
}

/// Ask one line of input on stdin
pub(crate) fn prompt(message: &str) -> anyhow::Result<String> {
    print!("{message}");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Parse a 1-based selection typed by the user
pub(crate) fn parse_selection(input: &str) -> anyhow::Result<usize> {
    input
        .parse::<usize>()
        .map_err(|_| anyhow::anyhow!("'{input}' is not a number"))
}
