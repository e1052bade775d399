//! Environment checks and credential management.

use crate::convert;
use crate::session;

/// Check if external tools and credentials are in place
pub fn cmd_check_tools() -> anyhow::Result<()> {
    println!("Checking environment...\n");

    // ffmpeg is only needed for mp3/flac output
    if let Some(version) = convert::ffmpeg_version() {
        println!("✓ ffmpeg: {version}");
    } else {
        println!("✗ ffmpeg: NOT FOUND (required for mp3/flac output)");
        convert::print_ffmpeg_install_instructions();
    }

    println!();
    println!("Credentials:");
    if session::has_cached_credentials() {
        println!("✓ cached login: present");
    } else {
        println!("✗ cached login: none (the next download will open a browser login)");
    }
    if std::env::var("SPOTIFY_ACCESS_TOKEN").is_ok() {
        println!("✓ SPOTIFY_ACCESS_TOKEN: set");
    } else {
        println!("✗ SPOTIFY_ACCESS_TOKEN: not set");
    }

    Ok(())
}

/// Remove cached login credentials
pub fn cmd_logout() -> anyhow::Result<()> {
    if session::logout()? {
        println!("Logged out.");
    } else {
        println!("No cached credentials to remove.");
    }
    Ok(())
}
