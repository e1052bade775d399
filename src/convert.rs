//! Audio conversion using ffmpeg
//!
//! The fetched stream is Ogg Vorbis; conversion to other formats shells out
//! to the `ffmpeg` command-line tool. This approach is more reliable than
//! codec bindings and works on all platforms where ffmpeg is installed.
//!
//! Install ffmpeg:
//! - Windows: `winget install Gyan.FFmpeg` or download from https://ffmpeg.org
//! - macOS: `brew install ffmpeg`
//! - Linux: `apt install ffmpeg` or equivalent

use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};

/// Target audio format for downloads
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// The stream's native container, written without conversion
    Ogg,
    #[default]
    Mp3,
    Flac,
}

impl AudioFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Ogg => "ogg",
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Errors from the conversion step
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("ffmpeg not found. Install it from https://ffmpeg.org")]
    FfmpegNotFound,

    #[error("Failed to run ffmpeg: {0}")]
    Spawn(std::io::Error),

    #[error("ffmpeg failed: {0}")]
    Ffmpeg(String),
}

/// Common installation paths for ffmpeg on Windows
#[cfg(windows)]
const FFMPEG_PATHS: &[&str] = &[
    "ffmpeg", // In PATH
    r"C:\Program Files\ffmpeg\bin\ffmpeg.exe",
    r"C:\ffmpeg\bin\ffmpeg.exe",
];

#[cfg(not(windows))]
const FFMPEG_PATHS: &[&str] = &[
    "ffmpeg", // In PATH
    "/usr/bin/ffmpeg",
    "/usr/local/bin/ffmpeg",
    "/opt/homebrew/bin/ffmpeg",
];

/// Find the ffmpeg executable, checking common installation paths
fn find_ffmpeg() -> Option<&'static str> {
    FFMPEG_PATHS
        .iter()
        .find(|&path| {
            Command::new(path)
                .arg("-version")
                .output()
                .map(|o| o.status.success())
                .unwrap_or(false)
        })
        .map(|v| v as _)
}

/// Convert an Ogg Vorbis file into the target format.
///
/// `bitrate_kbps` applies to lossy targets only. A failed conversion
/// removes the partial destination file before returning.
pub fn convert(
    src: &Path,
    dest: &Path,
    format: AudioFormat,
    bitrate_kbps: u32,
) -> Result<(), ConvertError> {
    if format == AudioFormat::Ogg {
        // Native container; the fetched bytes are already what we want
        return Ok(());
    }

    let ffmpeg = find_ffmpeg().ok_or(ConvertError::FfmpegNotFound)?;

    let mut command = Command::new(ffmpeg);
    command
        .arg("-y")
        .arg("-hide_banner")
        .arg("-loglevel")
        .arg("error")
        .arg("-i")
        .arg(src);

    if format == AudioFormat::Mp3 {
        command.arg("-b:a").arg(format!("{bitrate_kbps}k"));
    }

    let output = command.arg(dest).output().map_err(ConvertError::Spawn)?;

    if !output.status.success() {
        // Don't leave a half-written file behind
        let _ = std::fs::remove_file(dest);
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ConvertError::Ffmpeg(stderr.trim().to_string()));
    }

    Ok(())
}

/// Check if ffmpeg is available on the system
pub fn is_ffmpeg_available() -> bool {
    find_ffmpeg().is_some()
}

/// Get the ffmpeg version line (for diagnostics)
pub fn ffmpeg_version() -> Option<String> {
    let ffmpeg = find_ffmpeg()?;
    Command::new(ffmpeg)
        .arg("-version")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| {
            String::from_utf8_lossy(&o.stdout)
                .lines()
                .next()
                .map(|line| line.trim().to_string())
        })
}

/// Print installation instructions for ffmpeg
pub fn print_ffmpeg_install_instructions() {
    eprintln!("Error: ffmpeg not found.");
    eprintln!("Install ffmpeg:");
    eprintln!("  Windows: winget install Gyan.FFmpeg");
    eprintln!("  macOS:   brew install ffmpeg");
    eprintln!("  Linux:   apt install ffmpeg");
}
