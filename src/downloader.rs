//! Download orchestration.
//!
//! This is the sequencing layer: resolve catalog metadata, fetch the
//! bitstream, convert, tag. Individual tracks that can't be downloaded are
//! reported and skipped; a batch never dies because one entry failed.

use std::path::Path;

use librespot_metadata::audio::AudioFileFormat;

use crate::api::{TrackInfo, WebApiClient};
use crate::config::Config;
use crate::convert::{self, AudioFormat};
use crate::error::{Error, Result};
use crate::fetch::{self, AudioKind};
use crate::link::{LinkKind, SpotifyLink};
use crate::output;
use crate::session::StreamingSession;
use crate::tags;

/// What happened to one item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Downloaded,
    SkippedExists,
    SkippedUnavailable,
    Failed,
}

/// Tally over a batch of items
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub downloaded: usize,
    pub skipped_exists: usize,
    pub skipped_unavailable: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Downloaded => self.downloaded += 1,
            Outcome::SkippedExists => self.skipped_exists += 1,
            Outcome::SkippedUnavailable => self.skipped_unavailable += 1,
            Outcome::Failed => self.failed += 1,
        }
    }

    pub fn single(outcome: Outcome) -> Self {
        let mut summary = Self::default();
        summary.record(outcome);
        summary
    }

    pub fn total(&self) -> usize {
        self.downloaded + self.skipped_exists + self.skipped_unavailable + self.failed
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} downloaded, {} already present, {} unavailable, {} failed",
            self.downloaded, self.skipped_exists, self.skipped_unavailable, self.failed
        )
    }
}

/// Service tying the session, the catalog client and the output settings
/// together
pub struct Downloader {
    session: StreamingSession,
    api: WebApiClient,
    config: Config,
}

impl Downloader {
    /// Log in and build the API client from the session's token.
    pub async fn connect(config: Config) -> Result<Self> {
        let session = StreamingSession::login().await?;
        let token = session.web_api_token().await?;
        let api = WebApiClient::new(token);

        Ok(Self {
            session,
            api,
            config,
        })
    }

    /// The catalog client, for commands that list before downloading
    pub fn api(&self) -> &WebApiClient {
        &self.api
    }

    /// Parse a URL or URI and download whatever it points at.
    pub async fn download_url(&self, url: &str) -> Result<BatchSummary> {
        let link =
            SpotifyLink::parse(url).ok_or_else(|| Error::UnrecognizedLink(url.to_string()))?;
        self.download_link(&link).await
    }

    pub async fn download_link(&self, link: &SpotifyLink) -> Result<BatchSummary> {
        match link.kind {
            LinkKind::Track => Ok(BatchSummary::single(
                self.download_track(&link.id, None).await?,
            )),
            LinkKind::Album => self.download_album(&link.id).await,
            LinkKind::Playlist => self.download_playlist(&link.id).await,
            LinkKind::Episode => Ok(BatchSummary::single(self.download_episode(&link.id).await?)),
        }
    }

    /// Download one track into `{root}/{subdir}/`.
    pub async fn download_track(&self, id: &str, subdir: Option<&str>) -> Result<Outcome> {
        let track = self.api.track(id).await?;
        let name = track.display_name();

        if !track.playable {
            println!("  skip: {name} is unavailable");
            return Ok(Outcome::SkippedUnavailable);
        }

        let format = self.config.output.format;
        let artist = track.artists.first().map(String::as_str).unwrap_or("");
        let dest = output::track_path(
            &self.config.output.root,
            subdir,
            artist,
            &track.title,
            format.extension(),
        );

        if dest.exists() && !self.config.output.force {
            println!("  skip: {name} already exists");
            return Ok(Outcome::SkippedExists);
        }

        // The catalog may have relinked the track; the stream fetch must
        // use the id it answered with
        if track.id != id {
            tracing::debug!(requested = id, relinked = %track.id, "Track was relinked");
        }

        println!("  {name}");

        let bytes = match fetch::fetch_audio(&self.session, &track.id, AudioKind::Track).await {
            Ok(bytes) => bytes,
            Err(e) => {
                println!("  skip: {name} cannot be downloaded ({e})");
                return Ok(Outcome::Failed);
            }
        };

        output::ensure_parent_dir(&dest)?;

        if format == AudioFormat::Ogg {
            std::fs::write(&dest, &bytes)?;
        } else if !self.write_and_convert(&bytes, &dest, format, &name)? {
            return Ok(Outcome::Failed);
        }

        self.apply_tags(&dest, &track).await;

        Ok(Outcome::Downloaded)
    }

    /// Download every track of an album into `{Artist} - {Album}/`.
    pub async fn download_album(&self, id: &str) -> Result<BatchSummary> {
        let album = self.api.album(id).await?;
        let subdir = format!("{} - {}", album.artist, album.name);

        println!(">>> Downloading album: {}", album.name);

        let track_ids = self.api.album_track_ids(id).await?;
        self.download_batch(&track_ids, Some(subdir.as_str())).await
    }

    /// Download every track of a playlist into `{Playlist}/`.
    pub async fn download_playlist(&self, id: &str) -> Result<BatchSummary> {
        let playlist = self.api.playlist(id).await?;

        println!(">>> Downloading playlist: {}", playlist.name);

        let (track_ids, ghosts) = self.api.playlist_track_ids(id).await?;
        if ghosts > 0 {
            println!("  skip: {ghosts} entries no longer exist in the catalog");
        }

        self.download_batch(&track_ids, Some(playlist.name.as_str()))
            .await
    }

    /// Download all of the user's saved tracks into `Liked Songs/`.
    pub async fn download_liked(&self) -> Result<BatchSummary> {
        println!(">>> Downloading your liked songs");

        let (track_ids, ghosts) = self.api.saved_track_ids().await?;
        if ghosts > 0 {
            println!("  skip: {ghosts} entries no longer exist in the catalog");
        }

        self.download_batch(&track_ids, Some("Liked Songs")).await
    }

    /// Download a podcast episode as raw Ogg into the podcast root.
    pub async fn download_episode(&self, id: &str) -> Result<Outcome> {
        let episode = self.api.episode(id).await?;
        let dest = output::episode_path(
            &self.config.output.root_podcast,
            &episode.show,
            &episode.name,
        );

        if dest.exists() && !self.config.output.force {
            println!("  skip: {} - {} already exists", episode.show, episode.name);
            return Ok(Outcome::SkippedExists);
        }

        println!("  {} - {}", episode.show, episode.name);

        let bytes = match fetch::fetch_audio(&self.session, id, AudioKind::Episode).await {
            Ok(bytes) => bytes,
            Err(e) => {
                println!("  skip: episode cannot be downloaded ({e})");
                return Ok(Outcome::Failed);
            }
        };

        output::ensure_parent_dir(&dest)?;
        std::fs::write(&dest, &bytes)?;

        Ok(Outcome::Downloaded)
    }

    async fn download_batch(
        &self,
        track_ids: &[String],
        subdir: Option<&str>,
    ) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();

        for track_id in track_ids {
            match self.download_track(track_id, subdir).await {
                Ok(outcome) => summary.record(outcome),
                Err(e) => {
                    // One broken entry must not kill the batch
                    println!("  error: {e}");
                    summary.record(Outcome::Failed);
                }
            }
        }

        Ok(summary)
    }

    /// Write the fetched Ogg to a temp file, convert it into place, clean
    /// up. Returns false when conversion failed (already reported).
    fn write_and_convert(
        &self,
        bytes: &[u8],
        dest: &Path,
        format: AudioFormat,
        name: &str,
    ) -> Result<bool> {
        let temp = dest.with_extension("part");
        std::fs::write(&temp, bytes)?;

        let converted = convert::convert(&temp, dest, format, bitrate_for(self.session.quality()));
        let _ = std::fs::remove_file(&temp);

        match converted {
            Ok(()) => Ok(true),
            Err(e) => {
                println!("  skip: {name} could not be converted ({e})");
                Ok(false)
            }
        }
    }

    /// Tag failures degrade to warnings; the audio on disk is still good.
    async fn apply_tags(&self, dest: &Path, track: &TrackInfo) {
        if let Err(e) = tags::write_tags(dest, track) {
            tracing::warn!("Failed to tag {:?}: {}", dest, e);
        }

        if let Some(url) = &track.cover_url {
            match tags::fetch_cover(url).await {
                Ok(image) => {
                    if let Err(e) = tags::embed_cover(dest, image) {
                        tracing::warn!("Failed to embed cover in {:?}: {}", dest, e);
                    }
                }
                Err(e) => tracing::warn!("Failed to fetch cover art: {}", e),
            }
        }
    }
}

/// Lossy target bitrate for the session's stream quality
fn bitrate_for(quality: AudioFileFormat) -> u32 {
    match quality {
        AudioFileFormat::OGG_VORBIS_320 => 320,
        _ => 160,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_records_outcomes() {
        let mut summary = BatchSummary::default();
        summary.record(Outcome::Downloaded);
        summary.record(Outcome::Downloaded);
        summary.record(Outcome::SkippedExists);
        summary.record(Outcome::Failed);

        assert_eq!(summary.downloaded, 2);
        assert_eq!(summary.skipped_exists, 1);
        assert_eq!(summary.skipped_unavailable, 0);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_summary_single() {
        let summary = BatchSummary::single(Outcome::SkippedUnavailable);
        assert_eq!(summary.skipped_unavailable, 1);
        assert_eq!(summary.total(), 1);
    }

    #[test]
    fn test_summary_display() {
        let mut summary = BatchSummary::default();
        summary.record(Outcome::Downloaded);
        let line = summary.to_string();
        assert!(line.contains("1 downloaded"));
        assert!(line.contains("0 failed"));
    }

    #[test]
    fn test_bitrate_follows_quality() {
        assert_eq!(bitrate_for(AudioFileFormat::OGG_VORBIS_320), 320);
        assert_eq!(bitrate_for(AudioFileFormat::OGG_VORBIS_160), 160);
        assert_eq!(bitrate_for(AudioFileFormat::OGG_VORBIS_96), 160);
    }
}
