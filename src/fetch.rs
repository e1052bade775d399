//! Raw audio bitstream retrieval.
//!
//! Decryption and CDN access are librespot's job; this module picks the
//! right Vorbis file for the session's quality, requests the audio key and
//! drains the decrypted reader. The first 0xA7 bytes of every decrypted
//! file are an encryption header, not audio, and are skipped.

use std::io::{Read, Seek, SeekFrom};

use librespot_audio::{AudioDecrypt, AudioFile};
use librespot_core::spotify_id::{FileId, SpotifyId, SpotifyItemType};
use librespot_metadata::audio::{AudioFileFormat, AudioItem};

use crate::session::StreamingSession;

/// Length of the encryption header preceding the Ogg stream
const AUDIO_HEADER_LEN: u64 = 0xA7;

/// Pacing hint for the CDN fetch; effectively "as fast as allowed"
const DOWNLOAD_BYTES_PER_SECOND: usize = 1024 * 1024;

/// What kind of audio item an id names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioKind {
    Track,
    Episode,
}

/// Errors while fetching a bitstream
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("'{0}' is not a valid catalog id")]
    InvalidId(String),

    #[error("Item is not available: {0}")]
    Unavailable(String),

    #[error("No Vorbis stream available for this item")]
    NoAudioFile,

    #[error("{0}")]
    Core(#[from] librespot_core::Error),

    #[error("IO error while reading stream: {0}")]
    Io(#[from] std::io::Error),
}

/// Download and decrypt the full Ogg Vorbis stream for a track or episode.
pub async fn fetch_audio(
    streaming: &StreamingSession,
    id: &str,
    kind: AudioKind,
) -> Result<Vec<u8>, FetchError> {
    let spotify_id = parse_id(id, kind)?;
    let session = streaming.session();

    let item = AudioItem::get_file(session, spotify_id).await?;
    if let Err(reason) = &item.availability {
        return Err(FetchError::Unavailable(format!("{reason:?}")));
    }

    let (format, file_id) = select_vorbis_file(&item, streaming.quality())?;
    tracing::debug!(?format, "Selected audio file");

    let key = session.audio_key().request(spotify_id, file_id).await?;
    let encrypted = AudioFile::open(session, file_id, DOWNLOAD_BYTES_PER_SECOND).await?;

    let mut decrypted = AudioDecrypt::new(Some(key), encrypted);
    decrypted.seek(SeekFrom::Start(AUDIO_HEADER_LEN))?;

    let mut bytes = Vec::new();
    decrypted.read_to_end(&mut bytes)?;

    tracing::debug!(len = bytes.len(), "Fetched audio stream");
    Ok(bytes)
}

fn parse_id(id: &str, kind: AudioKind) -> Result<SpotifyId, FetchError> {
    let mut spotify_id =
        SpotifyId::from_base62(id).map_err(|_| FetchError::InvalidId(id.to_string()))?;
    spotify_id.item_type = match kind {
        AudioKind::Track => SpotifyItemType::Track,
        AudioKind::Episode => SpotifyItemType::Episode,
    };
    Ok(spotify_id)
}

/// Best available Vorbis file at or below the requested quality
fn select_vorbis_file(
    item: &AudioItem,
    preferred: AudioFileFormat,
) -> Result<(AudioFileFormat, FileId), FetchError> {
    for format in fallback_chain(preferred) {
        if let Some(file_id) = item.files.get(format).copied() {
            return Ok((*format, file_id));
        }
    }
    Err(FetchError::NoAudioFile)
}

fn fallback_chain(preferred: AudioFileFormat) -> &'static [AudioFileFormat] {
    match preferred {
        AudioFileFormat::OGG_VORBIS_320 => &[
            AudioFileFormat::OGG_VORBIS_320,
            AudioFileFormat::OGG_VORBIS_160,
            AudioFileFormat::OGG_VORBIS_96,
        ],
        AudioFileFormat::OGG_VORBIS_160 => &[
            AudioFileFormat::OGG_VORBIS_160,
            AudioFileFormat::OGG_VORBIS_96,
        ],
        _ => &[AudioFileFormat::OGG_VORBIS_96],
    }
}
