//! Audio file tagging.
//!
//! Uses the lofty crate for format-independent metadata access; the same
//! code path tags MP3 (ID3v2), FLAC and Ogg Vorbis outputs.

use std::path::Path;

use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::probe::Probe;
use lofty::tag::{Accessor, Tag, TagExt};

use crate::api::TrackInfo;
use crate::error::{Error, Result};

/// Write the catalog metadata into the file's primary tag.
pub fn write_tags(path: &Path, track: &TrackInfo) -> Result<()> {
    let mut tagged_file = Probe::open(path)
        .map_err(|e| Error::tagging(path, e.to_string()))?
        .read()
        .map_err(|e| Error::tagging(path, e.to_string()))?;

    let tag_type = tagged_file.primary_tag_type();

    // Get or create the tag for this container
    let tag = match tagged_file.tag_mut(tag_type) {
        Some(tag) => tag,
        None => {
            tagged_file.insert_tag(Tag::new(tag_type));
            tagged_file
                .tag_mut(tag_type)
                .ok_or_else(|| Error::tagging(path, "failed to create tag"))?
        }
    };

    tag.set_title(track.title.clone());
    tag.set_artist(track.artist_line());
    tag.set_album(track.album.clone());
    tag.set_track(track.track_number);
    tag.set_disk(track.disc_number);
    if let Some(year) = track.release_year {
        tag.set_year(year as u32);
    }

    tag.save_to_path(path, WriteOptions::default())
        .map_err(|e| Error::tagging(path, e.to_string()))?;

    Ok(())
}

/// Attach a front-cover picture to the file.
pub fn embed_cover(path: &Path, image: Vec<u8>) -> Result<()> {
    let mut tagged_file = Probe::open(path)
        .map_err(|e| Error::tagging(path, e.to_string()))?
        .read()
        .map_err(|e| Error::tagging(path, e.to_string()))?;

    let tag_type = tagged_file.primary_tag_type();
    let tag = match tagged_file.tag_mut(tag_type) {
        Some(tag) => tag,
        None => {
            tagged_file.insert_tag(Tag::new(tag_type));
            tagged_file
                .tag_mut(tag_type)
                .ok_or_else(|| Error::tagging(path, "failed to create tag"))?
        }
    };

    // The catalog's image CDN serves JPEG
    let picture = Picture::new_unchecked(
        PictureType::CoverFront,
        Some(MimeType::Jpeg),
        None,
        image,
    );
    tag.push_picture(picture);

    tag.save_to_path(path, WriteOptions::default())
        .map_err(|e| Error::tagging(path, e.to_string()))?;

    Ok(())
}

/// Download the cover image bytes.
pub async fn fetch_cover(url: &str) -> std::result::Result<Vec<u8>, reqwest::Error> {
    let response = reqwest::get(url).await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_track() -> TrackInfo {
        TrackInfo {
            id: "4uLU6hMCjMI75M1A2tKUQC".to_string(),
            title: "Title".to_string(),
            artists: vec!["Artist".to_string()],
            album: "Album".to_string(),
            release_year: Some(1987),
            disc_number: 1,
            track_number: 1,
            cover_url: None,
            playable: true,
        }
    }

    #[test]
    fn test_write_tags_non_audio_file_returns_error() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "This is just some text, not music.").expect("Failed to write");

        let result = write_tags(file.path(), &sample_track());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_tags_non_existent_file_returns_error() {
        let result = write_tags(Path::new("non_existent_file.mp3"), &sample_track());
        assert!(result.is_err());
    }

    #[test]
    fn test_embed_cover_non_audio_file_returns_error() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "Not an audio file").expect("Failed to write");

        let result = embed_cover(file.path(), vec![0xFF, 0xD8, 0xFF]);
        assert!(result.is_err());
    }
}
