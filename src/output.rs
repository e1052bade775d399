//! Output file naming.
//!
//! Download destinations are built from catalog metadata, so every
//! metadata-derived component is sanitized before it becomes part of a
//! path. Configured root directories are used as-is.

use std::path::{Path, PathBuf};

/// Strip characters that are invalid in filenames on at least one
/// supported platform. `|` reads like a separator, so it becomes `-`.
pub fn sanitize(value: &str) -> String {
    value
        .chars()
        .filter_map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '\'' | '<' | '>' | '"' => None,
            '|' => Some('-'),
            c => Some(c),
        })
        .collect()
}

/// Destination for a track: `{root}/{subdir}/{artist} - {title}.{ext}`.
///
/// `subdir` groups album and playlist downloads; pass `None` for loose
/// tracks.
pub fn track_path(
    root: &Path,
    subdir: Option<&str>,
    artist: &str,
    title: &str,
    ext: &str,
) -> PathBuf {
    let filename = format!("{} - {}.{}", sanitize(artist), sanitize(title), ext);
    match subdir {
        Some(dir) => root.join(sanitize(dir)).join(filename),
        None => root.join(filename),
    }
}

/// Destination for a podcast episode: `{root}/{show} - {episode}.ogg`.
pub fn episode_path(root: &Path, show: &str, episode: &str) -> PathBuf {
    root.join(format!("{} - {}.ogg", sanitize(show), sanitize(episode)))
}

/// Create the parent directory of a destination, if needed.
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_removes_invalid_chars() {
        assert_eq!(sanitize("AC/DC"), "ACDC");
        assert_eq!(sanitize("Track: Title?"), "Track Title");
        assert_eq!(sanitize("Valid Name"), "Valid Name");
        assert_eq!(sanitize("a<b>c"), "abc");
        assert_eq!(sanitize("what's \"this\""), "whats this");
    }

    #[test]
    fn test_sanitize_maps_pipe_to_dash() {
        assert_eq!(sanitize("pipe|test"), "pipe-test");
    }

    #[test]
    fn test_track_path_with_subdir() {
        let path = track_path(
            Path::new("/music"),
            Some("Queen - Greatest Hits"),
            "Queen",
            "Bohemian Rhapsody",
            "mp3",
        );
        assert_eq!(
            path,
            PathBuf::from("/music/Queen - Greatest Hits/Queen - Bohemian Rhapsody.mp3")
        );
    }

    #[test]
    fn test_track_path_without_subdir() {
        let path = track_path(Path::new("/music"), None, "Queen", "Bohemian Rhapsody", "ogg");
        assert_eq!(path, PathBuf::from("/music/Queen - Bohemian Rhapsody.ogg"));
    }

    #[test]
    fn test_track_path_sanitizes_components() {
        let path = track_path(
            Path::new("/music"),
            Some("Mix/2024"),
            "AC/DC",
            "What?",
            "mp3",
        );
        assert_eq!(path, PathBuf::from("/music/Mix2024/ACDC - What.mp3"));
    }

    #[test]
    fn test_episode_path() {
        let path = episode_path(Path::new("/podcasts"), "Some Show", "Pilot: Part 1");
        assert_eq!(path, PathBuf::from("/podcasts/Some Show - Pilot Part 1.ogg"));
    }

    #[test]
    fn test_ensure_parent_dir_creates_directories() {
        let temp = tempfile::tempdir().unwrap();
        let dest = temp.path().join("a").join("b").join("file.mp3");

        ensure_parent_dir(&dest).unwrap();
        assert!(dest.parent().unwrap().is_dir());
    }
}

/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Generate an arbitrary string that might contain invalid characters
    fn arbitrary_component() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-zA-Z0-9 /\\\\:*?'<>\"|_.-]{1,50}")
            .unwrap()
            .prop_filter("non-empty", |s| !s.is_empty())
    }

    proptest! {
        /// Sanitized components should never contain path separators
        #[test]
        fn sanitize_removes_path_separators(input in arbitrary_component()) {
            let sanitized = sanitize(&input);
            prop_assert!(!sanitized.contains('/'), "Found / in: {}", sanitized);
            prop_assert!(!sanitized.contains('\\'), "Found \\ in: {}", sanitized);
        }

        /// Sanitized components should never contain Windows-invalid characters
        #[test]
        fn sanitize_removes_invalid_chars(input in arbitrary_component()) {
            let sanitized = sanitize(&input);
            for c in [':', '*', '?', '\'', '<', '>', '"', '|'] {
                prop_assert!(!sanitized.contains(c), "Found {} in: {}", c, sanitized);
            }
        }

        /// Sanitizing twice changes nothing
        #[test]
        fn sanitize_is_idempotent(input in arbitrary_component()) {
            let once = sanitize(&input);
            prop_assert_eq!(sanitize(&once), once.clone());
        }

        /// Track paths always stay under the root
        #[test]
        fn track_path_stays_under_root(
            subdir in proptest::option::of(arbitrary_component()),
            artist in arbitrary_component(),
            title in arbitrary_component(),
        ) {
            let root = PathBuf::from("/music/library");
            let path = track_path(&root, subdir.as_deref(), &artist, &title, "mp3");
            prop_assert!(
                path.starts_with(&root),
                "Destination {:?} should start with {:?}",
                path,
                root
            );
        }
    }
}
