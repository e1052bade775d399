//! Internal domain models for catalog metadata.
//!
//! These types are OUR types - they don't change when the external API
//! changes. All API responses get converted into these via the adapter.

/// Everything needed to download, name and tag one track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    /// Catalog id. May differ from the id that was asked for when the
    /// catalog relinked the track to another market's copy; stream fetches
    /// must use this one.
    pub id: String,
    pub title: String,
    pub artists: Vec<String>,
    pub album: String,
    pub release_year: Option<i32>,
    pub disc_number: u32,
    pub track_number: u32,
    /// Largest cover image, if the release has artwork
    pub cover_url: Option<String>,
    pub playable: bool,
}

impl TrackInfo {
    /// `Artist - Title`, used for filenames and progress output
    pub fn display_name(&self) -> String {
        match self.artists.first() {
            Some(artist) => format!("{} - {}", artist, self.title),
            None => self.title.clone(),
        }
    }

    /// All artists joined for the tag value
    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumInfo {
    pub id: String,
    pub name: String,
    pub artist: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistInfo {
    pub id: String,
    pub name: String,
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeInfo {
    pub id: String,
    pub name: String,
    pub show: String,
}

/// One page of search hits across the three downloadable categories
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub tracks: Vec<TrackInfo>,
    pub albums: Vec<AlbumInfo>,
    pub playlists: Vec<PlaylistInfo>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.albums.is_empty() && self.playlists.is_empty()
    }
}

/// Errors from the Web API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Not authorized - the session token may have expired")]
    Unauthorized,

    #[error("API request failed: {0}")]
    Api(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(artists: &[&str]) -> TrackInfo {
        TrackInfo {
            id: "4uLU6hMCjMI75M1A2tKUQC".to_string(),
            title: "Never Gonna Give You Up".to_string(),
            artists: artists.iter().map(|s| s.to_string()).collect(),
            album: "Whenever You Need Somebody".to_string(),
            release_year: Some(1987),
            disc_number: 1,
            track_number: 1,
            cover_url: None,
            playable: true,
        }
    }

    #[test]
    fn test_display_name_uses_first_artist() {
        let t = track(&["Rick Astley", "Someone Else"]);
        assert_eq!(t.display_name(), "Rick Astley - Never Gonna Give You Up");
    }

    #[test]
    fn test_display_name_without_artists() {
        let t = track(&[]);
        assert_eq!(t.display_name(), "Never Gonna Give You Up");
    }

    #[test]
    fn test_artist_line_joins_all() {
        let t = track(&["A", "B", "C"]);
        assert_eq!(t.artist_line(), "A, B, C");
    }

    #[test]
    fn test_search_results_empty() {
        assert!(SearchResults::default().is_empty());
        let results = SearchResults {
            tracks: vec![track(&["A"])],
            ..Default::default()
        };
        assert!(!results.is_empty());
    }
}
