//! Web API Data Transfer Objects
//!
//! These types match EXACTLY what the Web API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the api module - convert to domain types.
//!
//! API Reference: https://developer.spotify.com/documentation/web-api
//!
//! Catalog objects come in "full" and "simplified" flavors; simplified
//! tracks (inside album listings) carry no album of their own.

use serde::Deserialize;

/// Response of `GET /tracks?ids=...` - entries are null for unknown ids
#[derive(Debug, Clone, Deserialize)]
pub struct TracksResponse {
    pub tracks: Vec<Option<Track>>,
}

/// Full track object
#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    pub album: Album,
    #[serde(default = "one")]
    pub disc_number: u32,
    #[serde(default)]
    pub track_number: u32,
    /// Only present when the request carried a market
    pub is_playable: Option<bool>,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    pub name: String,
}

/// Album object; also used for `GET /albums/{id}` and search hits
#[derive(Debug, Clone, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub images: Vec<Image>,
    /// YYYY, YYYY-MM or YYYY-MM-DD depending on release_date_precision
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Simplified track, as returned by `GET /albums/{id}/tracks`
#[derive(Debug, Clone, Deserialize)]
pub struct SimplifiedTrack {
    pub id: Option<String>,
    pub name: String,
}

/// One offset/limit page of items
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
}

/// Entry of `GET /playlists/{id}/tracks` and `GET /me/tracks`; `track` is
/// null when the song no longer exists in the catalog
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

/// Track reference inside a playlist; episodes on playlists carry no
/// album-style fields, so everything past the id is optional
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTrack {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

/// Response of `GET /playlists/{id}?fields=name,owner(display_name)`
#[derive(Debug, Clone, Deserialize)]
pub struct Playlist {
    pub name: String,
    pub owner: Option<Owner>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    pub display_name: Option<String>,
}

/// Playlist as listed by `GET /me/playlists` and search
#[derive(Debug, Clone, Deserialize)]
pub struct SimplifiedPlaylist {
    pub id: String,
    pub name: String,
    pub owner: Option<Owner>,
}

/// Response of `GET /episodes/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct Episode {
    pub id: String,
    pub name: String,
    pub show: Show,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Show {
    pub name: String,
}

/// Response of `GET /search` - only requested categories are present,
/// and item arrays may contain nulls
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<Page<Option<Track>>>,
    pub albums: Option<Page<Option<Album>>>,
    pub playlists: Option<Page<Option<SimplifiedPlaylist>>>,
}

/// Error body the API sends with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_track_response() {
        let json = r#"{
            "tracks": [{
                "id": "4uLU6hMCjMI75M1A2tKUQC",
                "name": "Never Gonna Give You Up",
                "artists": [{"name": "Rick Astley"}],
                "album": {
                    "id": "6XhjNHCyCDyyGJRM5mg40G",
                    "name": "Whenever You Need Somebody",
                    "images": [{"url": "https://i.scdn.co/image/a", "width": 640, "height": 640}],
                    "release_date": "1987-11-12"
                },
                "disc_number": 1,
                "track_number": 1,
                "is_playable": true
            }, null]
        }"#;

        let parsed: TracksResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.tracks.len(), 2);
        let track = parsed.tracks[0].as_ref().unwrap();
        assert_eq!(track.name, "Never Gonna Give You Up");
        assert_eq!(track.album.release_date.as_deref(), Some("1987-11-12"));
        assert_eq!(track.is_playable, Some(true));
        assert!(parsed.tracks[1].is_none());
    }

    #[test]
    fn test_parse_playlist_item_with_ghost_track() {
        let json = r#"{"track": null}"#;
        let parsed: PlaylistItem = serde_json::from_str(json).unwrap();
        assert!(parsed.track.is_none());
    }

    #[test]
    fn test_parse_search_response_partial_categories() {
        let json = r#"{
            "tracks": {"items": []},
            "playlists": {"items": [
                {"id": "37i9dQZF1DXcBWIGoYBM5M", "name": "Hits", "owner": {"display_name": "Spotify"}},
                null
            ]}
        }"#;

        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.albums.is_none());
        let playlists = parsed.playlists.unwrap();
        assert_eq!(playlists.items.len(), 2);
        assert!(playlists.items[1].is_none());
    }

    #[test]
    fn test_parse_error_response() {
        let json = r#"{"error": {"status": 404, "message": "Non existing id"}}"#;
        let parsed: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error.message, "Non existing id");
    }

    #[test]
    fn test_parse_episode() {
        let json = r#"{
            "id": "5Xt5DXGzch68nYYamXrNxZ",
            "name": "Pilot",
            "show": {"name": "Some Show"}
        }"#;
        let parsed: Episode = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.show.name, "Some Show");
    }
}
