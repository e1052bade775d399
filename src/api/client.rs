//! Web API HTTP client
//!
//! Thin bearer-authenticated wrapper over the catalog REST endpoints.
//! Listing endpoints page with offset/limit until the service returns a
//! short page.

use serde::de::DeserializeOwned;

use super::adapter;
use super::domain::{AlbumInfo, ApiError, EpisodeInfo, PlaylistInfo, SearchResults, TrackInfo};
use super::dto;

/// Default page size for listing endpoints
const PAGE_SIZE: usize = 50;
/// Playlist track listings allow larger pages
const PLAYLIST_PAGE_SIZE: usize = 100;

const USER_AGENT: &str = concat!("spotgrab/", env!("CARGO_PKG_VERSION"));

/// Catalog API client
pub struct WebApiClient {
    http_client: reqwest::Client,
    base_url: String,
    token: String,
}

impl WebApiClient {
    /// Create a new client around a Web API bearer token
    pub fn new(token: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: "https://api.spotify.com/v1".to_string(),
            token: token.into(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Look up one track. `market=from_token` makes the response carry
    /// `is_playable` and relink unavailable tracks where possible.
    pub async fn track(&self, id: &str) -> Result<TrackInfo, ApiError> {
        let url = format!("{}/tracks?ids={}&market=from_token", self.base_url, id);
        let response: dto::TracksResponse = self.get_json(&url, &[]).await?;

        response
            .tracks
            .into_iter()
            .next()
            .flatten()
            .map(adapter::to_track_info)
            .ok_or(ApiError::NotFound)
    }

    /// Album name and primary artist
    pub async fn album(&self, id: &str) -> Result<AlbumInfo, ApiError> {
        let url = format!("{}/albums/{}", self.base_url, id);
        let album: dto::Album = self.get_json(&url, &[]).await?;
        Ok(adapter::to_album_info(album))
    }

    /// Ids of every track on an album, in album order
    pub async fn album_track_ids(&self, id: &str) -> Result<Vec<String>, ApiError> {
        let path = format!("/albums/{}/tracks", id);
        let items: Vec<dto::SimplifiedTrack> = self.fetch_paged(&path, PAGE_SIZE).await?;
        Ok(items.into_iter().filter_map(|t| t.id).collect())
    }

    /// Playlist name and owner
    pub async fn playlist(&self, id: &str) -> Result<PlaylistInfo, ApiError> {
        let url = format!(
            "{}/playlists/{}?fields=name,owner(display_name)",
            self.base_url, id
        );
        let playlist: dto::Playlist = self.get_json(&url, &[]).await?;
        Ok(adapter::to_playlist_info(id.to_string(), playlist))
    }

    /// Ids of every track on a playlist, plus how many entries no longer
    /// exist in the catalog (ghost tracks are silently dropped by the API
    /// client; callers report them)
    pub async fn playlist_track_ids(&self, id: &str) -> Result<(Vec<String>, usize), ApiError> {
        let path = format!("/playlists/{}/tracks", id);
        let items: Vec<dto::PlaylistItem> = self.fetch_paged(&path, PLAYLIST_PAGE_SIZE).await?;
        Ok(split_ghosts(items))
    }

    /// Episode name and show
    pub async fn episode(&self, id: &str) -> Result<EpisodeInfo, ApiError> {
        let url = format!("{}/episodes/{}", self.base_url, id);
        let episode: dto::Episode = self.get_json(&url, &[]).await?;
        Ok(adapter::to_episode_info(episode))
    }

    /// Ids of the logged-in user's saved tracks, plus the ghost count
    pub async fn saved_track_ids(&self) -> Result<(Vec<String>, usize), ApiError> {
        let items: Vec<dto::PlaylistItem> = self.fetch_paged("/me/tracks", PAGE_SIZE).await?;
        Ok(split_ghosts(items))
    }

    /// The logged-in user's playlists
    pub async fn my_playlists(&self) -> Result<Vec<PlaylistInfo>, ApiError> {
        let items: Vec<dto::SimplifiedPlaylist> =
            self.fetch_paged("/me/playlists", PAGE_SIZE).await?;
        Ok(items
            .into_iter()
            .map(adapter::to_simplified_playlist_info)
            .collect())
    }

    /// Search tracks, albums and playlists
    pub async fn search(&self, query: &str, limit: usize) -> Result<SearchResults, ApiError> {
        let url = format!("{}/search", self.base_url);
        let limit = limit.to_string();
        let response: dto::SearchResponse = self
            .get_json(
                &url,
                &[
                    ("q", query),
                    ("type", "track,album,playlist"),
                    ("limit", &limit),
                    ("offset", "0"),
                ],
            )
            .await?;
        Ok(adapter::to_search_results(response))
    }

    /// Loop over an offset/limit listing until a short page comes back
    async fn fetch_paged<T: DeserializeOwned>(
        &self,
        path: &str,
        page_size: usize,
    ) -> Result<Vec<T>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut items = Vec::new();
        let mut offset = 0usize;

        loop {
            let limit = page_size.to_string();
            let offset_s = offset.to_string();
            let page: dto::Page<T> = self
                .get_json(&url, &[("limit", &limit), ("offset", &offset_s)])
                .await?;

            let count = page.items.len();
            items.extend(page.items);

            if count < page_size {
                break;
            }
            offset += page_size;
        }

        Ok(items)
    }

    /// Send the GET and map the response status
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let mut request = self.http_client.get(url).bearer_auth(&self.token);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ApiError::RateLimited);
        }

        if !status.is_success() {
            // Try to parse error response
            if let Ok(error) = response.json::<dto::ErrorResponse>().await {
                return Err(ApiError::Api(error.error.message));
            }
            return Err(ApiError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

/// Partition listing entries into live track ids and a removed-entry count
fn split_ghosts(items: Vec<dto::PlaylistItem>) -> (Vec<String>, usize) {
    let total = items.len();
    let ids: Vec<String> = items
        .into_iter()
        .filter_map(|item| item.track.and_then(|t| t.id))
        .collect();
    let ghosts = total - ids.len();
    (ids, ghosts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = WebApiClient::new("token");
        assert_eq!(client.base_url, "https://api.spotify.com/v1");
    }

    #[test]
    fn test_client_with_custom_url() {
        let client = WebApiClient::with_base_url("http://localhost:8080", "token");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_user_agent_format() {
        assert!(USER_AGENT.starts_with("spotgrab/"));
    }

    #[test]
    fn test_split_ghosts() {
        let items: Vec<dto::PlaylistItem> = serde_json::from_str(
            r#"[
                {"track": {"id": "4uLU6hMCjMI75M1A2tKUQC", "name": "A"}},
                {"track": null},
                {"track": {"id": null, "name": "local file"}}
            ]"#,
        )
        .unwrap();

        let (ids, ghosts) = split_ghosts(items);
        assert_eq!(ids, vec!["4uLU6hMCjMI75M1A2tKUQC"]);
        assert_eq!(ghosts, 2);
    }
}
