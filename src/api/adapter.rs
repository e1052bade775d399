//! Adapter layer: Convert Web API DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! If the service changes its response format, only this file and dto.rs
//! need to change.

use super::domain::{AlbumInfo, EpisodeInfo, PlaylistInfo, SearchResults, TrackInfo};
use super::dto;

/// Convert a full track object. Search results carry no `is_playable`
/// (no market on the request), which counts as playable.
pub fn to_track_info(track: dto::Track) -> TrackInfo {
    let release_year = track
        .album
        .release_date
        .as_deref()
        .and_then(parse_release_year);

    // Covers are sorted largest-first by the API
    let cover_url = track.album.images.first().map(|i| i.url.clone());

    TrackInfo {
        id: track.id,
        title: track.name,
        artists: track.artists.into_iter().map(|a| a.name).collect(),
        album: track.album.name,
        release_year,
        disc_number: track.disc_number,
        track_number: track.track_number,
        cover_url,
        playable: track.is_playable.unwrap_or(true),
    }
}

pub fn to_album_info(album: dto::Album) -> AlbumInfo {
    let artist = album
        .artists
        .first()
        .map(|a| a.name.clone())
        .unwrap_or_default();

    AlbumInfo {
        id: album.id,
        name: album.name,
        artist,
    }
}

pub fn to_playlist_info(id: String, playlist: dto::Playlist) -> PlaylistInfo {
    PlaylistInfo {
        id,
        name: playlist.name.trim().to_string(),
        owner: owner_name(playlist.owner),
    }
}

pub fn to_simplified_playlist_info(playlist: dto::SimplifiedPlaylist) -> PlaylistInfo {
    PlaylistInfo {
        id: playlist.id,
        name: playlist.name.trim().to_string(),
        owner: owner_name(playlist.owner),
    }
}

pub fn to_episode_info(episode: dto::Episode) -> EpisodeInfo {
    EpisodeInfo {
        id: episode.id,
        name: episode.name,
        show: episode.show.name,
    }
}

/// Flatten a search response, dropping null entries and empty categories
pub fn to_search_results(response: dto::SearchResponse) -> SearchResults {
    let tracks = response
        .tracks
        .map(|page| page.items.into_iter().flatten().map(to_track_info).collect())
        .unwrap_or_default();

    let albums = response
        .albums
        .map(|page| page.items.into_iter().flatten().map(to_album_info).collect())
        .unwrap_or_default();

    let playlists = response
        .playlists
        .map(|page| {
            page.items
                .into_iter()
                .flatten()
                .map(to_simplified_playlist_info)
                .collect()
        })
        .unwrap_or_default();

    SearchResults {
        tracks,
        albums,
        playlists,
    }
}

fn owner_name(owner: Option<dto::Owner>) -> String {
    owner
        .and_then(|o| o.display_name)
        .unwrap_or_else(|| "Unknown".to_string())
}

/// The year is the leading component of YYYY, YYYY-MM or YYYY-MM-DD
fn parse_release_year(date: &str) -> Option<i32> {
    date.split('-').next()?.parse().ok()
}
