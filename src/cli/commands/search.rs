//! Interactive catalog search.
//!
//! Results are numbered across the three categories (tracks first, then
//! albums, then playlists) and the user picks one number to download.

use tokio::runtime::Runtime;

use super::{Cli, effective_config, ensure_converter, parse_selection, prompt};
use crate::api::SearchResults;
use crate::downloader::Downloader;

/// What a picked number resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Selection {
    Track(String),
    Album(String),
    Playlist(String),
}

pub fn cmd_search(
    rt: &Runtime,
    cli: &Cli,
    query: &[String],
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let config = effective_config(cli);
    let limit = limit.unwrap_or(config.search.limit);
    ensure_converter(config.output.format);

    rt.block_on(async {
        let downloader = Downloader::connect(config).await?;

        let query = if query.is_empty() {
            prompt("Enter search: ")?
        } else {
            query.join(" ")
        };

        if query.is_empty() {
            anyhow::bail!("Empty search query");
        }

        let results = downloader.api().search(&query, limit).await?;
        if results.is_empty() {
            println!("No results...");
            return Ok(());
        }

        print_results(&results);

        let input = prompt("Select by number: ")?;
        let index = parse_selection(&input)?;
        let Some(selection) = resolve_selection(&results, index) else {
            anyhow::bail!("{index} is not in the list");
        };

        println!();
        let summary = match selection {
            Selection::Track(id) => {
                crate::downloader::BatchSummary::single(downloader.download_track(&id, None).await?)
            }
            Selection::Album(id) => downloader.download_album(&id).await?,
            Selection::Playlist(id) => downloader.download_playlist(&id).await?,
        };

        if summary.total() > 1 {
            println!();
            println!("Done: {summary}");
        }
        Ok(())
    })
}

/// Print the numbered result listing
fn print_results(results: &SearchResults) {
    let mut index = 1;

    if !results.tracks.is_empty() {
        println!("Tracks");
        for track in &results.tracks {
            println!("  {index}. {} | {}", track.title, track.artist_line());
            index += 1;
        }
        println!();
    }

    if !results.albums.is_empty() {
        println!("Albums");
        for album in &results.albums {
            println!("  {index}. {} | {}", album.name, album.artist);
            index += 1;
        }
        println!();
    }

    if !results.playlists.is_empty() {
        println!("Playlists");
        for playlist in &results.playlists {
            println!("  {index}. {} | {}", playlist.name, playlist.owner);
            index += 1;
        }
        println!();
    }
}

/// Map a 1-based index onto the concatenated track/album/playlist listing
pub(crate) fn resolve_selection(results: &SearchResults, index: usize) -> Option<Selection> {
    if index == 0 {
        return None;
    }
    let mut i = index - 1;

    if i < results.tracks.len() {
        return Some(Selection::Track(results.tracks[i].id.clone()));
    }
    i -= results.tracks.len();

    if i < results.albums.len() {
        return Some(Selection::Album(results.albums[i].id.clone()));
    }
    i -= results.albums.len();

    results
        .playlists
        .get(i)
        .map(|p| Selection::Playlist(p.id.clone()))
}
