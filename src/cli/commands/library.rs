//! Commands over the logged-in user's library: liked songs and the
//! playlist picker.

use tokio::runtime::Runtime;

use super::{Cli, effective_config, ensure_converter, parse_selection, prompt};
use crate::downloader::Downloader;

pub fn cmd_liked(rt: &Runtime, cli: &Cli) -> anyhow::Result<()> {
    let config = effective_config(cli);
    ensure_converter(config.output.format);

    rt.block_on(async {
        let downloader = Downloader::connect(config).await?;
        let summary = downloader.download_liked().await?;

        println!();
        println!("Done: {summary}");
        Ok(())
    })
}

pub fn cmd_playlists(rt: &Runtime, cli: &Cli) -> anyhow::Result<()> {
    let config = effective_config(cli);
    ensure_converter(config.output.format);

    rt.block_on(async {
        let downloader = Downloader::connect(config).await?;

        let playlists = downloader.api().my_playlists().await?;
        if playlists.is_empty() {
            println!("You have no playlists.");
            return Ok(());
        }

        for (i, playlist) in playlists.iter().enumerate() {
            println!("{}. {} | {}", i + 1, playlist.name, playlist.owner);
        }
        println!();

        let input = prompt("Select playlist by number: ")?;
        let index = parse_selection(&input)?;
        let Some(playlist) = index.checked_sub(1).and_then(|i| playlists.get(i)) else {
            anyhow::bail!("{index} is not in the list");
        };

        println!();
        let summary = downloader.download_playlist(&playlist.id).await?;

        println!();
        println!("Done: {summary}");
        Ok(())
    })
}
