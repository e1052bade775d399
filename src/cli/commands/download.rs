//! The download command: resolve a link and fetch whatever it points at.

use tokio::runtime::Runtime;

use super::{Cli, effective_config, ensure_converter};
use crate::downloader::Downloader;

pub fn cmd_download(rt: &Runtime, cli: &Cli, url: &str) -> anyhow::Result<()> {
    let config = effective_config(cli);
    ensure_converter(config.output.format);

    rt.block_on(async {
        let downloader = Downloader::connect(config).await?;
        let summary = downloader.download_url(url).await?;

        if summary.total() > 1 {
            println!();
            println!("Done: {summary}");
        }
        Ok(())
    })
}
