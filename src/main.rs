//! tubeload - YouTube video/music downloader built on yt-dlp
//!
//! With arguments this is a single-shot CLI; invoked bare it drops into
//! an interactive menu. Expected failures are printed, never raised: the
//! process exits 0 unless something truly unexpected happens.

use anyhow::Result;
use clap::Parser;
use tubeload::cli::Cli;
use tubeload::interactive;
use tubeload::utils::DownloaderConfig;
use tubeload::Downloader;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // No arguments at all: interactive mode.
    if std::env::args().len() <= 1 {
        match Downloader::new(DownloaderConfig::default()) {
            Ok(downloader) => {
                if let Err(e) = interactive::run(&downloader).await {
                    eprintln!("Error: {e}");
                }
            }
            Err(e) => eprintln!("Error: {e}"),
        }
        return Ok(());
    }

    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        eprintln!("Error: {e}");
    }

    Ok(())
}
