//! Command-line surface and dispatch

use crate::downloader::Downloader;
use crate::utils::DownloaderConfig;
use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

/// Download videos and music via yt-dlp
#[derive(Debug, Parser)]
#[command(name = "tubeload", version)]
pub struct Cli {
    /// Video or playlist URL
    pub url: String,

    /// Output directory
    #[arg(short, long, default_value = "downloads")]
    pub output: PathBuf,

    /// Download audio only
    #[arg(short, long)]
    pub audio_only: bool,

    /// Download a whole playlist
    #[arg(short, long)]
    pub playlist: bool,

    /// Quality (best, 4k, 1440p, 1080p, 720p, 480p)
    #[arg(short, long, default_value = "best")]
    pub quality: String,

    /// Container format (mp4, webm, mp3, wav, ...)
    #[arg(short, long, default_value = "mp4")]
    pub format: String,

    /// Show video information only
    #[arg(short, long)]
    pub info: bool,

    /// Maximum number of playlist items to download
    #[arg(long, value_name = "N")]
    pub max: Option<u32>,

    /// List all available formats instead of downloading
    #[arg(long)]
    pub list_formats: bool,
}

/// What one invocation does. Exactly one of these runs per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListFormats,
    Info,
    Playlist,
    Audio,
    Video,
}

impl Cli {
    /// Dispatch precedence, first match wins.
    pub fn action(&self) -> Action {
        if self.list_formats {
            Action::ListFormats
        } else if self.info {
            Action::Info
        } else if self.playlist {
            Action::Playlist
        } else if self.audio_only {
            Action::Audio
        } else {
            Action::Video
        }
    }

    pub async fn run(self) -> Result<()> {
        let downloader = Downloader::new(DownloaderConfig::new(&self.output))?;

        match self.action() {
            Action::ListFormats => downloader.list_formats(&self.url).await,
            Action::Info => {
                let details = downloader.get_video_info(&self.url).await?;
                println!("\n=== Video information ===");
                println!("{details}");
                Ok(())
            }
            Action::Playlist => {
                downloader
                    .download_playlist(&self.url, self.audio_only, self.max)
                    .await
            }
            Action::Audio => {
                downloader
                    .download_audio(&self.url, &self.quality, &self.format)
                    .await
            }
            Action::Video => {
                downloader
                    .download_video(
                        &self.url,
                        &self.quality,
                        &self.format,
                        true,
                        &mut confirm_retry_without_audio,
                    )
                    .await
            }
        }
    }
}

/// Asked once when merging fails because ffmpeg is absent.
fn confirm_retry_without_audio() -> bool {
    print!("Download the video without audio instead? (y/n) [n]: ");
    let _ = std::io::stdout().flush();

    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
