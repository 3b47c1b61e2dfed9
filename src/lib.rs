//! tubeload library
//!
//! A thin front-end over the external yt-dlp binary: option mapping from
//! user-facing quality/format choices to yt-dlp invocations, a download
//! facade, a clap CLI, and an interactive menu.

pub mod cli;
pub mod downloader;
pub mod extractor;
pub mod interactive;
pub mod utils;

// Re-export main types for easier use
pub use downloader::{DownloadPlan, Downloader};
pub use extractor::{MediaClient, VideoDetails, VideoInfo, YtDlpClient};
pub use utils::{DownloaderConfig, TubeloadError};
