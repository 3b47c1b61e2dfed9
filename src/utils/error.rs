//! Error handling for tubeload

use thiserror::Error;

/// Main error type for tubeload
#[derive(Debug, Error)]
pub enum TubeloadError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    YtDlpNotFound,

    #[error("ffmpeg is not installed; it is required to merge or transcode streams")]
    FfmpegMissing,

    #[error("Failed to extract video info: {0}")]
    ExtractionFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
