use crate::downloader::options::DownloadPlan;
use crate::extractor::models::VideoInfo;
use crate::utils::TubeloadError;
use async_trait::async_trait;

/// Operations the external media client must provide.
///
/// This trait isolates the facade from the concrete client so tests can
/// substitute a scripted implementation for [`YtDlpClient`].
///
/// [`YtDlpClient`]: crate::extractor::ytdlp::YtDlpClient
#[async_trait]
pub trait MediaClient: Send + Sync {
    /// Run one download described by `plan`.
    async fn download(&self, plan: &DownloadPlan, url: &str) -> Result<(), TubeloadError>;

    /// Extract metadata without downloading any media.
    async fn extract_info(&self, url: &str) -> Result<VideoInfo, TubeloadError>;

    /// Enumerate and print every remote format available for `url`.
    async fn list_formats(&self, url: &str) -> Result<(), TubeloadError>;
}
