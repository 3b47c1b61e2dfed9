//! High-level download operations delegating to the media client

use crate::downloader::options::DownloadPlan;
use crate::extractor::{MediaClient, VideoDetails, YtDlpClient};
use crate::utils::{DownloaderConfig, TubeloadError};
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

/// Facade over the external media client.
///
/// One instance per invocation; holds the output location and delegates
/// every operation to the client after building an invocation plan.
pub struct Downloader {
    config: DownloaderConfig,
    client: Arc<dyn MediaClient>,
}

impl Downloader {
    /// Locate yt-dlp and set up the output directory.
    pub fn new(config: DownloaderConfig) -> Result<Self> {
        let client = Arc::new(YtDlpClient::new()?);
        Self::with_client(config, client)
    }

    /// Same as [`Downloader::new`], with a caller-supplied client.
    pub fn with_client(config: DownloaderConfig, client: Arc<dyn MediaClient>) -> Result<Self> {
        std::fs::create_dir_all(&config.output_dir)?;
        Ok(Self { config, client })
    }

    /// Download a single video.
    ///
    /// If merging fails because ffmpeg is absent, `retry_prompt` is asked
    /// once whether to go on without audio; there is no second retry.
    pub async fn download_video(
        &self,
        url: &str,
        quality: &str,
        container: &str,
        include_audio: bool,
        retry_prompt: &mut dyn FnMut() -> bool,
    ) -> Result<()> {
        let mut include_audio = include_audio;
        let mut retried = false;

        loop {
            let plan =
                DownloadPlan::video(quality, container, include_audio, &self.config.output_dir);
            debug!("video plan: {:?}", plan);

            println!("Downloading video: {url}");
            if !include_audio {
                println!("Note: downloading the video stream only, without audio");
            }

            match self.client.download(&plan, url).await {
                Ok(()) => {
                    println!("Video downloaded successfully");
                    return Ok(());
                }
                Err(TubeloadError::FfmpegMissing) if include_audio && !retried => {
                    println!("ffmpeg was not found, but it is needed to merge video and audio.");
                    println!("Hint: install ffmpeg, or retry with the video stream only.");
                    if !retry_prompt() {
                        return Err(TubeloadError::FfmpegMissing.into());
                    }
                    include_audio = false;
                    retried = true;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Download the audio track only, transcoded to `container`.
    pub async fn download_audio(&self, url: &str, quality: &str, container: &str) -> Result<()> {
        // The selector is always bestaudio/best; `quality` is kept for
        // parity with the video surface and left to the external tool.
        debug!("audio download requested with quality {quality}");
        let plan = DownloadPlan::audio(container, &self.config.output_dir);

        println!("Downloading audio: {url}");
        self.client.download(&plan, url).await?;
        println!("Audio downloaded successfully");
        Ok(())
    }

    /// Download every item of a playlist into a per-playlist subdirectory.
    pub async fn download_playlist(
        &self,
        url: &str,
        audio_only: bool,
        max_items: Option<u32>,
    ) -> Result<()> {
        let plan = DownloadPlan::playlist(audio_only, max_items, &self.config.output_dir);
        debug!("playlist plan: {:?}", plan);

        println!("Downloading playlist: {url}");
        self.client.download(&plan, url).await?;
        println!("Playlist downloaded successfully");
        Ok(())
    }

    /// Query metadata without transferring any media.
    pub async fn get_video_info(&self, url: &str) -> Result<VideoDetails> {
        let info = self.client.extract_info(url).await?;
        Ok(VideoDetails::from(&info))
    }

    /// Print every format yt-dlp can see for the URL.
    pub async fn list_formats(&self, url: &str) -> Result<()> {
        self.client.list_formats(url).await?;
        Ok(())
    }
}
