//! Facade and menu tests against a scripted media client, no network.

use async_trait::async_trait;
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tubeload::downloader::options::DownloadPlan;
use tubeload::extractor::{MediaClient, VideoInfo};
use tubeload::interactive;
use tubeload::utils::{DownloaderConfig, TubeloadError};
use tubeload::Downloader;

/// Client that records every plan it receives and fails with the scripted
/// errors, in order, before succeeding.
#[derive(Default)]
struct ScriptedClient {
    failures: Mutex<Vec<TubeloadError>>,
    calls: Mutex<Vec<DownloadPlan>>,
    info: Option<VideoInfo>,
}

impl ScriptedClient {
    fn failing_with(failures: Vec<TubeloadError>) -> Self {
        Self {
            failures: Mutex::new(failures),
            ..Default::default()
        }
    }

    fn recorded_calls(&self) -> Vec<DownloadPlan> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaClient for ScriptedClient {
    async fn download(&self, plan: &DownloadPlan, _url: &str) -> Result<(), TubeloadError> {
        self.calls.lock().unwrap().push(plan.clone());
        let mut failures = self.failures.lock().unwrap();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures.remove(0))
        }
    }

    async fn extract_info(&self, _url: &str) -> Result<VideoInfo, TubeloadError> {
        self.info
            .clone()
            .ok_or_else(|| TubeloadError::ExtractionFailed("no info scripted".to_string()))
    }

    async fn list_formats(&self, _url: &str) -> Result<(), TubeloadError> {
        Ok(())
    }
}

fn downloader_with(client: Arc<ScriptedClient>, temp: &TempDir) -> Downloader {
    let config = DownloaderConfig::new(temp.path().join("downloads"));
    Downloader::with_client(config, client).expect("facade construction")
}

const URL: &str = "https://example.com/watch?v=abc";

#[tokio::test]
async fn output_directory_is_created_eagerly() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("nested").join("downloads");
    let config = DownloaderConfig::new(&target);

    assert!(!target.exists());
    Downloader::with_client(config, Arc::new(ScriptedClient::default())).unwrap();
    assert!(target.is_dir());
}

#[tokio::test]
async fn declined_retry_stops_after_one_attempt() {
    let temp = TempDir::new().unwrap();
    let client = Arc::new(ScriptedClient::failing_with(vec![
        TubeloadError::FfmpegMissing,
    ]));
    let downloader = downloader_with(client.clone(), &temp);

    let mut prompts = 0;
    let mut decline = || {
        prompts += 1;
        false
    };

    let result = downloader
        .download_video(URL, "best", "mp4", true, &mut decline)
        .await;

    assert!(result.is_err());
    assert_eq!(prompts, 1, "retry must be offered exactly once");
    assert_eq!(client.recorded_calls().len(), 1, "no second attempt");
}

#[tokio::test]
async fn accepted_retry_drops_audio_and_merge_directive() {
    let temp = TempDir::new().unwrap();
    let client = Arc::new(ScriptedClient::failing_with(vec![
        TubeloadError::FfmpegMissing,
    ]));
    let downloader = downloader_with(client.clone(), &temp);

    let mut accept = || true;
    downloader
        .download_video(URL, "1080p", "mp4", true, &mut accept)
        .await
        .expect("second attempt succeeds");

    let calls = client.recorded_calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].format.contains('+'));
    assert_eq!(calls[0].merge_output_format.as_deref(), Some("mp4"));
    assert!(!calls[1].format.contains('+'), "retry is video-only");
    assert_eq!(calls[1].merge_output_format, None);
}

#[tokio::test]
async fn ffmpeg_missing_without_audio_is_not_retried() {
    let temp = TempDir::new().unwrap();
    let client = Arc::new(ScriptedClient::failing_with(vec![
        TubeloadError::FfmpegMissing,
    ]));
    let downloader = downloader_with(client.clone(), &temp);

    let mut prompts = 0;
    let mut count = || {
        prompts += 1;
        true
    };

    let result = downloader
        .download_video(URL, "720p", "mp4", false, &mut count)
        .await;

    assert!(result.is_err());
    assert_eq!(prompts, 0, "no retry offer without audio in play");
    assert_eq!(client.recorded_calls().len(), 1);
}

#[tokio::test]
async fn other_failures_abort_without_retry() {
    let temp = TempDir::new().unwrap();
    let client = Arc::new(ScriptedClient::failing_with(vec![
        TubeloadError::DownloadFailed("ERROR: Unsupported URL".to_string()),
    ]));
    let downloader = downloader_with(client.clone(), &temp);

    let mut prompts = 0;
    let mut count = || {
        prompts += 1;
        true
    };

    let result = downloader
        .download_video(URL, "best", "mp4", true, &mut count)
        .await;

    assert!(result.is_err());
    assert_eq!(prompts, 0);
    assert_eq!(client.recorded_calls().len(), 1);
}

#[tokio::test]
async fn audio_download_transcodes_to_requested_container() {
    let temp = TempDir::new().unwrap();
    let client = Arc::new(ScriptedClient::default());
    let downloader = downloader_with(client.clone(), &temp);

    downloader.download_audio(URL, "best", "mp3").await.unwrap();

    let calls = client.recorded_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].format, "bestaudio/best");
    let extract = calls[0].extract_audio.as_ref().expect("extraction step");
    assert_eq!(extract.codec, "mp3");
    assert_eq!(extract.quality.as_deref(), Some("192"));
}

#[tokio::test]
async fn playlist_download_caps_items_and_uses_subdirectory() {
    let temp = TempDir::new().unwrap();
    let client = Arc::new(ScriptedClient::default());
    let downloader = downloader_with(client.clone(), &temp);

    downloader
        .download_playlist("https://example.com/playlist?list=xyz", false, Some(3))
        .await
        .unwrap();

    let calls = client.recorded_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].playlist_end, Some(3));
    assert!(calls[0].output_template.contains("%(playlist)s"));
    assert!(calls[0].to_args().contains(&"--yes-playlist".to_string()));
}

#[tokio::test]
async fn video_info_projects_missing_fields_as_na() {
    let temp = TempDir::new().unwrap();
    let client = Arc::new(ScriptedClient {
        info: Some(
            serde_json::from_str(r#"{"id": "abc", "title": "A Video", "duration": 61.0}"#)
                .unwrap(),
        ),
        ..Default::default()
    });
    let downloader = downloader_with(client, &temp);

    let details = downloader.get_video_info(URL).await.unwrap();
    assert_eq!(details.title, "A Video");
    assert_eq!(details.duration, "61");
    assert_eq!(details.description, "N/A");
    assert_eq!(details.uploader, "N/A");
}

#[tokio::test]
async fn menu_choice_six_exits_immediately() {
    let temp = TempDir::new().unwrap();
    let client = Arc::new(ScriptedClient::default());
    let downloader = downloader_with(client.clone(), &temp);

    let mut input = Cursor::new(b"6\n".to_vec());
    let mut output = Vec::new();
    interactive::run_loop(&downloader, &mut input, &mut output)
        .await
        .unwrap();

    let transcript = String::from_utf8(output).unwrap();
    assert!(transcript.contains("Goodbye"));
    assert!(!transcript.contains("Enter a video URL"));
    assert!(client.recorded_calls().is_empty());
}

#[tokio::test]
async fn menu_end_of_input_exits() {
    let temp = TempDir::new().unwrap();
    let client = Arc::new(ScriptedClient::default());
    let downloader = downloader_with(client, &temp);

    let mut input = Cursor::new(Vec::new());
    let mut output = Vec::new();
    interactive::run_loop(&downloader, &mut input, &mut output)
        .await
        .unwrap();
}

#[tokio::test]
async fn menu_video_download_applies_defaults() {
    let temp = TempDir::new().unwrap();
    let client = Arc::new(ScriptedClient::default());
    let downloader = downloader_with(client.clone(), &temp);

    // choice 1, URL, empty quality/format/audio answers, then quit.
    let script = format!("1\n{URL}\n\n\n\n6\n");
    let mut input = Cursor::new(script.into_bytes());
    let mut output = Vec::new();
    interactive::run_loop(&downloader, &mut input, &mut output)
        .await
        .unwrap();

    let calls = client.recorded_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].format.starts_with("bestvideo[ext=mp4]"));
    assert!(calls[0].format.contains("+bestaudio"));
    assert_eq!(calls[0].merge_output_format.as_deref(), Some("mp4"));
}

#[tokio::test]
async fn menu_invalid_choice_reprompts() {
    let temp = TempDir::new().unwrap();
    let client = Arc::new(ScriptedClient::default());
    let downloader = downloader_with(client.clone(), &temp);

    let mut input = Cursor::new(b"9\n6\n".to_vec());
    let mut output = Vec::new();
    interactive::run_loop(&downloader, &mut input, &mut output)
        .await
        .unwrap();

    let transcript = String::from_utf8(output).unwrap();
    assert!(transcript.contains("Invalid choice"));
    assert!(client.recorded_calls().is_empty());
}

#[tokio::test]
async fn menu_empty_url_skips_operation() {
    let temp = TempDir::new().unwrap();
    let client = Arc::new(ScriptedClient::default());
    let downloader = downloader_with(client.clone(), &temp);

    let mut input = Cursor::new(b"1\n\n6\n".to_vec());
    let mut output = Vec::new();
    interactive::run_loop(&downloader, &mut input, &mut output)
        .await
        .unwrap();

    let transcript = String::from_utf8(output).unwrap();
    assert!(transcript.contains("No URL given"));
    assert!(client.recorded_calls().is_empty());
}

#[tokio::test]
async fn menu_reports_errors_and_continues() {
    let temp = TempDir::new().unwrap();
    let client = Arc::new(ScriptedClient::failing_with(vec![
        TubeloadError::DownloadFailed("ERROR: no connection".to_string()),
    ]));
    let downloader = downloader_with(client.clone(), &temp);

    // A failing audio download followed by a successful one.
    let script = format!("2\n{URL}\n\n\n2\n{URL}\n\n\n6\n");
    let mut input = Cursor::new(script.into_bytes());
    let mut output = Vec::new();
    interactive::run_loop(&downloader, &mut input, &mut output)
        .await
        .unwrap();

    let transcript = String::from_utf8(output).unwrap();
    assert!(transcript.contains("Error:"));
    assert!(transcript.contains("Goodbye"));
    assert_eq!(client.recorded_calls().len(), 2);
}
