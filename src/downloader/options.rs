//! Option mapping from user-facing choices to a yt-dlp invocation
//!
//! Pure construction: nothing here validates quality or container tokens.
//! An expression yt-dlp cannot resolve fails over there, at call time.

use std::path::Path;

/// Height ceiling for a recognized quality token.
fn height_ceiling(quality: &str) -> Option<u32> {
    match quality {
        "4k" => Some(2160),
        "1440p" => Some(1440),
        "1080p" => Some(1080),
        "720p" => Some(720),
        "480p" => Some(480),
        _ => None,
    }
}

/// Build the format selector for a video download.
///
/// Recognized tokens become a height ceiling; `best` means no ceiling;
/// anything else passes through verbatim as the primary fragment. Each
/// selector falls back from an exact container match to any container to
/// plain `best`.
pub fn video_selector(quality: &str, container: &str, include_audio: bool) -> String {
    let base = if quality == "best" {
        "bestvideo".to_string()
    } else if let Some(height) = height_ceiling(quality) {
        format!("bestvideo[height<={height}]")
    } else {
        return format!("{quality}[ext={container}]/best[ext={container}]/best");
    };

    if include_audio {
        format!("{base}[ext={container}]+bestaudio[ext=m4a]/{base}+bestaudio/best")
    } else {
        format!("{base}[ext={container}]/{base}/best")
    }
}

/// Whether a playlist URL expands to all of its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistMode {
    Single,
    Expand,
}

/// Audio extraction post-processing step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioExtraction {
    /// Target codec, e.g. `mp3` or `flac`
    pub codec: String,
    /// Fixed bitrate target in kbit/s, where one applies
    pub quality: Option<String>,
}

impl AudioExtraction {
    /// mp3 gets a fixed 192 kbit/s target; every other codec takes the
    /// external tool's default.
    pub fn for_codec(codec: &str) -> Self {
        Self {
            codec: codec.to_string(),
            quality: (codec == "mp3").then(|| "192".to_string()),
        }
    }
}

/// Everything needed to invoke yt-dlp for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadPlan {
    /// Format selector passed as `-f`
    pub format: String,
    /// Output filename template passed as `-o`
    pub output_template: String,
    pub playlist: PlaylistMode,
    /// Target container for muxing, when video and audio are combined
    pub merge_output_format: Option<String>,
    pub extract_audio: Option<AudioExtraction>,
    /// Cap on the number of playlist items retrieved
    pub playlist_end: Option<u32>,
}

impl DownloadPlan {
    /// Single video download, optionally muxed with the best audio stream.
    pub fn video(quality: &str, container: &str, include_audio: bool, output_dir: &Path) -> Self {
        let format = video_selector(quality, container, include_audio);
        // The muxing directive only makes sense when separate streams get
        // combined, which the selector marks with `+`.
        let merge_output_format =
            (include_audio && format.contains('+')).then(|| container.to_string());

        Self {
            format,
            output_template: single_item_template(output_dir),
            playlist: PlaylistMode::Single,
            merge_output_format,
            extract_audio: None,
            playlist_end: None,
        }
    }

    /// Best available audio stream, transcoded to `container`.
    pub fn audio(container: &str, output_dir: &Path) -> Self {
        Self {
            format: "bestaudio/best".to_string(),
            output_template: single_item_template(output_dir),
            playlist: PlaylistMode::Single,
            merge_output_format: None,
            extract_audio: Some(AudioExtraction::for_codec(container)),
            playlist_end: None,
        }
    }

    /// Whole playlist, templated into a per-playlist subdirectory.
    pub fn playlist(audio_only: bool, max_items: Option<u32>, output_dir: &Path) -> Self {
        let (format, extract_audio) = if audio_only {
            (
                "bestaudio/best".to_string(),
                Some(AudioExtraction::for_codec("mp3")),
            )
        } else {
            ("best[ext=mp4]/best".to_string(), None)
        };

        Self {
            format,
            output_template: playlist_template(output_dir),
            playlist: PlaylistMode::Expand,
            merge_output_format: None,
            extract_audio,
            playlist_end: max_items,
        }
    }

    /// Render the plan as yt-dlp command-line arguments, URL excluded.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            self.format.clone(),
            "-o".to_string(),
            self.output_template.clone(),
        ];

        match self.playlist {
            PlaylistMode::Single => args.push("--no-playlist".to_string()),
            PlaylistMode::Expand => args.push("--yes-playlist".to_string()),
        }

        if let Some(container) = &self.merge_output_format {
            args.push("--merge-output-format".to_string());
            args.push(container.clone());
        }

        if let Some(extract) = &self.extract_audio {
            args.push("--extract-audio".to_string());
            args.push("--audio-format".to_string());
            args.push(extract.codec.clone());
            if let Some(quality) = &extract.quality {
                args.push("--audio-quality".to_string());
                args.push(quality.clone());
            }
        }

        if let Some(end) = self.playlist_end {
            args.push("--playlist-end".to_string());
            args.push(end.to_string());
        }

        args
    }
}

fn single_item_template(output_dir: &Path) -> String {
    output_dir
        .join("%(title)s.%(ext)s")
        .to_string_lossy()
        .into_owned()
}

fn playlist_template(output_dir: &Path) -> String {
    output_dir
        .join("%(playlist)s")
        .join("%(title)s.%(ext)s")
        .to_string_lossy()
        .into_owned()
}
