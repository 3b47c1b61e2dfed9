//! Data structures for video metadata

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subset of the yt-dlp info dict consumed by this tool.
///
/// Deserialized from one line of `--dump-json` output. Anything not
/// listed here is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfo {
    pub id: String,
    pub title: String,
    pub webpage_url: Option<String>,
    pub duration: Option<f64>,
    pub uploader: Option<String>,
    pub upload_date: Option<String>,
    pub view_count: Option<u64>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub like_count: Option<u64>,
    pub extractor: Option<String>,
}

/// Read-only projection shown by the info operations.
///
/// Every field is a display string; anything the extractor did not report
/// renders as `N/A`. The description is cut to 200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDetails {
    pub title: String,
    pub duration: String,
    pub uploader: String,
    pub view_count: String,
    pub upload_date: String,
    pub description: String,
}

const MISSING: &str = "N/A";
const DESCRIPTION_LIMIT: usize = 200;

impl From<&VideoInfo> for VideoDetails {
    fn from(info: &VideoInfo) -> Self {
        Self {
            title: info.title.clone(),
            duration: info
                .duration
                .map(|d| (d as u64).to_string())
                .unwrap_or_else(|| MISSING.to_string()),
            uploader: info.uploader.clone().unwrap_or_else(|| MISSING.to_string()),
            view_count: info
                .view_count
                .map(|v| v.to_string())
                .unwrap_or_else(|| MISSING.to_string()),
            upload_date: info
                .upload_date
                .clone()
                .unwrap_or_else(|| MISSING.to_string()),
            description: match &info.description {
                Some(text) if !text.is_empty() => {
                    let mut cut: String = text.chars().take(DESCRIPTION_LIMIT).collect();
                    cut.push_str("...");
                    cut
                }
                _ => MISSING.to_string(),
            },
        }
    }
}

impl fmt::Display for VideoDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Duration: {}", self.duration)?;
        writeln!(f, "Uploader: {}", self.uploader)?;
        writeln!(f, "Views: {}", self.view_count)?;
        writeln!(f, "Upload date: {}", self.upload_date)?;
        write!(f, "Description: {}", self.description)
    }
}
