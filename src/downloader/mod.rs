//! Option mapping and the download facade

pub mod facade;
pub mod options;

// Re-export for convenience
pub use facade::Downloader;
pub use options::{AudioExtraction, DownloadPlan, PlaylistMode};
