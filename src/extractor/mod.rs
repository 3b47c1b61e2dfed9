pub mod models;
pub mod traits;
pub mod ytdlp;

pub use models::{VideoDetails, VideoInfo};
pub use traits::MediaClient;
pub use ytdlp::YtDlpClient;
