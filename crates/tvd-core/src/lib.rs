pub mod config;
pub mod logging;

pub mod cache;
pub mod download;
pub mod error;
pub mod extract;
pub mod har;
pub mod intercept;
pub mod publish;
pub mod variant;

pub use extract::{collect_posts_with_video, ExtractionResult};
pub use intercept::should_intercept;
pub use variant::{bitrate_to_quality, extract_resolution, normalize_video_info, VideoVariant};
