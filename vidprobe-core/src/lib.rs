//! Core library for video metadata extraction and frame arithmetic using ffprobe.
//!
//! This crate parses the JSON document produced by ffprobe and derives
//! duration, frame rate, frame count, pixel format, bit depth, dimensions,
//! and orientation from it, tolerating partially populated documents. It
//! also converts human-readable timestamps and millisecond offsets into
//! frame indices with a canonical `HH:MM:SS.sss` rendering.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidprobe_core::{probe_media_file, timestamp_to_frame};
//!
//! let probe = probe_media_file("clip.mp4").unwrap();
//! let fps = probe.frame_rate();
//! let (orientation, rotation) = probe.orientation();
//! println!(
//!     "{}x{} {:?} ({} deg)",
//!     probe.width().unwrap(),
//!     probe.height().unwrap(),
//!     orientation,
//!     rotation
//! );
//!
//! let position = timestamp_to_frame("00:01:30", fps).unwrap();
//! println!("frame {} at {}", position.frame, position.timestamp);
//! ```

pub mod error;
pub mod external;
pub mod media;
pub mod utils;

// Re-exports for public API
pub use error::{CoreError, CoreResult};
pub use external::{
    ffmpeg_path, ffprobe_path, ffprobe_version, is_decodable, probe_media_file,
};
pub use media::{
    position_to_frame, timestamp_to_frame, FramePosition, Orientation, ProbeOutput,
};
pub use utils::{container_extension, flatten_json};

/// Crate version, for callers that report what produced their metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
