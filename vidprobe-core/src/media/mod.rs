//! Video fact derivation and frame arithmetic.
//!
//! This module derives duration, frame rate, frame count, and orientation
//! from raw ffprobe documents, and converts timestamps and millisecond
//! offsets into frame indices.

pub mod metadata;
pub mod timecode;

// Re-export commonly used types
pub use metadata::{Orientation, ProbeOutput};
pub use timecode::{position_to_frame, timestamp_to_frame, FramePosition};
