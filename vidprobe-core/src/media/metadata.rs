//! Accessors deriving video facts from a raw ffprobe document.
//!
//! ffprobe output is only ever partially populated: fields move between
//! container versions, streams omit counts, and numbers arrive as strings.
//! The accessors here fall into two groups. Duration, frame rate, and frame
//! count degrade to a well-defined "unknown" value and log a diagnostic;
//! width and height fail with a typed error because callers cannot proceed
//! without a spatial dimension.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};

/// Display orientation of a video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
    Unknown,
}

/// A parsed ffprobe document for a single media file.
///
/// Wraps the raw JSON so that every accessor can tolerate missing keys; no
/// field is required to exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbeOutput {
    raw: Value,
}

impl ProbeOutput {
    /// Wraps a raw ffprobe JSON document.
    pub fn from_json(raw: Value) -> Self {
        Self { raw }
    }

    /// Borrows the raw document, for fields the accessors do not cover.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Consumes the wrapper and returns the raw document.
    pub fn into_json(self) -> Value {
        self.raw
    }

    fn streams(&self) -> &[Value] {
        self.raw
            .get("streams")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn first_video_stream(&self) -> Option<&Value> {
        self.streams()
            .iter()
            .find(|stream| stream.get("codec_type").and_then(Value::as_str) == Some("video"))
    }

    /// Container duration in seconds, from `format.duration`.
    ///
    /// Returns `0.0` when the field is absent or unparseable; `0.0` means
    /// "unknown", not a zero-length video.
    pub fn duration_seconds(&self) -> f64 {
        let duration = self
            .raw
            .get("format")
            .and_then(|format| format.get("duration"))
            .and_then(value_as_f64);
        match duration {
            Some(seconds) => seconds,
            None => {
                log::error!("Could not extract video duration in seconds.");
                0.0
            }
        }
    }

    /// Frame rate in frames per second.
    ///
    /// Prefers `nb_frames / duration` for the first video stream; falls
    /// back to the stream's `r_frame_rate` rational when the frame count or
    /// the duration is unusable. Returns `0.0` when neither source yields a
    /// rate.
    pub fn frame_rate(&self) -> f64 {
        let video_stream = match self.first_video_stream() {
            Some(stream) => stream,
            None => {
                log::error!("No video stream found; frame rate unknown.");
                return 0.0;
            }
        };

        let duration = self.duration_seconds();
        if duration > 0.0 {
            if let Some(frames) = video_stream.get("nb_frames").and_then(value_as_u64) {
                if frames > 0 {
                    return frames as f64 / duration;
                }
            }
        }
        log::debug!("Could not compute frame rate from nb_frames; falling back to r_frame_rate.");

        match video_stream.get("r_frame_rate").and_then(Value::as_str) {
            Some(rate) => match parse_frame_rate(rate) {
                Some(fps) => fps,
                None => {
                    log::error!("Malformed r_frame_rate '{rate}'; frame rate unknown.");
                    0.0
                }
            },
            None => {
                log::warn!("No r_frame_rate in video stream; frame rate unknown.");
                0.0
            }
        }
    }

    /// Frame count of the first video stream, when ffprobe reports one.
    ///
    /// `None` means "unknown" and is distinct from an explicit zero count.
    pub fn frame_count(&self) -> Option<u64> {
        let count = self
            .first_video_stream()
            .and_then(|stream| stream.get("nb_frames"))
            .and_then(value_as_u64);
        if count.is_none() {
            log::debug!("No usable nb_frames in probe data; frame count unknown.");
        }
        count
    }

    /// Pixel format reported by the first stream in the document.
    ///
    /// Reads `streams[0]` without checking its codec type; the value is
    /// only meaningful when the video stream comes first.
    pub fn pixel_format(&self) -> Option<&str> {
        self.streams()
            .first()
            .and_then(|stream| stream.get("pix_fmt"))
            .and_then(Value::as_str)
    }

    /// Bits per raw sample reported by the first stream in the document.
    ///
    /// Same first-stream lookup as [`Self::pixel_format`].
    pub fn bit_depth(&self) -> Option<u32> {
        self.streams()
            .first()
            .and_then(|stream| stream.get("bits_per_raw_sample"))
            .and_then(value_as_u64)
            .map(|bits| bits as u32)
    }

    /// Width in pixels of the first video stream that reports one.
    pub fn width(&self) -> CoreResult<i64> {
        self.video_stream_dimension("width")
            .ok_or(CoreError::ValueNotDetermined("video width"))
    }

    /// Height in pixels of the first video stream that reports one.
    pub fn height(&self) -> CoreResult<i64> {
        self.video_stream_dimension("height")
            .ok_or(CoreError::ValueNotDetermined("video height"))
    }

    fn video_stream_dimension(&self, field: &str) -> Option<i64> {
        self.streams()
            .iter()
            .filter(|stream| stream.get("codec_type").and_then(Value::as_str) == Some("video"))
            .find_map(|stream| stream.get(field).and_then(value_as_i64))
    }

    /// Display orientation of the first video stream, with the rotation
    /// hint in degrees.
    ///
    /// An explicit Display Matrix rotation of 0 or ±90 decides the result;
    /// any other angle, or no rotation metadata at all, falls back to
    /// comparing width against height. When several Display Matrix entries
    /// are present the last one wins.
    pub fn orientation(&self) -> (Orientation, i32) {
        let video_stream = match self.first_video_stream() {
            Some(stream) => stream,
            None => return (Orientation::Unknown, 0),
        };

        let mut rotation: Option<i64> = None;
        if let Some(side_data) = video_stream.get("side_data_list").and_then(Value::as_array) {
            for entry in side_data {
                if entry.get("side_data_type").and_then(Value::as_str) == Some("Display Matrix") {
                    rotation = entry.get("rotation").and_then(value_as_i64);
                }
            }
        }

        match rotation {
            Some(0) => return (Orientation::Horizontal, 0),
            Some(degrees @ (90 | -90)) => return (Orientation::Vertical, degrees as i32),
            _ => {}
        }

        let width = video_stream.get("width").and_then(value_as_i64).unwrap_or(0);
        let height = video_stream
            .get("height")
            .and_then(value_as_i64)
            .unwrap_or(0);
        if width > height {
            (Orientation::Horizontal, 0)
        } else {
            (Orientation::Vertical, 0)
        }
    }
}

/// Parses an ffprobe frame-rate string, either rational ("30000/1001") or
/// plain decimal ("29.97"). A zero denominator yields `None`.
fn parse_frame_rate(rate: &str) -> Option<f64> {
    if let Some((numerator, denominator)) = rate.split_once('/') {
        let numerator: f64 = numerator.trim().parse().ok()?;
        let denominator: f64 = denominator.trim().parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        return Some(numerator / denominator);
    }
    rate.trim().parse().ok()
}

// ffprobe emits most numbers as JSON strings; the helpers below accept both
// encodings.

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
