//! Conversion between timestamps, millisecond offsets, and frame indices.
//!
//! Both converters render the position in a canonical zero-padded
//! `HH:MM:SS.sss` form regardless of how the input was written.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A frame index together with its canonical timestamp rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FramePosition {
    /// Zero-based frame index, never negative
    pub frame: u64,
    /// Canonical `HH:MM:SS.sss` rendering of the position
    pub timestamp: String,
}

/// Converts a timestamp string into a frame index at the given frame rate.
///
/// Accepts `HH:MM:SS`, `MM:SS`, or `SS`, each with an optional fractional
/// part; a comma is accepted as the fractional separator. Missing leading
/// components count as zero. The frame index rounds to the nearest frame
/// and is clamped at zero.
pub fn timestamp_to_frame(timestamp: &str, fps: f64) -> CoreResult<FramePosition> {
    let normalized = timestamp.trim().replace(',', ".");

    let parts: Vec<&str> = normalized.split(':').collect();
    if parts.len() > 3 {
        return Err(CoreError::InvalidTimestamp {
            input: timestamp.to_string(),
            reason: format!("expected at most 3 components, got {}", parts.len()),
        });
    }

    // Right-align the parts into hours/minutes/seconds
    let mut components = [0.0_f64; 3];
    let offset = 3 - parts.len();
    for (slot, part) in components[offset..].iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse()
            .map_err(|e: std::num::ParseFloatError| CoreError::InvalidTimestamp {
                input: timestamp.to_string(),
                reason: e.to_string(),
            })?;
    }
    let [hours, minutes, seconds] = components;

    let total_seconds = hours * 3600.0 + minutes * 60.0 + seconds;
    let frame = clamp_frame((total_seconds * fps).round());

    Ok(FramePosition {
        frame,
        timestamp: format_timestamp(hours as i64, minutes as i64, seconds),
    })
}

/// Converts a millisecond offset into a frame index at the given frame
/// rate.
///
/// The frame index truncates toward zero rather than rounding, since
/// millisecond offsets are already discrete, and is clamped at zero.
/// Non-finite offsets are rejected.
pub fn position_to_frame(position_ms: f64, fps: f64) -> CoreResult<FramePosition> {
    if !position_ms.is_finite() {
        return Err(CoreError::InvalidPosition { input: position_ms });
    }

    let seconds = position_ms / 1000.0;
    let frame = clamp_frame((seconds * fps).trunc());

    let hours = (seconds / 3600.0).floor() as i64;
    let minutes = (seconds.rem_euclid(3600.0) / 60.0).floor() as i64;
    let secs = seconds.rem_euclid(60.0);

    Ok(FramePosition {
        frame,
        timestamp: format_timestamp(hours, minutes, secs),
    })
}

fn clamp_frame(frame: f64) -> u64 {
    frame.max(0.0) as u64
}

fn format_timestamp(hours: i64, minutes: i64, seconds: f64) -> String {
    format!("{hours:02}:{minutes:02}:{seconds:06.3}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_zero() {
        let position = timestamp_to_frame("00:00:00", 30.0).unwrap();
        assert_eq!(position.frame, 0);
        assert_eq!(position.timestamp, "00:00:00.000");
    }

    #[test]
    fn test_timestamp_one_second() {
        let position = timestamp_to_frame("00:00:01", 30.0).unwrap();
        assert_eq!(position.frame, 30);
        assert_eq!(position.timestamp, "00:00:01.000");
    }

    #[test]
    fn test_short_forms_right_align() {
        // Two parts are MM:SS
        let position = timestamp_to_frame("01:30", 25.0).unwrap();
        assert_eq!(position.frame, 2250);
        assert_eq!(position.timestamp, "00:01:30.000");

        // One part is bare seconds
        let position = timestamp_to_frame("42.5", 24.0).unwrap();
        assert_eq!(position.frame, 1020);
        assert_eq!(position.timestamp, "00:00:42.500");
    }

    #[test]
    fn test_comma_fraction_is_normalized() {
        let position = timestamp_to_frame("00:00:01,500", 30.0).unwrap();
        assert_eq!(position.frame, 45);
        assert_eq!(position.timestamp, "00:00:01.500");
    }

    #[test]
    fn test_whitespace_is_tolerated() {
        let position = timestamp_to_frame("  00:00:02 ", 25.0).unwrap();
        assert_eq!(position.frame, 50);
        assert_eq!(position.timestamp, "00:00:02.000");
    }

    #[test]
    fn test_rounds_to_nearest_frame() {
        // 0.9 s at 24 fps is 21.6 frames
        assert_eq!(timestamp_to_frame("0.9", 24.0).unwrap().frame, 22);
        // 0.5 s at 25 fps is 12.5 frames
        assert_eq!(timestamp_to_frame("0.5", 25.0).unwrap().frame, 13);
    }

    #[test]
    fn test_too_many_parts_is_rejected() {
        let result = timestamp_to_frame("1:2:3:4", 30.0);
        match result {
            Err(CoreError::InvalidTimestamp { input, .. }) => assert_eq!(input, "1:2:3:4"),
            other => panic!("expected InvalidTimestamp, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_part_is_rejected() {
        let result = timestamp_to_frame("00:xx:00", 30.0);
        match result {
            Err(CoreError::InvalidTimestamp { input, .. }) => assert_eq!(input, "00:xx:00"),
            other => panic!("expected InvalidTimestamp, got {other:?}"),
        }

        assert!(timestamp_to_frame("", 30.0).is_err());
        assert!(timestamp_to_frame("::", 30.0).is_err());
    }

    #[test]
    fn test_negative_inputs_clamp_frame_to_zero() {
        assert_eq!(timestamp_to_frame("-5", 30.0).unwrap().frame, 0);
        assert_eq!(timestamp_to_frame("00:00:10", -30.0).unwrap().frame, 0);
    }

    #[test]
    fn test_position_basic() {
        let position = position_to_frame(1500.0, 24.0).unwrap();
        assert_eq!(position.frame, 36);
        assert_eq!(position.timestamp, "00:00:01.500");
    }

    #[test]
    fn test_position_truncates() {
        // 999 ms at 30 fps is 29.97 frames; truncation keeps 29
        assert_eq!(position_to_frame(999.0, 30.0).unwrap().frame, 29);
    }

    #[test]
    fn test_position_clamps_negative_to_zero() {
        assert_eq!(position_to_frame(-5.0, 30.0).unwrap().frame, 0);
    }

    #[test]
    fn test_position_rejects_non_finite() {
        assert!(matches!(
            position_to_frame(f64::NAN, 30.0),
            Err(CoreError::InvalidPosition { .. })
        ));
        assert!(position_to_frame(f64::INFINITY, 30.0).is_err());
        assert!(position_to_frame(f64::NEG_INFINITY, 30.0).is_err());
    }

    #[test]
    fn test_position_decomposes_hours_and_minutes() {
        // 1 h 2 min 3.25 s
        let position = position_to_frame(3_723_250.0, 30.0).unwrap();
        assert_eq!(position.timestamp, "01:02:03.250");
        assert_eq!(position.frame, 111_697);
    }

    #[test]
    fn test_round_trip_stays_within_one_frame() {
        for &fps in &[23.976, 24.0, 25.0, 29.97, 30.0, 60.0] {
            for &frame in &[0_u64, 1, 29, 30, 100, 1234, 86_400] {
                let seconds = frame as f64 / fps;
                let hours = (seconds / 3600.0).floor() as u64;
                let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
                let secs = seconds % 60.0;
                let rendered = format!("{hours:02}:{minutes:02}:{secs:06.3}");

                let converted = timestamp_to_frame(&rendered, fps).unwrap();
                let diff = converted.frame.abs_diff(frame);
                assert!(
                    diff <= 1,
                    "fps {fps}, frame {frame} rendered as {rendered} came back as {}",
                    converted.frame
                );
            }
        }
    }
}
