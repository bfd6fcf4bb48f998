//! FFprobe execution for media analysis.
//!
//! Runs the resolved ffprobe binary against a media file and returns its
//! JSON document wrapped in a [`ProbeOutput`], plus a decodability check
//! and a version query.

use std::path::Path;
use std::process::Command;

use crate::error::{command_failed_error, command_start_error, CoreError, CoreResult};
use crate::media::ProbeOutput;

use super::ffprobe_path;

/// Executes ffprobe on `input_path` and returns the parsed probe document.
///
/// Requests the `format` and `streams` sections as JSON; deriving facts
/// from them is left to the accessors on [`ProbeOutput`].
pub fn probe_media_file<P: AsRef<Path>>(input_path: P) -> CoreResult<ProbeOutput> {
    let path = input_path.as_ref();

    if !path.exists() {
        return Err(CoreError::InputNotFound(path.display().to_string()));
    }

    let ffprobe = ffprobe_path()?;

    log::debug!("Running ffprobe on: {}", path.display());
    let output = Command::new(&ffprobe)
        .args([
            "-v",
            "error",
            "-show_entries",
            "format:streams",
            "-print_format",
            "json",
        ])
        .arg(path)
        .output()
        .map_err(|e| command_start_error("ffprobe", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        log::error!("ffprobe failed on {}: {}", path.display(), stderr.trim());
        return Err(command_failed_error("ffprobe", output.status, stderr));
    }

    let document = serde_json::from_slice(&output.stdout)
        .map_err(|e| CoreError::JsonParse(e.to_string()))?;
    Ok(ProbeOutput::from_json(document))
}

/// Checks whether ffprobe can decode the container of `input_path`.
///
/// The file counts as decodable when ffprobe exits successfully and reports
/// a strictly positive duration. This check never fails; the returned
/// string carries stderr when present, stdout otherwise, or the error that
/// stopped the check.
pub fn is_decodable<P: AsRef<Path>>(input_path: P) -> (bool, String) {
    let path = input_path.as_ref();
    match run_duration_probe(path) {
        Ok(result) => result,
        Err(e) => {
            log::warn!("Decodability check failed for {}: {}", path.display(), e);
            (false, e.to_string())
        }
    }
}

fn run_duration_probe(path: &Path) -> CoreResult<(bool, String)> {
    let ffprobe = ffprobe_path()?;

    log::debug!("Running ffprobe decodability check on: {}", path.display());
    let output = Command::new(&ffprobe)
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .output()
        .map_err(|e| command_start_error("ffprobe", e))?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    let has_positive_duration = stdout.parse::<f64>().map(|d| d > 0.0).unwrap_or(false);
    let decodable = output.status.success() && has_positive_duration;

    let detail = if stderr.is_empty() { stdout } else { stderr };
    Ok((decodable, detail))
}

/// Returns the first line of `ffprobe -version` output.
pub fn ffprobe_version() -> CoreResult<String> {
    let ffprobe = ffprobe_path()?;

    let output = Command::new(&ffprobe)
        .arg("-version")
        .output()
        .map_err(|e| command_start_error("ffprobe", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        return Err(command_failed_error("ffprobe", output.status, stderr));
    }

    let version_str = String::from_utf8_lossy(&output.stdout);
    let first_line = version_str.lines().next().unwrap_or_default();
    Ok(first_line.to_string())
}
