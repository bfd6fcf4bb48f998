//! Integration with the external ffprobe and ffmpeg binaries.
//!
//! This module resolves binary paths (environment override first, `PATH`
//! search second) and executes ffprobe to obtain raw probe documents. No
//! retries and no timeout handling happen here; cancellation belongs to
//! callers.

use std::env;
use std::path::PathBuf;

use crate::error::{CoreError, CoreResult};

pub mod ffprobe_executor;

// ----- FFprobe Execution -----
pub use ffprobe_executor::{ffprobe_version, is_decodable, probe_media_file};

/// Environment variable overriding the ffprobe binary location.
pub const FFPROBE_PATH_ENV: &str = "FFPROBE_PATH";

/// Environment variable overriding the ffmpeg binary location.
pub const FFMPEG_PATH_ENV: &str = "FFMPEG_PATH";

/// Resolves the path of an external binary.
///
/// The environment override wins verbatim when set; otherwise every
/// directory in `PATH` is checked for a file with the binary's name.
pub fn resolve_binary_path(env_var: &str, binary_name: &str) -> CoreResult<PathBuf> {
    if let Some(override_path) = env::var_os(env_var) {
        if !override_path.is_empty() {
            log::debug!("Using {} override for {}", env_var, binary_name);
            return Ok(PathBuf::from(override_path));
        }
    }

    if let Some(found) = search_system_path(binary_name) {
        log::debug!("Found {} in system PATH: {}", binary_name, found.display());
        return Ok(found);
    }

    log::warn!("Dependency '{}' not found.", binary_name);
    Err(CoreError::DependencyNotFound(
        binary_name.to_string(),
        env_var.to_string(),
    ))
}

/// Returns the resolved ffprobe binary path.
pub fn ffprobe_path() -> CoreResult<PathBuf> {
    resolve_binary_path(FFPROBE_PATH_ENV, "ffprobe")
}

/// Returns the resolved ffmpeg binary path.
pub fn ffmpeg_path() -> CoreResult<PathBuf> {
    resolve_binary_path(FFMPEG_PATH_ENV, "ffmpeg")
}

fn search_system_path(binary_name: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    env::split_paths(&path_var)
        .map(|dir| dir.join(binary_name))
        .find(|candidate| candidate.is_file())
}
