//! Utility functions for input parsing, formatting and path handling.
//!
//! This module provides general-purpose helpers used by the rewrite pipeline
//! and the CLI: tolerant frame rate text parsing, ffprobe rate parsing, byte
//! formatting and output path naming.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// Checks for a `.mp4` extension, ignoring case.
#[must_use]
pub fn has_mp4_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"))
}

/// Parses a frame rate typed by a user.
///
/// Every character outside `[0-9.]` is dropped before parsing, so `"60 fps"`
/// and `"~59.94"` are accepted. Empty text, text without digits, text that
/// still fails to parse and values that are not positive are all rejected.
pub fn parse_fps_text(text: &str) -> CoreResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidInput("frame rate is missing".to_string()));
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return Err(CoreError::InvalidInput(format!(
            "frame rate '{trimmed}' contains no digits"
        )));
    }

    let fps = cleaned.parse::<f64>().map_err(|_| {
        CoreError::InvalidInput(format!("frame rate '{trimmed}' is not a number"))
    })?;
    if fps <= 0.0 || !fps.is_finite() {
        return Err(CoreError::InvalidInput(format!(
            "frame rate must be positive, got '{trimmed}'"
        )));
    }
    Ok(fps)
}

/// Parses an ffprobe frame rate such as `30000/1001` or `25`.
///
/// Returns `None` for empty output, zero denominators (ffprobe reports `0/0`
/// for streams without a rate) and anything that is not a positive number.
#[must_use]
pub fn parse_frame_rate(text: &str) -> Option<f64> {
    let text = text.trim();
    let fps = match text.split_once('/') {
        Some((num, den)) => {
            let num = num.trim().parse::<f64>().ok()?;
            let den = den.trim().parse::<f64>().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => text.parse::<f64>().ok()?,
    };
    (fps.is_finite() && fps > 0.0).then_some(fps)
}

/// Formats bytes with appropriate binary units (B, KiB, MiB, GiB).
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    const GIB: f64 = MIB * 1024.0;

    let bytes_f64 = bytes as f64;
    if bytes_f64 >= GIB {
        format!("{:.2} GiB", bytes_f64 / GIB)
    } else if bytes_f64 >= MIB {
        format!("{:.2} MiB", bytes_f64 / MIB)
    } else if bytes_f64 >= KIB {
        format!("{:.2} KiB", bytes_f64 / KIB)
    } else {
        format!("{bytes} B")
    }
}

/// Safely extracts filename from a path.
pub fn get_filename_safe(path: &Path) -> CoreResult<String> {
    Ok(path
        .file_name()
        .ok_or_else(|| crate::error::invalid_path(path, "no file name"))?
        .to_string_lossy()
        .to_string())
}

/// Builds `<dir>/<prefix><file name of input>`.
pub fn prefixed_output_path(dir: &Path, prefix: &str, input: &Path) -> CoreResult<PathBuf> {
    let filename = get_filename_safe(input)?;
    Ok(dir.join(format!("{prefix}{filename}")))
}
