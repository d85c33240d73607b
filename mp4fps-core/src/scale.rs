//! Scale factor calculation.
//!
//! The scale factor is applied multiplicatively to header timescale and
//! duration fields. Raising the desired frame rate shrinks both fields,
//! lowering it grows them.

use crate::error::{CoreError, CoreResult};

/// Computes `original_fps / desired_fps`.
///
/// Both rates must be finite and strictly positive.
///
/// ```
/// use mp4fps_core::compute_scale;
///
/// assert_eq!(compute_scale(30.0, 60.0).unwrap(), 0.5);
/// assert!(compute_scale(30.0, 0.0).is_err());
/// ```
pub fn compute_scale(original_fps: f64, desired_fps: f64) -> CoreResult<f64> {
    validate_fps("original", original_fps)?;
    validate_fps("desired", desired_fps)?;
    Ok(original_fps / desired_fps)
}

/// Returns true for scales that leave header fields untouched.
///
/// `0.0` and `1.0` both put the patcher in count-only mode.
#[must_use]
pub fn is_noop_scale(scale: f64) -> bool {
    scale == 0.0 || scale == 1.0
}

pub(crate) fn validate_fps(label: &str, fps: f64) -> CoreResult<()> {
    if !fps.is_finite() {
        return Err(CoreError::InvalidInput(format!(
            "{label} frame rate is not a finite number: {fps}"
        )));
    }
    if fps <= 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "{label} frame rate must be positive, got {fps}"
        )));
    }
    Ok(())
}
