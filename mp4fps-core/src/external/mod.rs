// ============================================================================
// mp4fps-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Frame Rate Detection Through ffprobe
//
// Detecting the original frame rate of a video is delegated to ffprobe. This
// module defines the `FpsProbe` seam the rewrite pipeline depends on, the
// ffprobe-backed implementations, and a dependency check for the CLI.
//
// KEY COMPONENTS:
// - FpsProbe: trait for anything that can report a frame rate for a path
// - FfprobeCommandProbe / CrateFfprobeProbe: ffprobe implementations
// - StaticProbe: fixed rate supplied by the caller
// - check_dependency: verifies an external command can be started

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{CoreError, CoreResult};

pub mod ffprobe_executor;

pub use ffprobe_executor::{CrateFfprobeProbe, FfprobeCommandProbe};

/// Reports the frame rate of a media file.
///
/// Failures must surface as errors whose [`CoreError::kind`] is
/// `ProbeUnavailable`, never as a default rate.
///
/// ```rust
/// use mp4fps_core::CoreResult;
/// use mp4fps_core::external::FpsProbe;
/// use std::path::Path;
///
/// struct Fixed;
///
/// impl FpsProbe for Fixed {
///     fn probe_fps(&self, _path: &Path) -> CoreResult<f64> {
///         Ok(24.0)
///     }
/// }
///
/// assert_eq!(Fixed.probe_fps(Path::new("clip.mp4")).unwrap(), 24.0);
/// ```
pub trait FpsProbe {
    fn probe_fps(&self, path: &Path) -> CoreResult<f64>;
}

/// Probe that always reports the same rate. Used when the caller already
/// knows the original frame rate.
#[derive(Debug, Clone, Copy)]
pub struct StaticProbe {
    fps: f64,
}

impl StaticProbe {
    pub fn new(fps: f64) -> Self {
        Self { fps }
    }
}

impl FpsProbe for StaticProbe {
    fn probe_fps(&self, _path: &Path) -> CoreResult<f64> {
        if self.fps.is_finite() && self.fps > 0.0 {
            Ok(self.fps)
        } else {
            Err(CoreError::InvalidInput(format!(
                "original frame rate must be positive, got {}",
                self.fps
            )))
        }
    }
}

/// Checks that `cmd_name` can be started with `-version`.
pub fn check_dependency(cmd_name: &Path) -> CoreResult<()> {
    let display = cmd_name.display().to_string();
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {display}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{display}' not found.");
            Err(CoreError::DependencyNotFound(display))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{display}': {e}");
            Err(CoreError::CommandStart(display, e))
        }
    }
}
