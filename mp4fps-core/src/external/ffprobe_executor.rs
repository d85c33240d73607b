//! FFprobe integration for frame rate detection.
//!
//! Two probes are provided. `FfprobeCommandProbe` runs a configurable ffprobe
//! binary and reads the CSV `r_frame_rate` of the first video stream.
//! `CrateFfprobeProbe` goes through the `ffprobe` crate's JSON output and
//! uses whatever `ffprobe` is on `PATH`.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use ffprobe::{FfProbeError, ffprobe};

use super::FpsProbe;
use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use crate::utils::parse_frame_rate;

/// Probe backed by a direct ffprobe invocation.
#[derive(Debug, Clone)]
pub struct FfprobeCommandProbe {
    ffprobe_path: PathBuf,
}

impl FfprobeCommandProbe {
    pub fn new(ffprobe_path: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }

    pub fn ffprobe_path(&self) -> &Path {
        &self.ffprobe_path
    }

    fn command(&self, input_path: &Path) -> Command {
        let mut cmd = Command::new(&self.ffprobe_path);
        cmd.args([
            "-v",
            "0",
            "-of",
            "csv=p=0",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=r_frame_rate",
        ])
        .arg(input_path);
        cmd
    }
}

impl Default for FfprobeCommandProbe {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl FpsProbe for FfprobeCommandProbe {
    fn probe_fps(&self, input_path: &Path) -> CoreResult<f64> {
        let tool = self.ffprobe_path.display().to_string();
        log::debug!("Running {tool} for frame rate on: {}", input_path.display());

        let output = self.command(input_path).output().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                CoreError::DependencyNotFound(tool.clone())
            } else {
                command_start_error(tool.clone(), e)
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            log::error!("{tool} failed on {}: {stderr}", input_path.display());
            return Err(command_failed_error(tool, output.status, stderr));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_probe_output(&stdout).ok_or_else(|| {
            CoreError::ProbeUnavailable(format!(
                "unrecognised frame rate '{}' for {}",
                stdout.trim(),
                input_path.display()
            ))
        })
    }
}

/// Reads the first non-empty CSV line of ffprobe output as a frame rate.
pub(crate) fn parse_probe_output(stdout: &str) -> Option<f64> {
    let line = stdout.lines().map(str::trim).find(|l| !l.is_empty())?;
    parse_frame_rate(line.trim_end_matches(','))
}

/// Probe backed by the `ffprobe` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrateFfprobeProbe;

impl CrateFfprobeProbe {
    pub fn new() -> Self {
        Self
    }
}

impl FpsProbe for CrateFfprobeProbe {
    fn probe_fps(&self, input_path: &Path) -> CoreResult<f64> {
        log::debug!(
            "Running ffprobe (via crate) for frame rate on: {}",
            input_path.display()
        );
        let metadata = ffprobe(input_path).map_err(|err| {
            log::error!("ffprobe failed for frame rate on {}: {err:?}", input_path.display());
            map_ffprobe_error(err)
        })?;

        let video_stream = metadata
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
            .ok_or_else(|| {
                CoreError::ProbeUnavailable(format!(
                    "no video stream found in {}",
                    input_path.display()
                ))
            })?;

        parse_frame_rate(&video_stream.r_frame_rate)
            .or_else(|| parse_frame_rate(&video_stream.avg_frame_rate))
            .ok_or_else(|| {
                CoreError::ProbeUnavailable(format!(
                    "video stream in {} reports no usable frame rate ('{}')",
                    input_path.display(),
                    video_stream.r_frame_rate
                ))
            })
    }
}

fn map_ffprobe_error(err: FfProbeError) -> CoreError {
    match err {
        FfProbeError::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound => {
            CoreError::DependencyNotFound("ffprobe".to_string())
        }
        FfProbeError::Io(io_err) => command_start_error("ffprobe", io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error("ffprobe", output.status, stderr)
        }
        FfProbeError::Deserialize(err) => {
            CoreError::ProbeUnavailable(format!("ffprobe output deserialization: {err}"))
        }
        _ => CoreError::ProbeUnavailable(format!("unknown ffprobe error: {err:?}")),
    }
}
