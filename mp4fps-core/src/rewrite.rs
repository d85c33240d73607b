// ============================================================================
// mp4fps-core/src/rewrite.rs
// ============================================================================
//
// REWRITE PIPELINE: File In, Patched File Out
//
// This is the boundary layer around the pure core. It owns all file I/O:
// validating the input path, enforcing the size limit, asking the probe for
// the original frame rate, reading the file into memory, patching it, and
// writing the result next to the other results.
//
// FLOW:
// 1. Validate config, input path and desired frame rate
// 2. Probe the original frame rate
// 3. compute_scale(original, desired)
// 4. Read, patch mvhd and mdhd, write through a temporary file
// 5. Optionally remove the input

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::RewriteConfig;
use crate::error::{CoreError, CoreResult, invalid_path};
use crate::external::FpsProbe;
use crate::patcher::{AtomPatchReport, SkippedBox, patch_container_with};
use crate::scale::{compute_scale, validate_fps};
use crate::temp_files::write_atomically;
use crate::utils::{format_bytes, has_mp4_extension, prefixed_output_path};

/// Statistics about a completed rewrite.
#[derive(Debug, Clone, Serialize)]
pub struct RewriteResult {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub original_fps: f64,
    pub desired_fps: f64,
    pub scale: f64,
    pub file_size: u64,
    pub reports: Vec<AtomPatchReport>,
    pub input_removed: bool,
    #[serde(skip)]
    pub duration: Duration,
}

impl RewriteResult {
    /// Total header occurrences rewritten across all tags.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.reports.iter().map(|r| r.matched).sum()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &SkippedBox> {
        self.reports.iter().flat_map(|r| r.skipped.iter())
    }

    /// One-line summary, e.g. `Original FPS: 29.970 to 60 FPS (scale 0.500)`.
    #[must_use]
    pub fn info(&self) -> String {
        format!(
            "Original FPS: {:.3} to {} FPS (scale {:.3})",
            self.original_fps, self.desired_fps, self.scale
        )
    }
}

/// Rewrites `input` so it reports `desired_fps`.
///
/// The output goes to `output` when given, otherwise to
/// `config.results_dir/<config.output_prefix><input file name>`.
pub fn rewrite_file(
    config: &RewriteConfig,
    probe: &dyn FpsProbe,
    input: &Path,
    desired_fps: f64,
    output: Option<&Path>,
) -> CoreResult<RewriteResult> {
    let start = Instant::now();
    config.validate()?;
    validate_fps("desired", desired_fps)?;

    if !input.is_file() {
        return Err(invalid_path(input, "not an existing file"));
    }
    if !has_mp4_extension(input) {
        return Err(invalid_path(input, "expected a .mp4 file"));
    }

    let file_size = fs::metadata(input)?.len();
    if file_size > config.max_input_bytes {
        return Err(CoreError::InputTooLarge {
            size: file_size,
            limit: config.max_input_bytes,
        });
    }

    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => prefixed_output_path(&config.results_dir, &config.output_prefix, input)?,
    };
    if config.remove_input && same_file(input, &output_path) {
        return Err(invalid_path(
            &output_path,
            "output would overwrite an input that is removed afterwards",
        ));
    }

    let original_fps = probe.probe_fps(input)?;
    let scale = compute_scale(original_fps, desired_fps)?;
    debug!(
        "Scale for {}: {original_fps:.3} / {desired_fps} = {scale}",
        input.display()
    );

    let bytes = fs::read(input)?;
    let patched = patch_container_with(bytes, scale, config.version_policy)?;
    if patched.matched_count() == 0 {
        warn!("No mvhd/mdhd headers found in {}", input.display());
    }
    for skip in patched.skipped() {
        debug!("Skipped '{}' at offset {} ({:?})", skip.tag, skip.offset, skip.reason);
    }

    write_atomically(&output_path, &patched.bytes)?;

    let input_removed = if config.remove_input {
        fs::remove_file(input)?;
        true
    } else {
        false
    };

    let result = RewriteResult {
        input_path: input.to_path_buf(),
        output_path,
        original_fps,
        desired_fps,
        scale,
        file_size,
        reports: patched.reports,
        input_removed,
        duration: start.elapsed(),
    };
    info!(
        "{} -> {} ({}, {} header(s)): {}",
        result.input_path.display(),
        result.output_path.display(),
        format_bytes(file_size),
        result.matched_count(),
        result.info()
    );
    Ok(result)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::StaticProbe;

    #[test]
    fn test_info_line() {
        let result = RewriteResult {
            input_path: PathBuf::from("in.mp4"),
            output_path: PathBuf::from("results/patched_in.mp4"),
            original_fps: 30000.0 / 1001.0,
            desired_fps: 60.0,
            scale: 0.5,
            file_size: 0,
            reports: Vec::new(),
            input_removed: false,
            duration: Duration::ZERO,
        };
        assert_eq!(result.info(), "Original FPS: 29.970 to 60 FPS (scale 0.500)");
    }

    #[test]
    fn test_rejects_non_mp4_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip.mkv");
        fs::write(&input, b"data").unwrap();

        let config = RewriteConfig::default();
        let err = rewrite_file(&config, &StaticProbe::new(30.0), &input, 60.0, None).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPath(_)));
    }

    #[test]
    fn test_rejects_oversized_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip.mp4");
        fs::write(&input, vec![0u8; 64]).unwrap();

        let config = crate::config::RewriteConfigBuilder::new()
            .max_input_bytes(32)
            .results_dir(dir.path().join("results"))
            .build();
        let err = rewrite_file(&config, &StaticProbe::new(30.0), &input, 60.0, None).unwrap_err();
        assert!(matches!(err, CoreError::InputTooLarge { size: 64, limit: 32 }));
    }
}
