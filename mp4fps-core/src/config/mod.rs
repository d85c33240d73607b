//! Configuration for the file rewrite pipeline.
//!
//! The pure operations (`compute_scale`, `patch_container`) take no
//! configuration. Tool paths, folder names and limits only matter to
//! `rewrite_file`, which receives them through [`RewriteConfig`].

mod builder;

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::patcher::VersionPolicy;

pub use builder::RewriteConfigBuilder;

// Default constants

/// Default ffprobe binary, resolved through `PATH`.
pub const DEFAULT_FFPROBE_PATH: &str = "ffprobe";

/// Default directory for rewritten files.
pub const DEFAULT_RESULTS_DIR: &str = "results";

/// Prefix prepended to the input file name to form the output file name.
pub const DEFAULT_OUTPUT_PREFIX: &str = "patched_";

/// Largest input accepted by `rewrite_file` (500 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 500 * 1024 * 1024;

/// Settings for `rewrite_file`.
///
/// # Examples
///
/// ```rust
/// use mp4fps_core::config::RewriteConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = RewriteConfigBuilder::new()
///     .results_dir(PathBuf::from("/srv/results"))
///     .ffprobe_path(PathBuf::from("./ffmpeg/bin/ffprobe"))
///     .remove_input(true)
///     .build();
/// assert_eq!(config.output_prefix, "patched_");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct RewriteConfig {
    /// ffprobe binary used by the default probe
    pub ffprobe_path: PathBuf,

    /// Directory where rewritten files are written
    pub results_dir: PathBuf,

    /// Prefix for output file names
    pub output_prefix: String,

    /// Inputs larger than this are rejected before being read
    pub max_input_bytes: u64,

    /// Delete the input file after a successful rewrite. A failed detection or
    /// write leaves it in place.
    pub remove_input: bool,

    /// How version-1 headers are handled
    pub version_policy: VersionPolicy,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            ffprobe_path: PathBuf::from(DEFAULT_FFPROBE_PATH),
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            remove_input: false,
            version_policy: VersionPolicy::Ignore,
        }
    }
}

impl RewriteConfig {
    /// Checks values that would otherwise fail late in the pipeline.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_input_bytes == 0 {
            return Err(CoreError::InvalidInput(
                "max_input_bytes must be greater than zero".to_string(),
            ));
        }
        if self.output_prefix.contains(['/', '\\']) {
            return Err(CoreError::InvalidInput(format!(
                "output prefix '{}' must not contain path separators",
                self.output_prefix
            )));
        }
        if self.ffprobe_path.as_os_str().is_empty() {
            return Err(CoreError::InvalidInput("ffprobe path is empty".to_string()));
        }
        Ok(())
    }
}
