// mp4fps-cli/src/config.rs
//
// Defaults for CLI arguments. Values shared with the library come from
// mp4fps_core::config so both sides agree.

pub use mp4fps_core::config::{DEFAULT_FFPROBE_PATH, DEFAULT_RESULTS_DIR};

/// Environment variable that overrides the ffprobe binary.
pub const FFPROBE_ENV_VAR: &str = "MP4FPS_FFPROBE";
