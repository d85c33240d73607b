// mp4fps-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{DEFAULT_FFPROBE_PATH, DEFAULT_RESULTS_DIR, FFPROBE_ENV_VAR};

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "mp4fps: change the frame rate an MP4 file reports",
    long_about = "Rewrites the mvhd/mdhd timescale and duration of an MP4 file so players \
                  report a different frame rate. No frame is re-encoded."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Writes a copy of an MP4 file that reports a new frame rate
    Patch(PatchArgs),
    /// Prints the frame rate ffprobe detects for a file
    Probe(ProbeArgs),
    /// Lists the mvhd/mdhd headers a patch would touch
    Inspect(InspectArgs),
}

/// How the original frame rate is detected.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProbeBackend {
    /// Run the --ffprobe binary and read its CSV output
    #[default]
    Command,
    /// Use the ffprobe crate (JSON output, ffprobe from PATH)
    Crate,
}

#[derive(Parser, Debug)]
pub struct PatchArgs {
    /// Input .mp4 file
    #[arg(required = true, value_name = "INPUT")]
    pub input: PathBuf,

    /// Desired frame rate. Anything other than digits and '.' is ignored, so "60 fps" works.
    #[arg(short = 'f', long = "fps", required = true, value_name = "FPS")]
    pub fps: String,

    /// Skip ffprobe and use this as the original frame rate
    #[arg(long, value_name = "FPS")]
    pub original_fps: Option<f64>,

    /// Output file (defaults to RESULTS_DIR/patched_<input name>)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Directory for rewritten files
    #[arg(long, value_name = "RESULTS_DIR", default_value = DEFAULT_RESULTS_DIR)]
    pub results_dir: PathBuf,

    /// ffprobe binary used to detect the original frame rate
    #[arg(long, value_name = "PATH", env = FFPROBE_ENV_VAR, default_value = DEFAULT_FFPROBE_PATH)]
    pub ffprobe: PathBuf,

    /// Frame rate detection backend (ignored with --original-fps)
    #[arg(long, value_enum, default_value_t = ProbeBackend::Command)]
    pub probe_backend: ProbeBackend,

    /// Delete the input file after a successful rewrite. The input is kept when
    /// frame rate detection or the write fails.
    #[arg(long, default_value_t = false)]
    pub remove_input: bool,

    /// Leave version-1 (64-bit) headers untouched instead of patching them
    #[arg(long, default_value_t = false)]
    pub skip_v1: bool,

    /// Print the result as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct ProbeArgs {
    /// Media file to probe
    #[arg(required = true, value_name = "INPUT")]
    pub input: PathBuf,

    /// ffprobe binary
    #[arg(long, value_name = "PATH", env = FFPROBE_ENV_VAR, default_value = DEFAULT_FFPROBE_PATH)]
    pub ffprobe: PathBuf,

    /// Frame rate detection backend
    #[arg(long, value_enum, default_value_t = ProbeBackend::Command)]
    pub probe_backend: ProbeBackend,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// File to scan
    #[arg(required = true, value_name = "INPUT")]
    pub input: PathBuf,

    /// Print the headers as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
