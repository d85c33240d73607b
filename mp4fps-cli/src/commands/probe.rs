//! Implementation of the 'probe' subcommand.

use std::path::Path;

use crate::cli::{ProbeArgs, ProbeBackend};
use crate::commands::fps_probe;
use crate::error::CliResult;
use crate::output::print_info;

use log::debug;
use mp4fps_core::external::check_dependency;

/// Prints the frame rate detected for the input.
pub fn run_probe(args: &ProbeArgs) -> CliResult<f64> {
    let binary = match args.probe_backend {
        ProbeBackend::Command => args.ffprobe.as_path(),
        ProbeBackend::Crate => Path::new("ffprobe"),
    };
    check_dependency(binary)?;
    debug!("Detecting frame rate with the {:?} backend", args.probe_backend);
    let fps = fps_probe(args.probe_backend, &args.ffprobe).probe_fps(&args.input)?;
    print_info("Original FPS", format!("{fps:.3}"));
    Ok(fps)
}
