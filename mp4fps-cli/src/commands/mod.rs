//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Module containing the implementation of the `patch` command.
pub mod patch;

/// `probe`: frame rate detection only.
pub mod probe;

/// `inspect`: read-only header listing.
pub mod inspect;

use std::path::Path;

use mp4fps_core::{CrateFfprobeProbe, FfprobeCommandProbe, FpsProbe};

use crate::cli::ProbeBackend;

pub use inspect::run_inspect;
pub use patch::run_patch;
pub use probe::run_probe;

/// Builds the frame rate detector for the chosen backend.
///
/// The crate backend always runs `ffprobe` from `PATH`, so `ffprobe` is only
/// used by the command backend.
pub fn fps_probe(backend: ProbeBackend, ffprobe: &Path) -> Box<dyn FpsProbe> {
    match backend {
        ProbeBackend::Command => Box::new(FfprobeCommandProbe::new(ffprobe)),
        ProbeBackend::Crate => Box::new(CrateFfprobeProbe::new()),
    }
}
