// mp4fps-cli/src/lib.rs
//
// Library portion of the mp4fps CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, InspectArgs, PatchArgs, ProbeArgs, ProbeBackend};
pub use commands::{run_inspect, run_patch, run_probe};
