//! Core library for changing the frame rate an MP4 file reports without
//! re-encoding it.
//!
//! The container is patched in place: every `mvhd` and `mdhd` header has its
//! timescale and duration multiplied by `original_fps / desired_fps`. Sample
//! data and box sizes are never touched, so the output has exactly the same
//! length as the input.
//!
//! ## Usage Example
//!
//! ```rust
//! use mp4fps_core::{compute_scale, patch_container};
//!
//! // size, "mvhd", version/flags/creation, timescale 30000, duration 90000
//! let mut file = vec![0, 0, 0, 24];
//! file.extend_from_slice(b"mvhd");
//! file.extend_from_slice(&[0; 8]);
//! file.extend_from_slice(&30000u32.to_be_bytes());
//! file.extend_from_slice(&90000u32.to_be_bytes());
//!
//! let scale = compute_scale(30.0, 60.0).unwrap();
//! let patched = patch_container(file, scale).unwrap();
//! assert_eq!(patched.matched_count(), 1);
//! assert_eq!(&patched.bytes[16..20], &15000u32.to_be_bytes());
//! assert_eq!(&patched.bytes[20..24], &45000u32.to_be_bytes());
//! ```
//!
//! File handling, probing and output naming live in [`rewrite_file`].

pub mod config;
pub mod error;
pub mod external;
pub mod inspect;
pub mod layout;
pub mod patcher;
pub mod rewrite;
pub mod scale;
pub mod temp_files;
pub mod utils;

// Re-exports for public API
pub use config::{RewriteConfig, RewriteConfigBuilder};
pub use error::{CoreError, CoreResult, ErrorKind};
pub use external::{CrateFfprobeProbe, FfprobeCommandProbe, FpsProbe, StaticProbe};
pub use inspect::{HeaderInfo, inspect_container};
pub use patcher::{
    AtomPatchReport, PatchedContainer, SkipReason, SkippedBox, VersionPolicy, patch_atom,
    patch_atom_with, patch_container, patch_container_with,
};
pub use rewrite::{RewriteResult, rewrite_file};
pub use scale::compute_scale;
pub use utils::{format_bytes, parse_fps_text, parse_frame_rate};
