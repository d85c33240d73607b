//! Temporary file management utilities.
//!
//! Output files are written to a temporary file in the destination directory
//! and persisted into place, so a failed write never leaves a partial file
//! under the final name. The tempfile crate removes the temporary on drop.

use std::io::Write;
use std::path::Path;

use tempfile::{Builder as TempFileBuilder, NamedTempFile};

use crate::error::{CoreError, CoreResult};

/// Creates a temporary file with prefix and extension. Auto-deleted when dropped.
pub fn create_temp_file(dir: &Path, prefix: &str, extension: &str) -> CoreResult<NamedTempFile> {
    std::fs::create_dir_all(dir)?;
    let temp_file = TempFileBuilder::new()
        .prefix(&format!("{prefix}_"))
        .suffix(&format!(".{extension}"))
        .tempfile_in(dir)?;

    Ok(temp_file)
}

/// Writes `bytes` to `dest` through a temporary file in the same directory.
pub fn write_atomically(dest: &Path, bytes: &[u8]) -> CoreResult<()> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = create_temp_file(dir, ".mp4fps", "part")?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(dest).map_err(|e| CoreError::Io(e.error))?;
    Ok(())
}
