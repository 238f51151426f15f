//! Destination handling
//!
//! Output is fully encoded in memory, written to a temporary file next to the
//! destination, then renamed over it. A failed run never leaves a partial
//! `.toy` file behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use toy_format::TOY_EXTENSION;

use crate::error::ExportError;

/// Validates the destination and appends `.toy` when asked and missing
pub fn resolve_destination(path: &Path, append_extension: bool) -> Result<PathBuf, ExportError> {
    if path.as_os_str().is_empty() {
        return Err(ExportError::EmptyDestinationPath);
    }

    // Plain suffix test, so a bare "out/.toy" counts as already named
    let suffix = format!(".{TOY_EXTENSION}");
    let has_extension = path
        .as_os_str()
        .to_string_lossy()
        .to_ascii_lowercase()
        .ends_with(&suffix);

    if append_extension && !has_extension {
        let mut name = path.as_os_str().to_owned();
        name.push(".");
        name.push(TOY_EXTENSION);
        return Ok(PathBuf::from(name));
    }
    Ok(path.to_path_buf())
}

/// Writes `bytes` to `path` through a temporary file in the same directory
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(|e| ExportError::io(dir, e))?;
    staged
        .write_all(bytes)
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| ExportError::io(staged.path(), e))?;
    staged
        .persist(path)
        .map_err(|e| ExportError::io(path, e.error))?;
    Ok(())
}
