//! Directory bookkeeping for mirror targets.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::utils::errors::{MirrorError, Result};

/// Make sure `path` exists as a directory, creating missing ancestors.
///
/// An existing directory is a silent no-op. An existing non-directory is a
/// [`MirrorError::PathConflict`].
pub fn ensure_dir(path: &Path) -> Result<()> {
    // A relative file name with no parent resolves to "".
    if path.as_os_str().is_empty() {
        return Ok(());
    }

    if path.exists() {
        if path.is_dir() {
            return Ok(());
        }
        return Err(MirrorError::PathConflict(path.to_path_buf()));
    }

    fs::create_dir_all(path).map_err(|e| MirrorError::local_io(path, e))?;
    info!("Created directory: {}", path.display());
    Ok(())
}
