//! Local file metadata for the staleness check.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use crate::utils::errors::{MirrorError, Result};

/// Last-modified time of `path` in whole seconds since the Unix epoch.
///
/// Sub-second precision is deliberately dropped: the remote side reports
/// whole seconds, and comparing mixed resolutions would misclassify files.
pub fn modified_secs(path: &Path) -> Result<i64> {
    let metadata = fs::metadata(path).map_err(|e| MirrorError::local_io(path, e))?;
    let modified = metadata
        .modified()
        .map_err(|e| MirrorError::local_io(path, e))?;

    let secs = modified
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    Ok(secs as i64)
}
