//! Pre-overwrite backups of stale local files.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::utils::errors::{MirrorError, Result};

/// Timestamp layout embedded in backup file names.
const BACKUP_TIME_FORMAT: &str = "%Y.%m.%d-%H.%M";

/// Copy `local_path` into `backup_dir` under a timestamped name.
///
/// Called only for a stale local file, before it is overwritten; the fetch
/// must not proceed if this fails. The name carries minute precision, so
/// two backups of the same file within one minute collide and the second
/// replaces the first.
pub fn create_backup(local_path: &Path, backup_dir: &Path) -> Result<PathBuf> {
    let backup_path = backup_dir.join(backup_file_name(local_path, Local::now()));

    fs::copy(local_path, &backup_path).map_err(|e| MirrorError::local_io(&backup_path, e))?;

    info!(
        "Backed up {} to {}",
        local_path.display(),
        backup_path.display()
    );
    Ok(backup_path)
}

/// Backup name for a file: `<stem>_<timestamp>`, keeping the extension.
///
/// `tool.exe` becomes `tool_2024.05.17-09.41.exe`; a name without an
/// extension just gets the suffix appended.
fn backup_file_name(local_path: &Path, at: DateTime<Local>) -> String {
    let stem = local_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let timestamp = at.format(BACKUP_TIME_FORMAT);

    match local_path.extension() {
        Some(ext) => format!("{stem}_{timestamp}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{timestamp}"),
    }
}
