//! Pair path resolution.

use std::path::{Path, PathBuf};

use crate::config::{SyncPair, SyncSettings};

/// Absolute paths for one pair, derived fresh at the start of each run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPair {
    /// Remote file path as sent over the wire, forward slashes throughout
    pub remote_path: String,
    /// Local file the remote is mirrored onto
    pub local_path: PathBuf,
    /// Directory containing `local_path`
    pub local_dir: PathBuf,
    /// Where backups of `local_path` go
    pub backup_dir: PathBuf,
}

/// Join the configured bases onto one pair's relative paths.
///
/// Remote joining always speaks forward slashes regardless of host
/// platform; local joining follows host path rules. This is pure string
/// and path work: a nonsensical path fails later, at the I/O that
/// touches it.
pub fn resolve(settings: &SyncSettings, pair: &SyncPair) -> ResolvedPair {
    let remote_path = join_remote(&settings.remote_base, &pair.remote);
    let local_path = settings.local_base.join(&pair.local);

    let local_dir = local_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let backup_dir = if settings.backup_path.as_os_str().is_empty() {
        local_dir.clone()
    } else {
        local_dir.join(&settings.backup_path)
    };

    ResolvedPair {
        remote_path,
        local_path,
        local_dir,
        backup_dir,
    }
}

/// Forward-slash join with exactly one separator between non-empty parts.
fn join_remote(base: &str, rel: &str) -> String {
    if base.is_empty() {
        return rel.to_string();
    }
    if rel.is_empty() {
        return base.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        rel.trim_start_matches('/')
    )
}
