//! Stale-or-current classification of a local file against its remote.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::fs::metadata::modified_secs;
use crate::utils::errors::Result;

/// How the local copy relates to the remote one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// No local file at all
    Absent,
    /// Local file exists and is strictly older than the remote
    Stale,
    /// Local file is as new as the remote, or newer
    Current,
}

/// Classify `local_path` against the remote modification time.
///
/// Both sides are compared in whole seconds. Equal timestamps count as
/// `Current`: only a strictly older local file justifies a transfer, so
/// repeated runs against an unchanged remote settle into doing nothing.
pub fn evaluate(local_path: &Path, remote_mtime: DateTime<Utc>) -> Result<Freshness> {
    if !local_path.is_file() {
        return Ok(Freshness::Absent);
    }

    let local_secs = modified_secs(local_path)?;
    if local_secs < remote_mtime.timestamp() {
        Ok(Freshness::Stale)
    } else {
        Ok(Freshness::Current)
    }
}
