//! Listing-based remote existence checks.

use tracing::{info, warn};

use crate::transport::Transport;
use crate::utils::errors::Result;

/// True when `remote_path` shows up in its parent directory's listing.
///
/// Each listing line's final whitespace-separated token is matched against
/// the path's final segment, which is as precise as a plain LIST gets;
/// names containing whitespace cannot be matched this way. Absence is an
/// ordinary `false`, not an error; only transport failures propagate.
pub fn remote_exists<T: Transport>(transport: &mut T, remote_path: &str) -> Result<bool> {
    let (dir, name) = split_remote_path(remote_path);
    let lines = transport.list_dir(dir)?;

    let found = lines.iter().any(|line| listing_matches(line, name));
    if found {
        info!("Remote file present: {remote_path}");
    } else {
        warn!("Remote file not found: {remote_path}");
    }
    Ok(found)
}

/// Split a forward-slash path into (parent directory, final segment).
fn split_remote_path(remote_path: &str) -> (Option<&str>, &str) {
    match remote_path.rsplit_once('/') {
        Some(("", name)) => (Some("/"), name),
        Some((dir, name)) => (Some(dir), name),
        None => (None, remote_path),
    }
}

/// Does one LIST line name this file?
fn listing_matches(line: &str, name: &str) -> bool {
    line.split_whitespace().last() == Some(name)
}
