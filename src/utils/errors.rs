//! Custom error types for the mirror engine.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while mirroring.
///
/// The distinction that matters at runtime is fatal versus per-pair:
/// configuration and session errors end the whole run, everything else is
/// charged to the pair being processed and the run moves on.
#[derive(Error, Debug)]
pub enum MirrorError {
    /// Missing or inconsistent configuration, detected before any transfer
    #[error("Configuration error: {0}")]
    Config(String),

    /// The transport session is unusable (connect, login, connection lost)
    #[error("Transport session error: {0}")]
    Session(String),

    /// The server answered, but unhelpfully, for one remote path
    #[error("Remote query failed for {path}: {reason}")]
    RemoteQuery { path: String, reason: String },

    /// Local filesystem failure, tagged with the path involved
    #[error("Local I/O error on {}: {}", .path.display(), .source)]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The server's modification-time reply did not parse
    #[error("Malformed remote timestamp for {0}")]
    MalformedTimestamp(String),

    /// A needed directory path is occupied by a non-directory
    #[error("Path exists but is not a directory: {}", .0.display())]
    PathConflict(PathBuf),
}

impl MirrorError {
    /// Wrap an I/O error together with the local path it happened on.
    pub fn local_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LocalIo {
            path: path.into(),
            source,
        }
    }

    /// True when the error invalidates the whole run rather than one pair.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Session(_))
    }
}

pub type Result<T> = std::result::Result<T, MirrorError>;
