//! Remote transport abstraction.
//!
//! The mirror engine needs exactly three things from the wire: a directory
//! listing for existence checks, a per-file modification time, and a binary
//! retrieve. Everything FTP-specific lives behind this trait so the engine
//! can be exercised against an in-memory session.

use std::io::Read;

use chrono::{DateTime, Utc};

use crate::utils::errors::Result;

pub mod ftp;

#[cfg(test)]
pub(crate) mod fake;

/// One stateful remote session.
///
/// Implementations hold a single connection: calls are strictly sequential,
/// a retrieve opened with [`Transport::open_retrieve`] must be finished with
/// [`Transport::finish_retrieve`] before any other call, and [`Transport::close`]
/// ends the session for good.
pub trait Transport {
    /// Raw listing lines for a remote directory.
    ///
    /// `None` lists the session's current directory.
    fn list_dir(&mut self, dir: Option<&str>) -> Result<Vec<String>>;

    /// Last-modified time of a remote file, in whole seconds.
    fn modified_time(&mut self, path: &str) -> Result<DateTime<Utc>>;

    /// Start a binary retrieve and hand back the data stream to drain.
    fn open_retrieve(&mut self, path: &str) -> Result<Box<dyn Read>>;

    /// Give the drained (or abandoned) data stream back so the session can
    /// acknowledge the transfer and stay usable.
    fn finish_retrieve(&mut self, path: &str, stream: Box<dyn Read>) -> Result<()>;

    /// End the session politely.
    fn close(&mut self) -> Result<()>;
}
