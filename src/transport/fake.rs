//! In-memory transport for exercising the engine without a server.

use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use chrono::{DateTime, Utc};

use crate::transport::Transport;
use crate::utils::errors::{MirrorError, Result};

/// One scripted remote file.
#[derive(Debug, Clone)]
pub(crate) struct RemoteFile {
    pub content: Vec<u8>,
    /// `None` makes the modification-time query fail as malformed
    pub mtime: Option<DateTime<Utc>>,
    /// Whether the directory listing shows the file
    pub listed: bool,
}

impl RemoteFile {
    pub fn new(content: &[u8], mtime: DateTime<Utc>) -> Self {
        Self {
            content: content.to_vec(),
            mtime: Some(mtime),
            listed: true,
        }
    }
}

/// Scriptable stand-in for an FTP session.
#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    pub files: BTreeMap<String, RemoteFile>,
    /// Any operation involving this path kills the session
    pub session_killer: Option<String>,
    /// Serve only this many bytes of the named file, then fail the stream
    pub truncate_after: Option<(String, usize)>,
    pub closed: bool,
    /// Directories handed to `list_dir`, in call order
    pub listed_dirs: Vec<Option<String>>,
}

impl FakeTransport {
    pub fn with_files(files: Vec<(&str, RemoteFile)>) -> Self {
        Self {
            files: files
                .into_iter()
                .map(|(path, file)| (path.to_string(), file))
                .collect(),
            ..Self::default()
        }
    }

    fn check_session(&self, path: &str) -> Result<()> {
        if self.session_killer.as_deref() == Some(path) {
            return Err(MirrorError::Session(
                "connection reset by peer".to_string(),
            ));
        }
        Ok(())
    }
}

impl Transport for FakeTransport {
    fn list_dir(&mut self, dir: Option<&str>) -> Result<Vec<String>> {
        if let Some(killer) = &self.session_killer {
            if dir_of(killer).as_deref() == dir {
                return Err(MirrorError::Session(
                    "connection reset by peer".to_string(),
                ));
            }
        }
        self.listed_dirs.push(dir.map(str::to_string));

        let lines = self
            .files
            .iter()
            .filter(|(path, file)| file.listed && dir_of(path).as_deref() == dir)
            .map(|(path, file)| {
                let name = path.rsplit('/').next().unwrap_or(path);
                format!(
                    "-rw-r--r--    1 1001     1001    {:>8} Jan 01 00:00 {}",
                    file.content.len(),
                    name
                )
            })
            .collect();
        Ok(lines)
    }

    fn modified_time(&mut self, path: &str) -> Result<DateTime<Utc>> {
        self.check_session(path)?;
        let file = self
            .files
            .get(path)
            .ok_or_else(|| MirrorError::RemoteQuery {
                path: path.to_string(),
                reason: "550 Could not get modification time".to_string(),
            })?;
        file.mtime
            .ok_or_else(|| MirrorError::MalformedTimestamp(path.to_string()))
    }

    fn open_retrieve(&mut self, path: &str) -> Result<Box<dyn Read>> {
        self.check_session(path)?;
        let file = self
            .files
            .get(path)
            .ok_or_else(|| MirrorError::RemoteQuery {
                path: path.to_string(),
                reason: "550 Failed to open file".to_string(),
            })?;

        if let Some((victim, keep)) = &self.truncate_after {
            if victim == path {
                return Ok(Box::new(FailingReader {
                    data: Cursor::new(file.content[..*keep].to_vec()),
                }));
            }
        }
        Ok(Box::new(Cursor::new(file.content.clone())))
    }

    fn finish_retrieve(&mut self, _path: &str, _stream: Box<dyn Read>) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

/// Parent directory of a forward-slash path, `None` for bare names.
fn dir_of(path: &str) -> Option<String> {
    match path.rsplit_once('/') {
        Some(("", _)) => Some("/".to_string()),
        Some((dir, _)) => Some(dir.to_string()),
        None => None,
    }
}

/// Serves its buffer, then fails like a dropped data connection.
struct FailingReader {
    data: Cursor<Vec<u8>>,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.data.read(buf)?;
        if n == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset by peer",
            ));
        }
        Ok(n)
    }
}
