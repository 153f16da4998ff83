//! Blocking FTP implementation of the transport.

use std::io::Read;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};

use chrono::{DateTime, Utc};
use suppaftp::types::FileType;
use suppaftp::{FtpError, FtpStream};
use tracing::info;

use crate::config::FtpSettings;
use crate::transport::Transport;
use crate::utils::errors::{MirrorError, Result};

/// One authenticated FTP session in binary mode.
///
/// Holds the control connection for the whole run. Every method drives the
/// one underlying socket, so the session must not be shared.
pub struct FtpTransport {
    stream: FtpStream,
    closed: bool,
}

impl FtpTransport {
    /// Connect, authenticate, and switch to binary transfers.
    ///
    /// The configured timeout covers the connect itself, the control socket,
    /// and every passive-mode data socket, so a stalled server surfaces as a
    /// session error instead of a hang.
    pub fn connect(settings: &FtpSettings) -> Result<Self> {
        let addr = resolve_addr(&settings.host)?;
        let timeout = settings.timeout;

        let mut stream = FtpStream::connect_timeout(addr, timeout)
            .map_err(|e| session_error("connect", e))?
            .passive_stream_builder(move |addr| {
                let data =
                    TcpStream::connect_timeout(&addr, timeout).map_err(FtpError::ConnectionError)?;
                data.set_read_timeout(Some(timeout))
                    .map_err(FtpError::ConnectionError)?;
                data.set_write_timeout(Some(timeout))
                    .map_err(FtpError::ConnectionError)?;
                Ok(data)
            });

        let control = stream.get_ref();
        control
            .set_read_timeout(Some(timeout))
            .map_err(|e| MirrorError::Session(format!("set control socket timeout: {e}")))?;
        control
            .set_write_timeout(Some(timeout))
            .map_err(|e| MirrorError::Session(format!("set control socket timeout: {e}")))?;

        stream
            .login(&settings.user, &settings.password)
            .map_err(|e| session_error("login", e))?;
        stream
            .transfer_type(FileType::Binary)
            .map_err(|e| session_error("set binary mode", e))?;

        info!("Connected to {} as {}", settings.host, settings.user);
        Ok(Self {
            stream,
            closed: false,
        })
    }
}

impl Transport for FtpTransport {
    fn list_dir(&mut self, dir: Option<&str>) -> Result<Vec<String>> {
        self.stream
            .list(dir)
            .map_err(|e| query_error(dir.unwrap_or("."), e))
    }

    fn modified_time(&mut self, path: &str) -> Result<DateTime<Utc>> {
        match self.stream.mdtm(path) {
            // MDTM replies carry no zone; RFC 3659 says they are UTC.
            Ok(naive) => Ok(naive.and_utc()),
            Err(FtpError::BadResponse) => Err(MirrorError::MalformedTimestamp(path.to_string())),
            Err(e) => Err(query_error(path, e)),
        }
    }

    fn open_retrieve(&mut self, path: &str) -> Result<Box<dyn Read>> {
        let stream = self
            .stream
            .retr_as_stream(path)
            .map_err(|e| query_error(path, e))?;
        Ok(Box::new(stream))
    }

    fn finish_retrieve(&mut self, path: &str, stream: Box<dyn Read>) -> Result<()> {
        self.stream
            .finalize_retr_stream(stream)
            .map_err(|e| query_error(path, e))
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.stream.quit().map_err(|e| session_error("quit", e))
    }
}

impl Drop for FtpTransport {
    fn drop(&mut self) {
        if !self.closed {
            // Last-ditch QUIT for panic and early-return paths.
            let _ = self.stream.quit();
        }
    }
}

/// Resolve `host` or `host:port` to a socket address, defaulting to port 21.
fn resolve_addr(host: &str) -> Result<SocketAddr> {
    let target = if host.contains(':') {
        host.to_string()
    } else {
        format!("{host}:21")
    };

    target
        .to_socket_addrs()
        .map_err(|e| MirrorError::Session(format!("cannot resolve {target}: {e}")))?
        .next()
        .ok_or_else(|| MirrorError::Session(format!("no address found for {target}")))
}

/// Classify an FTP failure for an operation on one remote path.
///
/// Connection-level trouble kills the whole session; anything else is a
/// problem with that path only.
fn query_error(path: &str, err: FtpError) -> MirrorError {
    match err {
        FtpError::ConnectionError(e) => {
            MirrorError::Session(format!("connection lost during {path}: {e}"))
        }
        other => MirrorError::RemoteQuery {
            path: path.to_string(),
            reason: other.to_string(),
        },
    }
}

fn session_error(action: &str, err: FtpError) -> MirrorError {
    MirrorError::Session(format!("{action} failed: {err}"))
}
