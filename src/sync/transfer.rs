//! Binary download of one remote file onto its local path.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use tracing::info;

use crate::transport::Transport;
use crate::utils::errors::{MirrorError, Result};

/// Data-stream copy chunk size.
const CHUNK_SIZE: usize = 64 * 1024;

/// Stream `remote_path` into `local_path`, replacing whatever was there.
///
/// The caller is responsible for the backup decision; by the time this
/// runs, overwriting is the point. On a failed transfer the partial local
/// file is left in place for the next run to repair, but the remote stream
/// is always handed back to the transport so the session survives.
pub fn fetch<T: Transport>(transport: &mut T, remote_path: &str, local_path: &Path) -> Result<u64> {
    let mut reader = transport.open_retrieve(remote_path)?;

    let file = match File::create(local_path) {
        Ok(file) => file,
        Err(e) => {
            // Abandon the opened data stream so the session stays usable.
            let _ = transport.finish_retrieve(remote_path, reader);
            return Err(MirrorError::local_io(local_path, e));
        }
    };
    let mut writer = BufWriter::new(file);

    let copied = copy_stream(&mut reader, &mut writer, remote_path, local_path);
    let finished = transport.finish_retrieve(remote_path, reader);

    let bytes = copied?;
    finished?;
    writer
        .flush()
        .map_err(|e| MirrorError::local_io(local_path, e))?;

    info!("Fetched {} -> {} ({bytes} bytes)", remote_path, local_path.display());
    Ok(bytes)
}

/// Chunked copy, attributing read failures to the session and write
/// failures to the local file.
fn copy_stream(
    reader: &mut impl Read,
    writer: &mut impl Write,
    remote_path: &str,
    local_path: &Path,
) -> Result<u64> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let n = reader.read(&mut buf).map_err(|e| {
            MirrorError::Session(format!("data stream read for {remote_path}: {e}"))
        })?;
        if n == 0 {
            break;
        }
        writer
            .write_all(&buf[..n])
            .map_err(|e| MirrorError::local_io(local_path, e))?;
        total += n as u64;
    }

    Ok(total)
}
