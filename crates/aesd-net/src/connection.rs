//! Per-client connection worker (spec §4.5).

use std::sync::Arc;

use aesdring::Store;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::error::ConnectionError;

/// Outcome of one connection worker's lifetime, reported to the
/// supervisor for logging only — never propagated as a hard failure
/// (spec §4.5, §7).
pub struct ConnectionOutcome {
    pub id: u64,
    pub result: Result<(), ConnectionError>,
}

/// Runs one client connection to completion: receive a record, publish it,
/// replay the whole store back, close.
pub async fn run(
    id: u64,
    mut socket: TcpStream,
    store: Arc<Store>,
    read_buf_len: usize,
    replay_chunk_len: usize,
) -> ConnectionOutcome {
    let result = drive(&mut socket, &store, read_buf_len, replay_chunk_len).await;
    if let Err(ref err) = result {
        warn!(worker = id, error = %err, "connection worker failed");
    } else {
        debug!(worker = id, "connection worker done");
    }
    ConnectionOutcome { id, result }
}

async fn drive(
    socket: &mut TcpStream,
    store: &Store,
    read_buf_len: usize,
    replay_chunk_len: usize,
) -> Result<(), ConnectionError> {
    let Some(record) = receive_record(socket, read_buf_len).await? else {
        // Zero-byte read: treated as end-of-stream, the connection is
        // abandoned cleanly with nothing published (§9 open question).
        return Ok(());
    };

    store.write(&record);

    let mut offset = 0usize;
    loop {
        let chunk = store.read(offset, replay_chunk_len);
        if chunk.is_empty() {
            break;
        }
        write_all_retrying(socket, &chunk).await?;
        offset += chunk.len();
    }

    Ok(())
}

/// Reads from the socket, accumulating bytes until a newline appears.
/// Returns `None` on a zero-byte read (end-of-stream).
async fn receive_record(socket: &mut TcpStream, read_buf_len: usize) -> Result<Option<Vec<u8>>, ConnectionError> {
    let mut scratch = vec![0u8; read_buf_len];
    let mut accumulator = Vec::new();

    loop {
        let n = socket.read(&mut scratch).await?;
        if n == 0 {
            return Ok(None);
        }

        let chunk = &scratch[..n];
        let had_newline = chunk.contains(&b'\n');
        accumulator.extend_from_slice(chunk);

        if had_newline {
            return Ok(Some(accumulator));
        }
    }
}

/// Writes `bytes` to the socket, retrying on short writes by advancing
/// past whatever was already accepted (spec §4.5).
async fn write_all_retrying(socket: &mut TcpStream, bytes: &[u8]) -> Result<(), ConnectionError> {
    let mut written = 0;
    while written < bytes.len() {
        let n = socket.write(&bytes[written..]).await?;
        written += n;
    }
    Ok(())
}
