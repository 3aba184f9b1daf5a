//! Listener, worker spawner, and reaper (spec §4.6).

use std::sync::Arc;

use aesdring::Store;
use tokio::net::{TcpListener, TcpSocket};
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::connection;
use crate::error::ServerError;
use crate::shutdown::ShutdownFlag;
use crate::worker::WorkerRegistry;

/// Binds the configured address and runs the accept/reap loop until
/// `shutdown` is set, then drains every outstanding worker before
/// returning.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the listener cannot be bound.
pub async fn run(config: ServerConfig, store: Arc<Store>, shutdown: Arc<ShutdownFlag>) -> Result<(), ServerError> {
    let listener = bind_with_reuseaddr(&config).map_err(|source| ServerError::Bind {
        addr: config.bind_addr,
        source,
    })?;
    info!(addr = %config.bind_addr, "listening");

    let mut registry = WorkerRegistry::new();
    let mut sweep = tokio::time::interval(config.poll_interval);

    loop {
        tokio::select! {
            biased;

            _ = shutdown.wait() => break,

            _ = sweep.tick() => {
                reap_and_log(&mut registry);
            }

            accepted = listener.accept() => {
                match accepted {
                    Ok((socket, peer)) => {
                        let store = Arc::clone(&store);
                        let read_buf_len = config.read_buf_len;
                        let replay_chunk_len = config.replay_chunk_len;
                        let id = registry.spawn(move |id| {
                            connection::run(id, socket, store, read_buf_len, replay_chunk_len)
                        });
                        info!(worker = id, peer = %peer, "accepted connection");
                    }
                    Err(err) => {
                        warn!(error = %err, "accept failed, continuing");
                    }
                }
                reap_and_log(&mut registry);
            }
        }
    }

    info!(outstanding = registry.len(), "shutting down, draining workers");
    registry.shutdown_all().await;
    Ok(())
}

/// Binds `config.bind_addr` with `SO_REUSEADDR` set and a `listen` backlog
/// of `config.backlog` (spec §6: "with address reuse", §4.6 step 1).
/// `TcpListener::bind` offers neither knob directly; going through
/// `TcpSocket` gets both without pulling in `socket2`.
fn bind_with_reuseaddr(config: &ServerConfig) -> std::io::Result<TcpListener> {
    let socket = if config.bind_addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket.bind(config.bind_addr)?;
    socket.listen(config.backlog)
}

fn reap_and_log(registry: &mut WorkerRegistry) {
    for outcome in registry.reap() {
        match outcome.result {
            Ok(()) => tracing::debug!(worker = outcome.id, "worker reaped"),
            Err(err) => warn!(worker = outcome.id, error = %err, "worker reaped with error"),
        }
    }
}
