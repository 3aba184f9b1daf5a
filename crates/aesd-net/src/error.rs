//! Error types for the networked server (spec §7).

use thiserror::Error;

/// Fatal startup failures. Anything reaching this point is logged and
/// causes the process to exit nonzero; it never surfaces from a running
/// server (spec §4.6, §7: a per-client failure never terminates the
/// service).
#[derive(Debug, Error)]
pub enum ServerError {
    /// Binding the listener address failed.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The backing-file store could not be opened.
    #[error("failed to open backing store: {0}")]
    Store(#[from] aesdring::StoreError),

    /// Installing a signal handler failed.
    #[error("failed to install signal handler: {0}")]
    Signal(#[source] std::io::Error),
}

/// Why a connection worker ended. Never propagated past the worker: the
/// acceptor only logs it (spec §4.5, §7).
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The client socket could not be read from or written to.
    #[error("socket I/O error: {0}")]
    Io(#[from] std::io::Error),
}
