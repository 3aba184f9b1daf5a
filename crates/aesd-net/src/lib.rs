//! The networked append/replay server: concurrently accepts clients,
//! assembles each client's bytes into a record, publishes it to a shared
//! [`aesdring::Store`], and replays the whole store back before closing
//! the connection. A timer task interleaves synthetic timestamp records;
//! a signal task requests orderly shutdown (spec §2, §4.5–§4.8).

pub mod acceptor;
pub mod config;
pub mod connection;
pub mod error;
pub mod signal;
pub mod shutdown;
pub mod timer;
pub mod worker;

pub use config::ServerConfig;
pub use error::{ConnectionError, ServerError};
pub use shutdown::ShutdownFlag;
