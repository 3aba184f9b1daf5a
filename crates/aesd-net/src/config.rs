//! Server-wide tunables (spec §4.6, §4.7, §6).

use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for the networked append/replay server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the listener on. Default `0.0.0.0:9000`.
    pub bind_addr: SocketAddr,

    /// Listen backlog passed to `TcpSocket::listen` (spec §4.6 names "≥ 50").
    pub backlog: u32,

    /// How often the supervisor loop wakes to sweep finished workers when
    /// no new connection has arrived. Default 100ms (spec §4.6).
    pub poll_interval: Duration,

    /// Period between synthetic timestamp records. Default 10s (spec §4.7).
    pub timer_interval: Duration,

    /// Size of a connection worker's local read scratch buffer. Default
    /// 1 KiB (spec §4.5).
    pub read_buf_len: usize,

    /// Chunk size used when replaying the store back to a client. Default
    /// 1 KiB (spec §4.5).
    pub replay_chunk_len: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 9000)),
            backlog: 50,
            poll_interval: Duration::from_millis(100),
            timer_interval: Duration::from_secs(10),
            read_buf_len: 1024,
            replay_chunk_len: 1024,
        }
    }
}

impl ServerConfig {
    /// Overrides the bind address.
    #[must_use]
    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    /// Overrides the reap-sweep poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Overrides the timestamp period.
    #[must_use]
    pub fn with_timer_interval(mut self, timer_interval: Duration) -> Self {
        self.timer_interval = timer_interval;
        self
    }
}
