//! The process-wide shutdown flag (spec §4.8, §9).

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// An atomic boolean the signal handler flips, observed by the acceptor's
/// poll loop and the timer's sleep loop. Flipping it performs no I/O and
/// allocates nothing, matching the reference signal handler exactly (spec
/// §4.8) — the `Notify` only exists so waiters don't have to busy-poll the
/// flag between their own wake-ups.
#[derive(Debug, Default)]
pub struct ShutdownFlag {
    flag: AtomicBool,
    notify: Notify,
}

impl ShutdownFlag {
    /// Creates a flag that is not yet set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flag and wakes every current waiter. Idempotent.
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::Release);
        self.notify.notify_waiters();
    }

    /// Returns `true` if shutdown has been requested.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Resolves immediately if already set; otherwise waits for the next
    /// `trigger` call. Safe to call repeatedly from a `select!` loop.
    pub async fn wait(&self) {
        if self.is_set() {
            return;
        }
        self.notify.notified().await;
    }
}
