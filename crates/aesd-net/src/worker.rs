//! Live-worker bookkeeping for the acceptor (spec §4.6).

use tokio::task::JoinSet;

use crate::connection::ConnectionOutcome;

/// Tracks in-flight connection workers and hands out monotonically
/// increasing identifiers that wrap at `u64::MAX` back to 1 (spec §4.6).
///
/// Reaping is backed by a [`JoinSet`]: rather than hand-walking a linked
/// collection polling a `DONE` flag, `try_join_next` already does exactly
/// that — an admissible async translation of the reference's sweep (spec
/// §9).
pub struct WorkerRegistry {
    next_id: u64,
    set: JoinSet<ConnectionOutcome>,
}

impl WorkerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 1,
            set: JoinSet::new(),
        }
    }

    /// Allocates the next worker id.
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = if id == u64::MAX { 1 } else { id + 1 };
        id
    }

    /// Spawns `make_future(id)` as a tracked worker, returning its id.
    pub fn spawn<F>(&mut self, make_future: impl FnOnce(u64) -> F) -> u64
    where
        F: std::future::Future<Output = ConnectionOutcome> + Send + 'static,
    {
        let id = self.next_id();
        self.set.spawn(make_future(id));
        id
    }

    /// Drains every worker that has already finished, without blocking.
    pub fn reap(&mut self) -> Vec<ConnectionOutcome> {
        let mut done = Vec::new();
        while let Some(result) = self.set.try_join_next() {
            match result {
                Ok(outcome) => done.push(outcome),
                Err(join_err) => {
                    tracing::warn!(error = %join_err, "connection worker panicked");
                }
            }
        }
        done
    }

    /// Number of workers still tracked (running or unreaped).
    #[must_use]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Returns `true` if no workers are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Aborts every still-running worker and waits for them to unwind,
    /// used during shutdown (spec §4.6 step 3, §5 cancellation).
    pub async fn shutdown_all(&mut self) {
        self.set.abort_all();
        while self.set.join_next().await.is_some() {}
    }
}

impl Default for WorkerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
