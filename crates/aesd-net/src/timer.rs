//! Periodic timestamp-record producer (spec §4.7).

use std::sync::Arc;

use aesdring::Store;
use tracing::warn;

use crate::config::ServerConfig;
use crate::shutdown::ShutdownFlag;

/// Appends a synthetic `timestamp:...\n` record to `store` every
/// `config.timer_interval`, until `shutdown` is set. The first emission
/// happens one interval after startup, not immediately.
pub async fn run(config: ServerConfig, store: Arc<Store>, shutdown: Arc<ShutdownFlag>) {
    let mut interval = tokio::time::interval(config.timer_interval);
    interval.tick().await; // skip the immediate first tick

    loop {
        tokio::select! {
            biased;

            _ = shutdown.wait() => break,

            _ = interval.tick() => {
                let record = aesdring::timestamp::format_record();
                if let Err(err) = store.append_record(record) {
                    warn!(error = %err, "failed to publish timestamp record");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aesdring::RingConfig;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn emits_one_record_per_interval() {
        let config = ServerConfig::default().with_timer_interval(Duration::from_millis(10));
        let store = Arc::new(Store::new(RingConfig::default()));
        let shutdown = Arc::new(ShutdownFlag::new());

        let handle = tokio::spawn(run(config, Arc::clone(&store), Arc::clone(&shutdown)));

        tokio::time::advance(Duration::from_millis(35)).await;
        tokio::task::yield_now().await;

        shutdown.trigger();
        handle.await.unwrap();

        let mut contents = Vec::new();
        let mut offset = 0;
        loop {
            let chunk = store.read(offset, 10_000);
            if chunk.is_empty() {
                break;
            }
            offset += chunk.len();
            contents.extend_from_slice(&chunk);
        }
        let count = contents.iter().filter(|&&b| b == b'\n').count();
        assert!(count >= 2, "expected multiple timestamp records, got {count}");
        assert!(contents.starts_with(b"timestamp:"));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_before_first_tick_emits_nothing() {
        let config = ServerConfig::default().with_timer_interval(Duration::from_secs(10));
        let store = Arc::new(Store::new(RingConfig::default()));
        let shutdown = Arc::new(ShutdownFlag::new());

        let handle = tokio::spawn(run(config, Arc::clone(&store), Arc::clone(&shutdown)));
        tokio::task::yield_now().await;
        shutdown.trigger();
        handle.await.unwrap();

        assert!(store.is_empty());
    }
}
