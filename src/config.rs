//! Configuration for the bounded record store.

/// The reference capacity: the store retains this many completed records
/// before the oldest is evicted on the next append.
pub const DEFAULT_CAPACITY: usize = 10;

/// Configuration for a [`crate::Ring`] / [`crate::Store`].
///
/// Mirrors the teacher crate's `Config` shape (plain data, `Default` impl,
/// `with_*` builder setters) rather than hard-wiring the capacity as a
/// literal constant, so tests can exercise small or large rings without
/// touching production code paths.
#[derive(Debug, Clone, Copy)]
pub struct RingConfig {
    /// Number of record slots. `10` in the reference.
    pub capacity: usize,
    /// Enable lightweight append/evict counters (slight overhead).
    pub track_stats: bool,
}

impl RingConfig {
    /// Creates a configuration with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub const fn new(capacity: usize, track_stats: bool) -> Self {
        assert!(capacity > 0, "capacity must be at least 1");
        Self {
            capacity,
            track_stats,
        }
    }

    /// Sets the capacity.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be at least 1");
        self.capacity = capacity;
        self
    }

    /// Enables or disables stat counters.
    #[must_use]
    pub const fn with_stats(mut self, track_stats: bool) -> Self {
        self.track_stats = track_stats;
        self
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            track_stats: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_capacity() {
        assert_eq!(RingConfig::default().capacity, 10);
    }

    #[test]
    #[should_panic(expected = "capacity must be at least 1")]
    fn rejects_zero_capacity() {
        let _ = RingConfig::new(0, false);
    }

    #[test]
    fn builder_overrides_default() {
        let cfg = RingConfig::default().with_capacity(4).with_stats(true);
        assert_eq!(cfg.capacity, 4);
        assert!(cfg.track_stats);
    }
}
