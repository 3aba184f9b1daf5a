//! Mutex-guarded façade composing [`Ring`] and [`Assembler`] (spec §4.3).

use std::sync::Mutex;

use crate::assembler::Assembler;
use crate::error::StoreError;
use crate::record::Record;
use crate::ring::Ring;
use crate::RingConfig;

/// Snapshot of lifetime counters, populated only when `track_stats` is set
/// on the store's [`RingConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreStats {
    /// Records appended over the store's lifetime (including evicted ones).
    pub appends: u64,
    /// Records evicted over the store's lifetime.
    pub evictions: u64,
    /// Bytes currently resident across all stored records.
    pub resident_bytes: usize,
}

struct Inner {
    ring: Ring,
    assembler: Assembler,
}

/// The shared core behind both the character-device and networked
/// front-ends: a bounded ring of records, fed by a stream assembler, with
/// byte-offset addressing across the oldest-first concatenation of stored
/// records.
///
/// All methods take `&self` — interior mutability via a single [`Mutex`]
/// serializes every access, matching the single-writer-single-reader
/// simplicity the character device and the networked server both expect
/// (spec §4.3, §5).
pub struct Store {
    inner: Mutex<Inner>,
}

impl Store {
    /// Creates an empty store with the given ring configuration.
    #[must_use]
    pub fn new(config: RingConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                ring: Ring::new(config),
                assembler: Assembler::new(),
            }),
        }
    }

    /// Feeds raw bytes through the assembler, publishing every record that
    /// becomes complete as a result. Returns the number of bytes accepted
    /// (always `bytes.len()` — writes never block or partially fail).
    pub fn write(&self, bytes: &[u8]) -> usize {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let records = inner.assembler.feed(bytes);
        for record in records {
            inner.ring.push(record);
        }
        bytes.len()
    }

    /// Appends a single pre-formed, newline-terminated record directly,
    /// bypassing the assembler. Used by the networked server's timer task
    /// to publish synthetic timestamp records (spec §4.7) without
    /// perturbing any client's in-flight partial write.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyRecord`] if `bytes` is empty.
    pub fn append_record(&self, bytes: Vec<u8>) -> Result<(), StoreError> {
        let record = Record::new(bytes).ok_or(StoreError::EmptyRecord)?;
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.ring.push(record);
        Ok(())
    }

    /// Reads up to `max_len` bytes starting at `offset` in the logical,
    /// oldest-first concatenation of stored records. A call never crosses a
    /// record boundary — it returns at most the tail of the single record
    /// addressed by `offset` (spec §4.3); callers advance `offset` by the
    /// returned length and re-read to stream the full log. Returns an empty
    /// vector once `offset` reaches the end of available data.
    #[must_use]
    pub fn read(&self, offset: usize, max_len: usize) -> Vec<u8> {
        let inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let Some((slot, intra)) = inner.ring.locate(offset) else {
            return Vec::new();
        };
        let record = inner.ring.slot(slot).expect("locate returned an occupied slot");
        let bytes = &record.as_bytes()[intra..];
        let take = bytes.len().min(max_len);
        bytes[..take].to_vec()
    }

    /// Total byte count across all currently stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .ring
            .total_bytes()
    }

    /// Returns `true` if no records are currently stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of lifetime counters. Zeroed if `track_stats` was not set.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        StoreStats {
            appends: inner.ring.appends(),
            evictions: inner.ring.evictions(),
            resident_bytes: inner.ring.total_bytes(),
        }
    }

    /// Drops all stored records and any partial, unterminated bytes held by
    /// the assembler.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.ring.deinit();
        inner.assembler.reset();
    }
}
