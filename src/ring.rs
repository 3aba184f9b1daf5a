//! The bounded circular buffer of [`Record`]s (spec §4.1).

use crate::invariants::{
    debug_assert_locate_in_bounds, debug_assert_occupied_count, debug_assert_ring_indices_in_range,
    debug_assert_slot_nonempty,
};
use crate::record::Record;
use crate::RingConfig;

/// A fixed-capacity circular buffer of variable-length [`Record`]s.
///
/// Slots are indexed `[0, capacity)`. Two monotone cursors (`in_idx`,
/// `out_idx`) plus a `full` flag track occupancy — `full` disambiguates the
/// `in_idx == out_idx` collision between "empty" and "full" (spec §9).
///
/// `Ring` itself performs no locking; callers (the [`crate::Store`]) must
/// serialize access.
pub struct Ring {
    slots: Vec<Option<Record>>,
    in_idx: usize,
    out_idx: usize,
    full: bool,
    evictions: u64,
    appends: u64,
    track_stats: bool,
}

impl Ring {
    /// Creates an empty ring with the given configuration.
    #[must_use]
    pub fn new(config: RingConfig) -> Self {
        let mut slots = Vec::with_capacity(config.capacity);
        slots.resize_with(config.capacity, || None);
        Self {
            slots,
            in_idx: 0,
            out_idx: 0,
            full: false,
            evictions: 0,
            appends: 0,
            track_stats: config.track_stats,
        }
    }

    /// Ring capacity (`CAP` in spec.md, 10 in the reference).
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if every slot is occupied.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Returns `true` if no slot is occupied.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.full && self.in_idx == self.out_idx
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn occupied(&self) -> usize {
        if self.full {
            self.capacity()
        } else {
            (self.in_idx + self.capacity() - self.out_idx) % self.capacity()
        }
    }

    /// Total byte count across all occupied slots — the store's virtual
    /// length (spec §3).
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.slots.iter().flatten().map(Record::len).sum()
    }

    /// Number of records evicted over this ring's lifetime (only tracked
    /// when `track_stats` is set).
    #[must_use]
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Number of records appended (including those later evicted) over this
    /// ring's lifetime (only tracked when `track_stats` is set).
    #[must_use]
    pub fn appends(&self) -> u64 {
        self.appends
    }

    /// Pushes `record` into the ring, evicting the oldest record if full.
    ///
    /// Returns the evicted record, if any, so the caller controls its
    /// drop — the ring itself is agnostic to allocator/deallocation
    /// discipline (spec §9).
    ///
    /// A zero-length record is rejected as a no-op; in practice
    /// `Record::new` already refuses to construct one, so this is a
    /// defense at the boundary the spec names (§4.1, §8).
    pub fn push(&mut self, record: Record) -> Option<Record> {
        if record.is_empty() {
            return None;
        }

        let evicted = if self.full {
            let evicted = self.slots[self.out_idx].take();
            self.out_idx = (self.out_idx + 1) % self.capacity();
            if self.track_stats && evicted.is_some() {
                self.evictions += 1;
            }
            evicted
        } else {
            None
        };

        debug_assert_slot_nonempty!(record.len());
        self.slots[self.in_idx] = Some(record);
        self.in_idx = (self.in_idx + 1) % self.capacity();
        self.full = self.in_idx == self.out_idx;

        if self.track_stats {
            self.appends += 1;
        }

        debug_assert_ring_indices_in_range!(self.in_idx, self.out_idx, self.capacity());
        let expected_partial = (self.in_idx + self.capacity() - self.out_idx) % self.capacity();
        debug_assert_occupied_count!(self.occupied(), self.full, self.capacity(), expected_partial);

        evicted
    }

    /// Given a nonnegative byte offset into the logical, oldest-first
    /// concatenation of stored records, returns the slot index holding that
    /// byte and the intra-slot offset. Returns `None` if `char_offset` is at
    /// or past the total stored byte count.
    #[must_use]
    pub fn locate(&self, char_offset: usize) -> Option<(usize, usize)> {
        if self.is_empty() {
            return None;
        }

        let mut prefix = 0usize;
        let mut idx = self.out_idx;
        loop {
            let len = self.slots[idx].as_ref().map(Record::len).unwrap_or(0);
            let upper = prefix + len;
            if char_offset < upper {
                let intra_offset = char_offset - prefix;
                debug_assert_locate_in_bounds!(intra_offset, len);
                return Some((idx, intra_offset));
            }
            prefix = upper;
            idx = (idx + 1) % self.capacity();
            if idx == self.in_idx {
                break;
            }
        }
        None
    }

    /// Borrows the record at `slot`, if occupied.
    #[must_use]
    pub fn slot(&self, slot: usize) -> Option<&Record> {
        self.slots[slot].as_ref()
    }

    /// Visits every slot, including empty ones, in raw array order.
    pub fn for_each<F: FnMut(usize, Option<&Record>)>(&self, mut f: F) {
        for (idx, slot) in self.slots.iter().enumerate() {
            f(idx, slot.as_ref());
        }
    }

    /// Releases every occupied slot's record and resets to the initial,
    /// empty state.
    pub fn deinit(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.in_idx = 0;
        self.out_idx = 0;
        self.full = false;
    }
}
