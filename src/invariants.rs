//! Debug assertion macros for the Ring/Assembler/Store invariants.
//!
//! These provide runtime checks for the invariants enumerated in spec.md
//! §8. They are only active in debug builds (`#[cfg(debug_assertions)]`),
//! so there is zero overhead in release builds, matching the pattern in
//! `ringmpsc`/`ringmpsc-stream`'s own `invariants` modules.

// =============================================================================
// INV-RING-01: Indices in range
// =============================================================================

/// Assert that `in`/`out` cursors stay within `[0, capacity)`.
///
/// Used in: `Ring::push` after advancing either cursor.
macro_rules! debug_assert_ring_indices_in_range {
    ($in_idx:expr, $out_idx:expr, $capacity:expr) => {
        debug_assert!(
            $in_idx < $capacity && $out_idx < $capacity,
            "INV-RING-01 violated: in={} out={} capacity={}",
            $in_idx,
            $out_idx,
            $capacity
        )
    };
}

// =============================================================================
// INV-RING-02: Occupied slot count matches `full`/cursor state
// =============================================================================

/// Assert that the number of occupied slots matches what `full` implies.
///
/// Used in: `Ring::push` after updating `full`.
macro_rules! debug_assert_occupied_count {
    ($occupied:expr, $full:expr, $capacity:expr, $expected_partial:expr) => {
        debug_assert!(
            if $full {
                $occupied == $capacity
            } else {
                $occupied == $expected_partial
            },
            "INV-RING-02 violated: occupied={} full={} capacity={}",
            $occupied,
            $full,
            $capacity
        )
    };
}

// =============================================================================
// INV-RING-03: Occupied slots are non-empty
// =============================================================================

/// Assert that every occupied slot holds a strictly positive-length record.
///
/// Used in: `Ring::push` right after writing the new slot.
macro_rules! debug_assert_slot_nonempty {
    ($len:expr) => {
        debug_assert!($len > 0, "INV-RING-03 violated: occupied slot has length 0")
    };
}

// =============================================================================
// INV-ASM-01: Assembler buffer never contains a newline at rest
// =============================================================================

/// Assert that the assembler's retained buffer contains no newline byte.
///
/// Used in: `Assembler::feed` after splitting off complete records.
macro_rules! debug_assert_assembler_no_newline {
    ($buf:expr) => {
        debug_assert!(
            !$buf.contains(&b'\n'),
            "INV-ASM-01 violated: assembler buffer retains a newline byte"
        )
    };
}

// =============================================================================
// INV-RING-04/05: `locate` totality and intra-offset boundedness
// =============================================================================

/// Assert that a defined `locate` result addresses a real byte inside its slot.
///
/// Used in: `Ring::locate` just before returning `Some((slot, intra_offset))`.
macro_rules! debug_assert_locate_in_bounds {
    ($intra_offset:expr, $slot_len:expr) => {
        debug_assert!(
            $intra_offset < $slot_len,
            "INV-RING-05 violated: intra_offset {} >= slot length {}",
            $intra_offset,
            $slot_len
        )
    };
}

pub(crate) use debug_assert_assembler_no_newline;
pub(crate) use debug_assert_locate_in_bounds;
pub(crate) use debug_assert_occupied_count;
pub(crate) use debug_assert_ring_indices_in_range;
pub(crate) use debug_assert_slot_nonempty;
