//! Joins fragmented writes into newline-terminated [`Record`]s (spec §4.2).

use crate::invariants::debug_assert_assembler_no_newline;
use crate::record::Record;

/// Accumulates raw bytes across successive `feed` calls and splits out
/// every complete, newline-terminated record as soon as it becomes
/// available.
///
/// A write may contain more than one newline. `feed` emits every complete
/// record it can find in a single call rather than waiting for separate
/// calls — a fragment never straddles two `feed` invocations' worth of
/// output (spec §8 scenario 5, §9 open question resolved in favor of this
/// policy).
#[derive(Debug, Default)]
pub struct Assembler {
    pending: Vec<u8>,
}

impl Assembler {
    /// Creates an empty assembler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds raw bytes in, returning every record completed as a result —
    /// zero, one, or many, in the order their terminating newline appeared.
    /// Bytes after the last newline are retained for the next call.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Record> {
        self.pending.extend_from_slice(bytes);

        let mut records = Vec::new();
        loop {
            let Some(pos) = self.pending.iter().position(|&b| b == b'\n') else {
                break;
            };
            let record_bytes: Vec<u8> = self.pending.drain(..=pos).collect();
            if let Some(record) = Record::new(record_bytes) {
                records.push(record);
            }
        }

        debug_assert_assembler_no_newline!(self.pending);
        records
    }

    /// Number of bytes currently held without a terminating newline.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Discards any partial, unterminated bytes without emitting a record.
    pub fn reset(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_complete_write_yields_one_record() {
        let mut asm = Assembler::new();
        let records = asm.feed(b"hello\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].as_bytes(), b"hello\n");
        assert_eq!(asm.pending_len(), 0);
    }

    #[test]
    fn partial_write_emits_nothing() {
        let mut asm = Assembler::new();
        let records = asm.feed(b"hel");
        assert!(records.is_empty());
        assert_eq!(asm.pending_len(), 3);
    }

    #[test]
    fn straddling_fragments_reassemble() {
        let mut asm = Assembler::new();
        assert!(asm.feed(b"hel").is_empty());
        assert!(asm.feed(b"lo").is_empty());
        let records = asm.feed(b"\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].as_bytes(), b"hello\n");
    }

    #[test]
    fn single_feed_with_multiple_newlines_yields_all_records() {
        let mut asm = Assembler::new();
        let records = asm.feed(b"abc\ndef\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].as_bytes(), b"abc\n");
        assert_eq!(records[1].as_bytes(), b"def\n");
    }

    #[test]
    fn trailing_remainder_after_newlines_is_retained() {
        let mut asm = Assembler::new();
        let records = asm.feed(b"abc\ndef");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].as_bytes(), b"abc\n");
        assert_eq!(asm.pending_len(), 3);

        let records = asm.feed(b"\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].as_bytes(), b"def\n");
    }

    #[test]
    fn reset_discards_partial_bytes() {
        let mut asm = Assembler::new();
        asm.feed(b"partial");
        asm.reset();
        assert_eq!(asm.pending_len(), 0);
        let records = asm.feed(b"\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].as_bytes(), b"\n");
    }

    #[test]
    fn empty_feed_is_noop() {
        let mut asm = Assembler::new();
        assert!(asm.feed(b"").is_empty());
        assert_eq!(asm.pending_len(), 0);
    }
}
