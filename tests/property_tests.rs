//! Quantified invariants and round-trip laws (spec §8), checked against
//! randomly generated inputs.

use aesdring::{Assembler, RingConfig, Store};
use proptest::prelude::*;

fn replay_all(store: &Store) -> Vec<u8> {
    let mut out = Vec::new();
    let mut offset = 0;
    loop {
        let chunk = store.read(offset, 256);
        if chunk.is_empty() {
            break;
        }
        offset += chunk.len();
        out.extend_from_slice(&chunk);
    }
    out
}

fn arb_line() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{0,12}".prop_map(|s| format!("{s}\n"))
}

proptest! {
    #[test]
    fn append_then_replay_reconstructs_oldest_first(lines in prop::collection::vec(arb_line(), 0..9)) {
        let store = Store::new(RingConfig::default()); // CAP = 10, no eviction for <=8 records
        for line in &lines {
            store.write(line.as_bytes());
        }
        let expected: String = lines.concat();
        prop_assert_eq!(replay_all(&store), expected.into_bytes());
    }

    #[test]
    fn locate_is_total_exactly_below_length(lines in prop::collection::vec(arb_line(), 1..5)) {
        let store = Store::new(RingConfig::default());
        for line in &lines {
            store.write(line.as_bytes());
        }
        let total = store.len();

        prop_assert!(store.read(total, 1).is_empty());
        if total > 0 {
            prop_assert!(!store.read(total - 1, 1).is_empty());
        }
    }

    #[test]
    fn assembler_reassembles_any_chunking_of_one_record(chunk_sizes in prop::collection::vec(1usize..4, 1..8)) {
        let record = b"a splittable payload\n".to_vec();
        let mut asm = Assembler::new();
        let mut pos = 0;
        let mut emitted = Vec::new();

        for size in chunk_sizes {
            if pos >= record.len() {
                break;
            }
            let end = (pos + size).min(record.len());
            emitted.extend(asm.feed(&record[pos..end]));
            pos = end;
        }
        if pos < record.len() {
            emitted.extend(asm.feed(&record[pos..]));
        }

        prop_assert_eq!(emitted.len(), 1);
        prop_assert_eq!(emitted[0].as_bytes(), record.as_slice());
        prop_assert_eq!(asm.pending_len(), 0);
    }

    #[test]
    fn push_never_stores_more_than_capacity_records(n in 0usize..40, capacity in 1usize..12) {
        let store = Store::new(RingConfig::default().with_capacity(capacity));
        for i in 0..n {
            store.write(format!("{i}\n").as_bytes());
        }
        let replayed = replay_all(&store);
        let record_count = replayed.iter().filter(|&&b| b == b'\n').count();
        prop_assert!(record_count <= capacity);
    }
}
