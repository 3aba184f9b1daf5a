//! Literal end-to-end scenarios against the record store (spec §8).

use aesdring::{RingConfig, Store};

fn replay_all(store: &Store) -> Vec<u8> {
    let mut out = Vec::new();
    let mut offset = 0;
    loop {
        let chunk = store.read(offset, 1024);
        if chunk.is_empty() {
            break;
        }
        offset += chunk.len();
        out.extend_from_slice(&chunk);
    }
    out
}

#[test]
fn basic_append_replay() {
    let store = Store::new(RingConfig::default());
    store.write(b"hello\n");
    assert_eq!(replay_all(&store), b"hello\n");
}

#[test]
fn partial_writes_reassemble_into_one_record() {
    let store = Store::new(RingConfig::default());
    store.write(b"he");
    assert!(replay_all(&store).is_empty());
    store.write(b"llo\n");
    assert_eq!(replay_all(&store), b"hello\n");
}

#[test]
fn eviction_after_cap_plus_one_records() {
    let store = Store::new(RingConfig::default()); // CAP = 10
    for i in 0..=10 {
        store.write(format!("r{i}\n").as_bytes());
    }

    let expected: String = (1..=10).map(|i| format!("r{i}\n")).collect();
    assert_eq!(replay_all(&store), expected.into_bytes());
}

#[test]
fn device_style_round_trip_across_two_reads() {
    let store = Store::new(RingConfig::default());
    store.write(b"abc\ndef\n");

    let first = store.read(0, 100);
    assert_eq!(first, b"abc\n");
    let second = store.read(first.len(), 100);
    assert_eq!(second, b"def\n");
    let third = store.read(first.len() + second.len(), 100);
    assert!(third.is_empty());
}

#[test]
fn offset_mid_record_read() {
    let store = Store::new(RingConfig::default());
    store.write(b"abc\ndef\n");
    assert_eq!(store.read(5, 2), b"ef");
}

#[test]
fn single_write_with_multiple_newlines_yields_multiple_records_in_order() {
    let store = Store::new(RingConfig::default());
    store.write(b"abc\ndef\n");
    assert_eq!(replay_all(&store), b"abc\ndef\n");
    assert_eq!(store.read(0, 4), b"abc\n");
}
