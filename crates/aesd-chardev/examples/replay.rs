//! Writes a few records through a device handle, then replays the log
//! back in 2-byte chunks the way a slow reader might.
//!
//! Run with: `cargo run -p aesd-chardev --example replay`

use std::io::Cursor;
use std::sync::Arc;

use aesd_chardev::CharDevice;
use aesdring::{RingConfig, Store};

fn main() {
    let store = Arc::new(Store::new(RingConfig::default()));
    let dev = CharDevice::new(store);
    let mut handle = dev.open();

    for line in ["first\n", "second\n", "third\n"] {
        let mut src = Cursor::new(line.as_bytes().to_vec());
        handle.write(&mut src, line.len()).expect("write");
    }

    handle.seek(0);
    let mut out = Vec::new();
    loop {
        let n = handle.read(&mut out, 2).expect("read");
        if n == 0 {
            break;
        }
    }

    handle.release();
    println!("{}", String::from_utf8(out).unwrap());
}
