//! Open/release/read/write semantics over a shared [`Store`] (spec §4.4).

use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use aesdring::Store;
use tracing::{debug, trace};

use crate::error::DeviceError;

/// Default cap on a single write's byte count before it is treated as a
/// resource-exhaustion failure. The reference driver has no such limit
/// beyond `kmalloc` eventually failing; this plays the same role for a
/// userspace simulation that cannot actually run out of kernel memory.
pub const DEFAULT_MAX_WRITE: usize = 64 * 1024 * 1024;

/// A character device backed by a single shared [`Store`].
///
/// There is no per-handle Store state — only the file position is
/// per-handle, matching the reference's singleton device (spec §4.4).
pub struct CharDevice {
    store: Arc<Store>,
    max_write: usize,
}

impl CharDevice {
    /// Wraps `store` as a character device.
    #[must_use]
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            max_write: DEFAULT_MAX_WRITE,
        }
    }

    /// Overrides the resource-exhaustion threshold used by [`Handle::write`].
    #[must_use]
    pub fn with_max_write(mut self, max_write: usize) -> Self {
        self.max_write = max_write;
        self
    }

    /// Opens a new handle. Every handle shares this device's Store; only
    /// the file position is private to the handle.
    #[must_use]
    pub fn open(&self) -> Handle {
        debug!("device opened");
        Handle {
            store: Arc::clone(&self.store),
            pos: 0,
            interrupt: Arc::new(AtomicBool::new(false)),
            max_write: self.max_write,
        }
    }
}

/// One open handle on the device: a file position plus an interrupt flag a
/// test or signal-delivery simulation can set to force the next operation
/// to fail with [`DeviceError::Interrupted`].
pub struct Handle {
    store: Arc<Store>,
    pos: u64,
    interrupt: Arc<AtomicBool>,
    max_write: usize,
}

impl Handle {
    /// A cloneable handle a caller can use to simulate a signal arriving
    /// mid-operation: setting it causes the next `read`/`write` call to
    /// fail with [`DeviceError::Interrupted`] instead of acquiring the
    /// Store lock.
    #[must_use]
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    /// Releases the handle. No action beyond dropping its resources —
    /// the Store outlives every handle (spec §4.4).
    pub fn release(self) {}

    /// Reads up to `count` bytes starting at the handle's current position
    /// into `out`, then advances the position by the number of bytes
    /// copied.
    ///
    /// # Errors
    ///
    /// [`DeviceError::Interrupted`] if the interrupt flag was set;
    /// [`DeviceError::Fault`] if writing the bytes to `out` fails.
    pub fn read(&mut self, out: &mut impl Write, count: usize) -> Result<usize, DeviceError> {
        if self.interrupt.swap(false, Ordering::AcqRel) {
            return Err(DeviceError::Interrupted);
        }

        let bytes = self.store.read(self.pos as usize, count);
        if bytes.is_empty() {
            trace!(pos = self.pos, "read reached end of log");
            return Ok(0);
        }

        out.write_all(&bytes).map_err(|_| DeviceError::Fault)?;
        self.pos += bytes.len() as u64;
        Ok(bytes.len())
    }

    /// Reads exactly `count` bytes from `input` and appends them to the
    /// Store, then resets the handle's position to 0 — the device does
    /// not track a write-side position (spec §4.4).
    ///
    /// # Errors
    ///
    /// [`DeviceError::Interrupted`] if the interrupt flag was set;
    /// [`DeviceError::OutOfMemory`] if `count` exceeds the configured
    /// write budget; [`DeviceError::Fault`] if reading `count` bytes from
    /// `input` fails.
    pub fn write(&mut self, input: &mut impl Read, count: usize) -> Result<usize, DeviceError> {
        if self.interrupt.swap(false, Ordering::AcqRel) {
            return Err(DeviceError::Interrupted);
        }
        if count > self.max_write {
            return Err(DeviceError::OutOfMemory);
        }

        let mut buf = vec![0u8; count];
        input.read_exact(&mut buf).map_err(|_| DeviceError::Fault)?;
        self.store.write(&buf);
        self.pos = 0;
        Ok(count)
    }

    /// Current file position.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Seeks to an absolute position, as a device `llseek` would.
    pub fn seek(&mut self, pos: u64) {
        self.pos = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aesdring::RingConfig;
    use std::io::Cursor;

    fn device() -> CharDevice {
        CharDevice::new(Arc::new(Store::new(RingConfig::default())))
    }

    #[test]
    fn write_then_read_round_trip() {
        let dev = device();
        let mut handle = dev.open();
        let mut src = Cursor::new(b"abc\ndef\n".to_vec());
        let written = handle.write(&mut src, 8).unwrap();
        assert_eq!(written, 8);
        assert_eq!(handle.position(), 0);

        let mut out = Vec::new();
        let n1 = handle.read(&mut out, 100).unwrap();
        assert_eq!(n1, 4);
        let n2 = handle.read(&mut out, 100).unwrap();
        assert_eq!(n2, 4);
        let n3 = handle.read(&mut out, 100).unwrap();
        assert_eq!(n3, 0);
        assert_eq!(out, b"abc\ndef\n");
    }

    #[test]
    fn read_at_offset_returns_tail_of_a_record() {
        let dev = device();
        let mut handle = dev.open();
        let mut src = Cursor::new(b"abc\ndef\n".to_vec());
        handle.write(&mut src, 8).unwrap();

        handle.seek(5);
        let mut out = Vec::new();
        let n = handle.read(&mut out, 2).unwrap();
        assert_eq!(n, 2);
        assert_eq!(out, b"ef");
    }

    #[test]
    fn interrupt_flag_fails_next_operation_once() {
        let dev = device();
        let mut handle = dev.open();
        let flag = handle.interrupt_flag();
        flag.store(true, Ordering::Release);

        let mut out = Vec::new();
        assert!(matches!(handle.read(&mut out, 10), Err(DeviceError::Interrupted)));
        // the flag auto-clears after firing once
        assert!(matches!(handle.read(&mut out, 10), Ok(0)));
    }

    #[test]
    fn write_past_budget_is_out_of_memory() {
        let dev = device().with_max_write(4);
        let mut handle = dev.open();
        let mut src = Cursor::new(b"toolong\n".to_vec());
        assert!(matches!(
            handle.write(&mut src, 8),
            Err(DeviceError::OutOfMemory)
        ));
    }

    #[test]
    fn short_source_on_write_is_fault() {
        let dev = device();
        let mut handle = dev.open();
        let mut src = Cursor::new(b"ab".to_vec());
        assert!(matches!(handle.write(&mut src, 8), Err(DeviceError::Fault)));
    }

    #[test]
    fn release_consumes_the_handle() {
        let dev = device();
        let handle = dev.open();
        handle.release();
    }
}
