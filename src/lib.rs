//! aesdring — a bounded, append-only log of newline-terminated records.
//!
//! `Ring` is a fixed-capacity circular buffer of [`Record`]s: appending past
//! capacity silently evicts the oldest record. `Assembler` joins fragmented
//! writes into complete records on newline boundaries. `Store` composes the
//! two behind a single mutex and adds byte-offset addressing across the
//! logical (oldest-first) concatenation of all stored records — the shared
//! core used by both the character-device and the networked front-ends.
//!
//! # Example
//!
//! ```
//! use aesdring::{RingConfig, Store};
//!
//! let store = Store::new(RingConfig::default());
//! store.write(b"hello\n");
//! store.write(b"world\n");
//!
//! let mut out = Vec::new();
//! let mut offset = 0;
//! loop {
//!     let chunk = store.read(offset, 1024);
//!     if chunk.is_empty() {
//!         break;
//!     }
//!     offset += chunk.len();
//!     out.extend_from_slice(&chunk);
//! }
//! assert_eq!(out, b"hello\nworld\n");
//! ```

mod assembler;
mod backing_file;
mod config;
mod error;
mod invariants;
mod record;
mod ring;
mod store;
pub mod timestamp;

pub use assembler::Assembler;
pub use backing_file::FileStore;
pub use config::{RingConfig, DEFAULT_CAPACITY};
pub use error::StoreError;
pub use record::Record;
pub use ring::Ring;
pub use store::{Store, StoreStats};
