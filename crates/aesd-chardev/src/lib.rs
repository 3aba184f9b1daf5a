//! A character-device-shaped front-end over [`aesdring::Store`].
//!
//! This crate stops at the file-operation boundary: `open`, `release`,
//! `read`, `write`. It deliberately does not register a kernel module,
//! allocate a major/minor number, or implement `ioctl`/`mmap` — that glue
//! is ambient OS integration, out of scope here. What it models is the
//! semantics a real `/dev/aesdchar` node would expose to a caller: a
//! shared log, offset-addressed reads, append-on-write.

mod device;
mod error;

pub use device::{CharDevice, Handle, DEFAULT_MAX_WRITE};
pub use error::DeviceError;
