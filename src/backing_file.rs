//! File-backed, unbounded alternative to [`crate::Store`] (spec §6).
//!
//! The networked server can be pointed at a backing file instead of the
//! in-memory ring: every write is appended to the file and reads replay
//! from it directly. Unlike `Store`, nothing is ever evicted — the file
//! grows for the lifetime of the process and is unlinked on shutdown by
//! the caller (spec §6, §7).

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StoreError;

/// An append-only file acting as the record log, guarded by a single mutex
/// so concurrent writers never interleave their bytes (spec §4.5, §7).
pub struct FileStore {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileStore {
    /// Opens (creating if absent) the file at `path` for append and
    /// random-access read, matching the reference's `O_CREAT | O_RDWR |
    /// O_APPEND`, permissions `0766` (spec §6).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .append(true)
            .mode(0o766)
            .open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Appends raw bytes to the file, returning the number of bytes
    /// written. Unlike [`crate::Store::write`], no assembly happens here —
    /// the caller (the networked server's connection worker) already holds
    /// an [`crate::Assembler`] and only flushes complete records through.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] on write failure.
    pub fn write(&self, bytes: &[u8]) -> Result<usize, StoreError> {
        let mut file = self.file.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        file.write_all(bytes)?;
        file.flush()?;
        Ok(bytes.len())
    }

    /// Reads up to `max_len` bytes starting at byte `offset` from the
    /// start of the file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] on seek/read failure.
    pub fn read(&self, offset: u64, max_len: usize) -> Result<Vec<u8>, StoreError> {
        let mut file = self.file.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        file.seek(SeekFrom::Start(offset))?;
        let mut buf = vec![0u8; max_len];
        let mut total = 0;
        loop {
            let n = file.read(&mut buf[total..])?;
            if n == 0 {
                break;
            }
            total += n;
            if total == buf.len() {
                break;
            }
        }
        buf.truncate(total);
        Ok(buf)
    }

    /// Current file length in bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if metadata cannot be read.
    pub fn len(&self) -> Result<u64, StoreError> {
        let file = self.file.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(file.metadata()?.len())
    }

    /// Returns `true` if the file is currently empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if metadata cannot be read.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Removes the backing file from disk. Intended for shutdown (spec
    /// §4.8): open file handles elsewhere remain valid until closed, same
    /// as `unlink` on a still-open fd.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be removed.
    pub fn unlink(&self) -> Result<(), StoreError> {
        std::fs::remove_file(&self.path)?;
        Ok(())
    }
}
