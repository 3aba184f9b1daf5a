//! Error types for the character-device front-end (spec §4.4, §7).

use thiserror::Error;

/// Failure modes a device handler can return. None of these are fatal to
/// the device: the caller is expected to retry or simply observe the
/// error, exactly as a kernel file operation returning a negative errno
/// does not tear down the device node.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Lock acquisition was interrupted before it completed; the caller
    /// should reissue the operation. Corresponds to `-ERESTARTSYS`.
    #[error("operation interrupted, retry")]
    Interrupted,

    /// The operation would require more memory than the configured budget
    /// allows. Corresponds to `-ENOMEM`.
    #[error("out of memory")]
    OutOfMemory,

    /// Copying bytes to or from the caller failed. Corresponds to
    /// `-EFAULT`; here it surfaces when the caller's `Read`/`Write`
    /// adapter itself returns an I/O error.
    #[error("buffer copy failed")]
    Fault,
}
