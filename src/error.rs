//! Error types for the record store.

use thiserror::Error;

/// Errors surfaced by [`crate::Store`] and its backing-file variant.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A caller attempted to publish a zero-length record directly.
    ///
    /// `Store::write`/`Assembler::feed` never produce this (an empty write
    /// just accumulates in the assembler); it can only come from
    /// `Store::append_record` being handed an empty buffer.
    #[error("cannot append an empty record")]
    EmptyRecord,

    /// The backing-file store encountered an I/O failure.
    #[error("backing file I/O error: {0}")]
    Io(#[from] std::io::Error),
}
