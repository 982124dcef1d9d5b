//! Error types for the decoder.

use csvbind_core::{BindingError, DecodeError, FormatError};

use crate::source::RowSourceError;

/// Errors produced while opening a [`Decoder`](crate::Decoder).
#[derive(Debug, thiserror::Error)]
pub enum ConstructionError {
    /// I/O error while opening the input file.
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The row source failed while reading the header row.
    #[error("failed to read header row: {0}")]
    Header(#[source] RowSourceError),

    /// The input yields no rows at all.
    #[error("input has no header row")]
    EmptyInput,

    /// The header row has no columns.
    #[error("header row is empty")]
    EmptyHeader,

    /// A column name occurs more than once and
    /// [`DuplicateHeaders::Reject`](crate::DuplicateHeaders::Reject) is set.
    #[error("duplicate header column '{name}'")]
    DuplicateHeader { name: String },

    /// The configured default timestamp format was rejected.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Errors produced by [`Decoder::read_next`](crate::Decoder::read_next) and
/// friends. End of input is not an error.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// A field of data row `row` (1-based, header excluded) failed to decode.
    #[error("row {row}: {source}")]
    Decode {
        row: u64,
        #[source]
        source: DecodeError,
    },

    /// The record type's shape cannot be bound.
    #[error(transparent)]
    Binding(#[from] BindingError),

    /// The row source failed to produce the next row.
    #[error("failed to read row {row}: {source}")]
    Source {
        row: u64,
        #[source]
        source: RowSourceError,
    },

    /// The row source failed to release its resources.
    #[error("failed to close row source: {0}")]
    Close(#[source] RowSourceError),

    /// The decoder was closed before reading.
    #[error("decoder is closed")]
    Closed,
}

impl ReadError {
    /// The per-field decode error, if this is one.
    pub fn as_decode_error(&self) -> Option<&DecodeError> {
        match self {
            ReadError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}
