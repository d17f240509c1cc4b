//! Error types for rafio operations.
//!
//! This module provides the error type covering all failure conditions in
//! archive reading: I/O errors from the underlying byte source, format
//! validation errors, and truncation.
//!
//! End-of-archive and end-of-entry are deliberately not represented here.
//! They are normal terminal conditions, surfaced as `Ok(None)` from the
//! reader's `next_entry` and `Ok(0)` from payload reads.

use std::io;
use thiserror::Error;

/// The main error type for rafio operations.
#[derive(Debug, Error)]
pub enum RafioError {
    /// I/O error from the underlying byte source, passed through unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Magic bytes do not match the supported `070707` literal.
    #[error("Unrecognized archive format: expected magic \"070707\", found {found:02x?}")]
    UnrecognizedFormat {
        /// The six bytes found where the magic was expected.
        found: [u8; 6],
    },

    /// A numeric header field is not valid octal ASCII.
    #[error("Malformed {field} field in header at offset {offset}")]
    MalformedField {
        /// Name of the header field that failed to decode.
        field: &'static str,
        /// Absolute stream offset of the entry's magic.
        offset: u64,
    },

    /// The source ended before a complete header could be read.
    #[error("Unexpected end of input at offset {offset}: {expected} more header bytes required")]
    UnexpectedEof {
        /// Number of bytes that were required but not available.
        expected: u64,
        /// Absolute stream offset of the entry's magic.
        offset: u64,
    },

    /// The source ended while payload bytes promised by the header remained.
    #[error("Truncated payload at offset {offset}: {missing} declared bytes missing")]
    TruncatedPayload {
        /// Payload bytes the header declared but the stream did not contain.
        missing: u64,
        /// Absolute stream offset where the shortfall was detected.
        offset: u64,
    },

    /// Entry path is unsafe for extraction (absolute, parent traversal,
    /// or embedded NUL).
    #[error("Unsafe entry path: {path}")]
    UnsafePath {
        /// The offending path.
        path: String,
    },

    /// The reader was used after reaching a terminal state.
    #[error("Archive reader already finished")]
    ReaderFinished,
}

/// Result type alias for rafio operations.
pub type Result<T> = std::result::Result<T, RafioError>;

impl RafioError {
    /// Create an unrecognized format error.
    pub fn unrecognized_format(found: [u8; 6]) -> Self {
        Self::UnrecognizedFormat { found }
    }

    /// Create a malformed field error.
    pub fn malformed_field(field: &'static str, offset: u64) -> Self {
        Self::MalformedField { field, offset }
    }

    /// Create an unexpected end-of-input error.
    pub fn unexpected_eof(expected: u64, offset: u64) -> Self {
        Self::UnexpectedEof { expected, offset }
    }

    /// Create a truncated payload error.
    pub fn truncated_payload(missing: u64, offset: u64) -> Self {
        Self::TruncatedPayload { missing, offset }
    }

    /// Create an unsafe path error.
    pub fn unsafe_path(path: impl Into<String>) -> Self {
        Self::UnsafePath { path: path.into() }
    }

    /// Check whether this error indicates a corrupt archive rather than an
    /// environmental failure.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedFormat { .. }
                | Self::MalformedField { .. }
                | Self::UnexpectedEof { .. }
                | Self::TruncatedPayload { .. }
        )
    }
}
