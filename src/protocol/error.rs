//! Parser error types

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Record field being decoded when an error was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Message type byte
    Type,
    /// Declared payload length byte
    Length,
    /// Payload data bytes
    Payload,
    /// Trailing CRC-32 field
    Checksum,
    /// 32-bit mask value
    Mask,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Type => "type",
            Self::Length => "length",
            Self::Payload => "payload",
            Self::Checksum => "checksum",
            Self::Mask => "mask",
        };
        write!(f, "{name}")
    }
}

/// Parser errors
///
/// Every variant is terminal for the current run. Checksum mismatches are not
/// errors; they are reported as [`crate::Verification::Wrong`].
#[derive(Error, Debug)]
pub enum Error {
    /// Input file could not be opened
    #[error("input not found: {}", path.display())]
    InputNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Character outside `[0-9a-fA-F]` inside a field
    #[error("invalid hex digit {found:?} in {field} at offset {offset}")]
    InvalidHexDigit {
        /// Field being decoded
        field: Field,
        /// Byte offset of the offending character
        offset: u64,
        /// Offending character
        found: char,
    },

    /// Declared payload length exceeds the fixed slot
    #[error("payload too long: {length} bytes (max {max}) at offset {offset}")]
    PayloadTooLong {
        /// Declared length
        length: usize,
        /// Maximum allowed
        max: usize,
        /// Byte offset just past the length field
        offset: u64,
    },

    /// Input ended in the middle of a field
    #[error("unexpected end of stream in {field} at offset {offset}")]
    UnexpectedEndOfStream {
        /// Field being decoded
        field: Field,
        /// Byte offset where input ran out
        offset: u64,
    },

    /// Second `mess=` seen before the pending pair completed
    #[error("duplicate message marker at offset {offset}")]
    DuplicateMessage {
        /// Byte offset just past the duplicate marker
        offset: u64,
    },

    /// Second `mask=` seen before the pending pair completed
    #[error("duplicate mask marker at offset {offset}")]
    DuplicateMask {
        /// Byte offset just past the duplicate marker
        offset: u64,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit code for this error
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InputNotFound { .. } => 1,
            Self::DuplicateMessage { .. } => 2,
            Self::DuplicateMask { .. } => 3,
            Self::UnexpectedEndOfStream { .. } => 4,
            Self::InvalidHexDigit { .. } => 5,
            Self::PayloadTooLong { .. } => 6,
            Self::Io(_) => 7,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
