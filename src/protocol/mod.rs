//! Message record format: hex transport, binary layout, checksum and masking.
//!
//! This module provides the wire format, the record types, and the codec that
//! decodes them straight out of an ASCII-hex byte stream.

pub mod codec;
pub mod crc;
mod error;
mod header;
pub mod hex;
mod mask;
mod message;
pub mod scanner;
mod stream;
pub mod transform;

pub use codec::{decode_mask, decode_message, encode_mask, encode_message};
pub use crc::{Crc32, crc32};
pub use error::{Error, Field, Result};
pub use header::MessageHeader;
pub use mask::Mask;
pub use message::{Message, TetradView};
pub use scanner::{Marker, MarkerEvent, MarkerScanner};
pub use stream::HexStream;
pub use transform::{Verification, apply_mask, verify};

/// Literal introducing a message record
pub const MESS_MARKER: &[u8; 5] = b"mess=";

/// Literal introducing a mask value
pub const MASK_MARKER: &[u8; 5] = b"mask=";

/// Size of the fixed payload slot in bytes
pub const PAYLOAD_SLOT_SIZE: usize = 252;

/// Largest declared payload length
pub const MAX_PAYLOAD_LEN: u8 = 252;

/// Tetrad width in bytes
pub const TETRAD_SIZE: usize = 4;

/// Number of tetrads in the payload slot (252 / 4)
pub const TETRAD_COUNT: usize = PAYLOAD_SLOT_SIZE / TETRAD_SIZE;

/// Checksum width on the wire in bytes
pub const CHECKSUM_SIZE: usize = 4;

/// ASCII characters used to encode one byte
pub const HEX_CHARS_PER_BYTE: usize = 2;
