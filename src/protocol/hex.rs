//! ASCII-hex codec
//!
//! Every byte travels as two hex characters. Decoding accepts either case,
//! encoding is always lowercase and fixed width.

use super::{Error, Field, Result};

/// Decode one byte from two hex characters.
///
/// `offset` is the stream position of `pair[0]` and is only used to locate
/// the offending character in the returned error.
pub fn decode_byte(pair: [u8; 2], field: Field, offset: u64) -> Result<u8> {
    let mut out = [0u8; 1];
    hex::decode_to_slice(pair, &mut out).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { c, index } => Error::InvalidHexDigit {
            field,
            offset: offset + index as u64,
            found: c,
        },
        // two input characters always map onto one output byte
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            Error::InvalidHexDigit {
                field,
                offset,
                found: char::from(pair[0]),
            }
        }
    })?;
    Ok(out[0])
}

/// Decode a big-endian `u32` from eight hex characters.
pub fn decode_u32(chars: [u8; 8], field: Field, offset: u64) -> Result<u32> {
    let mut bytes = [0u8; 4];
    for (i, byte) in bytes.iter_mut().enumerate() {
        let pair = [chars[2 * i], chars[2 * i + 1]];
        *byte = decode_byte(pair, field, offset + 2 * i as u64)?;
    }
    Ok(u32::from_be_bytes(bytes))
}

/// Encode one byte as two lowercase hex characters.
#[must_use]
pub fn encode_byte(byte: u8) -> [u8; 2] {
    let mut out = [0u8; 2];
    // output buffer is exactly twice the input length
    let _ = hex::encode_to_slice([byte], &mut out);
    out
}

/// Encode a `u32` as eight lowercase hex characters, most significant first.
#[must_use]
pub fn encode_u32(value: u32) -> String {
    hex::encode(value.to_be_bytes())
}

/// Encode a byte slice as lowercase hex.
#[must_use]
pub fn encode_bytes(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
