//! Message header

use super::{Error, MAX_PAYLOAD_LEN, Result};

/// Message header (type + declared payload length)
///
/// # Wire Format
///
/// ```text
/// +--------+--------+----------------------------+-----------+
/// | Type   | Length | Data (Length bytes)        | CRC-32    |
/// | 2 hex  | 2 hex  | 2 * Length hex             | 8 hex     |
/// +--------+--------+----------------------------+-----------+
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MessageHeader {
    msg_type: u8,
    length: u8,
}

impl MessageHeader {
    /// Create a header, rejecting lengths beyond the payload slot
    pub fn new(msg_type: u8, length: u8) -> Result<Self> {
        Self::checked(msg_type, length, 0)
    }

    /// Same as [`MessageHeader::new`], locating a rejection at stream `offset`
    pub(crate) fn checked(msg_type: u8, length: u8, offset: u64) -> Result<Self> {
        let header = Self { msg_type, length };
        header.validate(offset)?;
        Ok(header)
    }

    /// Get message type byte
    #[must_use]
    pub const fn msg_type(&self) -> u8 {
        self.msg_type
    }

    /// Get declared payload length
    #[must_use]
    pub const fn length(&self) -> u8 {
        self.length
    }

    /// Number of zero-padding bytes in front of the data
    #[must_use]
    pub const fn padding(&self) -> usize {
        MAX_PAYLOAD_LEN as usize - self.length as usize
    }

    fn validate(&self, offset: u64) -> Result<()> {
        if self.length > MAX_PAYLOAD_LEN {
            return Err(Error::PayloadTooLong {
                length: usize::from(self.length),
                max: usize::from(MAX_PAYLOAD_LEN),
                offset,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_padding() {
        let header = MessageHeader::new(0x01, 4).unwrap();
        assert_eq!(header.msg_type(), 0x01);
        assert_eq!(header.length(), 4);
        assert_eq!(header.padding(), 248);
        assert_eq!(MessageHeader::new(0, 252).unwrap().padding(), 0);
        assert_eq!(MessageHeader::default().padding(), 252);
    }

    #[test]
    fn test_header_rejects_oversized_length() {
        let result = MessageHeader::new(0x01, 253);
        assert!(matches!(
            result,
            Err(Error::PayloadTooLong {
                length: 253,
                max: 252,
                ..
            })
        ));
    }
}
