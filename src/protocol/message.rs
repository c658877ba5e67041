//! Message record and its tetrad view

use bytes::Bytes;

use super::crc::crc32;
use super::{Error, MAX_PAYLOAD_LEN, MessageHeader, PAYLOAD_SLOT_SIZE, Result, TETRAD_SIZE};

/// Decoded message record
///
/// The payload is a fixed 252-byte slot. Only the last `length` bytes carry
/// data; the leading bytes are the zero-padding region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    header: MessageHeader,
    payload: [u8; PAYLOAD_SLOT_SIZE],
    checksum: u32,
}

impl Message {
    /// Build a message around `data` with a freshly computed checksum
    pub fn from_data(msg_type: u8, data: &[u8]) -> Result<Self> {
        let length = u8::try_from(data.len())
            .ok()
            .filter(|&len| len <= MAX_PAYLOAD_LEN)
            .ok_or(Error::PayloadTooLong {
                length: data.len(),
                max: usize::from(MAX_PAYLOAD_LEN),
                offset: 0,
            })?;
        let header = MessageHeader::new(msg_type, length)?;

        let mut payload = [0u8; PAYLOAD_SLOT_SIZE];
        payload[header.padding()..].copy_from_slice(data);
        let checksum = crc32(&payload);

        Ok(Self {
            header,
            payload,
            checksum,
        })
    }

    /// Replace the carried checksum without touching the payload
    #[must_use]
    pub fn with_checksum(mut self, checksum: u32) -> Self {
        self.checksum = checksum;
        self
    }

    pub(crate) const fn from_raw(
        header: MessageHeader,
        payload: [u8; PAYLOAD_SLOT_SIZE],
        checksum: u32,
    ) -> Self {
        Self {
            header,
            payload,
            checksum,
        }
    }

    /// Get header
    #[must_use]
    pub const fn header(&self) -> &MessageHeader {
        &self.header
    }

    /// Get message type byte
    #[must_use]
    pub const fn msg_type(&self) -> u8 {
        self.header.msg_type()
    }

    /// Get declared payload length
    #[must_use]
    pub const fn length(&self) -> u8 {
        self.header.length()
    }

    /// Get the full 252-byte payload slot
    #[must_use]
    pub const fn payload(&self) -> &[u8; PAYLOAD_SLOT_SIZE] {
        &self.payload
    }

    pub(crate) fn payload_mut(&mut self) -> &mut [u8; PAYLOAD_SLOT_SIZE] {
        &mut self.payload
    }

    /// Get the data bytes (last `length` bytes of the slot)
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.payload[self.header.padding()..]
    }

    /// Get the zero-padding region
    #[must_use]
    pub fn padding(&self) -> &[u8] {
        &self.payload[..self.header.padding()]
    }

    /// Get the checksum carried by the record
    #[must_use]
    pub const fn checksum(&self) -> u32 {
        self.checksum
    }

    pub(crate) fn set_checksum(&mut self, checksum: u32) {
        self.checksum = checksum;
    }

    /// View the whole slot as 63 tetrads
    #[must_use]
    pub fn tetrads(&self) -> TetradView<'_> {
        TetradView::new(&self.payload)
    }

    /// View the data region, left-padded to a tetrad boundary, as tetrads
    #[must_use]
    pub fn data_tetrads(&self) -> TetradView<'_> {
        TetradView::new(&self.payload[self.data_tetrad_start()..])
    }

    /// Byte offset in the slot of the first tetrad that holds data
    #[must_use]
    pub const fn data_tetrad_start(&self) -> usize {
        self.header.padding() / TETRAD_SIZE * TETRAD_SIZE
    }

    /// Encode message as a `mess=` record
    #[must_use]
    pub fn encode(&self) -> Bytes {
        super::encode_message(self)
    }
}

/// Read-only view of a byte run as big-endian 4-byte groups
#[derive(Debug, Clone, Copy)]
pub struct TetradView<'a> {
    bytes: &'a [u8],
}

impl<'a> TetradView<'a> {
    /// Create a view; trailing bytes short of a full tetrad are ignored
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Number of whole tetrads
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len() / TETRAD_SIZE
    }

    /// Check if the view holds no tetrad
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get tetrad `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u32> {
        let start = index.checked_mul(TETRAD_SIZE)?;
        let chunk = self.bytes.get(start..start.checked_add(TETRAD_SIZE)?)?;
        Some(u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
    }

    /// Iterate over all tetrads in order
    pub fn iter(self) -> impl Iterator<Item = u32> + 'a {
        self.bytes
            .chunks_exact(TETRAD_SIZE)
            .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
    }
}
