//! Message and mask codec (decode from / encode to the hex stream)
//!
//! Decoders run on a [`HexStream`] positioned right after a marker and read
//! the record fields in strict order. Any short read aborts the record.

use std::io::Read;

use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use super::{
    CHECKSUM_SIZE, Field, HEX_CHARS_PER_BYTE, HexStream, MASK_MARKER, MESS_MARKER, Mask, Message,
    MessageHeader, PAYLOAD_SLOT_SIZE, Result, hex,
};

/// Decode a message record
///
/// # Format
///
/// ```text
/// mess= [TYPE (2)] [LENGTH (2)] [DATA (2 * LENGTH)] [CRC-32 (8)]
/// ```
///
/// Data bytes are right-aligned in the 252-byte slot; the leading
/// `252 - LENGTH` bytes are zero.
///
/// # Errors
///
/// Returns an error if:
/// - A field contains a non-hex character
/// - The declared length exceeds 252
/// - Input ends inside any field
pub fn decode_message<R: Read>(stream: &mut HexStream<R>) -> Result<Message> {
    let msg_type = stream.read_hex_byte(Field::Type)?;
    let length = stream.read_hex_byte(Field::Length)?;
    let header = MessageHeader::checked(msg_type, length, stream.offset())?;

    let mut payload = [0u8; PAYLOAD_SLOT_SIZE];
    for byte in &mut payload[header.padding()..] {
        *byte = stream.read_hex_byte(Field::Payload)?;
    }

    let checksum = stream.read_hex_u32(Field::Checksum)?;
    trace!(msg_type, length, checksum, "message decoded");

    Ok(Message::from_raw(header, payload, checksum))
}

/// Decode a mask value
///
/// # Format
///
/// ```text
/// mask= [VALUE (8)]
/// ```
pub fn decode_mask<R: Read>(stream: &mut HexStream<R>) -> Result<Mask> {
    let mask = Mask::new(stream.read_hex_u32(Field::Mask)?);
    trace!(%mask, "mask decoded");
    Ok(mask)
}

/// Encode a message as a `mess=` record (lowercase hex)
#[must_use]
pub fn encode_message(message: &Message) -> Bytes {
    let data = message.data();
    let total_size =
        MESS_MARKER.len() + HEX_CHARS_PER_BYTE * (2 + data.len() + CHECKSUM_SIZE);
    let mut bytes = BytesMut::with_capacity(total_size);

    bytes.put_slice(MESS_MARKER);
    bytes.put_slice(&hex::encode_byte(message.msg_type()));
    bytes.put_slice(&hex::encode_byte(message.length()));
    bytes.put_slice(hex::encode_bytes(data).as_bytes());
    bytes.put_slice(hex::encode_u32(message.checksum()).as_bytes());

    bytes.freeze()
}

/// Encode a mask as a `mask=` record (lowercase hex)
#[must_use]
pub fn encode_mask(mask: Mask) -> Bytes {
    let mut bytes = BytesMut::with_capacity(MASK_MARKER.len() + HEX_CHARS_PER_BYTE * 4);
    bytes.put_slice(MASK_MARKER);
    bytes.put_slice(hex::encode_u32(mask.value()).as_bytes());
    bytes.freeze()
}
