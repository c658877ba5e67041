//! Pull-based byte source with offset tracking

use std::io::{BufRead, BufReader, ErrorKind, Read};

use super::{Error, Field, HEX_CHARS_PER_BYTE, Result, hex};

/// Buffered input stream shared by the marker scanner and the field decoders
///
/// Bytes are consumed one at a time; the whole input is never held in memory.
#[derive(Debug)]
pub struct HexStream<R> {
    reader: BufReader<R>,
    offset: u64,
}

impl<R: Read> HexStream<R> {
    /// Wrap a reader
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            offset: 0,
        }
    }

    /// Number of bytes consumed so far
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Next raw byte, `None` at end of input
    pub fn next_byte(&mut self) -> Result<Option<u8>> {
        let byte = loop {
            match self.reader.fill_buf() {
                Ok([]) => return Ok(None),
                Ok([first, ..]) => break *first,
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(Error::Io(err)),
            }
        };
        self.reader.consume(1);
        self.offset += 1;
        Ok(Some(byte))
    }

    /// Read `N` raw bytes belonging to `field`
    pub fn read_exact_field<const N: usize>(&mut self, field: Field) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        for slot in &mut out {
            *slot = self
                .next_byte()?
                .ok_or(Error::UnexpectedEndOfStream {
                    field,
                    offset: self.offset,
                })?;
        }
        Ok(out)
    }

    /// Read one byte encoded as two hex characters
    pub fn read_hex_byte(&mut self, field: Field) -> Result<u8> {
        let start = self.offset;
        let pair = self.read_exact_field::<HEX_CHARS_PER_BYTE>(field)?;
        hex::decode_byte(pair, field, start)
    }

    /// Read a big-endian `u32` encoded as eight hex characters
    pub fn read_hex_u32(&mut self, field: Field) -> Result<u32> {
        let start = self.offset;
        let chars = self.read_exact_field::<8>(field)?;
        hex::decode_u32(chars, field, start)
    }
}
