//! Output sink for completed pairs and run errors

use std::io::{self, Write};

use crate::pairing::Pair;
use crate::protocol::{Error, Message, Verification, hex};

/// Receives every completed pair, and the error that ended a run
pub trait Reporter {
    /// Render pair number `index` (1-based)
    fn report_pair(&mut self, index: u64, pair: &Pair) -> io::Result<()>;

    /// Render the error that terminated the run
    fn report_error(&mut self, error: &Error) -> io::Result<()>;
}

/// Plain-text reporter; every numeric field is lowercase fixed-width hex.
#[derive(Debug)]
pub struct TextReporter<W> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    /// Wrap a writer
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn field(&mut self, name: &str, value: &str) -> io::Result<()> {
        writeln!(self.out, "  {:<18}{value}", format!("{name}:"))
    }

    fn checksum(&mut self, name: &str, message: &Message, status: Verification) -> io::Result<()> {
        let value = format!("{} ({status})", hex::encode_u32(message.checksum()));
        self.field(name, &value)
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report_pair(&mut self, index: u64, pair: &Pair) -> io::Result<()> {
        let original = &pair.original;
        let modified = &pair.modified;

        writeln!(self.out, "message #{index}")?;
        self.field("type", &hex::encode_bytes(&[original.msg_type()]))?;
        self.field("length", &hex::encode_bytes(&[original.length()]))?;
        self.field("data", &hex::encode_bytes(original.data()))?;
        self.checksum("crc32", original, pair.original_status)?;
        self.field("mask", &pair.mask.to_string())?;
        self.field("modified length", &hex::encode_bytes(&[modified.length()]))?;
        self.field("modified data", &hex::encode_bytes(modified.data()))?;
        self.checksum("modified crc32", modified, pair.modified_status)?;
        writeln!(self.out)
    }

    fn report_error(&mut self, error: &Error) -> io::Result<()> {
        writeln!(self.out, "error: {error}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Mask;

    #[test]
    fn test_pair_block_layout() {
        let message = Message::from_data(0x01, &[0xDE, 0xAD, 0xBE, 0xEF]).unwrap();
        let pair = Pair::new(message, Mask::new(0xFFFF_FFFF));

        let mut reporter = TextReporter::new(Vec::new());
        reporter.report_pair(1, &pair).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();

        let expected = "\
message #1
  type:             01
  length:           04
  data:             deadbeef
  crc32:            36bbfef9 (CORRECT)
  mask:             ffffffff
  modified length:  04
  modified data:    21524110
  modified crc32:   f1bf2382 (CORRECT)

";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_error_line() {
        let mut reporter = TextReporter::new(Vec::new());
        reporter
            .report_error(&Error::DuplicateMask { offset: 9 })
            .unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(text, "error: duplicate mask marker at offset 9\n");
    }
}
