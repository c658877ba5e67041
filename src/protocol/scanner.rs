//! Marker scanner
//!
//! Detects the `mess=` and `mask=` literals in an unbounded byte stream. Each
//! literal has its own partial-match counter, so a false prefix of one never
//! blocks detection of the other.

use std::fmt;
use std::io::Read;

use tracing::trace;

use super::{HexStream, MASK_MARKER, MESS_MARKER, Result};

/// Field-introducing literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// `mess=`
    Message,
    /// `mask=`
    Mask,
}

impl Marker {
    /// Literal bytes of this marker
    #[must_use]
    pub const fn literal(self) -> &'static [u8] {
        match self {
            Self::Message => MESS_MARKER,
            Self::Mask => MASK_MARKER,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Message => "mess=",
            Self::Mask => "mask=",
        };
        write!(f, "{text}")
    }
}

/// A detected marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerEvent {
    /// Which literal matched
    pub marker: Marker,
    /// Stream offset of the first byte following the literal
    pub offset: u64,
}

/// Partial-match state for one literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerMatcher {
    marker: Marker,
    matched: usize,
}

impl MarkerMatcher {
    /// Fresh matcher for `marker`
    #[must_use]
    pub const fn new(marker: Marker) -> Self {
        Self { marker, matched: 0 }
    }

    /// Number of literal bytes matched so far
    #[must_use]
    pub const fn matched(&self) -> usize {
        self.matched
    }

    /// Advance by one byte. Returns the next state and whether the literal
    /// just completed (in which case the counter is back at zero).
    #[must_use]
    pub const fn step(self, byte: u8) -> (Self, bool) {
        let literal = self.marker.literal();
        let matched = if byte == literal[self.matched] {
            self.matched + 1
        } else if byte == literal[0] {
            1
        } else {
            0
        };

        if matched == literal.len() {
            (Self { matched: 0, ..self }, true)
        } else {
            (Self { matched, ..self }, false)
        }
    }
}

/// Scanner over both literals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerScanner {
    message: MarkerMatcher,
    mask: MarkerMatcher,
}

impl MarkerScanner {
    /// Scanner with both counters at zero
    #[must_use]
    pub const fn new() -> Self {
        Self {
            message: MarkerMatcher::new(Marker::Message),
            mask: MarkerMatcher::new(Marker::Mask),
        }
    }

    /// Pure transition: feed one byte, get the next scanner state and any
    /// marker that completed on it.
    #[must_use]
    pub const fn step(self, byte: u8) -> (Self, Option<Marker>) {
        let (message, message_hit) = self.message.step(byte);
        let (mask, mask_hit) = self.mask.step(byte);
        // both literals end in '=' but differ in the byte before it
        let hit = if message_hit {
            Some(Marker::Message)
        } else if mask_hit {
            Some(Marker::Mask)
        } else {
            None
        };
        (Self { message, mask }, hit)
    }

    /// Feed one byte in place
    pub fn feed(&mut self, byte: u8) -> Option<Marker> {
        let (next, hit) = self.step(byte);
        *self = next;
        hit
    }

    /// Consume `stream` until the next marker, leaving the stream positioned
    /// on the byte after it. `None` at end of input.
    pub fn next_marker<R: Read>(
        &mut self,
        stream: &mut HexStream<R>,
    ) -> Result<Option<MarkerEvent>> {
        while let Some(byte) = stream.next_byte()? {
            if let Some(marker) = self.feed(byte) {
                let offset = stream.offset();
                trace!(%marker, offset, "marker found");
                return Ok(Some(MarkerEvent { marker, offset }));
            }
        }
        Ok(None)
    }
}

impl Default for MarkerScanner {
    fn default() -> Self {
        Self::new()
    }
}
