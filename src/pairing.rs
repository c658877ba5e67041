//! Pairing coordinator
//!
//! Drives the marker scanner over the input, decodes each record, and emits a
//! [`Pair`] once one message and one mask have both been seen. A second marker
//! of the same kind before the pair completes aborts the run.

use std::io::Read;
use std::mem;

use tracing::{debug, trace, warn};

use crate::protocol::{
    Error, HexStream, Marker, MarkerEvent, MarkerScanner, Mask, Message, Result, Verification,
    apply_mask, decode_mask, decode_message, verify,
};
use crate::report::Reporter;

/// A completed message/mask pair with its verification results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    /// Message as decoded from the input
    pub original: Message,
    /// Whether the decoded checksum matched
    pub original_status: Verification,
    /// Mask applied to the message
    pub mask: Mask,
    /// Message after masking, with recomputed checksum
    pub modified: Message,
    /// Verification of the recomputed checksum
    pub modified_status: Verification,
}

impl Pair {
    /// Verify, mask and re-verify `message`
    #[must_use]
    pub fn new(message: Message, mask: Mask) -> Self {
        let original_status = verify(&message);
        let modified = apply_mask(&message, mask);
        let modified_status = verify(&modified);
        Self {
            original: message,
            original_status,
            mask,
            modified,
            modified_status,
        }
    }
}

/// Pending side of the current pairing cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PairingState {
    /// Nothing seen yet
    #[default]
    Idle,
    /// Message decoded, waiting for a mask
    MessagePending(Message),
    /// Mask decoded, waiting for a message
    MaskPending(Mask),
}

/// Result of feeding a decoded record to [`PairingState`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Still waiting for the other side
    Pending(PairingState),
    /// Both sides present; state returns to idle
    PairComplete(Box<Pair>),
}

impl PairingState {
    /// State name for logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::MessagePending(_) => "message-pending",
            Self::MaskPending(_) => "mask-pending",
        }
    }

    /// Reject a marker that would make the pending side a duplicate
    pub fn admit(&self, event: MarkerEvent) -> Result<()> {
        match (self, event.marker) {
            (Self::MessagePending(_), Marker::Message) => Err(Error::DuplicateMessage {
                offset: event.offset,
            }),
            (Self::MaskPending(_), Marker::Mask) => Err(Error::DuplicateMask {
                offset: event.offset,
            }),
            _ => Ok(()),
        }
    }

    /// Accept a decoded message
    #[must_use]
    pub fn on_message(self, message: Message) -> Transition {
        match self {
            Self::MaskPending(mask) => {
                Transition::PairComplete(Box::new(Pair::new(message, mask)))
            }
            Self::Idle | Self::MessagePending(_) => {
                Transition::Pending(Self::MessagePending(message))
            }
        }
    }

    /// Accept a decoded mask
    #[must_use]
    pub fn on_mask(self, mask: Mask) -> Transition {
        match self {
            Self::MessagePending(message) => {
                Transition::PairComplete(Box::new(Pair::new(message, mask)))
            }
            Self::Idle | Self::MaskPending(_) => Transition::Pending(Self::MaskPending(mask)),
        }
    }
}

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Pairs reported
    pub pairs: u64,
    /// Pairs whose input checksum did not verify
    pub checksum_mismatches: u64,
    /// Side left pending at end of input, never reported
    pub unpaired: Option<Marker>,
}

/// Scan loop over one input stream
#[derive(Debug)]
pub struct PairingCoordinator<R> {
    stream: HexStream<R>,
    scanner: MarkerScanner,
    state: PairingState,
    summary: RunSummary,
}

impl<R: Read> PairingCoordinator<R> {
    /// Coordinator over `reader`, starting idle
    pub fn new(reader: R) -> Self {
        Self {
            stream: HexStream::new(reader),
            scanner: MarkerScanner::new(),
            state: PairingState::Idle,
            summary: RunSummary::default(),
        }
    }

    /// Current pairing state
    #[must_use]
    pub const fn state(&self) -> &PairingState {
        &self.state
    }

    /// Counters so far
    #[must_use]
    pub const fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Scan until the next pair completes. `None` at end of input.
    pub fn next_pair(&mut self) -> Result<Option<Pair>> {
        while let Some(event) = self.scanner.next_marker(&mut self.stream)? {
            self.state.admit(event)?;

            let state = mem::take(&mut self.state);
            let transition = match event.marker {
                Marker::Message => state.on_message(decode_message(&mut self.stream)?),
                Marker::Mask => state.on_mask(decode_mask(&mut self.stream)?),
            };

            match transition {
                Transition::Pending(next) => {
                    trace!(offset = event.offset, state = next.name(), "pairing pending");
                    self.state = next;
                }
                Transition::PairComplete(pair) => {
                    self.record(&pair);
                    return Ok(Some(*pair));
                }
            }
        }

        self.summary.unpaired = match self.state {
            PairingState::Idle => None,
            PairingState::MessagePending(_) => Some(Marker::Message),
            PairingState::MaskPending(_) => Some(Marker::Mask),
        };
        if let Some(side) = self.summary.unpaired {
            warn!(%side, "end of input with unpaired record");
        }
        Ok(None)
    }

    /// Drive the scan to end of input, reporting every pair.
    pub fn run<P: Reporter + ?Sized>(mut self, reporter: &mut P) -> Result<RunSummary> {
        while let Some(pair) = self.next_pair()? {
            reporter.report_pair(self.summary.pairs, &pair)?;
        }
        Ok(self.summary)
    }

    fn record(&mut self, pair: &Pair) {
        self.summary.pairs += 1;
        if !pair.original_status.is_correct() {
            self.summary.checksum_mismatches += 1;
            warn!(
                pair = self.summary.pairs,
                checksum = pair.original.checksum(),
                "input checksum mismatch"
            );
        }
        debug!(
            pair = self.summary.pairs,
            msg_type = pair.original.msg_type(),
            length = pair.original.length(),
            mask = %pair.mask,
            "pair complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Field, encode_mask};

    fn coordinator(input: &[u8]) -> PairingCoordinator<&[u8]> {
        PairingCoordinator::new(input)
    }

    #[test]
    fn test_message_then_mask() {
        let mut pairing = coordinator(b"mess=0104deadbeef36bbfef9\nmask=ffffffff\n");
        let pair = pairing.next_pair().unwrap().expect("pair");

        assert_eq!(pair.original.data(), &[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(pair.original_status, Verification::Correct);
        assert_eq!(pair.modified.data(), &[0x21, 0x52, 0x41, 0x10]);
        assert_eq!(pair.modified_status, Verification::Correct);
        assert_eq!(pairing.state(), &PairingState::Idle);
        assert!(pairing.next_pair().unwrap().is_none());
        assert_eq!(pairing.summary().pairs, 1);
    }

    #[test]
    fn test_mask_then_message() {
        let mut pairing = coordinator(b"mask=ffffffff mess=0104deadbeef36bbfef9");
        let pair = pairing.next_pair().unwrap().expect("pair");
        assert_eq!(pair.mask, Mask::new(0xFFFF_FFFF));
        assert_eq!(pair.modified.checksum(), 0xF1BF_2382);
    }

    #[test]
    fn test_duplicate_message() {
        let mut pairing = coordinator(b"mess=0100ffffffff mess=0100ffffffff mask=00000000");
        let result = pairing.next_pair();
        assert!(matches!(result, Err(Error::DuplicateMessage { offset: 23 })));
    }

    #[test]
    fn test_duplicate_mask() {
        let mut pairing = coordinator(b"mask=00000001mask=00000002");
        let result = pairing.next_pair();
        assert!(matches!(result, Err(Error::DuplicateMask { offset: 18 })));
    }

    #[test]
    fn test_wrong_checksum_is_reported_not_raised() {
        let mut pairing = coordinator(b"mess=0104deadbeef00000000mask=00000000");
        let pair = pairing.next_pair().unwrap().expect("pair");

        assert_eq!(pair.original_status, Verification::Wrong);
        assert_eq!(pair.modified_status, Verification::Correct);
        assert_eq!(pairing.summary().checksum_mismatches, 1);
    }

    #[test]
    fn test_unpaired_trailing_record_is_dropped() {
        let mut pairing = coordinator(b"mask=00000001 mess=0100ffffffff mask=00000002");
        assert!(pairing.next_pair().unwrap().is_some());
        assert!(pairing.next_pair().unwrap().is_none());
        assert_eq!(pairing.summary().unpaired, Some(Marker::Mask));
    }

    #[test]
    fn test_truncated_message_aborts() {
        let mut pairing = coordinator(b"mask=00000000 mess=0104dead");
        let result = pairing.next_pair();
        assert!(matches!(
            result,
            Err(Error::UnexpectedEndOfStream {
                field: Field::Payload,
                ..
            })
        ));
    }

    #[test]
    fn test_state_transitions() {
        let msg = Message::from_data(0x01, b"x").unwrap();
        let mask = Mask::new(7);

        let Transition::Pending(state) = PairingState::Idle.on_mask(mask) else {
            panic!("expected pending");
        };
        assert_eq!(state, PairingState::MaskPending(mask));
        assert!(
            state
                .admit(MarkerEvent {
                    marker: Marker::Mask,
                    offset: 0,
                })
                .is_err()
        );
        assert!(matches!(state.on_message(msg), Transition::PairComplete(_)));
    }

    #[test]
    fn test_many_pairs_in_sequence() {
        let mut input = Vec::new();
        for i in 0..10u8 {
            let msg = Message::from_data(i, &vec![i; usize::from(i) * 7]).unwrap();
            input.extend_from_slice(&msg.encode());
            input.extend_from_slice(b" noise ");
            input.extend_from_slice(&encode_mask(Mask::new(u32::from(i))));
            input.push(b'\n');
        }

        let mut pairing = coordinator(&input);
        let mut seen = 0u8;
        while let Some(pair) = pairing.next_pair().unwrap() {
            assert_eq!(pair.original.msg_type(), seen);
            assert_eq!(pair.original_status, Verification::Correct);
            seen += 1;
        }
        assert_eq!(seen, 10);
        assert_eq!(pairing.summary().unpaired, None);
    }
}
