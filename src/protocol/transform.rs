//! Checksum verification and tetrad masking
//!
//! The data region is split into tetrads counted from the first tetrad that
//! holds data (the region is left-padded with zeros to a tetrad boundary).
//! Tetrads 0, 2, 4, … are XORed with the mask, big-endian. Mask bits that
//! land on the zero-padding region are dropped, so the padding stays zero and
//! the declared length is unchanged.

use std::fmt;

use super::crc::crc32;
use super::{Mask, Message, TETRAD_SIZE};

/// Outcome of comparing a record's checksum with its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verification {
    /// Checksum matches the payload
    Correct,
    /// Checksum does not match the payload
    Wrong,
}

impl Verification {
    /// Check if the checksum matched
    #[must_use]
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

impl From<bool> for Verification {
    fn from(matches: bool) -> Self {
        if matches { Self::Correct } else { Self::Wrong }
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Correct => "CORRECT",
            Self::Wrong => "WRONG",
        };
        write!(f, "{name}")
    }
}

/// Compare the carried checksum with the CRC-32 of the full 252-byte slot.
#[must_use]
pub fn verify(message: &Message) -> Verification {
    Verification::from(crc32(message.payload()) == message.checksum())
}

/// Return a copy of `message` with `mask` applied to every even data tetrad
/// and the checksum recomputed.
#[must_use]
pub fn apply_mask(message: &Message, mask: Mask) -> Message {
    let start = message.data_tetrad_start();
    let padding = message.header().padding();
    let mask = mask.to_be_bytes();

    let mut masked = message.clone();
    let payload = masked.payload_mut();
    for tetrad in payload[start..].chunks_exact_mut(TETRAD_SIZE).step_by(2) {
        for (byte, bits) in tetrad.iter_mut().zip(mask) {
            *byte ^= bits;
        }
    }
    payload[..padding].fill(0);

    let checksum = crc32(masked.payload());
    masked.set_checksum(checksum);
    masked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(data: &[u8]) -> Message {
        Message::from_data(0x01, data).unwrap()
    }

    #[test]
    fn test_verify() {
        let msg = message(&[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(verify(&msg), Verification::Correct);
        assert_eq!(verify(&msg.with_checksum(0xDEAD_BEEF)), Verification::Wrong);
        assert_eq!(Verification::Correct.to_string(), "CORRECT");
        assert_eq!(Verification::Wrong.to_string(), "WRONG");
    }

    #[test]
    fn test_single_tetrad_is_masked() {
        let msg = message(&[0xDE, 0xAD, 0xBE, 0xEF]);
        let masked = apply_mask(&msg, Mask::new(0xFFFF_FFFF));

        assert_eq!(masked.data(), &[0x21, 0x52, 0x41, 0x10]);
        assert_eq!(masked.length(), 4);
        assert_eq!(masked.checksum(), 0xF1BF_2382);
        assert_eq!(verify(&masked), Verification::Correct);
        // input untouched
        assert_eq!(msg.data(), &[0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_only_even_tetrads_change() {
        let msg = message(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        let masked = apply_mask(&msg, Mask::new(0xFFFF_FFFF));

        let before: Vec<u32> = msg.data_tetrads().iter().collect();
        let after: Vec<u32> = masked.data_tetrads().iter().collect();
        assert_eq!(after[0], !before[0]);
        assert_eq!(after[1], before[1]);
        assert_eq!(after[2], !before[2]);
        assert_eq!(masked.checksum(), crc32(masked.payload()));
    }

    #[test]
    fn test_two_tetrads_reference_vector() {
        let msg = message(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let masked = apply_mask(&msg, Mask::new(0xFFFF_FFFF));

        assert_eq!(masked.data(), &[0xFE, 0xFD, 0xFC, 0xFB, 5, 6, 7, 8]);
        assert_eq!(masked.checksum(), 0x646E_B442);
    }

    #[test]
    fn test_partial_tetrad_keeps_padding_zero() {
        let msg = message(&[0xA1, 0xB2, 0xC3]);
        let masked = apply_mask(&msg, Mask::new(0x1122_3344));

        assert_eq!(masked.data(), &[0x83, 0x81, 0x87]);
        assert!(masked.padding().iter().all(|&b| b == 0));
        assert_eq!(masked.checksum(), 0xB984_263C);
    }

    #[test]
    fn test_empty_data_only_recomputes_checksum() {
        let msg = message(&[]).with_checksum(0);
        let masked = apply_mask(&msg, Mask::new(0xFFFF_FFFF));

        assert_eq!(masked.payload(), msg.payload());
        assert_eq!(verify(&masked), Verification::Correct);
    }

    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: XOR masking is an involution
            #[test]
            fn prop_double_apply_restores_payload(
                data in prop::collection::vec(any::<u8>(), 0..=252),
                mask in any::<u32>(),
            ) {
                let original = message(&data);
                let twice = apply_mask(&apply_mask(&original, Mask::new(mask)), Mask::new(mask));
                prop_assert_eq!(twice.payload(), original.payload());
                prop_assert_eq!(twice.checksum(), original.checksum());
            }

            /// Property: masked output always verifies and keeps its padding zero
            #[test]
            fn prop_masked_is_consistent(
                data in prop::collection::vec(any::<u8>(), 0..=252),
                mask in any::<u32>(),
            ) {
                let masked = apply_mask(&message(&data), Mask::new(mask));
                prop_assert_eq!(usize::from(masked.length()), data.len());
                prop_assert!(masked.padding().iter().all(|&b| b == 0));
                prop_assert!(verify(&masked).is_correct());
            }
        }
    }
}
