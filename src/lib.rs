//! Streaming parser for hex-encoded message/mask pairs
//!
//! Input is ASCII text in which `mess=` introduces a message record and
//! `mask=` introduces a 32-bit mask. Each message is checked against its
//! CRC-32, every even data tetrad is XORed with the paired mask, and the
//! checksum is recomputed.
//!
//! # Quick Start
//!
//! ```rust
//! use aumsg::{Mask, PairingCoordinator, Verification};
//!
//! let input = b"mess=0104deadbeef36bbfef9\nmask=ffffffff\n";
//! let mut pairing = PairingCoordinator::new(&input[..]);
//!
//! let pair = pairing.next_pair()?.expect("one complete pair");
//! assert_eq!(pair.original.data(), &[0xde, 0xad, 0xbe, 0xef]);
//! assert_eq!(pair.original_status, Verification::Correct);
//! assert_eq!(pair.mask, Mask::new(0xffff_ffff));
//! assert_eq!(pair.modified.data(), &[0x21, 0x52, 0x41, 0x10]);
//! # Ok::<(), aumsg::Error>(())
//! ```
//!
//! # Record Format
//!
//! ```text
//! mess= [TYPE (2)] [LENGTH (2)] [DATA (2 * LENGTH)] [CRC-32 (8)]
//! mask= [VALUE (8)]
//! ```
//!
//! - CRC-32 polynomial `0x04C11DB7`, initial value `0xFFFFFFFF`, computed
//!   over the full 252-byte payload slot
//! - Data is right-aligned in the slot; the rest is zero padding

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod pairing;
pub mod protocol;
pub mod report;
pub mod runner;

pub use pairing::{Pair, PairingCoordinator, PairingState, RunSummary};
pub use protocol::{
    Error, Field, MAX_PAYLOAD_LEN, Mask, Message, MessageHeader, PAYLOAD_SLOT_SIZE, Result,
    Verification, apply_mask, crc32, verify,
};
pub use report::{Reporter, TextReporter};
pub use runner::{RunConfig, run};
