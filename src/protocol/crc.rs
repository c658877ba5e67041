//! CRC-32 engine
//!
//! Direct (non-reflected) table-driven CRC-32 over polynomial `0x04C11DB7`
//! with the register seeded to `0xFFFF_FFFF` and no final XOR
//! (the CRC-32/MPEG-2 parameter set).
//!
//! ```
//! use aumsg::protocol::crc::{Crc32, crc32};
//!
//! let mut hasher = Crc32::new();
//! hasher.update(b"1234");
//! hasher.update(b"56789");
//! assert_eq!(hasher.finalize(), crc32(b"123456789"));
//! ```

/// Generator polynomial (normal form)
pub const POLYNOMIAL: u32 = 0x04C1_1DB7;

/// Initial register value
pub const INIT: u32 = 0xFFFF_FFFF;

const TABLE: [u32; 256] = generate_table();

const fn generate_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u32) << 24;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000_0000 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Compute the checksum of `bytes` in one shot.
#[must_use]
pub fn crc32(bytes: &[u8]) -> u32 {
    let mut hasher = Crc32::new();
    hasher.update(bytes);
    hasher.finalize()
}

/// Incremental CRC-32 hasher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc32 {
    state: u32,
}

impl Crc32 {
    /// Create a hasher seeded with [`INIT`]
    #[must_use]
    pub const fn new() -> Self {
        Self { state: INIT }
    }

    /// Feed more bytes
    pub fn update(&mut self, bytes: &[u8]) {
        let mut crc = self.state;
        for &byte in bytes {
            let index = ((crc >> 24) ^ u32::from(byte)) & 0xFF;
            crc = (crc << 8) ^ TABLE[index as usize];
        }
        self.state = crc;
    }

    /// Current checksum value
    #[must_use]
    pub const fn finalize(self) -> u32 {
        self.state
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}
