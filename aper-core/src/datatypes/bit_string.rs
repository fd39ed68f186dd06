//! Bit string type for the PER-ALIGNED codec

use crate::error::{AperError, AperResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arbitrary string of bits. A bit string value can have any length, including zero.
///
/// The bits live MSB-first in `bytes`; only the first `num_bits` bits are
/// significant, and the encoder treats anything past them in the final octet
/// as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitString {
    bytes: Vec<u8>,
    num_bits: usize,
}

impl BitString {
    /// Construct a bit string from raw octets and a bit count.
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` if `bytes` is too short to hold `num_bits` bits.
    pub fn new(bytes: Vec<u8>, num_bits: usize) -> AperResult<Self> {
        if num_bits > bytes.len() * 8 {
            return Err(AperError::InvalidData(format!(
                "bit string holds {} octets, too short for {} bits",
                bytes.len(),
                num_bits
            )));
        }
        Ok(Self { bytes, num_bits })
    }

    /// The backing octets, MSB-first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of significant bits.
    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// Whether the bit string holds no bits.
    pub fn is_empty(&self) -> bool {
        self.num_bits == 0
    }

    /// Read the bit at `index` (0-based, MSB of the first octet first).
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` if `index` is past the last significant bit.
    pub fn get_bit(&self, index: usize) -> AperResult<bool> {
        if index >= self.num_bits {
            return Err(AperError::InvalidData(format!(
                "bit index {} out of bounds ({} bits)",
                index, self.num_bits
            )));
        }
        Ok((self.bytes[index / 8] >> (7 - index % 8)) & 1 == 1)
    }

    /// Set the bit at `index` (0-based, MSB of the first octet first).
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` if `index` is past the last significant bit.
    pub fn set_bit(&mut self, index: usize, value: bool) -> AperResult<()> {
        if index >= self.num_bits {
            return Err(AperError::InvalidData(format!(
                "bit index {} out of bounds ({} bits)",
                index, self.num_bits
            )));
        }
        let mask = 1 << (7 - index % 8);
        if value {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
        Ok(())
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.bytes {
            write!(f, "{:02X}", byte)?;
        }
        write!(f, " ({} bits)", self.num_bits)
    }
}
