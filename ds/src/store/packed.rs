//! Two digits per byte, high nibble first

use std::path::Path;

use tracing::debug;

use super::{DigitStore, Encoding, check_position, clamp_range};
use crate::backing::Backing;
use crate::digit::Digit;
use crate::error::{DigitError, DigitResult};

/// Digit store over a nibble-packed binary file
///
/// Digit `p` lives in byte `p / 2`: even positions in the high nibble, odd
/// positions in the low nibble. Every byte holds two digits, so the digit
/// count is twice the file size.
#[derive(Debug)]
pub struct PackedStore {
    bytes: Backing,
}

impl PackedStore {
    /// Open and map a packed digit file
    pub fn open(path: impl AsRef<Path>) -> DigitResult<Self> {
        let bytes = Backing::open(path.as_ref())?;
        debug!(len = bytes.len(), "PackedStore::open: mapped");
        Ok(Self { bytes })
    }

    /// Build a store over in-memory packed bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Backing::from(bytes),
        }
    }

    fn decode(&self, position: u64) -> DigitResult<Digit> {
        let unit = self.bytes[(position / 2) as usize];
        let nibble = if position % 2 == 0 { unit >> 4 } else { unit & 0x0F };
        Digit::new(nibble).ok_or_else(|| DigitError::CorruptData {
            position,
            detail: format!("nibble 0x{:x} of byte 0x{:02x} is not a digit", nibble, unit),
        })
    }
}

impl DigitStore for PackedStore {
    fn encoding(&self) -> Encoding {
        Encoding::Packed
    }

    fn digit_count(&self) -> u64 {
        self.bytes.len() as u64 * 2
    }

    fn digit_at(&self, position: u64) -> DigitResult<Digit> {
        check_position(position, self.digit_count())?;
        self.decode(position)
    }

    fn digits_in_range(&self, start: u64, count: u64) -> DigitResult<Vec<Digit>> {
        let end = clamp_range(start, count, self.digit_count())?;
        (start..end).map(|p| self.decode(p)).collect()
    }
}
