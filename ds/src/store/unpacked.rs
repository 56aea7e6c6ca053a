//! One ASCII character per digit

use std::path::Path;

use tracing::debug;

use super::{DigitStore, Encoding, check_position, clamp_range};
use crate::backing::Backing;
use crate::digit::Digit;
use crate::error::{DigitError, DigitResult};

/// Digit store over a text file of ASCII digits
///
/// Trailing ASCII whitespace (a final newline, usually) is not addressable:
/// the digit count stops at the last non-whitespace byte. Any other non-digit
/// byte inside that region is reported as corrupt when decoded.
#[derive(Debug)]
pub struct UnpackedStore {
    bytes: Backing,
    digit_count: u64,
}

impl UnpackedStore {
    /// Open and map an unpacked digit file
    pub fn open(path: impl AsRef<Path>) -> DigitResult<Self> {
        Ok(Self::with_backing(Backing::open(path.as_ref())?))
    }

    /// Build a store over in-memory ASCII digits
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::with_backing(Backing::from(bytes))
    }

    fn with_backing(bytes: Backing) -> Self {
        let trailing = bytes.iter().rev().take_while(|b| b.is_ascii_whitespace()).count();
        let digit_count = (bytes.len() - trailing) as u64;
        debug!(len = bytes.len(), trailing, digit_count, "UnpackedStore: sized");
        Self { bytes, digit_count }
    }

    fn decode(&self, position: u64) -> DigitResult<Digit> {
        let byte = self.bytes[position as usize];
        Digit::from_ascii(byte).ok_or_else(|| DigitError::CorruptData {
            position,
            detail: format!("byte 0x{:02x} is not an ASCII digit", byte),
        })
    }
}

impl DigitStore for UnpackedStore {
    fn encoding(&self) -> Encoding {
        Encoding::Unpacked
    }

    fn digit_count(&self) -> u64 {
        self.digit_count
    }

    fn digit_at(&self, position: u64) -> DigitResult<Digit> {
        check_position(position, self.digit_count)?;
        self.decode(position)
    }

    fn digits_in_range(&self, start: u64, count: u64) -> DigitResult<Vec<Digit>> {
        let end = clamp_range(start, count, self.digit_count)?;
        (start..end).map(|p| self.decode(p)).collect()
    }
}
