//! Digit store trait and backend selection

mod packed;
mod unpacked;

pub use packed::PackedStore;
pub use unpacked::UnpackedStore;

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::digit::Digit;
use crate::error::{DigitError, DigitResult};

/// Physical layout of a digit file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// One ASCII character per digit
    #[default]
    Unpacked,
    /// Two digits per byte, high nibble first
    Packed,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Unpacked => write!(f, "unpacked"),
            Encoding::Packed => write!(f, "packed"),
        }
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unpacked" => Ok(Self::Unpacked),
            "packed" => Ok(Self::Packed),
            other => Err(format!("Unknown encoding: '{}'. Supported: unpacked, packed", other)),
        }
    }
}

/// Random access to an immutable sequence of decimal digits
///
/// Implementations are read-only after construction, so a single store can be
/// shared across threads and queried concurrently without locking.
pub trait DigitStore: Send + Sync + fmt::Debug {
    /// Physical layout this store decodes
    fn encoding(&self) -> Encoding;

    /// Total number of addressable digits
    fn digit_count(&self) -> u64;

    /// Decode the digit at `position`
    ///
    /// Fails with `OutOfRange` past the end and `CorruptData` if the stored
    /// value is not a digit.
    fn digit_at(&self, position: u64) -> DigitResult<Digit>;

    /// Decode up to `count` digits starting at `start`
    ///
    /// `start` must be inside the sequence; `count` is clamped so the range
    /// never extends past the last digit.
    fn digits_in_range(&self, start: u64, count: u64) -> DigitResult<Vec<Digit>>;
}

/// Open a digit file with the given layout
pub fn open_store(path: impl AsRef<Path>, encoding: Encoding) -> DigitResult<Arc<dyn DigitStore>> {
    let path = path.as_ref();
    debug!(path = %path.display(), %encoding, "open_store: called");

    let store: Arc<dyn DigitStore> = match encoding {
        Encoding::Unpacked => Arc::new(UnpackedStore::open(path)?),
        Encoding::Packed => Arc::new(PackedStore::open(path)?),
    };

    info!(path = %path.display(), %encoding, digit_count = store.digit_count(), "Opened digit store");
    Ok(store)
}

/// Validate `start` and clamp `count` against the digit count
///
/// Returns the exclusive end position of the range.
pub(crate) fn clamp_range(start: u64, count: u64, digit_count: u64) -> DigitResult<u64> {
    check_position(start, digit_count)?;
    Ok(start.saturating_add(count).min(digit_count))
}

pub(crate) fn check_position(position: u64, digit_count: u64) -> DigitResult<()> {
    if position >= digit_count {
        return Err(DigitError::OutOfRange { position, digit_count });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    const PI_14: &str = "14159265358979";

    fn pack(text: &str) -> Vec<u8> {
        text.as_bytes()
            .chunks(2)
            .map(|pair| {
                let hi = pair[0] - b'0';
                let lo = pair.get(1).map(|b| b - b'0').unwrap_or(0);
                (hi << 4) | lo
            })
            .collect()
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("packed".parse::<Encoding>().unwrap(), Encoding::Packed);
        assert_eq!("Unpacked".parse::<Encoding>().unwrap(), Encoding::Unpacked);
        assert!("gzip".parse::<Encoding>().is_err());
        // Only the two documented names are accepted
        assert!("ascii".parse::<Encoding>().is_err());
        assert!("nibble".parse::<Encoding>().is_err());
    }

    #[test]
    fn test_encoding_deserialize() {
        use serde::de::value::{Error, StrDeserializer};

        let encoding = Encoding::deserialize(StrDeserializer::<Error>::new("packed")).unwrap();
        assert_eq!(encoding, Encoding::Packed);
        assert!(Encoding::deserialize(StrDeserializer::<Error>::new("Packed")).is_err());
    }

    #[test]
    fn test_open_store_selects_backend() {
        let temp = TempDir::new().unwrap();
        let text_path = temp.path().join("pi.txt");
        let bin_path = temp.path().join("pi.bin");
        fs::write(&text_path, format!("{}\n", PI_14)).unwrap();
        fs::write(&bin_path, pack(PI_14)).unwrap();

        let unpacked = open_store(&text_path, Encoding::Unpacked).unwrap();
        let packed = open_store(&bin_path, Encoding::Packed).unwrap();

        assert_eq!(unpacked.encoding(), Encoding::Unpacked);
        assert_eq!(packed.encoding(), Encoding::Packed);
        assert_eq!(unpacked.digit_count(), 14);
        assert_eq!(packed.digit_count(), 14);
        assert_eq!(
            unpacked.digits_in_range(0, 14).unwrap(),
            packed.digits_in_range(0, 14).unwrap()
        );
    }

    #[test]
    fn test_open_store_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = open_store(temp.path().join("nope.bin"), Encoding::Packed).unwrap_err();
        assert!(matches!(err, DigitError::Io(_)));
    }

    #[test]
    fn test_packed_file_read_as_unpacked_is_corrupt() {
        let store = UnpackedStore::from_bytes(pack(PI_14));
        let err = store.digits_in_range(0, 7).unwrap_err();
        assert!(err.is_corruption());
    }

    #[test]
    fn test_clamp_range() {
        assert_eq!(clamp_range(0, 5, 14).unwrap(), 5);
        assert_eq!(clamp_range(10, 100, 14).unwrap(), 14);
        assert_eq!(clamp_range(13, u64::MAX, 14).unwrap(), 14);
        assert!(clamp_range(14, 1, 14).is_err());
        assert!(clamp_range(0, 1, 0).is_err());
    }

    // Packed files always hold an even number of digits
    fn even_digits() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(0u8..10, 1..100).prop_map(|mut v| {
            if v.len() % 2 == 1 {
                v.push(0);
            }
            v
        })
    }

    proptest! {
        #[test]
        fn prop_backends_agree(values in even_digits(), start in 0usize..200, count in 0u64..300) {
            let text: String = values.iter().map(|v| (b'0' + v) as char).collect();
            let unpacked = UnpackedStore::from_bytes(text.clone().into_bytes());
            let packed = PackedStore::from_bytes(pack(&text));

            let start = (start % values.len()) as u64;
            let expected = unpacked.digits_in_range(start, count).unwrap();
            let actual = packed.digits_in_range(start, count).unwrap();
            prop_assert_eq!(&actual[..], &expected[..]);
        }

        #[test]
        fn prop_digit_at_matches_range(values in even_digits()) {
            let text: String = values.iter().map(|v| (b'0' + v) as char).collect();
            let stores: [Box<dyn DigitStore>; 2] = [
                Box::new(UnpackedStore::from_bytes(text.clone().into_bytes())),
                Box::new(PackedStore::from_bytes(pack(&text))),
            ];

            for store in &stores {
                for p in 0..values.len() as u64 {
                    let single = store.digit_at(p).unwrap();
                    let ranged = store.digits_in_range(p, 1).unwrap();
                    prop_assert_eq!(ranged, vec![single]);
                    prop_assert_eq!(single.value(), values[p as usize]);
                }
            }
        }
    }
}
