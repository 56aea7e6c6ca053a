//! DigitStore - random access to huge immutable digit files
//!
//! Decodes arbitrary ranges of decimal digits from a file that is opened once
//! and memory-mapped read-only. Two on-disk layouts are supported behind the
//! same [`DigitStore`] trait:
//!
//! ```text
//! unpacked:  '1' '4' '1' '5' '9' ...        one ASCII byte per digit
//! packed:    0x14 0x15 0x9_ ...             two digits per byte, high nibble first
//! ```
//!
//! # Example
//!
//! ```ignore
//! use digitstore::{Encoding, open_store};
//!
//! let store = open_store("pi_digits.bin", Encoding::Packed)?;
//! let digits = store.digits_in_range(0, 5)?;
//! assert_eq!(digitstore::render(&digits), "31415");
//! ```

mod backing;
mod digit;
mod error;
mod store;

pub use digit::{Digit, Pattern, render};
pub use error::{DigitError, DigitResult};
pub use store::{DigitStore, Encoding, PackedStore, UnpackedStore, open_store};
