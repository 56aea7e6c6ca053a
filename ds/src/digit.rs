//! Digit and pattern types

use std::fmt;
use std::str::FromStr;

use crate::error::DigitError;

/// A single decimal digit in the range 0-9
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digit(u8);

impl Digit {
    /// Create a digit from its numeric value, `None` if above 9
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 { Some(Self(value)) } else { None }
    }

    /// Create a digit from an ASCII character byte (`b'0'..=b'9'`)
    pub const fn from_ascii(byte: u8) -> Option<Self> {
        Self::new(byte.wrapping_sub(b'0'))
    }

    /// Numeric value of the digit
    pub const fn value(self) -> u8 {
        self.0
    }

    /// ASCII character for the digit
    pub const fn to_char(self) -> char {
        (b'0' + self.0) as char
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Render decoded digits as a digit string
pub fn render(digits: &[Digit]) -> String {
    digits.iter().map(|d| d.to_char()).collect()
}

/// A non-empty sequence of digits to search for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    digits: Vec<Digit>,
}

impl Pattern {
    /// Parse a pattern from a digit string such as `"14159"`
    pub fn parse(text: &str) -> Result<Self, DigitError> {
        if text.is_empty() {
            return Err(DigitError::InvalidPattern("pattern is empty".to_string()));
        }

        let digits = text
            .bytes()
            .enumerate()
            .map(|(i, b)| {
                Digit::from_ascii(b).ok_or_else(|| {
                    DigitError::InvalidPattern(format!("non-digit character at index {} in '{}'", i, text))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { digits })
    }

    /// Build a pattern from raw numeric values
    pub fn from_values(values: &[u8]) -> Result<Self, DigitError> {
        if values.is_empty() {
            return Err(DigitError::InvalidPattern("pattern is empty".to_string()));
        }

        let digits = values
            .iter()
            .map(|&v| Digit::new(v).ok_or_else(|| DigitError::InvalidPattern(format!("value {} is not a digit", v))))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { digits })
    }

    pub fn digits(&self) -> &[Digit] {
        &self.digits
    }

    /// Number of digits, always at least 1
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// A constructed pattern is never empty
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}

impl FromStr for Pattern {
    type Err = DigitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.digits))
    }
}
