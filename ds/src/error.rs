//! Digit store error types

use thiserror::Error;

/// Errors that can occur while decoding or searching digits
#[derive(Debug, Error)]
pub enum DigitError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Position {position} is out of range (digit count {digit_count})")]
    OutOfRange { position: u64, digit_count: u64 },

    #[error("Corrupt data at position {position}: {detail}")]
    CorruptData { position: u64, detail: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for digit store operations
pub type DigitResult<T> = Result<T, DigitError>;

impl DigitError {
    /// Check if the caller supplied bad input (pattern or position)
    pub fn is_client_error(&self) -> bool {
        matches!(self, DigitError::InvalidPattern(_) | DigitError::OutOfRange { .. })
    }

    /// Check if the backing file produced a value that is not a digit
    pub fn is_corruption(&self) -> bool {
        matches!(self, DigitError::CorruptData { .. })
    }
}
