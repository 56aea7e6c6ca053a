//! Digits surrounding a match, for display

use digitstore::{DigitResult, DigitStore, render};
use serde::Serialize;
use tracing::debug;

/// Default number of digits shown on each side of a match
pub const DEFAULT_CONTEXT_RADIUS: u64 = 10;

/// A window of digits around a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchContext {
    /// Digits from `start_position`, including the match itself
    pub digits: String,
    /// Offset of the match inside `digits`
    pub pattern_index: usize,
    pub pattern_length: usize,
    /// Position of the first digit in `digits`
    pub start_position: u64,
}

impl MatchContext {
    /// Digits before the match
    pub fn before(&self) -> &str {
        &self.digits[..self.pattern_index]
    }

    /// The matched digits
    pub fn matched(&self) -> &str {
        let end = (self.pattern_index + self.pattern_length).min(self.digits.len());
        &self.digits[self.pattern_index..end]
    }

    /// Digits after the match
    pub fn after(&self) -> &str {
        let end = (self.pattern_index + self.pattern_length).min(self.digits.len());
        &self.digits[end..]
    }
}

/// Read up to `radius` digits on each side of a match at `position`
pub fn match_context(
    store: &dyn DigitStore,
    position: u64,
    pattern_length: usize,
    radius: u64,
) -> DigitResult<MatchContext> {
    debug!(position, pattern_length, radius, "match_context: called");

    let start_position = position.saturating_sub(radius);
    let end = position
        .saturating_add(pattern_length as u64)
        .saturating_add(radius)
        .min(store.digit_count());
    let digits = store.digits_in_range(start_position, end.saturating_sub(start_position))?;

    Ok(MatchContext {
        digits: render(&digits),
        pattern_index: (position - start_position) as usize,
        pattern_length,
        start_position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use digitstore::{DigitError, PackedStore, UnpackedStore};

    fn store() -> UnpackedStore {
        UnpackedStore::from_bytes(b"14159265358979\n".to_vec())
    }

    #[test]
    fn test_context_in_the_middle() {
        let ctx = match_context(&store(), 7, 3, 2).unwrap();
        assert_eq!(ctx.digits, "2653589");
        assert_eq!(ctx.start_position, 5);
        assert_eq!(ctx.pattern_index, 2);
        assert_eq!(ctx.before(), "26");
        assert_eq!(ctx.matched(), "535");
        assert_eq!(ctx.after(), "89");
    }

    #[test]
    fn test_context_clamped_at_start() {
        let ctx = match_context(&store(), 0, 2, 10).unwrap();
        assert_eq!(ctx.start_position, 0);
        assert_eq!(ctx.pattern_index, 0);
        assert_eq!(ctx.before(), "");
        assert_eq!(ctx.matched(), "14");
        assert_eq!(ctx.after(), "1592653589");
    }

    #[test]
    fn test_context_clamped_at_end() {
        let ctx = match_context(&store(), 11, 3, 10).unwrap();
        assert_eq!(ctx.start_position, 1);
        assert_eq!(ctx.digits, "4159265358979");
        assert_eq!(ctx.matched(), "979");
        assert_eq!(ctx.after(), "");
    }

    #[test]
    fn test_context_packed() {
        let packed = PackedStore::from_bytes(vec![0x14, 0x15, 0x92, 0x65, 0x35, 0x89, 0x79]);
        let ctx = match_context(&packed, 7, 3, 10).unwrap();
        assert_eq!(ctx, match_context(&store(), 7, 3, 10).unwrap());
    }

    #[test]
    fn test_context_out_of_range() {
        let err = match_context(&store(), 20, 1, 2).unwrap_err();
        assert!(matches!(err, DigitError::OutOfRange { .. }));
    }
}
