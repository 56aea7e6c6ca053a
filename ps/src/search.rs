//! First-occurrence pattern search over a digit store

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use digitstore::{Digit, DigitError, DigitResult, DigitStore, Pattern};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default number of digits fetched per chunk
pub const DEFAULT_WINDOW_SIZE: usize = 10_000;

/// How the searcher walks the digit sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Decode overlapping windows and scan each one in memory
    Chunked { window_size: usize },
    /// Test one candidate position at a time, re-verifying any hit
    Direct,
}

impl Default for SearchStrategy {
    fn default() -> Self {
        Self::Chunked {
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chunked { window_size } => write!(f, "chunked(window={})", window_size),
            Self::Direct => write!(f, "direct"),
        }
    }
}

/// Strategy name as written in config files and on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Chunked,
    Direct,
}

impl StrategyKind {
    pub fn with_window(self, window_size: usize) -> SearchStrategy {
        match self {
            Self::Chunked => SearchStrategy::Chunked { window_size },
            Self::Direct => SearchStrategy::Direct,
        }
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chunked" => Ok(Self::Chunked),
            "direct" => Ok(Self::Direct),
            other => Err(format!("Unknown strategy: '{}'. Supported: chunked, direct", other)),
        }
    }
}

/// Outcome of a search: a start position or an explicit miss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchResult {
    Found(u64),
    NotFound,
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn position(&self) -> Option<u64> {
        match self {
            Self::Found(position) => Some(*position),
            Self::NotFound => None,
        }
    }
}

/// Finds the first occurrence of a digit pattern in a shared store
#[derive(Debug, Clone)]
pub struct PatternSearcher {
    store: Arc<dyn DigitStore>,
    strategy: SearchStrategy,
}

impl PatternSearcher {
    pub fn new(store: Arc<dyn DigitStore>, strategy: SearchStrategy) -> Self {
        Self { store, strategy }
    }

    pub fn store(&self) -> &Arc<dyn DigitStore> {
        &self.store
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Find the first position at or after `start` where `pattern` occurs
    ///
    /// `start` must address a digit in the store. A pattern longer than the
    /// remaining digits is a miss, not an error.
    pub fn find_first(&self, pattern: &Pattern, start: u64) -> DigitResult<SearchResult> {
        let digit_count = self.store.digit_count();
        debug!(%pattern, start, digit_count, strategy = %self.strategy, "find_first: called");

        if start >= digit_count {
            return Err(DigitError::OutOfRange {
                position: start,
                digit_count,
            });
        }

        if digit_count - start < pattern.len() as u64 {
            debug!("find_first: pattern longer than remaining digits");
            return Ok(SearchResult::NotFound);
        }

        let result = match self.strategy {
            SearchStrategy::Chunked { window_size } => self.chunked_scan(pattern, start, window_size)?,
            SearchStrategy::Direct => self.direct_scan(pattern, start)?,
        };

        debug!(?result, "find_first: done");
        Ok(result)
    }

    /// Parse `pattern` as a digit string, then search
    pub fn find_first_str(&self, pattern: &str, start: u64) -> DigitResult<SearchResult> {
        self.find_first(&Pattern::parse(pattern)?, start)
    }

    fn chunked_scan(&self, pattern: &Pattern, start: u64, window_size: usize) -> DigitResult<SearchResult> {
        let digit_count = self.store.digit_count();
        let needle = pattern.digits();
        let window = window_size.max(needle.len()) as u64;
        // Consecutive windows share len - 1 digits so no straddling match is lost
        let step = window - (needle.len() as u64 - 1);

        let mut pos = start;
        while digit_count - pos >= needle.len() as u64 {
            let chunk = match self.store.digits_in_range(pos, window) {
                Ok(chunk) => chunk,
                Err(DigitError::CorruptData { position, detail }) => {
                    // A match that ends before the bad digit still wins
                    let valid = self.store.digits_in_range(pos, position - pos)?;
                    if let Some(offset) = find_in(&valid, needle) {
                        return Ok(SearchResult::Found(pos + offset as u64));
                    }
                    return Err(DigitError::CorruptData { position, detail });
                }
                Err(e) => return Err(e),
            };

            if let Some(offset) = find_in(&chunk, needle) {
                return Ok(SearchResult::Found(pos + offset as u64));
            }

            if pos + chunk.len() as u64 >= digit_count {
                break;
            }
            pos += step;
        }

        Ok(SearchResult::NotFound)
    }

    fn direct_scan(&self, pattern: &Pattern, start: u64) -> DigitResult<SearchResult> {
        let digit_count = self.store.digit_count();
        let len = pattern.len() as u64;

        let mut candidate = start;
        while digit_count - candidate >= len {
            if self.matches_at(pattern, candidate)? {
                self.verify(pattern, candidate)?;
                return Ok(SearchResult::Found(candidate));
            }
            candidate += 1;
        }

        // The last len - 1 digits are never a candidate start; decode them so
        // corruption there is reported the same way the chunked scan reports it
        if candidate < digit_count {
            self.store.digits_in_range(candidate, digit_count - candidate)?;
        }

        Ok(SearchResult::NotFound)
    }

    /// Compare digit by digit, stopping at the first mismatch
    fn matches_at(&self, pattern: &Pattern, candidate: u64) -> DigitResult<bool> {
        for (i, expected) in pattern.digits().iter().enumerate() {
            if self.store.digit_at(candidate + i as u64)? != *expected {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Re-decode a claimed match through the range path
    fn verify(&self, pattern: &Pattern, candidate: u64) -> DigitResult<()> {
        let digits = self.store.digits_in_range(candidate, pattern.len() as u64)?;
        if digits != pattern.digits() {
            return Err(DigitError::CorruptData {
                position: candidate,
                detail: format!(
                    "match for '{}' failed verification (re-read '{}')",
                    pattern,
                    digitstore::render(&digits)
                ),
            });
        }
        Ok(())
    }
}

fn find_in(haystack: &[Digit], needle: &[Digit]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
