//! PiSearch - first-occurrence lookups in the digits of pi
//!
//! Finds where a digit pattern first appears in a huge digit file and returns
//! the digits around it. Storage and decoding live in the `digitstore` crate;
//! this crate walks the decoded digits.
//!
//! # Architecture
//!
//! ```text
//! Pattern ──> PatternSearcher ──> Arc<dyn DigitStore> ──> mmap(digit file)
//!                  │
//!                  └──> SearchReport { position, MatchContext }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use digitstore::{Encoding, Pattern, open_store};
//! use pisearch::{PatternSearcher, SearchStrategy};
//!
//! let store = open_store("pi_digits.txt", Encoding::Unpacked)?;
//! let searcher = PatternSearcher::new(store, SearchStrategy::default());
//! let result = searcher.find_first(&Pattern::parse("999999")?, 0)?;
//! ```

pub mod cli;
pub mod config;
mod context;
mod report;
mod search;

pub use context::{DEFAULT_CONTEXT_RADIUS, MatchContext, match_context};
pub use report::SearchReport;
pub use search::{DEFAULT_WINDOW_SIZE, PatternSearcher, SearchResult, SearchStrategy, StrategyKind};

pub use digitstore::{DigitError, DigitResult, DigitStore, Encoding, Pattern};
