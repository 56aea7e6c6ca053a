//! Search results shaped for callers of the lookup service

use std::time::Instant;

use digitstore::{DigitResult, Pattern};
use serde::Serialize;
use tracing::info;

use crate::context::{MatchContext, match_context};
use crate::search::PatternSearcher;

/// A completed lookup: where the pattern was found and what surrounds it
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub found: bool,
    pub position: Option<u64>,
    pub pattern: String,
    pub start_position: u64,
    pub search_time_seconds: f64,
    pub context: Option<MatchContext>,
}

impl SearchReport {
    /// Run a search and collect `radius` digits of context around any match
    pub fn run(searcher: &PatternSearcher, pattern: &Pattern, start: u64, radius: u64) -> DigitResult<Self> {
        let started = Instant::now();
        let result = searcher.find_first(pattern, start)?;
        let search_time_seconds = started.elapsed().as_secs_f64();

        let context = match result.position() {
            Some(position) => Some(match_context(searcher.store().as_ref(), position, pattern.len(), radius)?),
            None => None,
        };

        info!(
            %pattern,
            start,
            position = ?result.position(),
            search_time_seconds,
            "Search complete"
        );

        Ok(Self {
            found: result.is_found(),
            position: result.position(),
            pattern: pattern.to_string(),
            start_position: start,
            search_time_seconds,
            context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchStrategy;
    use digitstore::{DigitStore, UnpackedStore};
    use std::sync::Arc;

    fn searcher() -> PatternSearcher {
        let store: Arc<dyn DigitStore> = Arc::new(UnpackedStore::from_bytes(b"14159265358979\n".to_vec()));
        PatternSearcher::new(store, SearchStrategy::default())
    }

    #[test]
    fn test_found_report() {
        let pattern = Pattern::parse("535").unwrap();
        let report = SearchReport::run(&searcher(), &pattern, 0, 10).unwrap();

        assert!(report.found);
        assert_eq!(report.position, Some(7));
        assert_eq!(report.pattern, "535");

        let ctx = report.context.unwrap();
        assert_eq!(ctx.start_position, 0);
        assert_eq!(ctx.pattern_index, 7);
        assert_eq!(ctx.matched(), "535");
    }

    #[test]
    fn test_not_found_report() {
        let pattern = Pattern::parse("9999").unwrap();
        let report = SearchReport::run(&searcher(), &pattern, 0, 10).unwrap();

        assert!(!report.found);
        assert_eq!(report.position, None);
        assert!(report.context.is_none());
    }

    #[test]
    fn test_report_json_shape() {
        let pattern = Pattern::parse("14").unwrap();
        let report = SearchReport::run(&searcher(), &pattern, 1, 10).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["found"], false);
        assert!(json["position"].is_null());
        assert!(json["context"].is_null());
        assert_eq!(json["pattern"], "14");
        assert_eq!(json["start_position"], 1);
    }

    #[test]
    fn test_errors_propagate() {
        let pattern = Pattern::parse("1").unwrap();
        let err = SearchReport::run(&searcher(), &pattern, 100, 10).unwrap_err();
        assert!(err.is_client_error());
    }
}
