//! Result accumulation and capping

use super::types::{MatchRecord, SearchResults};

/// Collects match records up to the fetch cap.
///
/// Records keep arrival order: file by file in enumeration order, then by
/// position inside each file.
#[derive(Debug, Clone)]
pub struct ResultAggregator {
    fetch_cap: usize,
    records: Vec<MatchRecord>,
    files_scanned: usize,
    files_skipped: usize,
}

impl ResultAggregator {
    pub fn new(fetch_cap: usize) -> Self {
        Self {
            fetch_cap,
            records: Vec::new(),
            files_scanned: 0,
            files_skipped: 0,
        }
    }

    /// Append a record unless the cap is reached.
    ///
    /// Returns whether there is still room for more records.
    pub fn accept(&mut self, record: MatchRecord) -> bool {
        if !self.is_full() {
            self.records.push(record);
        }
        !self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.fetch_cap
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn mark_scanned(&mut self) {
        self.files_scanned += 1;
    }

    pub fn mark_skipped(&mut self) {
        self.files_skipped += 1;
    }

    /// Truncate to the display cap and produce the final results
    pub fn finish(self, display_cap: usize, cancelled: bool) -> SearchResults {
        let total_collected = self.records.len();
        let mut records = self.records;
        let truncated = records.len() > display_cap;
        records.truncate(display_cap);

        SearchResults {
            records,
            total_collected,
            truncated,
            cancelled,
            files_scanned: self.files_scanned,
            files_skipped: self.files_skipped,
        }
    }
}

/// One-shot aggregation over per-file record lists
pub fn aggregate<I>(per_file: I, fetch_cap: usize, display_cap: usize) -> SearchResults
where
    I: IntoIterator<Item = Vec<MatchRecord>>,
{
    let mut aggregator = ResultAggregator::new(fetch_cap);

    'files: for records in per_file {
        aggregator.mark_scanned();
        for record in records {
            if !aggregator.accept(record) {
                break 'files;
            }
        }
    }

    aggregator.finish(display_cap, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(file: &str, line: usize) -> MatchRecord {
        MatchRecord {
            file_path: PathBuf::from(file),
            line_number: line,
            column_start: 0,
            column_end: 3,
            raw_line_text: "foo".to_string(),
            preview_text: "**foo**".to_string(),
            label: format!("foo -> {}:{}", file, line),
        }
    }

    #[test]
    fn test_accept_stops_at_fetch_cap() {
        let mut aggregator = ResultAggregator::new(2);
        assert!(aggregator.accept(record("a", 1)));
        assert!(!aggregator.accept(record("a", 2)));
        assert!(!aggregator.accept(record("a", 3)));
        assert!(aggregator.is_full());
        assert_eq!(aggregator.len(), 2);
    }

    #[test]
    fn test_finish_truncates_to_display_cap() {
        let mut aggregator = ResultAggregator::new(10);
        for line in 1..=5 {
            aggregator.accept(record("a", line));
        }

        let results = aggregator.finish(3, false);
        assert_eq!(results.len(), 3);
        assert_eq!(results.total_collected, 5);
        assert!(results.truncated);
        assert!(!results.cancelled);
        assert_eq!(results.records[2].line_number, 3);
    }

    #[test]
    fn test_aggregate_preserves_file_order() {
        let results = aggregate(
            vec![
                vec![record("b", 1), record("b", 4)],
                vec![],
                vec![record("a", 2)],
            ],
            100,
            100,
        );

        let order: Vec<_> = results
            .records
            .iter()
            .map(|r| (r.file_path.clone(), r.line_number))
            .collect();
        assert_eq!(
            order,
            vec![
                (PathBuf::from("b"), 1),
                (PathBuf::from("b"), 4),
                (PathBuf::from("a"), 2)
            ]
        );
        assert_eq!(results.files_scanned, 3);
        assert!(!results.truncated);
    }

    #[test]
    fn test_caps_hold_for_any_input() {
        for (fetch, display) in [(1, 1), (3, 2), (7, 7), (50, 5)] {
            let per_file: Vec<Vec<MatchRecord>> = (0..6)
                .map(|f| (1..=4).map(|l| record(&format!("f{}", f), l)).collect())
                .collect();
            let results = aggregate(per_file, fetch, display);
            assert!(results.len() <= display);
            assert!(results.total_collected <= fetch);
            assert!(results.len() <= results.total_collected);
        }
    }

    #[test]
    fn test_empty_input() {
        let results = aggregate(Vec::<Vec<MatchRecord>>::new(), 10, 5);
        assert!(results.is_empty());
        assert_eq!(results.total_collected, 0);
    }
}
