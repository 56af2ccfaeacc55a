//! Per-file match extraction

use super::aggregate::ResultAggregator;
use super::pattern::SearchPattern;
use super::types::MatchRecord;
use crate::cancel::CancellationToken;
use crate::workspace::{DocumentSource, Workspace};
use std::path::Path;

/// How scanning a single file ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileScan {
    /// Every line was visited
    Completed { matches: usize },
    /// The fetch cap was reached or the search was cancelled mid-file
    Stopped { matches: usize },
    /// The file could not be read or decoded
    Skipped,
}

impl FileScan {
    pub fn matches(&self) -> usize {
        match self {
            FileScan::Completed { matches } | FileScan::Stopped { matches } => *matches,
            FileScan::Skipped => 0,
        }
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, FileScan::Stopped { .. })
    }
}

/// Turns a file's lines into match records
pub struct LineScanner<'a> {
    pattern: &'a SearchPattern,
    workspace: &'a Workspace,
    cancel: &'a CancellationToken,
}

impl<'a> LineScanner<'a> {
    pub fn new(
        pattern: &'a SearchPattern,
        workspace: &'a Workspace,
        cancel: &'a CancellationToken,
    ) -> Self {
        Self {
            pattern,
            workspace,
            cancel,
        }
    }

    fn should_stop(&self, aggregator: &ResultAggregator) -> bool {
        aggregator.is_full() || self.cancel.is_cancelled()
    }

    /// Scan one file, feeding every match into `aggregator`.
    ///
    /// Stops as soon as the aggregator is full or the token is cancelled;
    /// records collected so far are kept.
    pub fn scan_file(
        &self,
        path: &Path,
        documents: &dyn DocumentSource,
        aggregator: &mut ResultAggregator,
    ) -> FileScan {
        let lines = match documents.read_lines(path) {
            Ok(lines) => lines,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", path.display(), e);
                aggregator.mark_skipped();
                return FileScan::Skipped;
            }
        };
        aggregator.mark_scanned();

        let display_path = self.workspace.display_path(path);
        let mut matches = 0;

        for (index, line) in lines.iter().enumerate() {
            let line_number = index + 1;
            let mut preview: Option<String> = None;

            for span in self.pattern.spans(line) {
                let column_start = line[..span.start].chars().count();
                let column_end = column_start + line[span.clone()].chars().count();
                let preview_text = preview
                    .get_or_insert_with(|| self.pattern.preview(line))
                    .clone();

                let record = MatchRecord {
                    file_path: path.to_path_buf(),
                    line_number,
                    column_start,
                    column_end,
                    raw_line_text: line.clone(),
                    preview_text,
                    label: format!("{} -> {}:{}", &line[span], display_path, line_number),
                };
                aggregator.accept(record);
                matches += 1;

                if self.should_stop(aggregator) {
                    return FileScan::Stopped { matches };
                }
            }

            if self.should_stop(aggregator) {
                return FileScan::Stopped { matches };
            }
        }

        FileScan::Completed { matches }
    }
}
