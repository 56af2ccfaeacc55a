//! Search request and result types

use super::pattern::SearchPattern;
use crate::workspace::{FileFilter, FolderScope};
use std::path::PathBuf;

/// Everything needed to run one scan. Only constructible from a pattern that
/// already compiled.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub pattern: SearchPattern,
    pub scopes: Vec<FolderScope>,
    pub filter: FileFilter,
}

impl SearchRequest {
    pub fn new(pattern: SearchPattern, scopes: Vec<FolderScope>, filter: FileFilter) -> Self {
        Self {
            pattern,
            scopes,
            filter,
        }
    }
}

/// One located occurrence of the pattern within one line of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub file_path: PathBuf,
    /// 1-based line number
    pub line_number: usize,
    /// 0-based character column where the match starts
    pub column_start: usize,
    /// 0-based character column one past the match end
    pub column_end: usize,
    pub raw_line_text: String,
    pub preview_text: String,
    /// `<matched text> -> <relative path>:<line>`
    pub label: String,
}

impl MatchRecord {
    /// Short position description shown next to the label
    pub fn description(&self) -> String {
        format!("Line {}", self.line_number)
    }

    /// The matched line without surrounding whitespace
    pub fn detail(&self) -> &str {
        self.raw_line_text.trim()
    }

    /// The text the pattern matched
    pub fn matched_text(&self) -> String {
        self.raw_line_text
            .chars()
            .skip(self.column_start)
            .take(self.column_end - self.column_start)
            .collect()
    }
}

/// Final, display-capped outcome of a scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    /// Records to present, at most the display cap
    pub records: Vec<MatchRecord>,
    /// Records collected before display truncation, at most the fetch cap
    pub total_collected: usize,
    /// Whether display truncation dropped records
    pub truncated: bool,
    /// Whether the scan was cancelled before visiting every file
    pub cancelled: bool,
    pub files_scanned: usize,
    pub files_skipped: usize,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
