//! Compiled search pattern

use crate::error::{Error, Result};
use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// Wraps every matched span in the preview
pub const EMPHASIS_MARKER: &str = "**";

/// A search term compiled to a regular expression.
///
/// The same compiled regex serves both match iteration and preview rendering.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    source: String,
    case_sensitive: bool,
    regex: Regex,
}

impl SearchPattern {
    /// Compile a raw pattern; empty or malformed patterns are rejected
    pub fn compile(source: &str, case_sensitive: bool) -> Result<Self> {
        if source.is_empty() {
            return Err(Error::InvalidPattern {
                pattern: source.to_string(),
                message: "pattern is empty".to_string(),
            });
        }

        let regex = RegexBuilder::new(source)
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|e| Error::InvalidPattern {
                pattern: source.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            source: source.to_string(),
            case_sensitive,
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Non-overlapping, non-empty match spans in `line` (byte offsets)
    pub fn spans<'a>(&'a self, line: &'a str) -> impl Iterator<Item = Range<usize>> + 'a {
        self.regex
            .find_iter(line)
            .filter(|m| !m.is_empty())
            .map(|m| m.range())
    }

    /// The line with every match wrapped in emphasis markers
    pub fn preview(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len() + 8);
        let mut last = 0;
        for span in self.spans(line) {
            out.push_str(&line[last..span.start]);
            out.push_str(EMPHASIS_MARKER);
            out.push_str(&line[span.clone()]);
            out.push_str(EMPHASIS_MARKER);
            last = span.end;
        }
        out.push_str(&line[last..]);
        out
    }
}
