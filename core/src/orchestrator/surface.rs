//! Interactive surfaces the orchestrator talks to

use crate::error::Result;
use crate::search::MatchRecord;

/// One entry of a single-choice picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItem {
    pub label: String,
    pub description: Option<String>,
    pub detail: Option<String>,
}

impl PickItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
            detail: None,
        }
    }

    /// Picker entry for a match: label, `Line N`, emphasised preview
    pub fn from_record(record: &MatchRecord) -> Self {
        Self {
            label: record.label.clone(),
            description: Some(record.description()),
            detail: Some(record.preview_text.trim().to_string()),
        }
    }
}

/// Prompts and pickers.
///
/// `Ok(None)` means the user dismissed the prompt. `Err` is reserved for a
/// broken surface (no terminal, I/O failure).
pub trait Prompter {
    fn input_text(&self, prompt: &str) -> Result<Option<String>>;

    /// Multi-select; returns the chosen indices
    fn pick_many(&self, title: &str, options: &[String]) -> Result<Option<Vec<usize>>>;

    /// Single-select; returns the chosen index
    fn pick_one(&self, title: &str, items: &[PickItem]) -> Result<Option<usize>>;
}

/// Opens a match in an editor and selects its range
pub trait Navigator {
    fn open(&self, record: &MatchRecord) -> Result<()>;
}
