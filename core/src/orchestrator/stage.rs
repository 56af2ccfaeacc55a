//! Search flow stages and outcomes

use crate::search::MatchRecord;
use std::fmt;

/// Where a search run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStage {
    AwaitingTerm,
    AwaitingScopeSelection,
    AwaitingTypeFilter,
    Enumerating,
    Scanning,
    AwaitingResultSelection,
    Navigating,
    Done,
    Aborted,
}

impl fmt::Display for SearchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchStage::AwaitingTerm => "awaiting term",
            SearchStage::AwaitingScopeSelection => "awaiting scope selection",
            SearchStage::AwaitingTypeFilter => "awaiting type filter",
            SearchStage::Enumerating => "enumerating",
            SearchStage::Scanning => "scanning",
            SearchStage::AwaitingResultSelection => "awaiting result selection",
            SearchStage::Navigating => "navigating",
            SearchStage::Done => "done",
            SearchStage::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Why a run ended without navigating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    /// The user dismissed a prompt or picked nothing
    Dismissed,
    NoWorkspace,
    NoScopes,
    NoFilesFound { folders: Vec<String>, filter: String },
    NoMatches { term: String },
}

impl AbortReason {
    /// Dismissals are silent; everything else deserves a message
    pub fn is_silent(&self) -> bool {
        matches!(self, AbortReason::Dismissed)
    }

    /// Whether the message is a warning rather than plain information
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            AbortReason::NoWorkspace | AbortReason::NoScopes | AbortReason::NoFilesFound { .. }
        )
    }
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::Dismissed => write!(f, "Search dismissed"),
            AbortReason::NoWorkspace => write!(f, "No workspace is open!"),
            AbortReason::NoScopes => write!(f, "None of the selected folders can be searched"),
            AbortReason::NoFilesFound { folders, filter } => write!(
                f,
                "No files found in selected folders \"{}\" with extension \"{}\"",
                folders.join(", "),
                filter
            ),
            AbortReason::NoMatches { term } => write!(f, "No matches found for \"{}\"", term),
        }
    }
}

/// How a search run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The chosen match was opened
    Navigated(MatchRecord),
    /// The run stopped early at `stage`
    Aborted { stage: SearchStage, reason: AbortReason },
}

impl SearchOutcome {
    /// The stage the run ended in
    pub fn stage(&self) -> SearchStage {
        match self {
            SearchOutcome::Navigated(_) => SearchStage::Done,
            SearchOutcome::Aborted { stage, .. } => *stage,
        }
    }

    pub fn abort_reason(&self) -> Option<&AbortReason> {
        match self {
            SearchOutcome::Aborted { reason, .. } => Some(reason),
            SearchOutcome::Navigated(_) => None,
        }
    }
}
