//! Search-and-jump flow
//!
//! Drives one run from term entry to navigation:
//!
//! term → folders → file type → history → enumerate → scan → pick → open

mod stage;
mod surface;

pub use stage::{AbortReason, SearchOutcome, SearchStage};
pub use surface::{Navigator, PickItem, Prompter};

use crate::cancel::CancellationToken;
use crate::config::SearchSettings;
use crate::error::Result;
use crate::history::{self, HistoryStore};
use crate::progress::{ProgressSink, ProgressUpdate};
use crate::search::{LineScanner, ResultAggregator, SearchPattern, SearchRequest, SearchResults};
use crate::workspace::{
    enumerate, folder_options, resolve_selection, CandidateFile, DocumentSource, FileEnumerator,
    FileFilter, Workspace,
};

const TERM_PROMPT: &str = "Enter the text or pattern to search...";
const FOLDER_PROMPT: &str = "Select folders to search in (e.g., src/)";
const TYPE_PROMPT: &str = "Select file type to search in (e.g., .java)";

/// External collaborators used by one search run
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub enumerator: &'a dyn FileEnumerator,
    pub documents: &'a dyn DocumentSource,
    pub prompter: &'a dyn Prompter,
    pub progress: &'a dyn ProgressSink,
    pub history: &'a dyn HistoryStore,
    pub navigator: &'a dyn Navigator,
}

/// Runs the interactive search flow over a workspace
pub struct SearchOrchestrator<'a> {
    workspace: &'a Workspace,
    settings: &'a SearchSettings,
    io: Collaborators<'a>,
    cancel: CancellationToken,
    stage: SearchStage,
}

impl<'a> SearchOrchestrator<'a> {
    pub fn new(workspace: &'a Workspace, settings: &'a SearchSettings, io: Collaborators<'a>) -> Self {
        Self {
            workspace,
            settings,
            io,
            cancel: CancellationToken::new(),
            stage: SearchStage::AwaitingTerm,
        }
    }

    /// Use a token shared with an outside cancel trigger
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn stage(&self) -> SearchStage {
        self.stage
    }

    fn transition(&mut self, next: SearchStage) {
        tracing::debug!("Search stage: {} -> {}", self.stage, next);
        self.stage = next;
    }

    fn abort(&mut self, reason: AbortReason) -> Result<SearchOutcome> {
        let stage = self.stage;
        tracing::debug!("Search aborted at {}: {}", stage, reason);
        self.transition(SearchStage::Aborted);
        Ok(SearchOutcome::Aborted { stage, reason })
    }

    /// Run one search. `seed` skips the term prompt.
    ///
    /// An invalid pattern is returned as an error before any other prompt,
    /// history write, or file access.
    pub fn run(&mut self, seed: Option<String>) -> Result<SearchOutcome> {
        self.stage = SearchStage::AwaitingTerm;

        let term = match seed {
            Some(term) => Some(term),
            None => self.io.prompter.input_text(TERM_PROMPT)?,
        };
        let term = match term {
            Some(term) if !term.is_empty() => term,
            _ => return self.abort(AbortReason::Dismissed),
        };
        let pattern = SearchPattern::compile(&term, false)?;

        if self.workspace.is_empty() {
            return self.abort(AbortReason::NoWorkspace);
        }

        self.transition(SearchStage::AwaitingScopeSelection);
        let options = folder_options(self.workspace, self.io.enumerator, self.settings);
        let selected: Vec<String> = match self.io.prompter.pick_many(FOLDER_PROMPT, &options)? {
            Some(indices) => indices
                .into_iter()
                .filter_map(|i| options.get(i).cloned())
                .collect(),
            None => Vec::new(),
        };
        if selected.is_empty() {
            return self.abort(AbortReason::Dismissed);
        }
        let scopes = resolve_selection(&selected, self.workspace.roots());
        if scopes.is_empty() {
            return self.abort(AbortReason::NoScopes);
        }

        self.transition(SearchStage::AwaitingTypeFilter);
        let type_items: Vec<PickItem> = self.settings.file_types.iter().map(PickItem::new).collect();
        let filter = match self.io.prompter.pick_one(TYPE_PROMPT, &type_items)? {
            Some(index) => match self.settings.file_types.get(index) {
                Some(token) => FileFilter::parse(token),
                None => return self.abort(AbortReason::Dismissed),
            },
            None => return self.abort(AbortReason::Dismissed),
        };

        if let Err(e) = history::record(self.io.history, &term, self.settings.history_limit) {
            tracing::warn!("Failed to save search history: {}", e);
        }

        let request = SearchRequest::new(pattern, scopes, filter);

        self.transition(SearchStage::Enumerating);
        let files = enumerate(&request.scopes, &request.filter, self.io.enumerator, self.settings)?;
        if files.is_empty() {
            return self.abort(AbortReason::NoFilesFound {
                folders: selected,
                filter: request.filter.to_string(),
            });
        }

        self.transition(SearchStage::Scanning);
        let results = self.scan(&request.pattern, &files);
        tracing::info!(
            "Found {} matches for '{}' in {} files ({} skipped{})",
            results.total_collected,
            term,
            results.files_scanned,
            results.files_skipped,
            if results.cancelled { ", cancelled" } else { "" }
        );
        if results.is_empty() {
            return self.abort(AbortReason::NoMatches { term });
        }

        self.transition(SearchStage::AwaitingResultSelection);
        let items: Vec<PickItem> = results.records.iter().map(PickItem::from_record).collect();
        let title = results_title(&term, &results);
        let record = match self.io.prompter.pick_one(&title, &items)? {
            Some(index) => match results.records.get(index) {
                Some(record) => record.clone(),
                None => return self.abort(AbortReason::Dismissed),
            },
            None => return self.abort(AbortReason::Dismissed),
        };

        self.transition(SearchStage::Navigating);
        self.io.navigator.open(&record)?;

        self.transition(SearchStage::Done);
        Ok(SearchOutcome::Navigated(record))
    }

    /// Scan `files` in order, reporting progress before each one.
    ///
    /// Stops early when the fetch cap is reached or the token is cancelled;
    /// whatever was collected is returned.
    pub fn scan(&self, pattern: &SearchPattern, files: &[CandidateFile]) -> SearchResults {
        let scanner = LineScanner::new(pattern, self.workspace, &self.cancel);
        let mut aggregator = ResultAggregator::new(self.settings.fetch_cap);
        let total = files.len();

        self.io.progress.begin("Searching...", total);

        for (index, file) in files.iter().enumerate() {
            self.io.progress.report(ProgressUpdate::for_file(
                index,
                total,
                format!("Searching in {}", self.workspace.display_path(&file.path)),
            ));

            if self.cancel.is_cancelled() {
                tracing::debug!("Scan cancelled after {} of {} files", index, total);
                break;
            }

            let scan = scanner.scan_file(&file.path, self.io.documents, &mut aggregator);
            if scan.is_stopped() || aggregator.is_full() {
                break;
            }
        }

        self.io.progress.finish();
        aggregator.finish(self.settings.display_cap, self.cancel.is_cancelled())
    }
}

fn results_title(term: &str, results: &SearchResults) -> String {
    let mut title = format!("Found {} matches for \"{}\"", results.total_collected, term);
    if results.truncated {
        title.push_str(&format!(" (showing first {})", results.len()));
    }
    if results.cancelled {
        title.push_str(" (search cancelled)");
    }
    title
}
