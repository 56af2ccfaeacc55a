//! # jumpsearch Core
//!
//! Core library for jumpsearch - search text across a workspace and jump to a match.
//!
//! The search flow talks to the outside world only through collaborator traits
//! ([`FileEnumerator`], [`DocumentSource`], [`Prompter`], [`ProgressSink`],
//! [`HistoryStore`], [`Navigator`]). File-system implementations live here;
//! terminal implementations live in the CLI crate; in-memory doubles live in
//! `testing`, behind the `testing` feature.

// Core modules
pub mod cancel;
pub mod config;
pub mod error;
pub mod history;
pub mod orchestrator;
pub mod progress;
pub mod search;
pub mod workspace;

// In-memory collaborators, for this crate's tests and downstream test suites
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used types
pub use cancel::CancellationToken;
pub use config::SearchSettings;
pub use error::{Error, Result};
pub use history::{HistoryStore, JsonHistoryStore, SearchHistory};
pub use orchestrator::{
    AbortReason, Collaborators, Navigator, PickItem, Prompter, SearchOrchestrator, SearchOutcome,
    SearchStage,
};
pub use progress::{NoProgress, ProgressSink, ProgressUpdate};
pub use search::{MatchRecord, SearchPattern, SearchRequest, SearchResults};
pub use workspace::{
    DocumentSource, FileEnumerator, FileFilter, FolderScope, FsDocumentSource, WalkEnumerator,
    Workspace, WorkspaceRoot,
};

/// Current version of the jumpsearch-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing with a specific debug mode.
///
/// `RUST_LOG` wins when set. Output goes to stderr so prompts stay clean.
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
