//! Search pipeline building blocks
//!
//! - SearchPattern: the compiled search term (compiled once per submission)
//! - LineScanner: per-file match extraction with cap and cancellation checks
//! - ResultAggregator: fetch-cap accumulation and display-cap truncation

mod aggregate;
mod pattern;
mod scanner;
mod types;

pub use aggregate::{aggregate, ResultAggregator};
pub use pattern::{SearchPattern, EMPHASIS_MARKER};
pub use scanner::{FileScan, LineScanner};
pub use types::{MatchRecord, SearchRequest, SearchResults};
