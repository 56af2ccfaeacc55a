//! Terminal implementations of the search surfaces
//!
//! - DialoguerPrompter: term input and pickers
//! - TerminalProgress: scan progress bar on stderr
//! - EditorNavigator: opens matches in the configured editor
//! - interrupt: Ctrl-C wiring for cancellation

mod interrupt;
mod navigator;
mod progress;
mod prompter;

pub use interrupt::install_interrupt_handler;
pub use navigator::EditorNavigator;
pub use progress::TerminalProgress;
pub use prompter::{render_preview, DialoguerPrompter};
