//! CLI command implementations

pub mod history;
pub mod info;
pub mod search;

pub use history::history_command;
pub use info::info_command;
pub use search::search_command;
