//! Search configuration types
//!
//! Core only accepts fully resolved, validated settings.
//! All discovery, loading, and merging happens in CLI layer.

use crate::error::ConfigError;
use crate::history::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};

/// File-type token meaning "all files"
pub const WILDCARD_FILE_TYPE: &str = ".*";

/// File-type choices offered when no list is configured
pub const DEFAULT_FILE_TYPES: &[&str] = &[
    WILDCARD_FILE_TYPE,
    ".ts",
    ".js",
    ".java",
    ".py",
    ".cpp",
    ".c",
    ".rs",
    ".json",
    ".txt",
    ".md",
];

/// Directories never enumerated: dependency caches, VCS metadata, build output, editor metadata
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".svn",
    ".hg",
    "dist",
    "out",
    "build",
    "target",
    ".vscode",
    ".idea",
    "__pycache__",
    ".venv",
];

/// Fully resolved settings for one search session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Stop scanning once this many matches have been collected
    pub fetch_cap: usize,
    /// Show at most this many matches in the result picker
    pub display_cap: usize,
    /// Maximum number of remembered search terms, at most 20
    pub history_limit: usize,
    /// Maximum number of files listed when discovering subfolders of a root
    pub discovery_file_cap: usize,
    /// Offer discovered subfolders next to the workspace roots
    pub discover_subfolders: bool,
    /// Honour .gitignore files while enumerating
    pub respect_gitignore: bool,
    /// Files larger than this are skipped by the scanner
    pub max_file_bytes: u64,
    /// File-type tokens offered in the type picker
    pub file_types: Vec<String>,
    /// Directory names excluded from enumeration
    pub excluded_dirs: Vec<String>,
    /// Editor command used for navigation
    pub editor: Option<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            fetch_cap: 2000,
            display_cap: 500,
            history_limit: DEFAULT_HISTORY_LIMIT,
            discovery_file_cap: 5000,
            discover_subfolders: true,
            respect_gitignore: false,
            max_file_bytes: 20 * 1024 * 1024,
            file_types: DEFAULT_FILE_TYPES.iter().map(|s| s.to_string()).collect(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            editor: None,
        }
    }
}

impl SearchSettings {
    /// Set both result caps
    pub fn with_caps(mut self, fetch_cap: usize, display_cap: usize) -> Self {
        self.fetch_cap = fetch_cap;
        self.display_cap = display_cap;
        self
    }

    /// Set the editor command
    pub fn with_editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = Some(editor.into());
        self
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch_cap == 0 {
            return Err(invalid("fetch_cap", self.fetch_cap));
        }

        if self.display_cap == 0 || self.display_cap > self.fetch_cap {
            return Err(ConfigError::InvalidValue {
                field: "display_cap".to_string(),
                value: format!(
                    "{} (must be between 1 and fetch_cap = {})",
                    self.display_cap, self.fetch_cap
                ),
            });
        }

        if self.history_limit == 0 || self.history_limit > DEFAULT_HISTORY_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "history_limit".to_string(),
                value: format!(
                    "{} (must be between 1 and {})",
                    self.history_limit, DEFAULT_HISTORY_LIMIT
                ),
            });
        }

        if self.discovery_file_cap == 0 {
            return Err(invalid("discovery_file_cap", self.discovery_file_cap));
        }

        if self.file_types.is_empty() || self.file_types.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "file_types".to_string(),
                value: format!("{:?}", self.file_types),
            });
        }

        if let Some(editor) = &self.editor {
            if editor.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "editor".to_string(),
                    value: "empty command".to_string(),
                });
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, value: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}
