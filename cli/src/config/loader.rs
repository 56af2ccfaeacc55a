//! CLI configuration loader for jumpsearch
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./jumpsearch.json or ./.jumpsearch/config.json
//! 3. Git repository root: <repo_root>/.jumpsearch/config.json
//! 4. XDG config: $XDG_CONFIG_HOME/jumpsearch/config.json or ~/.config/jumpsearch/config.json
//! 5. Built-in defaults (no files)
//!
//! Environment overrides are applied on top of the file, then flag overrides.

use anyhow::{anyhow, Context, Result};
use jumpsearch_core::history::JsonHistoryStore;
use jumpsearch_core::SearchSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "jumpsearch";
const CONFIG_FILE: &str = "config.json";
const CWD_CONFIG_FILE: &str = "jumpsearch.json";

/// Raw configuration file format; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    pub fetch_cap: Option<usize>,
    pub display_cap: Option<usize>,
    pub history_limit: Option<usize>,
    pub discovery_file_cap: Option<usize>,
    pub discover_subfolders: Option<bool>,
    pub respect_gitignore: Option<bool>,
    pub max_file_bytes: Option<u64>,
    pub file_types: Option<Vec<String>>,
    pub excluded_dirs: Option<Vec<String>>,
    /// Editor command (e.g. "code", "nvim")
    pub editor: Option<String>,
    /// Argument template for editors without built-in support
    pub editor_args: Option<String>,
    /// Workspace roots; `~` is expanded
    pub folders: Option<Vec<String>>,
    pub history_file: Option<String>,
}

/// Fully resolved CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub settings: SearchSettings,
    pub folders: Vec<PathBuf>,
    pub history_file: PathBuf,
    pub editor_args: Option<String>,
    /// File the configuration came from, if any
    pub source: Option<PathBuf>,
}

/// CLI configuration loader
pub struct ConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    folders_override: Vec<PathBuf>,
    history_file_override: Option<PathBuf>,
    editor_override: Option<String>,
    fetch_cap_override: Option<usize>,
    display_cap_override: Option<usize>,
    no_discover: bool,
}

impl ConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            config_override: None,
            folders_override: Vec::new(),
            history_file_override: None,
            editor_override: None,
            fetch_cap_override: None,
            display_cap_override: None,
            no_discover: false,
        }
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Set workspace folders override
    pub fn with_folders_override(mut self, folders: Vec<PathBuf>) -> Self {
        self.folders_override = folders;
        self
    }

    /// Set history file override
    pub fn with_history_file_override(mut self, path: PathBuf) -> Self {
        self.history_file_override = Some(path);
        self
    }

    /// Set editor override
    pub fn with_editor_override(mut self, editor: String) -> Self {
        self.editor_override = Some(editor);
        self
    }

    /// Set result cap overrides
    pub fn with_caps_override(mut self, fetch_cap: Option<usize>, display_cap: Option<usize>) -> Self {
        self.fetch_cap_override = fetch_cap;
        self.display_cap_override = display_cap;
        self
    }

    /// Offer only workspace roots in the folder picker
    pub fn with_no_discover(mut self, no_discover: bool) -> Self {
        self.no_discover = no_discover;
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<CliConfig> {
        // Step 1: Find and load base configuration
        let source = self.locate()?;
        let raw = match &source {
            Some(path) => self
                .load_file(path)
                .await
                .with_context(|| format!("Failed to load config from: {}", path.display()))?,
            None => RawConfig::default(),
        };

        // Step 2: Resolve against defaults, then apply environment and flag overrides
        let mut config = self.resolve(raw, source)?;
        self.apply_env_overrides(&mut config);
        self.apply_flag_overrides(&mut config);

        // Step 3: Validate
        config
            .settings
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        Ok(config)
    }

    /// Path of the configuration file that `load` would use
    pub fn locate(&self) -> Result<Option<PathBuf>> {
        if let Some(override_path) = &self.config_override {
            return self
                .resolve_override(override_path)
                .map(Some)
                .with_context(|| {
                    format!(
                        "Failed to load config from override path: {}",
                        override_path.display()
                    )
                });
        }

        // Search in priority order
        if let Some(path) = self.try_cwd()? {
            return Ok(Some(path));
        }
        if let Some(path) = self.try_git_root()? {
            return Ok(Some(path));
        }
        Ok(self.try_xdg())
    }

    /// Resolve an explicit config path (file or directory)
    fn resolve_override(&self, path: &Path) -> Result<PathBuf> {
        if path.is_file() {
            Ok(path.to_path_buf())
        } else if path.is_dir() {
            let config_file = path.join(CONFIG_FILE);
            if config_file.exists() {
                Ok(config_file)
            } else {
                Err(anyhow!(
                    "No {} found in directory: {}",
                    CONFIG_FILE,
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Try the current working directory
    fn try_cwd(&self) -> Result<Option<PathBuf>> {
        let cwd = std::env::current_dir()?;

        let cwd_json = cwd.join(CWD_CONFIG_FILE);
        if cwd_json.exists() {
            return Ok(Some(cwd_json));
        }

        let cwd_dir_config = cwd.join(format!(".{}", APP_DIR)).join(CONFIG_FILE);
        if cwd_dir_config.exists() {
            return Ok(Some(cwd_dir_config));
        }

        Ok(None)
    }

    /// Try the git repository root
    fn try_git_root(&self) -> Result<Option<PathBuf>> {
        if let Some(git_root) = self.find_git_root()? {
            let config_path = git_root.join(format!(".{}", APP_DIR)).join(CONFIG_FILE);
            if config_path.exists() {
                return Ok(Some(config_path));
            }
        }
        Ok(None)
    }

    /// Try the XDG config directory
    fn try_xdg(&self) -> Option<PathBuf> {
        let config_path = self.get_xdg_config_dir()?.join(APP_DIR).join(CONFIG_FILE);
        config_path.exists().then_some(config_path)
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<RawConfig> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Find git repository root
    fn find_git_root(&self) -> Result<Option<PathBuf>> {
        let mut current = std::env::current_dir()?;

        loop {
            if current.join(".git").exists() {
                return Ok(Some(current));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }

    /// Get XDG config directory
    fn get_xdg_config_dir(&self) -> Option<PathBuf> {
        match std::env::var("XDG_CONFIG_HOME") {
            Ok(xdg_config) if !xdg_config.is_empty() => Some(PathBuf::from(xdg_config)),
            _ => dirs::home_dir().map(|home| home.join(".config")),
        }
    }

    /// Merge the raw file over the built-in defaults
    fn resolve(&self, raw: RawConfig, source: Option<PathBuf>) -> Result<CliConfig> {
        let defaults = SearchSettings::default();
        let settings = SearchSettings {
            fetch_cap: raw.fetch_cap.unwrap_or(defaults.fetch_cap),
            display_cap: raw.display_cap.unwrap_or(defaults.display_cap),
            history_limit: raw.history_limit.unwrap_or(defaults.history_limit),
            discovery_file_cap: raw.discovery_file_cap.unwrap_or(defaults.discovery_file_cap),
            discover_subfolders: raw.discover_subfolders.unwrap_or(defaults.discover_subfolders),
            respect_gitignore: raw.respect_gitignore.unwrap_or(defaults.respect_gitignore),
            max_file_bytes: raw.max_file_bytes.unwrap_or(defaults.max_file_bytes),
            file_types: raw.file_types.unwrap_or(defaults.file_types),
            excluded_dirs: raw.excluded_dirs.unwrap_or(defaults.excluded_dirs),
            editor: raw.editor,
        };

        let folders = match raw.folders {
            Some(folders) => folders.iter().map(|f| expand_path(f)).collect(),
            None => vec![std::env::current_dir().context("Failed to read current directory")?],
        };

        let history_file = raw
            .history_file
            .map(|p| expand_path(&p))
            .unwrap_or_else(JsonHistoryStore::default_path);

        Ok(CliConfig {
            settings,
            folders,
            history_file,
            editor_args: raw.editor_args,
            source,
        })
    }

    /// `JUMPSEARCH_EDITOR` replaces the configured editor; `VISUAL` and
    /// `EDITOR` only fill a missing one
    fn apply_env_overrides(&self, config: &mut CliConfig) {
        if let Ok(editor) = std::env::var("JUMPSEARCH_EDITOR") {
            if !editor.trim().is_empty() {
                config.settings.editor = Some(editor);
                return;
            }
        }

        if config.settings.editor.is_none() {
            config.settings.editor = ["VISUAL", "EDITOR"]
                .iter()
                .filter_map(|var| std::env::var(var).ok())
                .find(|value| !value.trim().is_empty());
        }
    }

    fn apply_flag_overrides(&self, config: &mut CliConfig) {
        if !self.folders_override.is_empty() {
            config.folders = self.folders_override.clone();
        }
        if let Some(path) = &self.history_file_override {
            config.history_file = path.clone();
        }
        if let Some(editor) = &self.editor_override {
            config.settings.editor = Some(editor.clone());
        }
        if let Some(fetch_cap) = self.fetch_cap_override {
            config.settings.fetch_cap = fetch_cap;
        }
        if let Some(display_cap) = self.display_cap_override {
            config.settings.display_cap = display_cap;
        }
        if self.no_discover {
            config.settings.discover_subfolders = false;
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_override_file_is_merged_over_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(
            &path,
            r#"{ "fetch_cap": 100, "display_cap": 10, "file_types": [".*", ".rs"], "folders": ["/tmp"] }"#,
        )
        .unwrap();

        let config = ConfigLoader::new()
            .with_config_override(path.clone())
            .load()
            .await
            .unwrap();

        assert_eq!(config.settings.fetch_cap, 100);
        assert_eq!(config.settings.display_cap, 10);
        assert_eq!(config.settings.file_types, vec![".*", ".rs"]);
        assert_eq!(config.settings.history_limit, 20);
        assert_eq!(config.folders, vec![PathBuf::from("/tmp")]);
        assert_eq!(config.source, Some(path));
    }

    #[tokio::test]
    async fn test_override_directory_uses_config_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.json"), r#"{ "history_limit": 5 }"#).unwrap();

        let config = ConfigLoader::new()
            .with_config_override(dir.path().to_path_buf())
            .load()
            .await
            .unwrap();
        assert_eq!(config.settings.history_limit, 5);
    }

    #[tokio::test]
    async fn test_history_limit_above_twenty_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.json"), r#"{ "history_limit": 21 }"#).unwrap();

        let err = ConfigLoader::new()
            .with_config_override(dir.path().to_path_buf())
            .load()
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("history_limit"));
    }

    #[tokio::test]
    async fn test_missing_override_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = ConfigLoader::new()
            .with_config_override(dir.path().join("nope.json"))
            .load()
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_flags_win_over_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "fetch_cap": 100, "display_cap": 10, "editor": "vim" }"#).unwrap();

        let config = ConfigLoader::new()
            .with_config_override(path)
            .with_caps_override(Some(50), Some(5))
            .with_editor_override("code".to_string())
            .with_history_file_override(dir.path().join("h.json"))
            .with_folders_override(vec![dir.path().to_path_buf()])
            .with_no_discover(true)
            .load()
            .await
            .unwrap();

        assert_eq!(config.settings.fetch_cap, 50);
        assert_eq!(config.settings.display_cap, 5);
        assert_eq!(config.settings.editor.as_deref(), Some("code"));
        assert_eq!(config.history_file, dir.path().join("h.json"));
        assert_eq!(config.folders, vec![dir.path().to_path_buf()]);
        assert!(!config.settings.discover_subfolders);
    }

    #[tokio::test]
    async fn test_invalid_caps_fail_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "fetch_cap": 10, "display_cap": 20 }"#).unwrap();

        let err = ConfigLoader::new()
            .with_config_override(path)
            .load()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("validation"));
    }

    #[tokio::test]
    async fn test_unknown_fields_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "fetch_limit": 10 }"#).unwrap();

        assert!(ConfigLoader::new()
            .with_config_override(path)
            .load()
            .await
            .is_err());
    }

    #[test]
    fn test_expand_path_handles_tilde() {
        let expanded = expand_path("~/projects");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("projects"));
        }
        assert_eq!(expand_path("/abs"), PathBuf::from("/abs"));
    }
}
