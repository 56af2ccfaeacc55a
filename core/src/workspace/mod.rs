//! Workspace model and file-system collaborators
//!
//! - Workspace / WorkspaceRoot: the open root folders
//! - folders: folder discovery and selection resolution
//! - enumerate: glob-filtered file listing per scope
//! - document: line access to file contents

pub mod document;
pub mod enumerate;
pub mod folders;

use std::path::{Path, PathBuf};

pub use document::{DocumentSource, FsDocumentSource};
pub use enumerate::{enumerate, exclude_glob, CandidateFile, FileEnumerator, FileFilter, WalkEnumerator};
pub use folders::{discover_folders, folder_options, resolve_selection, FolderScope};

/// A named root folder of the workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRoot {
    /// Display name, normally the folder's own name
    pub name: String,
    /// Absolute path of the folder
    pub path: PathBuf,
}

impl WorkspaceRoot {
    /// Create a root with an explicit name
    pub fn new<S: Into<String>, P: Into<PathBuf>>(name: S, path: P) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Create a root named after the last component of its path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }
}

/// The set of open workspace roots
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    roots: Vec<WorkspaceRoot>,
}

impl Workspace {
    /// Create a workspace from its roots
    pub fn new(roots: Vec<WorkspaceRoot>) -> Self {
        Self { roots }
    }

    /// Create a workspace from folder paths; folders that do not exist are dropped
    pub fn from_folders<I, P>(folders: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let roots = folders
            .into_iter()
            .filter(|p| {
                let exists = p.as_ref().is_dir();
                if !exists {
                    tracing::warn!("Ignoring workspace folder {}: not a directory", p.as_ref().display());
                }
                exists
            })
            .map(WorkspaceRoot::from_path)
            .collect();
        Self { roots }
    }

    pub fn roots(&self) -> &[WorkspaceRoot] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// The first root, used as the base for relative paths when nothing better fits
    pub fn primary_root(&self) -> Option<&WorkspaceRoot> {
        self.roots.first()
    }

    /// Path shown to the user: relative to the first root containing it, else absolute
    pub fn display_path(&self, path: &Path) -> String {
        self.roots
            .iter()
            .find_map(|root| path.strip_prefix(&root.path).ok())
            .filter(|rel| !rel.as_os_str().is_empty())
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_path_relative_to_containing_root() {
        let workspace = Workspace::new(vec![
            WorkspaceRoot::new("app", "/work/app"),
            WorkspaceRoot::new("lib", "/work/lib"),
        ]);

        assert_eq!(
            workspace.display_path(Path::new("/work/app/src/main.rs")),
            Path::new("src/main.rs").display().to_string()
        );
        assert_eq!(workspace.display_path(Path::new("/work/lib/a.txt")), "a.txt");
    }

    #[test]
    fn test_display_path_falls_back_to_absolute() {
        let workspace = Workspace::new(vec![WorkspaceRoot::new("app", "/work/app")]);
        assert_eq!(
            workspace.display_path(Path::new("/elsewhere/x.md")),
            Path::new("/elsewhere/x.md").display().to_string()
        );

        let empty = Workspace::default();
        assert!(empty.primary_root().is_none());
        assert_eq!(
            empty.display_path(Path::new("/elsewhere/x.md")),
            Path::new("/elsewhere/x.md").display().to_string()
        );
    }

    #[test]
    fn test_from_folders_drops_missing_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let workspace = Workspace::from_folders([dir.path().to_path_buf(), dir.path().join("missing")]);

        assert_eq!(workspace.roots().len(), 1);
        let expected_name = dir
            .path()
            .canonicalize()
            .unwrap()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        assert_eq!(workspace.roots()[0].name, expected_name);
    }
}
