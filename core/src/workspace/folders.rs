//! Folder discovery and selection resolution

use super::enumerate::{exclude_glob, FileEnumerator, FileFilter};
use super::{Workspace, WorkspaceRoot};
use crate::config::SearchSettings;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// A concrete directory to enumerate files under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderScope {
    pub display_name: String,
    pub root_path: PathBuf,
}

impl FolderScope {
    pub fn new<S: Into<String>, P: Into<PathBuf>>(display_name: S, root_path: P) -> Self {
        Self {
            display_name: display_name.into(),
            root_path: root_path.into(),
        }
    }
}

/// Discover the folders under `root` that contain at least one file.
///
/// Folders are inferred from file locations rather than listed, so empty
/// directories never show up. The root itself is always included. The listing
/// stops after `discovery_file_cap` files.
pub fn discover_folders(
    root: &Path,
    enumerator: &dyn FileEnumerator,
    settings: &SearchSettings,
) -> Vec<PathBuf> {
    let mut folders = BTreeSet::new();
    folders.insert(root.to_path_buf());

    let files = match enumerator.find_files(
        root,
        &FileFilter::All.include_glob(),
        &exclude_glob(&settings.excluded_dirs),
        Some(settings.discovery_file_cap),
    ) {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!("Folder discovery failed under {}: {}", root.display(), e);
            return folders.into_iter().collect();
        }
    };

    for file in &files {
        if let Some(parent) = file.parent() {
            if parent.starts_with(root) {
                folders.insert(parent.to_path_buf());
            }
        }
    }

    tracing::debug!(
        "Discovered {} folders from {} files under {}",
        folders.len(),
        files.len(),
        root.display()
    );

    folders.into_iter().collect()
}

/// Labels offered in the folder picker: each root name, then `root/sub/dir`
/// for every discovered subfolder when discovery is enabled.
///
/// Roots sharing a name share their labels, so each label is offered once.
pub fn folder_options(
    workspace: &Workspace,
    enumerator: &dyn FileEnumerator,
    settings: &SearchSettings,
) -> Vec<String> {
    let mut options = Vec::new();
    let push = |options: &mut Vec<String>, label: String| {
        if !options.contains(&label) {
            options.push(label);
        }
    };

    for root in workspace.roots() {
        push(&mut options, root.name.clone());

        if !settings.discover_subfolders {
            continue;
        }

        for folder in discover_folders(&root.path, enumerator, settings) {
            let Ok(rel) = folder.strip_prefix(&root.path) else {
                continue;
            };
            if rel.as_os_str().is_empty() {
                continue;
            }
            let rel = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            push(&mut options, format!("{}/{}", root.name, rel));
        }
    }

    options
}

/// Map picker labels back to concrete scopes.
///
/// An exact root name resolves to every root with that name; `rootName/rest`
/// resolves to `rest` joined under every root with the longest matching name.
/// Labels that match no root are dropped, as are scopes already selected.
pub fn resolve_selection<S: AsRef<str>>(selected: &[S], roots: &[WorkspaceRoot]) -> Vec<FolderScope> {
    let mut scopes: Vec<FolderScope> = Vec::new();

    for label in selected {
        let label = label.as_ref();
        let resolved = resolve_label(label, roots);

        if resolved.is_empty() {
            tracing::debug!("Folder selection {} matches no workspace root", label);
        }

        for scope in resolved {
            if scopes.iter().any(|s| s.root_path == scope.root_path) {
                tracing::debug!("Folder selection {} duplicates an earlier scope", label);
                continue;
            }
            scopes.push(scope);
        }
    }

    scopes
}

fn resolve_label(label: &str, roots: &[WorkspaceRoot]) -> Vec<FolderScope> {
    let exact: Vec<FolderScope> = roots
        .iter()
        .filter(|root| root.name == label)
        .map(|root| FolderScope::new(label, root.path.clone()))
        .collect();
    if !exact.is_empty() {
        return exact;
    }

    let prefixed: Vec<(&WorkspaceRoot, &str)> = roots
        .iter()
        .filter_map(|root| {
            label
                .strip_prefix(root.name.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
                .filter(|rest| !rest.is_empty())
                .map(|rest| (root, rest))
        })
        .collect();
    let Some(longest) = prefixed.iter().map(|(root, _)| root.name.len()).max() else {
        return Vec::new();
    };

    prefixed
        .into_iter()
        .filter(|(root, _)| root.name.len() == longest)
        .map(|(root, rest)| {
            let path = rest
                .split('/')
                .filter(|part| !part.is_empty())
                .fold(root.path.clone(), |acc, part| acc.join(part));
            FolderScope::new(label, path)
        })
        .collect()
}
