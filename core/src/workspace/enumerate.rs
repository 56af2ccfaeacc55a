//! Scoped, glob-filtered file enumeration

use super::folders::FolderScope;
use crate::config::{SearchSettings, WILDCARD_FILE_TYPE};
use crate::error::{Error, Result};
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Lists files under a root that match an include glob and miss an exclude glob.
///
/// Implementations give no ordering guarantee.
pub trait FileEnumerator {
    fn find_files(
        &self,
        root: &Path,
        include: &str,
        exclude: &str,
        max_results: Option<usize>,
    ) -> Result<Vec<PathBuf>>;
}

/// A file selected for scanning
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CandidateFile {
    pub path: PathBuf,
}

/// File-type filter chosen by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileFilter {
    /// Every file
    All,
    /// Files whose name ends with the given token, e.g. `.rs`
    Extension(String),
}

impl FileFilter {
    /// Parse a picker token; `.*` (or nothing) means all files
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if token.is_empty() || token == WILDCARD_FILE_TYPE {
            FileFilter::All
        } else {
            FileFilter::Extension(token.to_string())
        }
    }

    /// Inclusion glob handed to the enumerator
    pub fn include_glob(&self) -> String {
        match self {
            FileFilter::All => "**/*".to_string(),
            FileFilter::Extension(ext) => format!("**/*{}", ext),
        }
    }

    /// The token as the user picked it
    pub fn token(&self) -> &str {
        match self {
            FileFilter::All => WILDCARD_FILE_TYPE,
            FileFilter::Extension(ext) => ext,
        }
    }
}

impl fmt::Display for FileFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Exclusion glob covering the given directory names
pub fn exclude_glob<S: AsRef<str>>(dirs: &[S]) -> String {
    match dirs {
        [] => String::new(),
        [single] => format!("**/{}", single.as_ref()),
        many => {
            let names: Vec<&str> = many.iter().map(|d| d.as_ref()).collect();
            format!("**/{{{}}}", names.join(","))
        }
    }
}

/// Enumerate candidate files across all scopes.
///
/// Files reachable from several scopes are returned once. The result is sorted
/// by path so that repeated runs visit files in the same order.
pub fn enumerate(
    scopes: &[FolderScope],
    filter: &FileFilter,
    enumerator: &dyn FileEnumerator,
    settings: &SearchSettings,
) -> Result<Vec<CandidateFile>> {
    let include = filter.include_glob();
    let exclude = exclude_glob(&settings.excluded_dirs);

    let mut merged = BTreeSet::new();
    let mut first_error = None;
    let mut failed_scopes = 0usize;

    for scope in scopes {
        match enumerator.find_files(&scope.root_path, &include, &exclude, None) {
            Ok(files) => {
                tracing::debug!(
                    "Scope {} ({}) yielded {} files",
                    scope.display_name,
                    scope.root_path.display(),
                    files.len()
                );
                merged.extend(files);
            }
            Err(e) => {
                tracing::warn!("Skipping scope {}: {}", scope.display_name, e);
                failed_scopes += 1;
                first_error.get_or_insert(e);
            }
        }
    }

    if failed_scopes > 0 && failed_scopes == scopes.len() {
        if let Some(e) = first_error {
            return Err(e);
        }
    }

    Ok(merged
        .into_iter()
        .map(|path| CandidateFile { path })
        .collect())
}

/// File enumerator backed by the `ignore` crate's directory walker
#[derive(Debug, Clone, Default)]
pub struct WalkEnumerator {
    respect_gitignore: bool,
}

impl WalkEnumerator {
    pub fn new(respect_gitignore: bool) -> Self {
        Self { respect_gitignore }
    }

    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self::new(settings.respect_gitignore)
    }
}

impl FileEnumerator for WalkEnumerator {
    fn find_files(
        &self,
        root: &Path,
        include: &str,
        exclude: &str,
        max_results: Option<usize>,
    ) -> Result<Vec<PathBuf>> {
        let glob_error = |e: ignore::Error| Error::Enumeration {
            root: root.to_path_buf(),
            message: e.to_string(),
        };

        let mut builder = OverrideBuilder::new(root);
        builder.add(include).map_err(glob_error)?;
        if !exclude.is_empty() {
            builder.add(&format!("!{}", exclude)).map_err(glob_error)?;
        }
        let overrides = builder.build().map_err(glob_error)?;

        let walker = WalkBuilder::new(root)
            .hidden(false)
            .follow_links(false)
            .parents(self.respect_gitignore)
            .ignore(self.respect_gitignore)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .overrides(overrides)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            files.push(entry.into_path());

            if max_results.is_some_and(|max| files.len() >= max) {
                break;
            }
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticEnumerator;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_project() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();

        fs::write(root.join("README.md"), "# readme").unwrap();
        fs::write(root.join("src/main.rs"), "fn main() {}").unwrap();
        fs::write(root.join("src/nested/util.rs"), "pub fn util() {}").unwrap();
        fs::write(root.join("src/notes.txt"), "notes").unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "module.exports = {}").unwrap();
        fs::write(root.join(".git/HEAD"), "ref: refs/heads/main").unwrap();

        temp_dir
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        let mut rel: Vec<String> = files
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        rel.sort();
        rel
    }

    #[test]
    fn test_filter_parsing_and_globs() {
        assert_eq!(FileFilter::parse(".*"), FileFilter::All);
        assert_eq!(FileFilter::parse(""), FileFilter::All);
        assert_eq!(FileFilter::parse(".rs"), FileFilter::Extension(".rs".to_string()));
        assert_eq!(FileFilter::All.include_glob(), "**/*");
        assert_eq!(FileFilter::parse(".ts").include_glob(), "**/*.ts");
        assert_eq!(FileFilter::parse(".ts").to_string(), ".ts");
    }

    #[test]
    fn test_exclude_glob_forms() {
        let none: [&str; 0] = [];
        assert_eq!(exclude_glob(&none), "");
        assert_eq!(exclude_glob(&["target"]), "**/target");
        assert_eq!(exclude_glob(&["a", "b"]), "**/{a,b}");
    }

    #[test]
    fn test_walk_enumerator_applies_include_and_exclude() {
        let project = create_test_project();
        let root = project.path();
        let settings = SearchSettings::default();
        let exclude = exclude_glob(&settings.excluded_dirs);

        let all = WalkEnumerator::default()
            .find_files(root, "**/*", &exclude, None)
            .unwrap();
        assert_eq!(
            relative(root, &all),
            vec!["README.md", "src/main.rs", "src/nested/util.rs", "src/notes.txt"]
        );

        let rust = WalkEnumerator::default()
            .find_files(root, "**/*.rs", &exclude, None)
            .unwrap();
        assert_eq!(relative(root, &rust), vec!["src/main.rs", "src/nested/util.rs"]);
    }

    #[test]
    fn test_walk_enumerator_respects_max_results() {
        let project = create_test_project();
        let files = WalkEnumerator::default()
            .find_files(project.path(), "**/*", "", Some(2))
            .unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_enumerate_deduplicates_overlapping_scopes() {
        let project = create_test_project();
        let root = project.path().to_path_buf();
        let scopes = vec![
            FolderScope::new("proj", root.clone()),
            FolderScope::new("proj/src", root.join("src")),
        ];

        let files = enumerate(
            &scopes,
            &FileFilter::parse(".rs"),
            &WalkEnumerator::default(),
            &SearchSettings::default(),
        )
        .unwrap();

        let paths: Vec<PathBuf> = files.into_iter().map(|f| f.path).collect();
        assert_eq!(relative(&root, &paths), vec!["src/main.rs", "src/nested/util.rs"]);
    }

    #[test]
    fn test_enumerate_sorts_unordered_results() {
        let enumerator = StaticEnumerator::new(vec![
            PathBuf::from("/w/c.txt"),
            PathBuf::from("/w/a.txt"),
            PathBuf::from("/w/b.txt"),
        ]);
        let scopes = vec![FolderScope::new("w", "/w")];

        let files = enumerate(&scopes, &FileFilter::All, &enumerator, &SearchSettings::default()).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("/w/a.txt"),
                PathBuf::from("/w/b.txt"),
                PathBuf::from("/w/c.txt")
            ]
        );
    }

    #[test]
    fn test_enumerate_empty_is_not_an_error() {
        let project = create_test_project();
        let scopes = vec![FolderScope::new("proj", project.path())];
        let files = enumerate(
            &scopes,
            &FileFilter::parse(".java"),
            &WalkEnumerator::default(),
            &SearchSettings::default(),
        )
        .unwrap();
        assert!(files.is_empty());
    }
}
