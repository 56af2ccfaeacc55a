//! In-memory collaborators for tests and dry runs

use crate::cancel::CancellationToken;
use crate::error::{Error, Result};
use crate::orchestrator::{Navigator, PickItem, Prompter};
use crate::progress::{ProgressSink, ProgressUpdate};
use crate::search::MatchRecord;
use crate::workspace::{DocumentSource, FileEnumerator};
use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub use crate::history::MemoryHistoryStore;

fn lock<T: Clone>(m: &Mutex<T>) -> T {
    m.lock().map(|v| v.clone()).unwrap_or_else(|e| e.into_inner().clone())
}

/// One recorded `find_files` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumeratorCall {
    pub root: PathBuf,
    pub include: String,
    pub exclude: String,
    pub max_results: Option<usize>,
}

/// Serves a fixed file list, filtered by root, extension glob and excluded
/// directory names
#[derive(Debug, Default)]
pub struct StaticEnumerator {
    files: Vec<PathBuf>,
    failing_roots: Vec<PathBuf>,
    calls: Mutex<Vec<EnumeratorCall>>,
}

impl StaticEnumerator {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            ..Default::default()
        }
    }

    /// Make listing under `root` fail
    pub fn failing_on<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.failing_roots.push(root.into());
        self
    }

    pub fn calls(&self) -> Vec<EnumeratorCall> {
        lock(&self.calls)
    }

    fn included(path: &Path, include: &str) -> bool {
        match include.strip_prefix("**/*") {
            Some("") | None => true,
            Some(suffix) => path
                .file_name()
                .map(|name| name.to_string_lossy().ends_with(suffix))
                .unwrap_or(false),
        }
    }

    fn excluded(path: &Path, root: &Path, exclude: &str) -> bool {
        let names = exclude
            .trim_start_matches("**/")
            .trim_start_matches('{')
            .trim_end_matches('}');
        if names.is_empty() {
            return false;
        }
        let names: Vec<&str> = names.split(',').collect();
        path.strip_prefix(root)
            .map(|rel| {
                rel.components().any(|c| {
                    let name = c.as_os_str().to_string_lossy();
                    names.iter().any(|n| *n == name)
                })
            })
            .unwrap_or(false)
    }
}

impl FileEnumerator for StaticEnumerator {
    fn find_files(
        &self,
        root: &Path,
        include: &str,
        exclude: &str,
        max_results: Option<usize>,
    ) -> Result<Vec<PathBuf>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(EnumeratorCall {
                root: root.to_path_buf(),
                include: include.to_string(),
                exclude: exclude.to_string(),
                max_results,
            });
        }

        if self.failing_roots.iter().any(|r| r == root) {
            return Err(Error::Enumeration {
                root: root.to_path_buf(),
                message: "listing failed".to_string(),
            });
        }

        let mut files: Vec<PathBuf> = self
            .files
            .iter()
            .filter(|p| p.starts_with(root))
            .filter(|p| Self::included(p, include))
            .filter(|p| !Self::excluded(p, root, exclude))
            .cloned()
            .collect();
        if let Some(max) = max_results {
            files.truncate(max);
        }
        Ok(files)
    }
}

/// Documents held in memory; unknown paths read as `NotFound`
#[derive(Debug, Default)]
pub struct MemoryDocuments {
    files: HashMap<PathBuf, String>,
    unreadable: Vec<PathBuf>,
    reads: Mutex<Vec<PathBuf>>,
}

impl MemoryDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file<P: Into<PathBuf>, S: Into<String>>(mut self, path: P, content: S) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// A path that exists but cannot be decoded
    pub fn with_unreadable<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.unreadable.push(path.into());
        self
    }

    /// Paths read so far, in order
    pub fn reads(&self) -> Vec<PathBuf> {
        lock(&self.reads)
    }
}

impl DocumentSource for MemoryDocuments {
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        if let Ok(mut reads) = self.reads.lock() {
            reads.push(path.to_path_buf());
        }
        if self.unreadable.iter().any(|p| p == path) {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "binary file"));
        }
        self.files
            .get(path)
            .map(|content| content.lines().map(str::to_string).collect())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }
}

/// A scripted reply to the next prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedAnswer {
    Text(String),
    Many(Vec<usize>),
    One(usize),
    Dismiss,
}

/// A prompt the flow showed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownPrompt {
    pub title: String,
    pub options: Vec<String>,
}

/// Answers prompts from a queue and records what was shown
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<ScriptedAnswer>>,
    shown: Mutex<Vec<ShownPrompt>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(self, answer: ScriptedAnswer) -> Self {
        if let Ok(mut answers) = self.answers.lock() {
            answers.push_back(answer);
        }
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.answer(ScriptedAnswer::Text(text.to_string()))
    }

    pub fn many(self, indices: Vec<usize>) -> Self {
        self.answer(ScriptedAnswer::Many(indices))
    }

    pub fn one(self, index: usize) -> Self {
        self.answer(ScriptedAnswer::One(index))
    }

    pub fn dismiss(self) -> Self {
        self.answer(ScriptedAnswer::Dismiss)
    }

    pub fn shown(&self) -> Vec<ShownPrompt> {
        lock(&self.shown)
    }

    fn next(&self, title: &str, options: Vec<String>) -> Result<ScriptedAnswer> {
        if let Ok(mut shown) = self.shown.lock() {
            shown.push(ShownPrompt {
                title: title.to_string(),
                options,
            });
        }
        self.answers
            .lock()
            .ok()
            .and_then(|mut answers| answers.pop_front())
            .ok_or_else(|| Error::Prompt(format!("no scripted answer for '{}'", title)))
    }
}

impl Prompter for ScriptedPrompter {
    fn input_text(&self, prompt: &str) -> Result<Option<String>> {
        match self.next(prompt, Vec::new())? {
            ScriptedAnswer::Text(text) => Ok(Some(text)),
            ScriptedAnswer::Dismiss => Ok(None),
            other => Err(Error::Prompt(format!("expected text, got {:?}", other))),
        }
    }

    fn pick_many(&self, title: &str, options: &[String]) -> Result<Option<Vec<usize>>> {
        match self.next(title, options.to_vec())? {
            ScriptedAnswer::Many(indices) => Ok(Some(indices)),
            ScriptedAnswer::Dismiss => Ok(None),
            other => Err(Error::Prompt(format!("expected a multi-pick, got {:?}", other))),
        }
    }

    fn pick_one(&self, title: &str, items: &[PickItem]) -> Result<Option<usize>> {
        let labels = items.iter().map(|i| i.label.clone()).collect();
        match self.next(title, labels)? {
            ScriptedAnswer::One(index) => Ok(Some(index)),
            ScriptedAnswer::Dismiss => Ok(None),
            other => Err(Error::Prompt(format!("expected a pick, got {:?}", other))),
        }
    }
}

/// Records progress updates and can cancel after a number of files
#[derive(Debug, Default)]
pub struct RecordingProgress {
    updates: Mutex<Vec<ProgressUpdate>>,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel `token` once `files` files have been handed to the scanner
    pub fn cancel_after(files: usize, token: CancellationToken) -> Self {
        Self {
            updates: Mutex::default(),
            cancel_after: Some((files, token)),
        }
    }

    pub fn updates(&self) -> Vec<ProgressUpdate> {
        lock(&self.updates)
    }
}

impl ProgressSink for RecordingProgress {
    fn report(&self, update: ProgressUpdate) {
        let count = match self.updates.lock() {
            Ok(mut updates) => {
                updates.push(update);
                updates.len()
            }
            Err(_) => return,
        };
        if let Some((files, token)) = &self.cancel_after {
            if count > *files {
                token.cancel();
            }
        }
    }
}

/// Records opened matches instead of launching an editor
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    opened: Mutex<Vec<MatchRecord>>,
    fail: bool,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            opened: Mutex::default(),
            fail: true,
        }
    }

    pub fn opened(&self) -> Vec<MatchRecord> {
        lock(&self.opened)
    }
}

impl Navigator for RecordingNavigator {
    fn open(&self, record: &MatchRecord) -> Result<()> {
        if self.fail {
            return Err(Error::Navigation {
                path: record.file_path.clone(),
                message: "editor exited with an error".to_string(),
            });
        }
        if let Ok(mut opened) = self.opened.lock() {
            opened.push(record.clone());
        }
        Ok(())
    }
}
