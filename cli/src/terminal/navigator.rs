//! Opening matches in an external editor

use colored::Colorize;
use jumpsearch_core::{Error, MatchRecord, Navigator, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// How an editor expects to be told the target position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditorKind {
    /// `code -g path:line:col`
    VsCode,
    /// `path:line:col` as a plain argument
    Colon,
    /// `+call cursor(line,col) path`
    Vim,
    /// `+line,col path`
    Nano,
    /// `+line:col path`
    PlusColon,
    /// `path` only
    Unknown,
}

impl EditorKind {
    fn detect(program: &str) -> Self {
        let name = Path::new(program)
            .file_stem()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match name.as_str() {
            "code" | "code-insiders" | "codium" | "cursor" => EditorKind::VsCode,
            "subl" | "zed" | "hx" | "helix" | "micro" => EditorKind::Colon,
            "vi" | "vim" | "nvim" | "gvim" => EditorKind::Vim,
            "nano" => EditorKind::Nano,
            "emacs" | "emacsclient" | "kak" => EditorKind::PlusColon,
            _ => EditorKind::Unknown,
        }
    }
}

/// Opens the selected match in the configured editor.
///
/// Without an editor the match location is printed instead.
#[derive(Debug, Clone, Default)]
pub struct EditorNavigator {
    editor: Option<String>,
    args_template: Option<String>,
}

impl EditorNavigator {
    pub fn new(editor: Option<String>, args_template: Option<String>) -> Self {
        Self {
            editor,
            args_template,
        }
    }

    /// `path:line:column`, 1-based
    pub fn location(record: &MatchRecord) -> String {
        format!(
            "{}:{}:{}",
            record.file_path.display(),
            record.line_number,
            record.column_start + 1
        )
    }

    /// Program and arguments for `record`, or `None` without an editor
    pub fn command_line(&self, record: &MatchRecord) -> Option<(String, Vec<String>)> {
        let editor = self.editor.as_deref()?;
        let mut parts = editor.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        let mut args: Vec<String> = parts.collect();

        let path = record.file_path.display().to_string();
        let line = record.line_number.to_string();
        let column = (record.column_start + 1).to_string();

        if let Some(template) = &self.args_template {
            args.extend(template.split_whitespace().map(|arg| {
                arg.replace("{path}", &path)
                    .replace("{line}", &line)
                    .replace("{column}", &column)
            }));
            return Some((program, args));
        }

        match EditorKind::detect(&program) {
            EditorKind::VsCode => {
                args.push("-g".to_string());
                args.push(Self::location(record));
            }
            EditorKind::Colon => args.push(Self::location(record)),
            EditorKind::Vim => {
                args.push(format!("+call cursor({},{})", line, column));
                args.push(path);
            }
            EditorKind::Nano => {
                args.push(format!("+{},{}", line, column));
                args.push(path);
            }
            EditorKind::PlusColon => {
                args.push(format!("+{}:{}", line, column));
                args.push(path);
            }
            EditorKind::Unknown => args.push(path),
        }

        Some((program, args))
    }

    fn resolve_program(program: &str, record: &MatchRecord) -> Result<PathBuf> {
        which::which(program).map_err(|e| Error::Navigation {
            path: record.file_path.clone(),
            message: format!("editor '{}' not found: {}", program, e),
        })
    }
}

impl Navigator for EditorNavigator {
    fn open(&self, record: &MatchRecord) -> Result<()> {
        let Some((program, args)) = self.command_line(record) else {
            println!("{} {}", "→".cyan(), Self::location(record).bold());
            return Ok(());
        };

        let resolved = Self::resolve_program(&program, record)?;
        tracing::debug!("Opening {} with {} {:?}", record.file_path.display(), resolved.display(), args);

        let status = Command::new(&resolved)
            .args(&args)
            .status()
            .map_err(|e| Error::Navigation {
                path: record.file_path.clone(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(Error::Navigation {
                path: record.file_path.clone(),
                message: format!("{} exited with {}", program, status),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> MatchRecord {
        MatchRecord {
            file_path: PathBuf::from("/w/src/main.rs"),
            line_number: 12,
            column_start: 4,
            column_end: 7,
            raw_line_text: "let foo = 1;".to_string(),
            preview_text: "let **foo** = 1;".to_string(),
            label: "foo -> src/main.rs:12".to_string(),
        }
    }

    fn command(editor: &str, template: Option<&str>) -> (String, Vec<String>) {
        EditorNavigator::new(Some(editor.to_string()), template.map(str::to_string))
            .command_line(&record())
            .unwrap()
    }

    #[test]
    fn test_vscode_uses_goto() {
        let (program, args) = command("code --reuse-window", None);
        assert_eq!(program, "code");
        assert_eq!(args, vec!["--reuse-window", "-g", "/w/src/main.rs:12:5"]);
    }

    #[test]
    fn test_terminal_editors_land_on_line_and_column() {
        let (program, args) = command("/usr/bin/nvim", None);
        assert_eq!(program, "/usr/bin/nvim");
        assert_eq!(args, vec!["+call cursor(12,5)", "/w/src/main.rs"]);

        let (_, args) = command("vi", None);
        assert_eq!(args, vec!["+call cursor(12,5)", "/w/src/main.rs"]);

        let (_, args) = command("nano", None);
        assert_eq!(args, vec!["+12,5", "/w/src/main.rs"]);

        let (_, args) = command("emacsclient -nw", None);
        assert_eq!(args, vec!["-nw", "+12:5", "/w/src/main.rs"]);
    }

    #[test]
    fn test_colon_editors() {
        let (_, args) = command("subl", None);
        assert_eq!(args, vec!["/w/src/main.rs:12:5"]);
    }

    #[test]
    fn test_template_overrides_detection() {
        let (program, args) = command("myedit", Some("--line {line} --col {column} {path}"));
        assert_eq!(program, "myedit");
        assert_eq!(args, vec!["--line", "12", "--col", "5", "/w/src/main.rs"]);
    }

    #[test]
    fn test_unknown_editor_gets_path_only() {
        let (_, args) = command("ed", None);
        assert_eq!(args, vec!["/w/src/main.rs"]);
    }

    #[test]
    fn test_no_editor_prints_location() {
        let navigator = EditorNavigator::default();
        assert!(navigator.command_line(&record()).is_none());
        assert!(navigator.open(&record()).is_ok());
        assert_eq!(EditorNavigator::location(&record()), "/w/src/main.rs:12:5");
    }

    #[test]
    fn test_missing_editor_is_a_navigation_error() {
        let navigator = EditorNavigator::new(Some("definitely-not-an-editor-xyz".to_string()), None);
        let err = navigator.open(&record()).unwrap_err();
        assert!(matches!(err, Error::Navigation { .. }));
    }
}
