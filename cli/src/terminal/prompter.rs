//! dialoguer-backed prompts

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect, Select};
use jumpsearch_core::search::EMPHASIS_MARKER;
use jumpsearch_core::{Error, PickItem, Prompter, Result};
use std::io;

/// Width used when the terminal size is unknown
const FALLBACK_WIDTH: usize = 100;

/// Prompts on stderr using dialoguer's colorful theme
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
    term: Term,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            term: Term::stderr(),
        }
    }

    fn width(&self) -> usize {
        match self.term.size_checked() {
            Some((_, cols)) => cols as usize,
            None => FALLBACK_WIDTH,
        }
    }

    /// One line per item: label, dimmed description, then the preview
    fn format_item(&self, item: &PickItem) -> String {
        let mut line = item.label.clone();
        if let Some(description) = &item.description {
            line.push_str(&format!("  {}", style(description).dim()));
        }
        if let Some(detail) = &item.detail {
            line.push_str(&format!("  {}", render_preview(detail)));
        }
        console::truncate_str(&line, self.width().saturating_sub(4), "…").into_owned()
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a dialoguer failure to a dismissal or a prompt error.
///
/// Ctrl-C inside a prompt surfaces as `Interrupted` and counts as dismissal.
fn dismissed_or_error<T>(err: dialoguer::Error) -> Result<Option<T>> {
    match err {
        dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        other => Err(Error::Prompt(other.to_string())),
    }
}

impl Prompter for DialoguerPrompter {
    fn input_text(&self, prompt: &str) -> Result<Option<String>> {
        let input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text_on(&self.term);

        match input {
            Ok(text) if text.is_empty() => Ok(None),
            Ok(text) => Ok(Some(text)),
            Err(e) => dismissed_or_error(e),
        }
    }

    fn pick_many(&self, title: &str, options: &[String]) -> Result<Option<Vec<usize>>> {
        MultiSelect::with_theme(&self.theme)
            .with_prompt(format!("{} {}", title, style("(space to toggle, enter to confirm)").dim()))
            .items(options)
            .interact_on_opt(&self.term)
            .or_else(dismissed_or_error)
    }

    fn pick_one(&self, title: &str, items: &[PickItem]) -> Result<Option<usize>> {
        let lines: Vec<String> = items.iter().map(|item| self.format_item(item)).collect();

        Select::with_theme(&self.theme)
            .with_prompt(title)
            .items(&lines)
            .default(0)
            .interact_on_opt(&self.term)
            .or_else(dismissed_or_error)
    }
}

/// Render `**match**` spans in bold
pub fn render_preview(preview: &str) -> String {
    preview
        .split(EMPHASIS_MARKER)
        .enumerate()
        .map(|(i, part)| {
            if i % 2 == 1 {
                style(part).bold().yellow().to_string()
            } else {
                part.to_string()
            }
        })
        .collect()
}
