//! Search-and-jump command

use crate::config::{CliConfig, ConfigLoader};
use crate::terminal::{install_interrupt_handler, DialoguerPrompter, EditorNavigator, TerminalProgress};
use anyhow::{Context, Result};
use colored::Colorize;
use jumpsearch_core::{
    CancellationToken, Collaborators, FsDocumentSource, JsonHistoryStore, SearchOrchestrator,
    SearchOutcome, WalkEnumerator, Workspace,
};
use tracing::{debug, info};

/// Run one interactive search, optionally seeded with a term
pub async fn search_command(term: Option<String>, config_loader: ConfigLoader) -> Result<()> {
    let config = config_loader.load().await?;
    run_search(config, term).await
}

/// Run the search flow for an already loaded configuration
pub async fn run_search(config: CliConfig, term: Option<String>) -> Result<()> {
    let cancel = install_interrupt_handler()?;
    cancel.reset();

    debug!("Workspace folders: {:?}", config.folders);
    if let Some(source) = &config.source {
        debug!("Using config: {}", source.display());
    }

    let outcome = tokio::task::spawn_blocking(move || run_blocking(&config, term, cancel))
        .await
        .context("Search task failed")??;

    report_outcome(&outcome);
    Ok(())
}

/// Wire the terminal and file-system collaborators and run the flow
fn run_blocking(
    config: &CliConfig,
    term: Option<String>,
    cancel: CancellationToken,
) -> Result<SearchOutcome> {
    let workspace = Workspace::from_folders(&config.folders);
    let settings = &config.settings;

    let enumerator = WalkEnumerator::from_settings(settings);
    let documents = FsDocumentSource::new(settings.max_file_bytes);
    let prompter = DialoguerPrompter::new();
    let progress = TerminalProgress::new();
    let history = JsonHistoryStore::new(&config.history_file);
    let navigator = EditorNavigator::new(settings.editor.clone(), config.editor_args.clone());

    let io = Collaborators {
        enumerator: &enumerator,
        documents: &documents,
        prompter: &prompter,
        progress: &progress,
        history: &history,
        navigator: &navigator,
    };

    let outcome = SearchOrchestrator::new(&workspace, settings, io)
        .with_cancellation(cancel)
        .run(term)?;
    Ok(outcome)
}

fn report_outcome(outcome: &SearchOutcome) {
    match outcome {
        SearchOutcome::Navigated(record) => {
            info!("Opened {}", record.label);
        }
        SearchOutcome::Aborted { reason, .. } if reason.is_silent() => {
            debug!("Search dismissed");
        }
        SearchOutcome::Aborted { reason, .. } if reason.is_warning() => {
            eprintln!("{} {}", "⚠".yellow(), reason.to_string().yellow());
        }
        SearchOutcome::Aborted { reason, .. } => {
            eprintln!("{} {}", "ℹ".blue(), reason);
        }
    }
}
