//! Search history command

use super::search::run_search;
use crate::config::ConfigLoader;
use crate::terminal::DialoguerPrompter;
use anyhow::{Context, Result};
use jumpsearch_core::history::{self, JsonHistoryStore};
use jumpsearch_core::{PickItem, Prompter};
use tracing::info;

/// Show recent search terms; picking one searches for it again
pub async fn history_command(config_loader: ConfigLoader) -> Result<()> {
    let config = config_loader.load().await?;
    let store = JsonHistoryStore::new(&config.history_file);
    let limit = config.settings.history_limit;

    let entries = history::load(&store, limit)
        .with_context(|| format!("Failed to read history: {}", config.history_file.display()))?
        .to_vec();

    if entries.is_empty() {
        println!("No searches yet.");
        return Ok(());
    }

    let items: Vec<PickItem> = entries.iter().map(PickItem::new).collect();
    let picked = tokio::task::spawn_blocking(move || {
        DialoguerPrompter::new().pick_one("Search History", &items)
    })
    .await
    .context("History prompt failed")??;

    let Some(term) = picked.and_then(|index| entries.get(index).cloned()) else {
        return Ok(());
    };

    info!("Re-running search for '{}'", term);
    if let Err(e) = history::record(&store, &term, limit) {
        tracing::warn!("Failed to save search history: {}", e);
    }

    run_search(config, Some(term)).await
}
