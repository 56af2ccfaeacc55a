//! Ctrl-C handling

use anyhow::{Context, Result};
use jumpsearch_core::CancellationToken;
use std::sync::OnceLock;

static INTERRUPT_TOKEN: OnceLock<CancellationToken> = OnceLock::new();

/// Route Ctrl-C to `token` for the rest of the process.
///
/// The handler is installed once; later calls return the token already wired
/// up, so every search in the process shares it. Callers reset it before
/// each scan.
pub fn install_interrupt_handler() -> Result<CancellationToken> {
    if let Some(token) = INTERRUPT_TOKEN.get() {
        return Ok(token.clone());
    }

    let token = CancellationToken::new();
    let handler_token = token.clone();
    ctrlc::set_handler(move || {
        tracing::debug!("Interrupt received, cancelling search");
        handler_token.cancel();
    })
    .context("Failed to install Ctrl-C handler")?;

    Ok(INTERRUPT_TOKEN.get_or_init(|| token).clone())
}
