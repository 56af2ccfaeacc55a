//! Information command

use crate::config::ConfigLoader;
use anyhow::Result;
use colored::Colorize;

/// Print version and the paths in use
pub async fn info_command(config_loader: ConfigLoader) -> Result<()> {
    let config = config_loader.load().await?;

    println!("{} {}", "jumpsearch".bold(), env!("CARGO_PKG_VERSION"));
    println!("  core:     {}", jumpsearch_core::VERSION);
    match &config.source {
        Some(path) => println!("  config:   {}", path.display()),
        None => println!("  config:   {}", "(defaults)".dimmed()),
    }
    println!("  history:  {}", config.history_file.display());
    for folder in &config.folders {
        println!("  folder:   {}", folder.display());
    }
    println!(
        "  editor:   {}",
        config.settings.editor.as_deref().unwrap_or("(none, locations are printed)")
    );

    Ok(())
}
