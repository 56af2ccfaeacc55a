//! # jumpsearch CLI
//!
//! Command-line interface for jumpsearch - search text across a workspace and
//! jump to the match in your editor.
//!
//! ## Usage
//!
//! - `jumpsearch` - Prompt for a term and search
//! - `jumpsearch "pattern"` - Search for a term right away
//! - `jumpsearch history` - Pick a recent term and search again
//! - `jumpsearch info` - Show version and paths in use

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod terminal;

use commands::{history_command, info_command, search_command};
use config::ConfigLoader;

/// jumpsearch - search a workspace and jump to the match
#[derive(Parser)]
#[command(name = "jumpsearch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search text across your workspace and jump straight to the match")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Workspace root folder (repeatable, defaults to the current directory)
    #[arg(short = 'f', long = "folder", global = true)]
    folders: Vec<PathBuf>,

    /// History file path
    #[arg(long, env = "JUMPSEARCH_HISTORY_FILE", global = true)]
    history_file: Option<PathBuf>,

    /// Editor command used to open matches
    #[arg(long, global = true)]
    editor: Option<String>,

    /// Only offer workspace roots in the folder picker
    #[arg(long, global = true)]
    no_discover: bool,

    /// Stop scanning after this many matches
    #[arg(long, global = true)]
    fetch_cap: Option<usize>,

    /// Show at most this many matches
    #[arg(long, global = true)]
    display_cap: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Term to search for (skips the term prompt)
    term: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the workspace (default)
    Search {
        /// Term to search for (skips the term prompt)
        term: Option<String>,
    },

    /// Pick a recent search term and search again
    History,

    /// Show version and the paths in use
    Info,
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> ConfigLoader {
    let mut loader = ConfigLoader::new()
        .with_folders_override(cli.folders.clone())
        .with_caps_override(cli.fetch_cap, cli.display_cap)
        .with_no_discover(cli.no_discover);

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(history_file) = &cli.history_file {
        loader = loader.with_history_file_override(history_file.clone());
    }

    if let Some(editor) = &cli.editor {
        loader = loader.with_editor_override(editor.clone());
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    jumpsearch_core::init_tracing_with_debug(cli.verbose);

    // Build configuration loader
    let config_loader = build_config_loader(&cli);

    match (cli.term, cli.command) {
        // A bare term searches right away
        (Some(term), None) => search_command(Some(term), config_loader).await,
        // A term with a subcommand is ambiguous
        (Some(_), Some(_)) => {
            tracing::error!("Error: Cannot specify both a search term and a subcommand");
            std::process::exit(2);
        }
        // Handle subcommands
        (None, Some(Commands::Search { term })) => search_command(term, config_loader).await,
        (None, Some(Commands::History)) => history_command(config_loader).await,
        (None, Some(Commands::Info)) => info_command(config_loader).await,
        // Default to prompting for a term
        (None, None) => search_command(None, config_loader).await,
    }
}
