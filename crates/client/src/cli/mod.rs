//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::client::DEFAULT_BASE_URL;

/// CLI client for the guestbook API.
#[derive(Debug, Parser)]
#[command(name = "guestbook-client")]
#[command(about = "CLI client for the guestbook API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "GUESTBOOK_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all guests, newest first.
    List,
    /// Get guest by ID.
    Get {
        /// Guest ID.
        id: String,
    },
    /// Create a new guest.
    Create(CreateArgs),
    /// Delete guest by ID.
    Delete {
        /// Guest ID.
        id: String,
    },
    /// Print the thank-you link for a guest.
    Link {
        /// Guest ID.
        id: String,
        /// Public site the thank-you page lives on (defaults to the base URL).
        #[arg(long, env = "GUESTBOOK_SITE_URL")]
        site_url: Option<String>,
    },
    /// Server storage health.
    Health,
}

/// Arguments of `create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Guest name.
    #[arg(long)]
    pub name: String,
    /// Image URL or `data:` URL.
    #[arg(long, conflicts_with = "image_file", required_unless_present = "image_file")]
    pub image: Option<String>,
    /// Local image file, uploaded inline.
    #[arg(long)]
    pub image_file: Option<PathBuf>,
}
