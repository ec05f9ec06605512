use crate::config::toml_config::AppConfig;
use crate::core::SortKey;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "deck-checklist")]
#[command(about = "Track which cards of a deck list you still need to collect")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override [storage].data_dir
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Download the card database and refresh the local cache
    Fetch,

    /// Print the grouped checklist for a deck
    Check {
        #[command(flatten)]
        deck: DeckArgs,
    },

    /// Write the resolved deck as CSV
    Export {
        #[command(flatten)]
        deck: DeckArgs,

        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or toggle stored preferences
    Prefs {
        #[arg(long)]
        toggle_deck_box: bool,

        #[arg(long)]
        toggle_hide_complete: bool,
    },
}

#[derive(Debug, Clone, clap::Args)]
pub struct DeckArgs {
    /// Deck list file (`-` for stdin); the last saved deck is used when omitted
    #[arg(short, long)]
    pub deck: Option<PathBuf>,

    /// Grouping for the output; saved as the new preference
    #[arg(short, long, value_enum)]
    pub sort: Option<SortKey>,
}

impl CliConfig {
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(data_dir) = &self.data_dir {
            tracing::debug!("🔧 data_dir overridden to: {}", data_dir);
            config.storage.data_dir = data_dir.clone();
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(data_dir) = &self.data_dir {
            validation::validate_path("--data-dir", data_dir)?;
        }
        if let Some(path) = &self.config {
            validation::validate_path("--config", &path.to_string_lossy())?;
        }
        Ok(())
    }
}
