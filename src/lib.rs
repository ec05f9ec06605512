//! Deck list checklist engine.
//!
//! Paste a free-text deck list, resolve every line against a card database
//! and track which physical copies are still missing, grouped by set, color,
//! rarity or type.

pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{CardRepository, FilePreferences, LocalStorage, MemoryPreferences, ScryfallSource};
pub use app::{DeckApp, GroupView, RefreshEngine};
pub use config::AppConfig;
pub use core::checklist::Checklist;
pub use core::grouper::Grouping;
pub use core::pipeline::{build_view, DeckSession, DeckView};
pub use core::resolver::CardIndex;
pub use domain::model::{Card, DeckCard, ParsedLine, SortKey};
pub use utils::error::{DeckError, Result};
