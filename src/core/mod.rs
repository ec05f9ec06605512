pub mod checklist;
pub mod grouper;
pub mod line_parser;
pub mod pipeline;
pub mod resolver;

pub use crate::domain::model::{Card, DeckCard, ParsedLine, SortKey};
pub use crate::domain::ports::{CardDownload, CardSource, ConfigProvider, Preferences, Storage};
pub use crate::utils::error::Result;
