pub mod deck_app;
pub mod refresh;

pub use deck_app::{DeckApp, GroupView};
pub use refresh::RefreshEngine;
