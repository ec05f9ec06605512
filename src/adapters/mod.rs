// Adapters layer: concrete implementations for external systems (storage, preferences, http).

pub mod card_repository;
pub mod export;
pub mod preferences;
pub mod scryfall;
pub mod storage;

pub use card_repository::CardRepository;
pub use preferences::{FilePreferences, MemoryPreferences};
pub use scryfall::ScryfallSource;
pub use storage::LocalStorage;
