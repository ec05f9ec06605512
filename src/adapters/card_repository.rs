use crate::core::resolver::CardIndex;
use crate::core::{Card, Storage};
use crate::utils::error::Result;
use std::collections::HashMap;

/// Local cache of the reference card database, stored as one JSON array.
pub struct CardRepository<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> CardRepository<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }

    /// All cached cards; an empty list if nothing has been fetched yet.
    pub async fn load(&self) -> Result<Vec<Card>> {
        if !self.storage.exists(&self.file_name).await {
            tracing::debug!("No card cache at {}, starting empty", self.file_name);
            return Ok(Vec::new());
        }

        let data = self.storage.read_file(&self.file_name).await?;
        let cards: Vec<Card> = serde_json::from_slice(&data)?;
        tracing::debug!("Loaded {} cards from {}", cards.len(), self.file_name);
        Ok(cards)
    }

    pub async fn load_index(&self) -> Result<CardIndex> {
        Ok(CardIndex::new(self.load().await?))
    }

    /// Insert or replace cards by `id`, keeping the existing order and
    /// appending ids not seen before. Returns the size of the cache.
    pub async fn upsert(&self, cards: Vec<Card>) -> Result<usize> {
        let mut stored = self.load().await?;
        let mut positions: HashMap<String, usize> = stored
            .iter()
            .enumerate()
            .map(|(position, card)| (card.id.clone(), position))
            .collect();

        for card in cards {
            match positions.get(&card.id) {
                Some(&position) => stored[position] = card,
                None => {
                    positions.insert(card.id.clone(), stored.len());
                    stored.push(card);
                }
            }
        }

        let data = serde_json::to_vec(&stored)?;
        tracing::debug!(
            "Writing {} cards ({} bytes) to {}",
            stored.len(),
            data.len(),
            self.file_name
        );
        self.storage.write_file(&self.file_name, &data).await?;
        Ok(stored.len())
    }
}
