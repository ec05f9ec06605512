use crate::adapters::CardRepository;
use crate::core::{CardDownload, CardSource, Storage};
use crate::utils::error::Result;

/// Fetches the card database and writes it into the local cache.
pub struct RefreshEngine<C: CardSource, S: Storage> {
    source: C,
    repository: CardRepository<S>,
}

impl<C: CardSource, S: Storage> RefreshEngine<C, S> {
    pub fn new(source: C, repository: CardRepository<S>) -> Self {
        Self { source, repository }
    }

    pub fn repository(&self) -> &CardRepository<S> {
        &self.repository
    }

    /// Returns the download; the cache keeps cards from earlier downloads
    /// that this one did not mention.
    pub async fn run(&self) -> Result<CardDownload> {
        tracing::info!("Starting card database refresh...");

        let download = self.source.fetch_cards().await?;
        tracing::info!("Fetched {} cards", download.total_cards());

        let cached = self.repository.upsert(download.cards.clone()).await?;
        tracing::info!("💾 Card cache now holds {} cards", cached);

        Ok(download)
    }
}
