use crate::core::{Card, CardDownload, CardSource, ConfigProvider};
use crate::utils::error::{DeckError, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct BulkCatalog {
    data: Vec<BulkEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkEntry {
    pub r#type: String,
    pub download_uri: String,
    pub updated_at: DateTime<Utc>,
}

/// Raw card record from a bulk-data download. Only the fields we keep.
#[derive(Debug, Deserialize)]
pub struct RawCard {
    pub id: String,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
    pub name: String,
    #[serde(default)]
    pub set_name: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub type_line: Option<String>,
}

impl From<RawCard> for Card {
    fn from(raw: RawCard) -> Self {
        Card {
            id: raw.id,
            colors: raw.colors.unwrap_or_default(),
            name: raw.name,
            set: raw.set_name,
            rarity: raw.rarity,
            r#type: primary_type(raw.type_line.as_deref().unwrap_or_default()),
        }
    }
}

/// `"Creature — Goblin Wizard"` becomes `"Creature"`.
pub fn primary_type(type_line: &str) -> String {
    type_line
        .split('—')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

pub struct ScryfallSource<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> ScryfallSource<C> {
    pub fn new(config: C) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent())
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;
        Ok(Self { config, client })
    }

    /// Find the catalog entry for the configured bulk type.
    pub async fn find_bulk_entry(&self) -> Result<BulkEntry> {
        let catalog: BulkCatalog = self.get_json(self.config.bulk_data_endpoint()).await?;
        let bulk_type = self.config.bulk_type();

        catalog
            .data
            .into_iter()
            .find(|entry| entry.r#type == bulk_type)
            .ok_or_else(|| DeckError::BulkDataNotFound {
                kind: bulk_type.to_string(),
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let attempts = self.config.retry_attempts() + 1;
        let delay = Duration::from_secs(self.config.retry_delay_seconds());
        let mut attempt = 1;

        loop {
            match self.try_get_json(url).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < attempts && is_transient(&e) => {
                    tracing::warn!(
                        "⚠️ Request to {} failed (attempt {}/{}): {}",
                        url,
                        attempt,
                        attempts,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn try_get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!("Making API request to: {}", url);
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if !status.is_success() {
            return Err(DeckError::HttpStatusError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

fn is_transient(error: &DeckError) -> bool {
    match error {
        DeckError::HttpStatusError { status, .. } => *status == 429 || *status >= 500,
        DeckError::ApiError(e) => e.is_timeout() || e.is_connect() || e.is_request(),
        _ => false,
    }
}

#[async_trait::async_trait]
impl<C: ConfigProvider> CardSource for ScryfallSource<C> {
    async fn fetch_cards(&self) -> Result<CardDownload> {
        let entry = self.find_bulk_entry().await?;
        tracing::info!(
            "📥 Downloading '{}' bulk data (updated {})",
            entry.r#type,
            entry.updated_at
        );

        let raw_cards: Vec<RawCard> = self.get_json(&entry.download_uri).await?;
        let cards: Vec<Card> = raw_cards.into_iter().map(Card::from).collect();
        tracing::info!("✅ Downloaded {} cards", cards.len());

        Ok(CardDownload {
            cards,
            updated_at: entry.updated_at,
        })
    }
}
