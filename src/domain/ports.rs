use crate::domain::model::Card;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

/// Key-value store for user preferences such as the last deck and sort key.
pub trait Preferences {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn bulk_data_endpoint(&self) -> &str;
    fn bulk_type(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn retry_attempts(&self) -> u32;
    fn retry_delay_seconds(&self) -> u64;
}

/// Cards downloaded from a bulk-data source, with the catalog's freshness stamp.
#[derive(Debug, Clone)]
pub struct CardDownload {
    pub cards: Vec<Card>,
    pub updated_at: DateTime<Utc>,
}

impl CardDownload {
    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }
}

#[async_trait]
pub trait CardSource: Send + Sync {
    async fn fetch_cards(&self) -> Result<CardDownload>;
}
