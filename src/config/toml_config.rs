use crate::core::{ConfigProvider, SortKey};
use crate::utils::error::{DeckError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BULK_DATA_ENDPOINT: &str = "https://api.scryfall.com/bulk-data";
pub const DEFAULT_BULK_TYPE: &str = "default_cards";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub storage: StorageConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub bulk_data_endpoint: String,
    pub bulk_type: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub retry_attempts: u32,
    pub retry_delay_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            bulk_data_endpoint: DEFAULT_BULK_DATA_ENDPOINT.to_string(),
            bulk_type: DEFAULT_BULK_TYPE.to_string(),
            user_agent: format!("deck-checklist/{}", env!("CARGO_PKG_VERSION")),
            timeout_seconds: 300,
            retry_attempts: 3,
            retry_delay_seconds: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub cards_file: String,
    pub preferences_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./.deck-checklist".to_string(),
            cards_file: "cards.json".to_string(),
            preferences_file: "preferences.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// 沒有儲存過排序偏好時使用
    pub default_sort: SortKey,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DeckError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Load `path` when given, otherwise fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if !path.is_file() => Err(DeckError::MissingConfigError {
                field: format!("--config {}", path.display()),
            }),
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DeckError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DECK_DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DeckError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn cards_path(&self) -> PathBuf {
        Path::new(&self.storage.data_dir).join(&self.storage.cards_file)
    }

    pub fn preferences_path(&self) -> PathBuf {
        Path::new(&self.storage.data_dir).join(&self.storage.preferences_file)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.bulk_data_endpoint", &self.source.bulk_data_endpoint)?;
        validation::validate_bulk_type("source.bulk_type", &self.source.bulk_type)?;
        validation::validate_non_empty_string("source.user_agent", &self.source.user_agent)?;
        validation::validate_positive_number("source.timeout_seconds", self.source.timeout_seconds, 1)?;
        validation::validate_range("source.retry_attempts", self.source.retry_attempts, 0, 10)?;
        validation::validate_range(
            "source.retry_delay_seconds",
            self.source.retry_delay_seconds,
            0,
            600,
        )?;

        validation::validate_path("storage.data_dir", &self.storage.data_dir)?;
        validation::validate_data_file("storage.cards_file", &self.storage.cards_file, "json")?;
        validation::validate_data_file(
            "storage.preferences_file",
            &self.storage.preferences_file,
            "json",
        )?;

        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn bulk_data_endpoint(&self) -> &str {
        &self.source.bulk_data_endpoint
    }

    fn bulk_type(&self) -> &str {
        &self.source.bulk_type
    }

    fn user_agent(&self) -> &str {
        &self.source.user_agent
    }

    fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds
    }

    fn retry_attempts(&self) -> u32 {
        self.source.retry_attempts
    }

    fn retry_delay_seconds(&self) -> u64 {
        self.source.retry_delay_seconds
    }
}
