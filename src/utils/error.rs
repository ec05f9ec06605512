use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("Bulk data entry '{kind}' not found in catalog")]
    BulkDataNotFound { kind: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Card '{name}' is not on the checklist")]
    UnknownCard { name: String },

    #[error("Copy {index} of '{name}' is out of range (only {len} copies tracked)")]
    FlagOutOfRange {
        name: String,
        index: usize,
        len: usize,
    },

    #[error("Group '{key}' does not exist in the current grouping")]
    UnknownGroup { key: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DeckError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DeckError::UnknownCard { .. }
            | DeckError::FlagOutOfRange { .. }
            | DeckError::UnknownGroup { .. } => ErrorSeverity::Low,
            DeckError::ApiError(_)
            | DeckError::HttpStatusError { .. }
            | DeckError::BulkDataNotFound { .. } => ErrorSeverity::Medium,
            DeckError::CsvError(_)
            | DeckError::SerializationError(_)
            | DeckError::ConfigError { .. }
            | DeckError::ConfigValidationError { .. }
            | DeckError::InvalidConfigValueError { .. }
            | DeckError::MissingConfigError { .. } => ErrorSeverity::High,
            DeckError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DeckError::ApiError(_) | DeckError::HttpStatusError { .. } => {
                "Check your network connection and try `fetch` again later".to_string()
            }
            DeckError::BulkDataNotFound { kind } => format!(
                "Set [source].bulk_type to a type listed by the bulk-data catalog (was '{}')",
                kind
            ),
            DeckError::CsvError(_) => "Make sure the export path is writable".to_string(),
            DeckError::IoError(_) => {
                "Check that the data directory exists and is readable/writable".to_string()
            }
            DeckError::SerializationError(_) => {
                "The local card cache may be corrupt; run `fetch` to rebuild it".to_string()
            }
            DeckError::MissingConfigError { .. } => {
                "Create the file or omit --config to run with built-in defaults".to_string()
            }
            DeckError::ConfigError { .. }
            | DeckError::ConfigValidationError { .. }
            | DeckError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line arguments".to_string()
            }
            DeckError::UnknownCard { .. }
            | DeckError::FlagOutOfRange { .. }
            | DeckError::UnknownGroup { .. } => {
                "The deck changed since this was requested; re-read the checklist".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DeckError::ApiError(_) | DeckError::HttpStatusError { .. } => {
                format!("Could not download card data: {}", self)
            }
            DeckError::BulkDataNotFound { .. } => {
                format!("The card database catalog is missing data: {}", self)
            }
            DeckError::IoError(_) => format!("File system problem: {}", self),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;
