use crate::utils::error::{DeckError, Result};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(DeckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(DeckError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(DeckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DeckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DeckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(DeckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// Bulk files whose entries are card objects. `rulings` is listed by the
/// catalog too but holds rulings, not cards.
pub const CARD_BULK_TYPES: [&str; 4] = ["oracle_cards", "unique_artwork", "default_cards", "all_cards"];

pub fn validate_bulk_type(field_name: &str, bulk_type: &str) -> Result<()> {
    if CARD_BULK_TYPES.contains(&bulk_type) {
        return Ok(());
    }
    Err(DeckError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: bulk_type.to_string(),
        reason: format!("Expected one of: {}", CARD_BULK_TYPES.join(", ")),
    })
}

/// Data files live directly under `storage.data_dir`: a bare file name with
/// the given extension.
pub fn validate_data_file(field_name: &str, file_name: &str, extension: &str) -> Result<()> {
    let invalid = |reason: String| DeckError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: file_name.to_string(),
        reason,
    };

    let path = Path::new(file_name);
    if path.file_name().and_then(|name| name.to_str()) != Some(file_name) {
        return Err(invalid(
            "Must be a plain file name inside the data directory".to_string(),
        ));
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext == extension => Ok(()),
        Some(ext) => Err(invalid(format!(
            "Unsupported file extension: {} (expected .{})",
            ext, extension
        ))),
        None => Err(invalid(format!("Missing .{} extension", extension))),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DeckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(DeckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source.bulk_data_endpoint", "https://api.scryfall.com/bulk-data").is_ok());
        assert!(validate_url("source.bulk_data_endpoint", "http://localhost:8080").is_ok());
        assert!(validate_url("source.bulk_data_endpoint", "").is_err());
        assert!(validate_url("source.bulk_data_endpoint", "invalid-url").is_err());
        assert!(validate_url("source.bulk_data_endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("source.timeout_seconds", 30, 1).is_ok());
        assert!(validate_positive_number("source.timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_bulk_type() {
        assert!(validate_bulk_type("source.bulk_type", "default_cards").is_ok());
        assert!(validate_bulk_type("source.bulk_type", "oracle_cards").is_ok());
        assert!(validate_bulk_type("source.bulk_type", "rulings").is_err());
        assert!(validate_bulk_type("source.bulk_type", "Default_Cards").is_err());
        assert!(validate_bulk_type("source.bulk_type", "").is_err());
    }

    #[test]
    fn test_validate_data_file() {
        assert!(validate_data_file("storage.cards_file", "cards.json", "json").is_ok());
        assert!(validate_data_file("storage.cards_file", "cards.db", "json").is_err());
        assert!(validate_data_file("storage.cards_file", "cards", "json").is_err());
        assert!(validate_data_file("storage.cards_file", "../cards.json", "json").is_err());
        assert!(validate_data_file("storage.cards_file", "cache/cards.json", "json").is_err());
        assert!(validate_data_file("storage.cards_file", "", "json").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("source.retry_attempts", 3u32, 0, 10).is_ok());
        assert!(validate_range("source.retry_attempts", 11u32, 0, 10).is_err());
    }
}
