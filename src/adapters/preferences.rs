use crate::core::Preferences;
use crate::utils::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

pub const PREVIOUS_DECK: &str = "previous-deck";
pub const SHOW_DECK: &str = "show-deck";
pub const HIDE_COMPLETE: &str = "hide-complete";
pub const SORT: &str = "sort";
pub const UPDATED_AT: &str = "updated-at";
pub const TOTAL_CARDS: &str = "total-cards";

/// Preferences kept in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Preferences for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences persisted as a flat JSON object; every `set` writes the file.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    values: MemoryPreferences,
}

impl FilePreferences {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let content = fs::read(&path)?;
            let map: BTreeMap<String, String> = serde_json::from_slice(&content)?;
            tracing::debug!("Loaded {} preferences from {}", map.len(), path.display());
            MemoryPreferences { values: map }
        } else {
            MemoryPreferences::new()
        };

        Ok(Self { path, values })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter()
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(&self.values.values)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl Preferences for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.set(key, value)?;
        self.flush()
    }
}

/// Stored flags use `"1"`/`"0"`; anything unparsable falls back to `default`.
pub fn get_flag<P: Preferences + ?Sized>(prefs: &P, key: &str, default: bool) -> bool {
    prefs
        .get(key)
        .and_then(|value| value.trim().parse::<i64>().ok())
        .map_or(default, |number| number != 0)
}

pub fn set_flag<P: Preferences + ?Sized>(prefs: &mut P, key: &str, value: bool) -> Result<()> {
    prefs.set(key, if value { "1" } else { "0" })
}
