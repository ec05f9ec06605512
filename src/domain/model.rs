use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One printing from the reference card database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    #[serde(default)]
    pub colors: Vec<String>,
    pub name: String,
    pub set: String,
    pub rarity: String,
    pub r#type: String,
}

/// A resolved deck row: a card plus the number of copies the deck asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCard {
    #[serde(flatten)]
    pub card: Card,
    pub amount: u32,
}

impl DeckCard {
    pub fn new(card: Card, amount: u32) -> Self {
        Self { card, amount }
    }

    pub fn id(&self) -> &str {
        &self.card.id
    }

    pub fn name(&self) -> &str {
        &self.card.name
    }

    pub fn set(&self) -> &str {
        &self.card.set
    }

    pub fn rarity(&self) -> &str {
        &self.card.rarity
    }

    pub fn card_type(&self) -> &str {
        &self.card.r#type
    }

    pub fn colors(&self) -> &[String] {
        &self.card.colors
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub amount: u32,
    pub raw_name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SortKey {
    #[default]
    Set,
    Color,
    Rarity,
    Type,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Set, SortKey::Color, SortKey::Rarity, SortKey::Type];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Set => "Set",
            SortKey::Color => "Color",
            SortKey::Rarity => "Rarity",
            SortKey::Type => "Type",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown sort key: {}", s))
    }
}
