use crate::domain::model::{Card, DeckCard, ParsedLine};
use std::collections::{HashMap, HashSet};

pub const BASIC_LANDS: [&str; 6] = ["Plains", "Mountain", "Island", "Swamp", "Forest", "Wastes"];

pub const BASIC_LAND_SET: &str = "Basic Lands";
pub const BASIC_LAND_RARITY: &str = "basicland";
pub const BASIC_LAND_TYPE: &str = "Basic Land";
pub const UNFOUND: &str = "Unfound";

/// Read-only card database with an exact-name lookup.
///
/// Lookups return printings in the order they were supplied.
#[derive(Debug, Clone, Default)]
pub struct CardIndex {
    cards: Vec<Card>,
    by_name: HashMap<String, Vec<usize>>,
}

impl CardIndex {
    pub fn new(cards: Vec<Card>) -> Self {
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, card) in cards.iter().enumerate() {
            by_name.entry(card.name.clone()).or_default().push(position);
        }
        Self { cards, by_name }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn find_by_name<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Card> + 'a {
        self.by_name
            .get(name)
            .into_iter()
            .flatten()
            .map(move |&position| &self.cards[position])
    }
}

impl From<Vec<Card>> for CardIndex {
    fn from(cards: Vec<Card>) -> Self {
        Self::new(cards)
    }
}

pub fn is_basic_land(name: &str) -> bool {
    BASIC_LANDS.contains(&name)
}

/// Resolve a parsed line into deck rows.
///
/// Always yields at least one row: basic lands and unknown names get a
/// synthetic entry. A name printed in several sets yields one row per set,
/// each carrying the full requested amount, so summing `amount` across the
/// rows of one name overcounts the copies the deck actually needs.
pub fn resolve(line: &ParsedLine, index: &CardIndex) -> Vec<DeckCard> {
    if is_basic_land(&line.raw_name) {
        return vec![synthetic(
            &line.raw_name,
            line.amount,
            BASIC_LAND_SET,
            BASIC_LAND_RARITY,
            BASIC_LAND_TYPE,
        )];
    }

    let mut seen_sets = HashSet::new();
    let rows: Vec<DeckCard> = index
        .find_by_name(&line.raw_name)
        .filter(|card| seen_sets.insert(card.set.as_str()))
        .map(|card| DeckCard::new(card.clone(), line.amount))
        .collect();

    if rows.is_empty() {
        tracing::debug!("Card not found in index: {:?}", line.raw_name);
        return vec![synthetic(&line.raw_name, line.amount, UNFOUND, UNFOUND, UNFOUND)];
    }

    rows
}

fn synthetic(name: &str, amount: u32, set: &str, rarity: &str, card_type: &str) -> DeckCard {
    DeckCard::new(
        Card {
            id: name.to_string(),
            colors: Vec::new(),
            name: name.to_string(),
            set: set.to_string(),
            rarity: rarity.to_string(),
            r#type: card_type.to_string(),
        },
        amount,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, name: &str, set: &str) -> Card {
        Card {
            id: id.to_string(),
            colors: vec!["R".to_string()],
            name: name.to_string(),
            set: set.to_string(),
            rarity: "common".to_string(),
            r#type: "Instant".to_string(),
        }
    }

    fn line(amount: u32, name: &str) -> ParsedLine {
        ParsedLine {
            amount,
            raw_name: name.to_string(),
        }
    }

    #[test]
    fn test_basic_land_skips_index() {
        // 即使索引裡有同名卡，基本地也不查詢
        let index = CardIndex::new(vec![card("p1", "Plains", "Alpha")]);
        let rows = resolve(&line(2, "Plains"), &index);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id(), "Plains");
        assert_eq!(rows[0].set(), "Basic Lands");
        assert_eq!(rows[0].rarity(), "basicland");
        assert_eq!(rows[0].card_type(), "Basic Land");
        assert!(rows[0].colors().is_empty());
        assert_eq!(rows[0].amount, 2);
    }

    #[test]
    fn test_unknown_name_yields_unfound_sentinel() {
        let index = CardIndex::new(vec![card("b1", "Lightning Bolt", "Magic 2010")]);
        let rows = resolve(&line(3, "Lightning Blot"), &index);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name(), "Lightning Blot");
        assert_eq!(rows[0].id(), "Lightning Blot");
        assert_eq!(rows[0].set(), UNFOUND);
        assert_eq!(rows[0].rarity(), UNFOUND);
        assert_eq!(rows[0].card_type(), UNFOUND);
        assert_eq!(rows[0].amount, 3);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let index = CardIndex::new(vec![card("b1", "Lightning Bolt", "Magic 2010")]);
        let rows = resolve(&line(1, "lightning bolt"), &index);
        assert_eq!(rows[0].set(), UNFOUND);
    }

    #[test]
    fn test_reprints_deduplicated_by_set_first_wins() {
        let index = CardIndex::new(vec![
            card("b1", "Lightning Bolt", "Magic 2010"),
            card("b2", "Lightning Bolt", "Masters 25"),
            card("b3", "Lightning Bolt", "Magic 2010"),
            card("c1", "Counterspell", "Masters 25"),
        ]);
        let rows = resolve(&line(4, "Lightning Bolt"), &index);

        let ids: Vec<&str> = rows.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["b1", "b2"]);
    }

    #[test]
    fn test_amount_applied_to_every_set_variant() {
        let index = CardIndex::new(vec![
            card("b1", "Lightning Bolt", "Magic 2010"),
            card("b2", "Lightning Bolt", "Masters 25"),
            card("b3", "Lightning Bolt", "Beta"),
        ]);
        let rows = resolve(&line(2, "Lightning Bolt"), &index);

        // 每個版本都帶完整數量，不會平均分配
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.amount == 2));
        assert_eq!(rows.iter().map(|r| r.amount).sum::<u32>(), 6);
    }
}
