use crate::core::resolver::UNFOUND;
use crate::domain::model::{DeckCard, SortKey};
use std::collections::{HashMap, HashSet};

pub const COLORLESS: &str = "Colorless";

/// Resolved cards bucketed under one [`SortKey`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grouping {
    pub sort_key: SortKey,
    groups: HashMap<String, Vec<DeckCard>>,
    keys: Vec<String>,
}

impl Grouping {
    /// Group keys in lexicographic order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn get(&self, key: &str) -> Option<&[DeckCard]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DeckCard])> {
        self.keys
            .iter()
            .map(move |key| (key.as_str(), self.groups[key].as_slice()))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

pub fn group_key(card: &DeckCard, sort_key: SortKey) -> String {
    match sort_key {
        SortKey::Set => card.set().to_string(),
        SortKey::Rarity => card.rarity().to_string(),
        SortKey::Type => card.card_type().to_string(),
        SortKey::Color => {
            let joined = card.colors().concat();
            if joined.is_empty() {
                COLORLESS.to_string()
            } else {
                joined
            }
        }
    }
}

/// Group cards by `sort_key`.
///
/// `Set` keeps every set variant in its own bucket; the other keys collapse
/// reprints so each card name appears once.
pub fn group(cards: &[DeckCard], sort_key: SortKey) -> Grouping {
    let rows: Vec<&DeckCard> = match sort_key {
        SortKey::Set => cards.iter().collect(),
        SortKey::Color | SortKey::Rarity | SortKey::Type => {
            let mut seen_names = HashSet::new();
            cards
                .iter()
                .filter(|card| seen_names.insert(card.name()))
                .collect()
        }
    };

    let mut groups: HashMap<String, Vec<DeckCard>> = HashMap::new();
    for card in rows {
        groups
            .entry(group_key(card, sort_key))
            .or_default()
            .push(card.clone());
    }

    let mut keys: Vec<String> = groups.keys().cloned().collect();
    keys.sort();

    Grouping {
        sort_key,
        groups,
        keys,
    }
}

/// Rows whose name could not be resolved against the card index.
pub fn unresolved(cards: &[DeckCard]) -> Vec<DeckCard> {
    cards
        .iter()
        .filter(|card| card.set() == UNFOUND)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Card;

    fn deck_card(id: &str, name: &str, set: &str, colors: &[&str], amount: u32) -> DeckCard {
        DeckCard::new(
            Card {
                id: id.to_string(),
                colors: colors.iter().map(|c| c.to_string()).collect(),
                name: name.to_string(),
                set: set.to_string(),
                rarity: "rare".to_string(),
                r#type: "Creature".to_string(),
            },
            amount,
        )
    }

    fn sample() -> Vec<DeckCard> {
        vec![
            deck_card("b1", "Lightning Bolt", "Magic 2010", &["R"], 2),
            deck_card("b2", "Lightning Bolt", "Masters 25", &["R"], 2),
            deck_card("b3", "Lightning Bolt", "Beta", &["R"], 2),
            deck_card("g1", "Boros Charm", "Gatecrash", &["R", "W"], 1),
            deck_card("s1", "Sol Ring", "Beta", &[], 1),
        ]
    }

    #[test]
    fn test_set_grouping_keeps_every_variant() {
        let grouping = group(&sample(), SortKey::Set);

        assert_eq!(
            grouping.keys(),
            &["Beta", "Gatecrash", "Magic 2010", "Masters 25"]
        );
        let beta: Vec<&str> = grouping.get("Beta").unwrap().iter().map(|c| c.id()).collect();
        assert_eq!(beta, vec!["b3", "s1"]);
        assert_eq!(grouping.get("Masters 25").unwrap()[0].amount, 2);
    }

    #[test]
    fn test_color_grouping_dedupes_by_name() {
        let grouping = group(&sample(), SortKey::Color);

        assert_eq!(grouping.keys(), &["Colorless", "R", "RW"]);
        let red = grouping.get("R").unwrap();
        assert_eq!(red.len(), 1);
        assert_eq!(red[0].id(), "b1");
    }

    #[test]
    fn test_rarity_and_type_grouping_collapse_reprints() {
        let rarity = group(&sample(), SortKey::Rarity);
        assert_eq!(rarity.keys(), &["rare"]);
        assert_eq!(rarity.get("rare").unwrap().len(), 3);

        let types = group(&sample(), SortKey::Type);
        assert_eq!(types.keys(), &["Creature"]);
        assert_eq!(types.get("Creature").unwrap().len(), 3);
    }

    #[test]
    fn test_iter_follows_sorted_keys() {
        let grouping = group(&sample(), SortKey::Set);
        let keys: Vec<&str> = grouping.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["Beta", "Gatecrash", "Magic 2010", "Masters 25"]);
    }

    #[test]
    fn test_empty_input_has_no_groups() {
        let grouping = group(&[], SortKey::Color);
        assert!(grouping.is_empty());
        assert!(grouping.get("Colorless").is_none());
    }

    #[test]
    fn test_unresolved_selects_unfound_rows() {
        let mut cards = sample();
        cards.push(deck_card("Tarmogoyf", "Tarmogoyf", "Unfound", &[], 4));

        let missing = unresolved(&cards);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].name(), "Tarmogoyf");
    }
}
