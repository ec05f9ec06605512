//! Acquisition progress for a resolved deck.
//!
//! A [`Checklist`] holds one flag per requested copy of each distinct card
//! name. It is always built from scratch for a resolved card list; flags
//! never survive a rebuild.

use crate::core::grouper::Grouping;
use crate::domain::model::DeckCard;
use crate::utils::error::{DeckError, Result};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checklist {
    entries: HashMap<String, Vec<bool>>,
    incomplete: usize,
}

impl Checklist {
    /// One all-false flag array per distinct name, sized by the first amount seen.
    pub fn build(cards: &[DeckCard]) -> Self {
        let mut entries: HashMap<String, Vec<bool>> = HashMap::new();
        for card in cards {
            entries
                .entry(card.name().to_string())
                .or_insert_with(|| vec![false; card.amount as usize]);
        }

        let mut checklist = Self {
            entries,
            incomplete: 0,
        };
        checklist.recalculate_incomplete();
        checklist
    }

    /// Flip copy `index` of `name`, returning the new flag value.
    ///
    /// An unknown name or out of range index leaves the checklist untouched.
    pub fn toggle(&mut self, name: &str, index: usize) -> Result<bool> {
        let flags = self
            .entries
            .get_mut(name)
            .ok_or_else(|| DeckError::UnknownCard {
                name: name.to_string(),
            })?;
        let len = flags.len();
        let flag = flags.get_mut(index).ok_or_else(|| DeckError::FlagOutOfRange {
            name: name.to_string(),
            index,
            len,
        })?;
        *flag = !*flag;
        let value = *flag;

        self.recalculate_incomplete();
        Ok(value)
    }

    pub fn flags(&self, name: &str) -> Option<&[bool]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn unique_card_count(&self) -> usize {
        self.entries.len()
    }

    pub fn incomplete_count(&self) -> usize {
        self.incomplete
    }

    pub fn total_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_card_complete(&self, name: &str) -> bool {
        self.entries
            .get(name)
            .is_some_and(|flags| flags.iter().all(|&owned| owned))
    }

    /// True when every copy of every card in the group is checked off.
    ///
    /// Unknown groups and cards missing from the checklist count as incomplete.
    pub fn is_group_complete(&self, group_key: &str, grouping: &Grouping) -> bool {
        grouping
            .get(group_key)
            .is_some_and(|cards| cards.iter().all(|card| self.is_card_complete(card.name())))
    }

    /// The group's cards, most copies needed first. Ties keep bucket order.
    pub fn ordered_cards(&self, group_key: &str, grouping: &Grouping) -> Result<Vec<DeckCard>> {
        let mut cards = grouping
            .get(group_key)
            .ok_or_else(|| DeckError::UnknownGroup {
                key: group_key.to_string(),
            })?
            .to_vec();
        cards.sort_by_key(|card| {
            std::cmp::Reverse(self.flags(card.name()).map_or(0, <[bool]>::len))
        });
        Ok(cards)
    }

    fn recalculate_incomplete(&mut self) {
        self.incomplete = self
            .entries
            .values()
            .flatten()
            .filter(|&&owned| !owned)
            .count();
    }
}
