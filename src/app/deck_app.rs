use crate::adapters::preferences::{
    self, HIDE_COMPLETE, PREVIOUS_DECK, SHOW_DECK, SORT, TOTAL_CARDS, UPDATED_AT,
};
use crate::core::pipeline::{DeckSession, DeckView};
use crate::core::resolver::CardIndex;
use crate::core::{CardDownload, DeckCard, Preferences, SortKey};
use crate::utils::error::Result;

/// Application state around a [`DeckSession`], backed by a preferences store.
pub struct DeckApp<P: Preferences> {
    prefs: P,
    session: DeckSession,
    show_deck: bool,
    hide_complete: bool,
    updated_at: String,
    total_cards: usize,
}

/// One group as it should be displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupView {
    pub key: String,
    pub complete: bool,
    pub cards: Vec<DeckCard>,
}

impl<P: Preferences> DeckApp<P> {
    /// Restore the last session from `prefs`. Missing values get defaults:
    /// deck shown, complete groups hidden, `default_sort` ordering.
    pub fn restore(prefs: P, index: CardIndex, default_sort: SortKey) -> Self {
        let sort_key = match prefs.get(SORT) {
            Some(value) => value.parse::<SortKey>().unwrap_or_else(|e| {
                tracing::warn!("Ignoring stored sort preference: {}", e);
                default_sort
            }),
            None => default_sort,
        };
        let show_deck = preferences::get_flag(&prefs, SHOW_DECK, true);
        let hide_complete = preferences::get_flag(&prefs, HIDE_COMPLETE, true);
        let updated_at = prefs.get(UPDATED_AT).unwrap_or_default();
        let total_cards = prefs
            .get(TOTAL_CARDS)
            .and_then(|value| value.parse().ok())
            .unwrap_or(0);

        let mut session = DeckSession::new(index, sort_key);
        session.set_deck_text(prefs.get(PREVIOUS_DECK).unwrap_or_default());

        Self {
            prefs,
            session,
            show_deck,
            hide_complete,
            updated_at,
            total_cards,
        }
    }

    pub fn view(&mut self) -> &DeckView {
        self.session.view()
    }

    pub fn preferences(&self) -> &P {
        &self.prefs
    }

    pub fn deck_text(&self) -> &str {
        self.session.deck_text()
    }

    pub fn sort_key(&self) -> SortKey {
        self.session.sort_key()
    }

    pub fn show_deck(&self) -> bool {
        self.show_deck
    }

    pub fn hide_complete(&self) -> bool {
        self.hide_complete
    }

    pub fn updated_at(&self) -> &str {
        &self.updated_at
    }

    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    /// Store the deck text and rebuild the checklist.
    pub fn set_deck(&mut self, deck_text: &str) -> Result<&DeckView> {
        self.prefs.set(PREVIOUS_DECK, deck_text)?;
        Ok(self.session.set_deck_text(deck_text))
    }

    pub fn set_sort(&mut self, sort_key: SortKey) -> Result<&DeckView> {
        self.prefs.set(SORT, sort_key.as_str())?;
        Ok(self.session.set_sort_key(sort_key))
    }

    /// Record a fresh download and swap in its card index.
    pub fn apply_download(&mut self, download: CardDownload) -> Result<&DeckView> {
        self.updated_at = download.updated_at.to_rfc3339();
        self.total_cards = download.total_cards();
        self.prefs.set(UPDATED_AT, &self.updated_at)?;
        self.prefs.set(TOTAL_CARDS, &self.total_cards.to_string())?;
        Ok(self.session.set_card_index(CardIndex::new(download.cards)))
    }

    pub fn toggle_deck_box(&mut self) -> Result<bool> {
        self.show_deck = !self.show_deck;
        preferences::set_flag(&mut self.prefs, SHOW_DECK, self.show_deck)?;
        Ok(self.show_deck)
    }

    pub fn toggle_hide_complete(&mut self) -> Result<bool> {
        self.hide_complete = !self.hide_complete;
        preferences::set_flag(&mut self.prefs, HIDE_COMPLETE, self.hide_complete)?;
        Ok(self.hide_complete)
    }

    /// An empty deck always shows the deck box so there is somewhere to paste.
    pub fn should_show_deck(&self) -> bool {
        if self.session.deck_text().is_empty() {
            return true;
        }
        self.show_deck
    }

    pub fn toggle_card(&mut self, name: &str, index: usize) -> Result<bool> {
        self.session.toggle(name, index)
    }

    /// Groups in key order, most-needed cards first, skipping complete
    /// groups when `hide-complete` is on.
    pub fn visible_groups(&mut self) -> Vec<GroupView> {
        let hide_complete = self.hide_complete;
        let view = self.session.view();

        view.grouping
            .keys()
            .iter()
            .filter_map(|key| {
                let complete = view.is_group_complete(key);
                if hide_complete && complete {
                    return None;
                }
                let cards = view.ordered_cards(key).ok()?;
                Some(GroupView {
                    key: key.clone(),
                    complete,
                    cards,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryPreferences;
    use crate::core::Card;
    use chrono::{TimeZone, Utc};

    fn card(id: &str, name: &str, set: &str) -> Card {
        Card {
            id: id.to_string(),
            colors: vec!["B".to_string()],
            name: name.to_string(),
            set: set.to_string(),
            rarity: "common".to_string(),
            r#type: "Sorcery".to_string(),
        }
    }

    fn index() -> CardIndex {
        CardIndex::new(vec![
            card("d1", "Duress", "Core Set 2019"),
            card("t1", "Thoughtseize", "Lorwyn"),
        ])
    }

    #[test]
    fn test_restore_defaults_from_empty_preferences() {
        let app = DeckApp::restore(MemoryPreferences::new(), index(), SortKey::Set);

        assert_eq!(app.deck_text(), "");
        assert_eq!(app.sort_key(), SortKey::Set);
        assert!(app.show_deck());
        assert!(app.hide_complete());
        assert!(app.should_show_deck());
        assert_eq!(app.total_cards(), 0);
    }

    #[test]
    fn test_restore_reads_saved_state() {
        let mut prefs = MemoryPreferences::new();
        prefs.set(PREVIOUS_DECK, "1 Duress\n2 Thoughtseize").unwrap();
        prefs.set(SORT, "Color").unwrap();
        prefs.set(SHOW_DECK, "0").unwrap();
        prefs.set(TOTAL_CARDS, "90000").unwrap();

        let mut app = DeckApp::restore(prefs, index(), SortKey::Set);

        assert_eq!(app.sort_key(), SortKey::Color);
        assert!(!app.should_show_deck());
        assert_eq!(app.total_cards(), 90000);
        assert_eq!(app.view().checklist.incomplete_count(), 3);
        assert_eq!(app.view().grouping.keys(), &["B"]);
    }

    #[test]
    fn test_unknown_stored_sort_falls_back() {
        let mut prefs = MemoryPreferences::new();
        prefs.set(SORT, "Price").unwrap();
        let app = DeckApp::restore(prefs, index(), SortKey::Rarity);
        assert_eq!(app.sort_key(), SortKey::Rarity);
    }

    #[test]
    fn test_set_deck_and_sort_are_persisted() {
        let mut app = DeckApp::restore(MemoryPreferences::new(), index(), SortKey::Set);

        app.set_deck("4 Duress").unwrap();
        app.set_sort(SortKey::Type).unwrap();

        assert_eq!(app.preferences().get(PREVIOUS_DECK).as_deref(), Some("4 Duress"));
        assert_eq!(app.preferences().get(SORT).as_deref(), Some("Type"));
        assert_eq!(app.view().grouping.keys(), &["Sorcery"]);
    }

    #[test]
    fn test_toggles_are_persisted() {
        let mut app = DeckApp::restore(MemoryPreferences::new(), index(), SortKey::Set);

        assert!(!app.toggle_deck_box().unwrap());
        assert!(!app.toggle_hide_complete().unwrap());
        assert_eq!(app.preferences().get(SHOW_DECK).as_deref(), Some("0"));
        assert_eq!(app.preferences().get(HIDE_COMPLETE).as_deref(), Some("0"));

        // 牌組為空時仍然顯示輸入框
        assert!(app.should_show_deck());
        app.set_deck("1 Duress").unwrap();
        assert!(!app.should_show_deck());
    }

    #[test]
    fn test_visible_groups_hide_complete_ones() {
        let mut app = DeckApp::restore(MemoryPreferences::new(), index(), SortKey::Set);
        app.set_deck("1 Duress\n2 Thoughtseize").unwrap();

        assert_eq!(app.visible_groups().len(), 2);
        app.toggle_card("Duress", 0).unwrap();

        let groups = app.visible_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "Lorwyn");

        app.toggle_hide_complete().unwrap();
        let groups = app.visible_groups();
        assert_eq!(groups.len(), 2);
        assert!(groups[0].complete);
    }

    #[test]
    fn test_apply_download_records_metadata_and_resets_flags() {
        let mut app = DeckApp::restore(MemoryPreferences::new(), CardIndex::default(), SortKey::Set);
        app.set_deck("1 Duress").unwrap();
        assert_eq!(app.view().unresolved().len(), 1);
        app.toggle_card("Duress", 0).unwrap();

        let download = CardDownload {
            cards: vec![card("d1", "Duress", "Core Set 2019")],
            updated_at: Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap(),
        };
        let view = app.apply_download(download).unwrap();

        assert!(view.unresolved().is_empty());
        assert_eq!(view.checklist.incomplete_count(), 1);
        assert_eq!(app.total_cards(), 1);
        assert_eq!(app.updated_at(), "2024-05-02T09:00:00+00:00");
        assert_eq!(app.preferences().get(TOTAL_CARDS).as_deref(), Some("1"));
    }
}
