use crate::core::checklist::Checklist;
use crate::core::grouper::{self, Grouping};
use crate::core::line_parser;
use crate::core::resolver::{self, CardIndex};
use crate::domain::model::{DeckCard, SortKey};
use crate::utils::error::Result;

/// Everything derived from one (deck text, card index, sort key) triple.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeckView {
    pub cards: Vec<DeckCard>,
    pub grouping: Grouping,
    pub checklist: Checklist,
}

impl DeckView {
    pub fn unresolved(&self) -> Vec<DeckCard> {
        grouper::unresolved(&self.cards)
    }

    pub fn is_group_complete(&self, group_key: &str) -> bool {
        self.checklist.is_group_complete(group_key, &self.grouping)
    }

    pub fn ordered_cards(&self, group_key: &str) -> Result<Vec<DeckCard>> {
        self.checklist.ordered_cards(group_key, &self.grouping)
    }
}

/// Parse and resolve every line of a deck list, in input order.
pub fn resolve_deck(deck_text: &str, index: &CardIndex) -> Vec<DeckCard> {
    line_parser::parse_deck(deck_text)
        .iter()
        .flat_map(|line| resolver::resolve(line, index))
        .collect()
}

/// Recompute the whole view from scratch.
pub fn build_view(deck_text: &str, index: &CardIndex, sort_key: SortKey) -> DeckView {
    let cards = resolve_deck(deck_text, index);
    let grouping = grouper::group(&cards, sort_key);
    let checklist = Checklist::build(&cards);

    tracing::debug!(
        "Built deck view: {} rows, {} groups by {}, {} unique cards",
        cards.len(),
        grouping.len(),
        sort_key,
        checklist.unique_card_count()
    );

    DeckView {
        cards,
        grouping,
        checklist,
    }
}

/// Single owner of the pipeline inputs and the current snapshot.
///
/// Every input change rebuilds before returning, so a toggle or query can
/// never observe a checklist from a previous deck.
#[derive(Debug, Clone, Default)]
pub struct DeckSession {
    deck_text: String,
    index: CardIndex,
    sort_key: SortKey,
    view: Option<DeckView>,
}

impl DeckSession {
    pub fn new(index: CardIndex, sort_key: SortKey) -> Self {
        Self {
            deck_text: String::new(),
            index,
            sort_key,
            view: None,
        }
    }

    pub fn is_built(&self) -> bool {
        self.view.is_some()
    }

    pub fn deck_text(&self) -> &str {
        &self.deck_text
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn set_deck_text(&mut self, deck_text: impl Into<String>) -> &DeckView {
        self.deck_text = deck_text.into();
        self.rebuild()
    }

    pub fn set_card_index(&mut self, index: CardIndex) -> &DeckView {
        self.index = index;
        self.rebuild()
    }

    /// Regroup under a new key. The resolved cards are unchanged, so the
    /// checklist keeps its flags.
    pub fn set_sort_key(&mut self, sort_key: SortKey) -> &DeckView {
        self.sort_key = sort_key;
        if let Some(view) = self.view.as_mut() {
            view.grouping = grouper::group(&view.cards, sort_key);
        }
        self.view()
    }

    pub fn rebuild(&mut self) -> &DeckView {
        let view = build_view(&self.deck_text, &self.index, self.sort_key);
        tracing::info!(
            "🔄 Checklist rebuilt: {} unique cards, {} copies to find",
            view.checklist.unique_card_count(),
            view.checklist.incomplete_count()
        );
        self.view.insert(view)
    }

    /// Current snapshot, building it first if nothing has been built yet.
    pub fn view(&mut self) -> &DeckView {
        if self.view.is_none() {
            self.rebuild();
        }
        self.view.get_or_insert_with(DeckView::default)
    }

    pub fn toggle(&mut self, name: &str, index: usize) -> Result<bool> {
        if self.view.is_none() {
            self.rebuild();
        }
        self.view
            .get_or_insert_with(DeckView::default)
            .checklist
            .toggle(name, index)
    }
}
