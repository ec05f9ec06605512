use crate::core::grouper::group_key;
use crate::core::pipeline::DeckView;
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    group: String,
    name: &'a str,
    set: &'a str,
    rarity: &'a str,
    r#type: &'a str,
    colors: String,
    amount: u32,
    owned: usize,
}

/// Write one CSV row per resolved card, in group order.
///
/// `owned` counts the checked-off copies of that card name.
pub fn write_csv<W: Write>(view: &DeckView, writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for (key, _) in view.grouping.iter() {
        for card in view.ordered_cards(key)? {
            let owned = view
                .checklist
                .flags(card.name())
                .map_or(0, |flags| flags.iter().filter(|&&f| f).count());
            csv_writer.serialize(ExportRow {
                group: group_key(&card, view.grouping.sort_key),
                name: card.name(),
                set: card.set(),
                rarity: card.rarity(),
                r#type: card.card_type(),
                colors: card.colors().join(""),
                amount: card.amount,
                owned,
            })?;
            rows += 1;
        }
    }

    csv_writer.flush()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::build_view;
    use crate::core::resolver::CardIndex;
    use crate::core::{Card, SortKey};

    #[test]
    fn test_csv_has_header_and_group_ordered_rows() {
        let index = CardIndex::new(vec![Card {
            id: "b1".to_string(),
            colors: vec!["R".to_string()],
            name: "Lightning Bolt".to_string(),
            set: "Magic 2010".to_string(),
            rarity: "common".to_string(),
            r#type: "Instant".to_string(),
        }]);
        let mut view = build_view("4 Lightning Bolt\n1 Tarmogoyf\n2 Mountain", &index, SortKey::Set);
        view.checklist.toggle("Lightning Bolt", 0).unwrap();

        let mut buffer = Vec::new();
        let rows = write_csv(&view, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(rows, 3);
        assert_eq!(lines[0], "group,name,set,rarity,type,colors,amount,owned");
        assert_eq!(lines[1], "Basic Lands,Mountain,Basic Lands,basicland,Basic Land,,2,0");
        assert_eq!(lines[2], "Magic 2010,Lightning Bolt,Magic 2010,common,Instant,R,4,1");
        assert_eq!(lines[3], "Unfound,Tarmogoyf,Unfound,Unfound,Unfound,,1,0");
    }
}
