use crate::domain::model::ParsedLine;

/// Largest quantity a single line may ask for. Larger lines are dropped,
/// since the checklist keeps one flag per copy.
pub const MAX_COPIES: u32 = 9_999;

/// Parse one deck list line such as `4x Lightning Bolt (M10) 146`.
///
/// Blank lines, lines without a name and lines whose quantity is not an
/// integer between 1 and [`MAX_COPIES`] yield `None`.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut tokens = line.split_whitespace();
    let quantity = tokens.next()?;
    let quantity = quantity.strip_suffix('x').unwrap_or(quantity);
    if quantity.is_empty() {
        return None;
    }
    let amount: u32 = quantity.parse().ok()?;
    if amount == 0 || amount > MAX_COPIES {
        tracing::debug!("Skipping line with quantity out of range: {:?}", line);
        return None;
    }

    let joined = tokens.collect::<Vec<_>>().join(" ");
    if joined.is_empty() {
        return None;
    }

    // 去掉 (SET) 編號 與 [標籤] 之類的附加資訊
    let cut = [joined.find('('), joined.find('[')]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(joined.len());
    let raw_name = joined[..cut].trim().to_string();

    Some(ParsedLine { amount, raw_name })
}

/// Parse every line of a deck list, silently skipping the ones that do not parse.
pub fn parse_deck(text: &str) -> Vec<ParsedLine> {
    text.lines().filter_map(parse_line).collect()
}
