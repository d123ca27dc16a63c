//! Content search and label helpers

use crate::filter::WorkingSet;

/// Posts whose content contains `term`, ignoring case.
///
/// An absent or blank term returns the working set unchanged. Any other
/// term is matched as typed, surrounding whitespace included.
pub fn search_content<'a>(ws: &WorkingSet<'a>, term: Option<&str>) -> WorkingSet<'a> {
    let needle = match term {
        Some(t) if !t.trim().is_empty() => t.to_lowercase(),
        _ => return ws.clone(),
    };

    WorkingSet::from_posts(
        ws.iter()
            .filter(|p| p.content.to_lowercase().contains(&needle))
            .collect(),
    )
}

/// Shorten `text` to `max` characters, marking the cut with `...`
pub fn truncate_label(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
