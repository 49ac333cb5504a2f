use std::collections::HashSet;

use super::domain::Entry;

/// Keeps the first entry seen for each identity and drops later ones unchanged.
///
/// "First comment wins": a later, more complete comment from the same person never
/// replaces the earlier one.
pub fn dedupe(entries: Vec<Entry>) -> Vec<Entry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.id.clone()))
        .collect()
}
