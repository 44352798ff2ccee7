//! Case-insensitive free-text search.

/// A record that can be matched by free-text search.
pub trait Searchable {
    /// Fields checked by [`matches`], in order.
    fn search_fields(&self) -> Vec<&str>;
}

/// True when any search field contains `term`, ignoring case.
///
/// An empty or whitespace-only term matches everything. Otherwise the term
/// is matched as typed, surrounding spaces included.
pub fn matches<T: Searchable + ?Sized>(item: &T, term: &str) -> bool {
    if term.trim().is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

pub fn search<T: Searchable + Clone>(items: &[T], term: &str) -> Vec<T> {
    if term.trim().is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| matches(*item, term))
        .cloned()
        .collect()
}
