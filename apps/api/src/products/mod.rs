//! Product Store — the list of known product names used for autocomplete.
//!
//! Names are unique case-insensitively and keep insertion order. There is no
//! delete. `AppState` holds an `Arc<dyn ProductStore>`; `FileProductStore`
//! persists to disk, `MemoryProductStore` backs tests.

use async_trait::async_trait;
use thiserror::Error;

pub mod file;
pub mod handlers;
#[cfg(test)]
pub mod memory;

pub use file::FileProductStore;
#[cfg(test)]
pub use memory::MemoryProductStore;

/// Maximum number of suggestions returned by `search`.
pub const MAX_SUGGESTIONS: usize = 5;

/// Seed list written on first run.
pub const DEFAULT_PRODUCTS: &[&str] = &[
    "Miracle-Gro All Purpose Plant Food",
    "Scotts Turf Builder Weed & Feed",
    "Roundup Weed Killer",
    "Espoma Organic Plant Tone",
    "Neem Oil Insecticide",
    "Bonide Copper Fungicide",
    "Jobe’s Organics Fertilizer Spikes",
    "Sevin Garden Dust",
    "Compost",
    "Peat Moss",
    "Organic Potting Mix",
];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("product name is empty")]
    InvalidName,

    #[error("product '{0}' already exists")]
    Duplicate(String),

    #[error("failed to read product list: {0}")]
    Load(#[source] std::io::Error),

    #[error("product list is not a JSON array of strings: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("failed to persist product list: {0}")]
    Persist(#[source] std::io::Error),
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Case-insensitive substring match, at most `MAX_SUGGESTIONS` results in store order.
    /// An empty query matches nothing.
    async fn search(&self, query: &str) -> Vec<String>;

    /// Appends `name` (trimmed) unless an equal name exists ignoring case.
    async fn add(&self, name: &str) -> Result<String, StoreError>;
}

pub(crate) fn search_entries(entries: &[String], query: &str) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    entries
        .iter()
        .filter(|e| e.to_lowercase().contains(&query))
        .take(MAX_SUGGESTIONS)
        .cloned()
        .collect()
}

/// Validates `name` against `entries`, returning the trimmed name to append.
pub(crate) fn check_new_name(entries: &[String], name: &str) -> Result<String, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::InvalidName);
    }
    let lowered = name.to_lowercase();
    if entries.iter().any(|e| e.to_lowercase() == lowered) {
        return Err(StoreError::Duplicate(name.to_string()));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Vec<String> {
        DEFAULT_PRODUCTS.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_search_empty_query_returns_nothing() {
        assert!(search_entries(&defaults(), "").is_empty());
        assert!(search_entries(&defaults(), "   ").is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        assert_eq!(search_entries(&defaults(), "neem"), vec!["Neem Oil Insecticide"]);
        assert_eq!(search_entries(&defaults(), "WEED"), vec![
            "Scotts Turf Builder Weed & Feed",
            "Roundup Weed Killer",
        ]);
    }

    #[test]
    fn test_search_caps_results_and_keeps_order() {
        // "o" occurs in most default names.
        let results = search_entries(&defaults(), "o");
        assert_eq!(results.len(), MAX_SUGGESTIONS);
        assert_eq!(results[0], "Miracle-Gro All Purpose Plant Food");
        assert_eq!(results[1], "Scotts Turf Builder Weed & Feed");
    }

    #[test]
    fn test_check_new_name_rejects_duplicates_any_case() {
        let err = check_new_name(&defaults(), "COMPOST").unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(name) if name == "COMPOST"));
    }

    #[test]
    fn test_check_new_name_trims_and_rejects_blank() {
        assert!(matches!(check_new_name(&[], "  "), Err(StoreError::InvalidName)));
        assert_eq!(check_new_name(&[], "  Blood Meal ").unwrap(), "Blood Meal");
    }
}
