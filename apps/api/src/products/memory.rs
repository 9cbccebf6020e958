use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{check_new_name, search_entries, ProductStore, StoreError};

/// Non-persistent store for tests.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    entries: RwLock<Vec<String>>,
}

impl MemoryProductStore {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: RwLock::new(entries.into_iter().map(Into::into).collect()),
        }
    }

    pub async fn snapshot(&self) -> Vec<String> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn search(&self, query: &str) -> Vec<String> {
        search_entries(&self.entries.read().await, query)
    }

    async fn add(&self, name: &str) -> Result<String, StoreError> {
        let mut entries = self.entries.write().await;
        let name = check_new_name(&entries, name)?;
        entries.push(name.clone());
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_duplicate_leaves_store_unchanged() {
        let store = MemoryProductStore::new(["compost", "Peat Moss"]);
        let err = store.add("Compost").await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(store.snapshot().await, vec!["compost", "Peat Moss"]);
    }

    #[tokio::test]
    async fn test_added_name_is_searchable() {
        let store = MemoryProductStore::new(["Peat Moss"]);
        assert_eq!(store.add("Blood Meal").await.unwrap(), "Blood Meal");
        assert_eq!(store.search("blood").await, vec!["Blood Meal"]);
    }
}
