//! Insertion-ordered catalog store.
//!
//! The store is the immutable snapshot everything else works against. Entry
//! positions double as the tie-break key for search ranking, so insertion
//! order is preserved exactly as loaded.

use std::collections::HashMap;

use crate::catalog::model::CatalogEntry;
use crate::errors::{ForgeError, Result};

/// Fixed in-memory list of catalog entries with id lookup
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    entries: Vec<CatalogEntry>,
    by_id: HashMap<String, usize>,
}

impl CatalogStore {
    /// Build a store from loaded entries.
    ///
    /// Rejects duplicate ids; the id is the only cross-run-stable handle, so
    /// a collision means the catalog itself is malformed.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if by_id.insert(entry.id.clone(), position).is_some() {
                return Err(ForgeError::DuplicateEntry {
                    id: entry.id.clone(),
                });
            }
        }
        Ok(Self { entries, by_id })
    }

    /// Resolve an entry by id
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.by_id.get(id).map(|&position| &self.entries[position])
    }

    /// Insertion position of an entry id, if present
    pub fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Entry at an insertion position
    pub fn entry_at(&self, position: usize) -> Option<&CatalogEntry> {
        self.entries.get(position)
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::ComplexityLevel;
    use crate::errors::ForgeError;

    fn entry(id: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            solution_area: "AI".to_string(),
            technical_complexity: ComplexityLevel::L300,
            repository_url: String::new(),
            products_and_services: Vec::new(),
            use_cases: Vec::new(),
            languages: Vec::new(),
            prerequisites: Vec::new(),
            responsible_ai_flag: false,
            delivery_readiness: String::new(),
            deployment_type: String::new(),
        }
    }

    #[test]
    fn test_preserves_insertion_order() {
        let store = CatalogStore::from_entries(vec![entry("b"), entry("a"), entry("c")]).unwrap();
        let ids: Vec<&str> = store.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(store.position("a"), Some(1));
    }

    #[test]
    fn test_lookup_by_id() {
        let store = CatalogStore::from_entries(vec![entry("a"), entry("b")]).unwrap();
        assert_eq!(store.get("b").unwrap().id, "b");
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = CatalogStore::from_entries(vec![entry("a"), entry("a")]);
        assert!(matches!(
            result,
            Err(ForgeError::DuplicateEntry { id }) if id == "a"
        ));
    }

    #[test]
    fn test_empty_store() {
        let store = CatalogStore::from_entries(Vec::new()).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }
}
