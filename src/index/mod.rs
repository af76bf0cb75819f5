// Inverted token index and metadata indices over a catalog store
//
// Built once per catalog load; a catalog change means building a fresh index,
// never an incremental update. The snapshot (store + index) is immutable, so
// concurrent readers need no locking; an embedding server swaps the Arc to
// replace it.

pub mod tokenizer;

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::catalog::store::CatalogStore;
use crate::catalog::CatalogEntry;
use crate::errors::Result;

pub use tokenizer::tokenize;

/// Token and metadata indices keyed by catalog insertion position
#[derive(Debug, Default)]
pub struct TextIndex {
    /// token -> ordered set of entry positions containing it
    postings: HashMap<String, BTreeSet<usize>>,
    /// exact solution_area -> entry positions, insertion order
    area_index: HashMap<String, Vec<usize>>,
    /// exact complexity label -> entry positions, insertion order
    complexity_index: HashMap<String, Vec<usize>>,
    entry_count: usize,
}

impl TextIndex {
    /// Build the index over every entry in the store.
    ///
    /// Idempotent for a fixed store; the result fully replaces any previous
    /// index. An entry whose text yields no tokens gets no postings and is
    /// reachable only through [`TextIndex::unranked`].
    pub fn build(store: &CatalogStore) -> Self {
        let mut index = TextIndex::default();
        index.entry_count = store.len();

        for (position, entry) in store.iter().enumerate() {
            for token in tokenize(&entry.search_text()) {
                index.postings.entry(token).or_default().insert(position);
            }
            index
                .area_index
                .entry(entry.solution_area.clone())
                .or_default()
                .push(position);
            index
                .complexity_index
                .entry(entry.technical_complexity.as_str().to_string())
                .or_default()
                .push(position);
        }

        index
    }

    /// Posting list for a token, if any entry contains it
    pub fn postings(&self, token: &str) -> Option<&BTreeSet<usize>> {
        self.postings.get(token)
    }

    /// Number of distinct indexed tokens
    pub fn token_count(&self) -> usize {
        self.postings.len()
    }

    /// Number of indexed entries
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Candidate positions allowed by the metadata filters.
    ///
    /// `None` means unconstrained (no filter supplied). A filter value that
    /// matches no entries degenerates to an empty set, not an error.
    pub fn filter_candidates(
        &self,
        area: Option<&str>,
        complexity: Option<&str>,
    ) -> Option<BTreeSet<usize>> {
        let area_set = area.map(|value| {
            self.area_index
                .get(value)
                .map(|positions| positions.iter().copied().collect::<BTreeSet<usize>>())
                .unwrap_or_default()
        });
        let complexity_set = complexity.map(|value| {
            self.complexity_index
                .get(value)
                .map(|positions| positions.iter().copied().collect::<BTreeSet<usize>>())
                .unwrap_or_default()
        });

        match (area_set, complexity_set) {
            (None, None) => None,
            (Some(set), None) | (None, Some(set)) => Some(set),
            (Some(a), Some(c)) => Some(a.intersection(&c).copied().collect()),
        }
    }

    /// Unranked listing of positions matching the metadata filters, in
    /// catalog insertion order. This is the explicit path for entries whose
    /// text produced no postings.
    pub fn unranked(&self, area: Option<&str>, complexity: Option<&str>) -> Vec<usize> {
        match self.filter_candidates(area, complexity) {
            // BTreeSet iterates ascending, which is insertion order here
            Some(candidates) => candidates.into_iter().collect(),
            None => (0..self.entry_count).collect(),
        }
    }

    /// Solution areas present in the catalog, sorted
    pub fn known_areas(&self) -> Vec<&str> {
        let mut areas: Vec<&str> = self.area_index.keys().map(String::as_str).collect();
        areas.sort_unstable();
        areas
    }
}

/// Immutable catalog-plus-index snapshot shared by the engines.
///
/// Rebuilding after a catalog change means constructing a new snapshot and
/// swapping the `Arc` at the owner; in-flight readers keep the old one.
#[derive(Debug)]
pub struct CatalogSnapshot {
    store: CatalogStore,
    index: TextIndex,
}

impl CatalogSnapshot {
    /// Build a snapshot from an already-validated store
    pub fn build(store: CatalogStore) -> Self {
        let index = TextIndex::build(&store);
        Self { store, index }
    }

    /// Build a snapshot straight from loaded entries
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Arc<Self>> {
        let store = CatalogStore::from_entries(entries)?;
        Ok(Arc::new(Self::build(store)))
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn index(&self) -> &TextIndex {
        &self.index
    }
}
