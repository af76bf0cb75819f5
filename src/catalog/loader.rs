//! Catalog file loading.
//!
//! Loading from disk is a one-time startup step; nothing in the search or
//! compose path touches the filesystem. Schema validation beyond the typed
//! fields is the loader's job, so a document missing required fields is
//! rejected here, before ingestion.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::catalog::model::CatalogFile;
use crate::catalog::store::CatalogStore;

/// Parse a catalog JSON document
pub fn parse_catalog(contents: &str) -> Result<CatalogFile> {
    serde_json::from_str(contents).context("Failed to parse catalog document")
}

/// Load a catalog file from disk and build the store
pub fn load_catalog(path: &Path) -> Result<(CatalogFile, CatalogStore)> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;

    let catalog = parse_catalog(&contents)?;
    let store = CatalogStore::from_entries(catalog.solution_accelerators.clone())
        .context("Failed to build catalog store")?;

    Ok((catalog, store))
}
