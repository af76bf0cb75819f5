//! Catalog data model.
//!
//! Mirrors the catalog JSON document: a metadata header plus an ordered list
//! of solution accelerators. Entries are plain records with explicit defaults
//! for the optional fields; they are never mutated after ingestion.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Technical complexity on the L-scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComplexityLevel {
    L200,
    L300,
    L400,
}

impl ComplexityLevel {
    /// String form used in catalog files and filter values
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityLevel::L200 => "L200",
            ComplexityLevel::L300 => "L300",
            ComplexityLevel::L400 => "L400",
        }
    }
}

impl std::fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One retrievable solution accelerator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique identifier, stable across runs
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-text description (typically the repository README summary)
    pub description: String,
    /// Coarse category label used for filtering (e.g. "AI", "Data & Analytics")
    pub solution_area: String,
    /// L-scale complexity
    pub technical_complexity: ComplexityLevel,
    /// Source repository; empty string when unknown
    #[serde(default)]
    pub repository_url: String,
    /// Azure/Microsoft services referenced by the solution
    #[serde(default)]
    pub products_and_services: Vec<String>,
    /// Scenario descriptions the solution targets
    #[serde(default)]
    pub use_cases: Vec<String>,
    /// Programming languages present in the repository
    #[serde(default)]
    pub languages: Vec<String>,
    /// Deployment prerequisites
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// True when the entry involves generative-AI components and must carry
    /// a governance disclaimer downstream
    #[serde(rename = "responsible_ai_tag", default)]
    pub responsible_ai_flag: bool,
    #[serde(default)]
    pub delivery_readiness: String,
    #[serde(default)]
    pub deployment_type: String,
}

impl CatalogEntry {
    /// Concatenated text blob the index tokenizes.
    ///
    /// Name, description, solution area, and the joined service/use-case
    /// lists, in that order.
    pub fn search_text(&self) -> String {
        format!(
            "{}. {}. {}. {} {}",
            self.name,
            self.description,
            self.solution_area,
            self.products_and_services.join(" "),
            self.use_cases.join(" "),
        )
    }

    /// Description truncated to at most `max_chars` characters
    pub fn summary(&self, max_chars: usize) -> String {
        if self.description.chars().count() <= max_chars {
            self.description.clone()
        } else {
            self.description.chars().take(max_chars).collect()
        }
    }
}

/// Metadata header of the catalog document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogMetadata {
    pub version: String,
    pub last_updated: NaiveDate,
    pub authoritative_source: String,
    #[serde(default)]
    pub governance_standard: String,
}

/// Root catalog document as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub catalog_metadata: CatalogMetadata,
    pub solution_accelerators: Vec<CatalogEntry>,
}
