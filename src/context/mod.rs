//! Single-entry context blocks for downstream document generators.
//!
//! Formats the best-matching catalog entry as a context block with XML-tagged
//! prerequisite/product lists. Unlike composition, this path prefers
//! returning a near-miss over returning nothing, so a filtered miss falls
//! back to an unfiltered search.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogEntry, ComplexityLevel};
use crate::retrieval::Retriever;

/// Characters of description carried into the architecture summary
const SUMMARY_CHARS: usize = 2000;

/// Formatted context for one matched catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextBlock {
    pub catalog_item_id: String,
    pub solution_name: String,
    pub solution_area: String,
    pub complexity_level: ComplexityLevel,
    /// Compacted description
    pub architecture_summary: String,
    /// `<prerequisites><item>..</item></prerequisites>` formatted
    pub prerequisites_xml: String,
    /// `<products><item>..</item></products>` formatted
    pub products_xml: String,
    /// Present iff the entry carries the responsible-AI flag
    pub rai_disclaimer: Option<String>,
    pub repository_url: String,
}

/// Fetches and formats context blocks from the catalog
pub struct ContextProvider {
    retriever: Retriever,
}

impl ContextProvider {
    /// Create a provider over a retriever
    pub fn new(retriever: Retriever) -> Self {
        Self { retriever }
    }

    /// Best-match context block for a scenario title.
    ///
    /// Filters are preferences here, not constraints: when the filtered
    /// search finds nothing the provider retries unfiltered. `None` means
    /// nothing in the catalog matched the title at all.
    pub fn fetch(
        &self,
        title: &str,
        area: Option<&str>,
        complexity: Option<&str>,
    ) -> Option<ContextBlock> {
        let (entry, _score) = self.retriever.best_match(title, area, complexity)?;
        Some(Self::format_block(entry))
    }

    fn format_block(entry: &CatalogEntry) -> ContextBlock {
        ContextBlock {
            catalog_item_id: entry.id.clone(),
            solution_name: entry.name.clone(),
            solution_area: entry.solution_area.clone(),
            complexity_level: entry.technical_complexity,
            architecture_summary: entry.summary(SUMMARY_CHARS),
            prerequisites_xml: format_items_xml("prerequisites", &entry.prerequisites),
            products_xml: format_items_xml("products", &entry.products_and_services),
            rai_disclaimer: entry
                .responsible_ai_flag
                .then(|| SINGLE_RAI_DISCLAIMER.to_string()),
            repository_url: entry.repository_url.clone(),
        }
    }
}

/// Governance disclaimer attached to single generative-AI solutions
const SINGLE_RAI_DISCLAIMER: &str = "This solution includes generative AI/LLM components. \
The following governance practices are required:\n\
- Enable monitoring for model outputs\n\
- Implement human review workflows\n\
- Document AI capabilities and limitations\n\
- Set up audit logging and tracking";

/// Wrap items in `<tag><item>..</item></tag>`; empty lists produce an empty
/// container element rather than omitting the tag.
fn format_items_xml(tag: &str, items: &[String]) -> String {
    if items.is_empty() {
        return format!("<{tag}></{tag}>");
    }
    let body: String = items
        .iter()
        .map(|item| format!("<item>{item}</item>"))
        .collect();
    format!("<{tag}>{body}</{tag}>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::CatalogSnapshot;

    fn entry(id: &str, area: &str, text: &str, rai: bool) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            name: id.to_string(),
            description: text.to_string(),
            solution_area: area.to_string(),
            technical_complexity: ComplexityLevel::L300,
            repository_url: format!("https://github.com/example/{id}"),
            products_and_services: vec!["Azure OpenAI".to_string(), "AI Search".to_string()],
            use_cases: Vec::new(),
            languages: Vec::new(),
            prerequisites: vec!["Azure subscription".to_string()],
            responsible_ai_flag: rai,
            delivery_readiness: String::new(),
            deployment_type: String::new(),
        }
    }

    fn provider() -> ContextProvider {
        let snapshot = CatalogSnapshot::from_entries(vec![
            entry("a1", "AI", "multi-agent automation", true),
            entry("a2", "Data", "unified data fabric", false),
        ])
        .unwrap();
        ContextProvider::new(Retriever::new(snapshot))
    }

    #[test]
    fn test_fetch_formats_block() {
        let block = provider().fetch("automation", Some("AI"), None).unwrap();
        assert_eq!(block.catalog_item_id, "a1");
        assert_eq!(
            block.prerequisites_xml,
            "<prerequisites><item>Azure subscription</item></prerequisites>"
        );
        assert_eq!(
            block.products_xml,
            "<products><item>Azure OpenAI</item><item>AI Search</item></products>"
        );
        assert!(block.repository_url.ends_with("/a1"));
    }

    #[test]
    fn test_fetch_falls_back_when_filter_misses() {
        // No Data entry matches "automation"; the provider retries unfiltered
        let block = provider().fetch("automation", Some("Data"), None).unwrap();
        assert_eq!(block.catalog_item_id, "a1");
    }

    #[test]
    fn test_fetch_none_when_nothing_matches() {
        assert!(provider().fetch("zzzz", None, None).is_none());
    }

    #[test]
    fn test_rai_disclaimer_present_iff_flagged() {
        let p = provider();
        let flagged = p.fetch("automation", None, None).unwrap();
        assert!(flagged.rai_disclaimer.is_some());

        let unflagged = p.fetch("fabric", None, None).unwrap();
        assert!(unflagged.rai_disclaimer.is_none());
    }

    #[test]
    fn test_empty_lists_produce_empty_elements() {
        assert_eq!(format_items_xml("prerequisites", &[]), "<prerequisites></prerequisites>");
        assert_eq!(format_items_xml("products", &[]), "<products></products>");
    }
}
