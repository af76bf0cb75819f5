//! Integration tests for composite lab synthesis and context blocks.
//!
//! Exercises the full pipeline over a three-area fixture catalog: strict
//! primary retrieval, secondary fill-in, architecture inference, and the
//! aggregate responsible-AI handling.

use std::sync::Arc;

use labforge::catalog::{parse_catalog, CatalogStore};
use labforge::compose::CompositeSynthesizer;
use labforge::context::ContextProvider;
use labforge::index::CatalogSnapshot;
use labforge::retrieval::Retriever;
use labforge::ForgeError;

const CATALOG: &str = r#"{
    "catalog_metadata": {
        "version": "1.0.0",
        "last_updated": "2026-01-20",
        "authoritative_source": "integration fixture"
    },
    "solution_accelerators": [
        {
            "id": "agent-automation",
            "name": "Multi-Agent Automation",
            "description": "Orchestrate AI agent pipelines for document automation",
            "solution_area": "AI",
            "technical_complexity": "L400",
            "products_and_services": ["Azure OpenAI", "AI Search"],
            "prerequisites": ["Access to Azure OpenAI"],
            "responsible_ai_tag": true
        },
        {
            "id": "data-fabric",
            "name": "Unified Data Fabric",
            "description": "Unified data fabric with pipelines on OneLake",
            "solution_area": "Data & Analytics",
            "technical_complexity": "L300",
            "products_and_services": ["Fabric", "OneLake"],
            "prerequisites": ["Fabric capacity"]
        },
        {
            "id": "purview-governance",
            "name": "Purview Governance Baseline",
            "description": "Governance baseline with Purview lineage and audit pipelines",
            "solution_area": "Governance & Security",
            "technical_complexity": "L300",
            "products_and_services": ["Purview"],
            "prerequisites": ["Purview account"]
        }
    ]
}"#;

fn build_snapshot() -> Arc<CatalogSnapshot> {
    let catalog = parse_catalog(CATALOG).unwrap();
    let store = CatalogStore::from_entries(catalog.solution_accelerators).unwrap();
    Arc::new(CatalogSnapshot::build(store))
}

fn build_synthesizer() -> CompositeSynthesizer {
    CompositeSynthesizer::new(Retriever::new(build_snapshot()))
}

#[test]
fn test_three_component_pipeline() {
    let synthesizer = build_synthesizer();
    let lab = synthesizer
        .compose(
            "agent pipelines over a data fabric with governance",
            "Data & Analytics",
            &["AI".to_string(), "Governance & Security".to_string()],
            3,
        )
        .unwrap();

    assert_eq!(lab.components.len(), 3);
    assert!(!lab.partial);
    let ids: Vec<&str> = lab.components.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["data-fabric", "agent-automation", "purview-governance"]);

    // Inferred flows follow the fixed area-pair table
    assert_eq!(lab.architecture.data_flows.len(), 2);
    assert_eq!(
        lab.architecture.data_flows[0].data_type,
        "Raw Data -> Vectorized Features"
    );
    assert_eq!(
        lab.architecture.data_flows[1].data_type,
        "LLM Outputs -> Audit Logs"
    );
    assert_eq!(lab.architecture.integration_pattern, "Multi-Tier Pipeline");
    assert!(lab.architecture.diagram.contains("data-fabric"));

    // L300 + L400 + L300 = 7.0, plus two integration overheads = 8.5
    assert_eq!(lab.estimated_duration_hours, 8.5);

    // One flagged component carries the aggregate disclaimer
    assert!(lab.responsible_ai_flag);
    let disclaimer = lab.rai_disclaimer.as_deref().unwrap();
    assert!(disclaimer.contains("agent-automation"));
    assert!(!disclaimer.contains("purview-governance:"));
}

#[test]
fn test_merged_prerequisites_across_areas() {
    let synthesizer = build_synthesizer();
    let lab = synthesizer
        .compose(
            "agent pipelines over a data fabric with governance",
            "Data & Analytics",
            &["AI".to_string(), "Governance & Security".to_string()],
            3,
        )
        .unwrap();

    for expected in [
        "Azure subscription with Contributor role",
        "Access to Azure OpenAI",
        "Fabric capacity",
        "Purview account",
        "Familiarity with SQL queries",
        "Knowledge of vector databases",
        "Familiarity with audit logging",
    ] {
        assert!(
            lab.prerequisites.iter().any(|p| p == expected),
            "missing prerequisite: {expected}"
        );
    }

    let mut sorted = lab.prerequisites.clone();
    sorted.sort();
    assert_eq!(lab.prerequisites, sorted);
}

#[test]
fn test_primary_miss_is_not_found() {
    let synthesizer = build_synthesizer();
    let err = synthesizer
        .compose("blockchain ledger", "Quantum", &[], 1)
        .unwrap_err();
    assert!(matches!(err, ForgeError::AreaNotFound { area } if area == "Quantum"));
}

#[test]
fn test_partial_composition_still_succeeds() {
    let synthesizer = build_synthesizer();
    let lab = synthesizer
        .compose(
            "agent automation",
            "AI",
            &["Nonexistent Area".to_string()],
            2,
        )
        .unwrap();
    assert!(lab.partial);
    assert_eq!(lab.components.len(), 1);
    assert_eq!(lab.requested_components, 2);
}

#[test]
fn test_lab_serializes_to_json() {
    let synthesizer = build_synthesizer();
    let lab = synthesizer
        .compose(
            "agent pipelines with governance",
            "AI",
            &["Governance & Security".to_string()],
            2,
        )
        .unwrap();

    let json = serde_json::to_value(&lab).unwrap();
    assert_eq!(json["components"].as_array().unwrap().len(), 2);
    assert_eq!(json["architecture"]["integration_pattern"], "Two-Tier Architecture");
    assert!(json["instructions"].as_str().unwrap().contains("Phase 1"));
    assert_eq!(json["responsible_ai_flag"], true);
}

#[test]
fn test_context_block_with_fallback() {
    let provider = ContextProvider::new(Retriever::new(build_snapshot()));

    // Filtered hit
    let block = provider
        .fetch("governance baseline", Some("Governance & Security"), None)
        .unwrap();
    assert_eq!(block.catalog_item_id, "purview-governance");
    assert!(block.rai_disclaimer.is_none());
    assert_eq!(
        block.prerequisites_xml,
        "<prerequisites><item>Purview account</item></prerequisites>"
    );

    // Area filter misses, the provider falls back to the unfiltered match
    let fallback = provider
        .fetch("agent automation", Some("Data & Analytics"), None)
        .unwrap();
    assert_eq!(fallback.catalog_item_id, "agent-automation");
    assert!(fallback.rai_disclaimer.is_some());
}
