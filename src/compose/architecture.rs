//! Architectural inference: roles, data flows, and the pipeline diagram.
//!
//! Both lookup functions are total over arbitrary area labels; unknown areas
//! land on the generic fallbacks instead of erroring.

use crate::catalog::CatalogEntry;
use crate::compose::lab::{DataFlow, LabComponent};

/// Azure service names recognized when an entry lists no explicit services
const SERVICE_KEYWORDS: [&str; 15] = [
    "Azure AI",
    "OpenAI",
    "Cosmos DB",
    "Synapse",
    "Fabric",
    "Purview",
    "App Service",
    "Container Apps",
    "AI Search",
    "Document Intelligence",
    "Semantic Kernel",
    "Agent Service",
    "OneLake",
    "Azure SQL",
    "Key Vault",
];

/// Cap on key services carried into a component
const MAX_KEY_SERVICES: usize = 5;

/// Map a solution area to its architectural role.
///
/// Fixed table over the known labels; anything else is a utility service.
pub fn infer_role(solution_area: &str) -> &'static str {
    match solution_area {
        "AI" | "AI Automation" => "AI/ML Processing",
        "Data" => "Data Foundation",
        "Data & Analytics" | "Azure (Data & AI)" => "Data & Analytics",
        "Governance & Security" | "Governance" => "Compliance & Guardrails",
        "Security" => "Security Controls",
        _ => "Utility Service",
    }
}

/// Infer the payload flowing from one component into the next.
///
/// Deterministic and total: every pair of area labels produces a non-empty
/// label, with a generic default for unmatched pairs.
pub fn infer_data_flow(from: &CatalogEntry, to: &CatalogEntry) -> String {
    let from_area = from.solution_area.to_lowercase();
    let to_area = to.solution_area.to_lowercase();

    let label = if from_area.contains("data") && to_area.contains("ai") {
        "Raw Data -> Vectorized Features"
    } else if from_area.contains("ai") && (to_area.contains("governance") || to_area.contains("security")) {
        "LLM Outputs -> Audit Logs"
    } else if from.id.contains("content") && to_area.contains("ai") {
        "Extracted Entities -> AI Processing"
    } else if from_area.contains("data") && to_area.contains("data") {
        "Raw Data -> Processed Data"
    } else {
        "Processed Data -> Downstream System"
    };
    label.to_string()
}

/// Key services for a component: the entry's explicit service list when it
/// has one, otherwise recognized service names from its description.
pub fn extract_key_services(entry: &CatalogEntry) -> Vec<String> {
    if !entry.products_and_services.is_empty() {
        return entry
            .products_and_services
            .iter()
            .take(MAX_KEY_SERVICES)
            .cloned()
            .collect();
    }

    let haystack = format!("{} {}", entry.description, entry.id.replace('-', " ")).to_lowercase();
    SERVICE_KEYWORDS
        .iter()
        .filter(|keyword| haystack.contains(&keyword.to_lowercase()))
        .take(MAX_KEY_SERVICES)
        .map(|keyword| keyword.to_string())
        .collect()
}

/// Describe the overall integration pattern by component count
pub fn integration_pattern(component_count: usize) -> &'static str {
    match component_count {
        0 | 1 => "Single Component",
        2 => "Two-Tier Architecture",
        3 | 4 => "Multi-Tier Pipeline",
        _ => "Complex Microservices Architecture",
    }
}

/// Render the component pipeline as an ASCII diagram
pub fn render_diagram(components: &[LabComponent], flows: &[DataFlow]) -> String {
    if components.is_empty() {
        return String::new();
    }

    const BOX_WIDTH: usize = 30;
    let mut lines = Vec::new();

    for (i, component) in components.iter().enumerate() {
        let name: String = component.id.chars().take(BOX_WIDTH - 3).collect();
        let role: String = component.role.chars().take(BOX_WIDTH - 6).collect();

        lines.push(format!("+{}+", "-".repeat(BOX_WIDTH - 2)));
        lines.push(format!("| {:<width$} |", name, width = BOX_WIDTH - 4));
        lines.push(format!("| ({:<width$}) |", role, width = BOX_WIDTH - 6));
        lines.push(format!("+{}+", "-".repeat(BOX_WIDTH - 2)));

        if i + 1 < components.len() {
            let flow_label = flows
                .get(i)
                .map(|flow| flow.data_type.as_str())
                .unwrap_or("Data");
            lines.push("        |".to_string());
            lines.push(format!("        | {}", flow_label));
            lines.push("        v".to_string());
        }
    }

    lines.join("\n")
}
