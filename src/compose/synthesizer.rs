// Composite lab synthesis: combine catalog entries across solution areas
// into one integrated lab document.
use std::collections::BTreeSet;

use crate::catalog::{CatalogEntry, ComplexityLevel};
use crate::compose::architecture::{
    extract_key_services, infer_data_flow, infer_role, integration_pattern, render_diagram,
};
use crate::compose::instructions::{deployment_assets, deployment_steps, synthesize_instructions};
use crate::compose::lab::{CompositeLab, DataFlow, IntegratedArchitecture, LabComponent};
use crate::errors::{ForgeError, Result};
use crate::retrieval::{Retriever, SearchParams};
use crate::telemetry::{TelemetryCollector, TelemetryEvent};

/// Prerequisites every integrated lab carries regardless of its components
const COMMON_PREREQUISITES: [&str; 6] = [
    "Azure subscription with Contributor role",
    "Azure CLI (version 2.40+)",
    "Python 3.10+",
    "Git (version 2.30+)",
    "Visual Studio Code or IDE of choice",
    "GitHub account",
];

/// Characters of description carried into a component summary
const COMPONENT_SUMMARY_CHARS: usize = 300;

/// Added per component beyond the first for cross-component wiring
const INTEGRATION_OVERHEAD_HOURS: f64 = 0.75;

/// Base lab hours per complexity level
fn base_hours(level: ComplexityLevel) -> f64 {
    match level {
        ComplexityLevel::L200 => 1.5,
        ComplexityLevel::L300 => 2.0,
        ComplexityLevel::L400 => 3.0,
    }
}

/// Builds multi-entry composite labs from one primary query and optional
/// secondary solution areas.
///
/// A primary-area miss is fatal; secondary misses degrade the result to a
/// partial lab. There is no unfiltered fallback here: a component pulled from
/// the wrong area would misstate the synthesized architecture.
pub struct CompositeSynthesizer {
    retriever: Retriever,
    telemetry: Option<TelemetryCollector>,
}

impl CompositeSynthesizer {
    /// Create a synthesizer over a retriever
    pub fn new(retriever: Retriever) -> Self {
        Self {
            retriever,
            telemetry: None,
        }
    }

    /// Attach a telemetry collector
    pub fn with_telemetry(mut self, collector: TelemetryCollector) -> Self {
        self.telemetry = Some(collector);
        self
    }

    /// The underlying retriever
    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    /// Compose a lab from the best entry per area.
    ///
    /// Selects the top entry for `title` in `primary_area`, then walks
    /// `secondary_areas` in order until `target_count` components are
    /// gathered. The result is marked partial when fewer are found.
    pub fn compose(
        &self,
        title: &str,
        primary_area: &str,
        secondary_areas: &[String],
        target_count: usize,
    ) -> Result<CompositeLab> {
        if target_count == 0 {
            return Err(ForgeError::InvalidArgument {
                name: "target_count",
                reason: "must be at least 1".to_string(),
            });
        }

        let selected = self.select_entries(title, primary_area, secondary_areas, target_count)?;

        let partial = selected.len() < target_count;
        if partial {
            if let Some(telemetry) = &self.telemetry {
                telemetry.record(TelemetryEvent::CompositionPartial {
                    requested: target_count,
                    found: selected.len(),
                });
            }
        }

        let components: Vec<LabComponent> = selected
            .iter()
            .enumerate()
            .map(|(i, entry)| LabComponent {
                index: i + 1,
                id: entry.id.clone(),
                name: entry.name.clone(),
                solution_area: entry.solution_area.clone(),
                technical_complexity: entry.technical_complexity,
                role: infer_role(&entry.solution_area).to_string(),
                key_services: extract_key_services(entry),
                responsible_ai_flag: entry.responsible_ai_flag,
                summary: entry.summary(COMPONENT_SUMMARY_CHARS),
            })
            .collect();

        let data_flows: Vec<DataFlow> = selected
            .windows(2)
            .map(|pair| DataFlow {
                from: pair[0].id.clone(),
                to: pair[1].id.clone(),
                data_type: infer_data_flow(pair[0], pair[1]),
                format: "JSON/API".to_string(),
            })
            .collect();

        let architecture = IntegratedArchitecture {
            diagram: render_diagram(&components, &data_flows),
            integration_pattern: integration_pattern(components.len()).to_string(),
            data_flows,
        };

        let instructions =
            synthesize_instructions(title, &components, &architecture.data_flows);
        let prerequisites = merge_prerequisites(&selected);
        let estimated_duration_hours = estimate_duration(&selected);
        let responsible_ai_flag = components.iter().any(|c| c.responsible_ai_flag);
        let rai_disclaimer = if responsible_ai_flag {
            Some(composite_rai_disclaimer(&components))
        } else {
            None
        };

        if let Some(telemetry) = &self.telemetry {
            telemetry.record(TelemetryEvent::CompositionCompleted {
                components: components.len(),
                duration_hours: estimated_duration_hours,
            });
        }

        Ok(CompositeLab {
            scenario: title.to_string(),
            deployment_steps: deployment_steps(&components),
            deployment_assets: deployment_assets(&components),
            instructions,
            architecture,
            components,
            prerequisites,
            estimated_duration_hours,
            responsible_ai_flag,
            rai_disclaimer,
            requested_components: target_count,
            partial,
        })
    }

    /// Pick the component entries: strict primary, then secondaries in order.
    fn select_entries(
        &self,
        title: &str,
        primary_area: &str,
        secondary_areas: &[String],
        target_count: usize,
    ) -> Result<Vec<&CatalogEntry>> {
        let primary_params = SearchParams {
            top_k: 1,
            area: Some(primary_area.to_string()),
            complexity: None,
        };
        let primary = self.retriever.top_entries(title, &primary_params)?;
        let &(primary_entry, _) = primary.first().ok_or_else(|| ForgeError::AreaNotFound {
            area: primary_area.to_string(),
        })?;

        let mut selected: Vec<&CatalogEntry> = vec![primary_entry];
        let mut selected_ids: BTreeSet<&str> = BTreeSet::new();
        selected_ids.insert(primary_entry.id.as_str());

        for secondary_area in secondary_areas {
            if selected.len() >= target_count {
                break;
            }
            let params = SearchParams {
                top_k: 1,
                area: Some(secondary_area.clone()),
                complexity: None,
            };
            // Secondary misses are absorbed; an area already represented by a
            // selected entry is treated the same way
            if let Some(&(entry, _)) = self.retriever.top_entries(title, &params)?.first() {
                if selected_ids.insert(entry.id.as_str()) {
                    selected.push(entry);
                }
            }
        }

        Ok(selected)
    }
}

/// Union of the common set, each entry's own prerequisites, and
/// area-inferred additions; deduplicated and sorted for determinism.
fn merge_prerequisites(entries: &[&CatalogEntry]) -> Vec<String> {
    let mut merged: BTreeSet<String> = COMMON_PREREQUISITES
        .iter()
        .map(|p| p.to_string())
        .collect();

    for entry in entries {
        merged.extend(entry.prerequisites.iter().cloned());

        let area = entry.solution_area.as_str();
        if area.contains("Data") {
            merged.insert("Understanding of data warehousing concepts".to_string());
            merged.insert("Familiarity with SQL queries".to_string());
            merged.insert("Azure Synapse or Fabric knowledge".to_string());
        }
        if area.contains("AI") {
            merged.insert("Basic understanding of LLMs and embeddings".to_string());
            merged.insert("OpenAI API key or Azure OpenAI resource".to_string());
            merged.insert("Knowledge of vector databases".to_string());
        }
        if area.contains("Governance") || area.contains("Security") {
            merged.insert("Understanding of compliance frameworks".to_string());
            merged.insert("Knowledge of data governance tools".to_string());
            merged.insert("Familiarity with audit logging".to_string());
        }
    }

    merged.into_iter().collect()
}

/// Closed-form duration estimate: per-complexity base hours plus integration
/// overhead for every component beyond the first, rounded to one decimal.
fn estimate_duration(entries: &[&CatalogEntry]) -> f64 {
    let base: f64 = entries
        .iter()
        .map(|entry| base_hours(entry.technical_complexity))
        .sum();
    let overhead = entries.len().saturating_sub(1) as f64 * INTEGRATION_OVERHEAD_HOURS;
    ((base + overhead) * 10.0).round() / 10.0
}

/// Combined disclaimer for an integrated system with flagged components
fn composite_rai_disclaimer(components: &[LabComponent]) -> String {
    let mut disclaimer = String::from(
        "RESPONSIBLE AI NOTICE - INTEGRATED SYSTEM\n\n\
         This lab combines multiple accelerators, including generative AI\n\
         components. Component-level risks:\n",
    );

    for component in components.iter().filter(|c| c.responsible_ai_flag) {
        disclaimer.push_str(&format!(
            "\n- {}: validate input data quality before model processing, monitor\n  \
             outputs for hallucinations or bias, and log every AI decision.\n",
            component.id
        ));
    }

    disclaimer.push_str(
        "\nCross-system governance:\n\
         - Data isolation: encrypt data flowing between components in transit\n  \
           and at rest.\n\
         - Deployment ordering: bring governance tooling online before AI\n  \
           components go live.\n\
         - Audit trail: enable end-to-end lineage tracking across all\n  \
           components.\n\
         - Access control: keep service principals on least-privilege role\n  \
           assignments.\n",
    );

    disclaimer
}
