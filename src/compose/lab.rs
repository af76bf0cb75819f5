//! Composite lab output types.
//!
//! A CompositeLab is constructed fresh per request from the current snapshot
//! and never stored or mutated afterwards. Every type here serializes as a
//! nested record; the consuming layer picks its own wire format.

use serde::{Deserialize, Serialize};

use crate::catalog::ComplexityLevel;

/// One selected catalog entry inside a composite lab
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabComponent {
    /// 1-based position in the pipeline
    pub index: usize,
    /// Catalog entry id; the entry itself is looked up by id on demand
    pub id: String,
    pub name: String,
    pub solution_area: String,
    pub technical_complexity: ComplexityLevel,
    /// Inferred architectural role
    pub role: String,
    pub key_services: Vec<String>,
    pub responsible_ai_flag: bool,
    /// Truncated description
    pub summary: String,
}

/// Directional data-flow edge between consecutive components
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataFlow {
    pub from: String,
    pub to: String,
    /// Inferred payload label, always non-empty
    pub data_type: String,
    pub format: String,
}

/// Inferred integration architecture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegratedArchitecture {
    pub data_flows: Vec<DataFlow>,
    /// ASCII rendering of the component pipeline
    pub diagram: String,
    pub integration_pattern: String,
}

/// One ordered deployment step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentStep {
    pub sequence: usize,
    pub phase: String,
    pub title: String,
    pub description: String,
    pub commands: Vec<String>,
    pub estimated_minutes: u32,
    pub depends_on: Vec<usize>,
}

/// Deployment script reference for one component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentScript {
    pub component_id: String,
    pub script_name: String,
    pub execution_order: usize,
}

/// Connection between two consecutive components
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationPoint {
    pub from_id: String,
    pub to_id: String,
    pub connection_type: String,
    pub protocol: String,
    pub authentication: String,
}

/// Merged deployment assets across all components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeploymentAssets {
    pub scripts: Vec<DeploymentScript>,
    pub integration_points: Vec<IntegrationPoint>,
}

/// Synthesized multi-entry lab document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeLab {
    pub scenario: String,
    /// Ordered pipeline of selected components
    pub components: Vec<LabComponent>,
    pub architecture: IntegratedArchitecture,
    /// Synthesized step-by-step instruction document
    pub instructions: String,
    pub deployment_steps: Vec<DeploymentStep>,
    pub deployment_assets: DeploymentAssets,
    /// Merged, deduplicated, sorted prerequisite list
    pub prerequisites: Vec<String>,
    pub estimated_duration_hours: f64,
    /// True iff any component carries the responsible-AI flag
    pub responsible_ai_flag: bool,
    pub rai_disclaimer: Option<String>,
    /// Components originally requested; compare against `components.len()`
    pub requested_components: usize,
    /// True when fewer components were found than requested
    pub partial: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lab_serializes_as_nested_record() {
        let lab = CompositeLab {
            scenario: "agent with data".to_string(),
            components: vec![LabComponent {
                index: 1,
                id: "a1".to_string(),
                name: "a1".to_string(),
                solution_area: "AI".to_string(),
                technical_complexity: ComplexityLevel::L400,
                role: "AI/ML Processing".to_string(),
                key_services: vec![],
                responsible_ai_flag: true,
                summary: String::new(),
            }],
            architecture: IntegratedArchitecture {
                data_flows: vec![],
                diagram: String::new(),
                integration_pattern: "Single Component".to_string(),
            },
            instructions: String::new(),
            deployment_steps: vec![],
            deployment_assets: DeploymentAssets::default(),
            prerequisites: vec![],
            estimated_duration_hours: 3.0,
            responsible_ai_flag: true,
            rai_disclaimer: None,
            requested_components: 1,
            partial: false,
        };

        let json = serde_json::to_value(&lab).unwrap();
        assert_eq!(json["scenario"], "agent with data");
        assert_eq!(json["components"][0]["technical_complexity"], "L400");
        assert_eq!(json["responsible_ai_flag"], true);
    }
}
