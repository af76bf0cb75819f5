//! Deterministic instruction and deployment-step templates.
//!
//! Pure string templating over the selected components; same inputs, same
//! document. No randomness and no hidden state.

use crate::compose::lab::{
    DataFlow, DeploymentAssets, DeploymentScript, DeploymentStep, IntegrationPoint, LabComponent,
};

/// Render the integrated step-by-step instruction document
pub fn synthesize_instructions(
    scenario: &str,
    components: &[LabComponent],
    flows: &[DataFlow],
) -> String {
    let mut doc = format!(
        "# Integrated Lab: {}\n\n## Overview\n\nThis lab combines {} accelerator(s) into one integrated solution:\n",
        scenario,
        components.len()
    );

    for component in components {
        doc.push_str(&format!(
            "\n### {}. {}\n**Solution Area:** {}\n**Complexity:** {}\n**Role in Architecture:** {}\n\n{}\n",
            component.index,
            component.name,
            component.solution_area,
            component.technical_complexity,
            component.role,
            component.summary,
        ));
    }

    doc.push_str(
        "\n## Step-by-Step Instructions\n\n\
         ### Phase 1: Prerequisites & Setup\n\
         - [ ] Create the Azure subscription and required resource groups\n\
         - [ ] Configure a service principal for authentication\n\
         - [ ] Set up the local development environment\n\
         - [ ] Clone all component repositories\n",
    );

    for component in components {
        doc.push_str(&format!(
            "\n### Phase {}: Deploy {} ({})\n",
            component.index + 1,
            component.name,
            component.id,
        ));
        doc.push_str(&format!(
            "- [ ] Follow the deployment guide in the {} repository\n",
            component.id
        ));
        if component.index > 1 {
            doc.push_str("- [ ] Establish the data connection to the previous component\n");
        }
        doc.push_str(&format!(
            "- [ ] Configure {} settings\n- [ ] Validate the component is operational\n",
            component.role
        ));
    }

    doc.push_str(&format!(
        "\n### Phase {}: End-to-End Validation\n\
         - [ ] Execute the full pipeline from source to destination\n\
         - [ ] Verify all data flows match the architecture diagram\n\
         - [ ] Test governance policies and audit logging\n\
         - [ ] Document results and lessons learned\n",
        components.len() + 2
    ));

    if !flows.is_empty() {
        doc.push_str("\n## Data Flow\n\n");
        for flow in flows {
            doc.push_str(&format!(
                "- **{}** -> {} -> **{}**\n",
                flow.from, flow.data_type, flow.to
            ));
        }
    }

    doc
}

/// Phase-ordered deployment checklist: prerequisites, one step per
/// component, then integration testing. Each step depends on the previous.
pub fn deployment_steps(components: &[LabComponent]) -> Vec<DeploymentStep> {
    let mut steps = Vec::with_capacity(components.len() + 2);

    steps.push(DeploymentStep {
        sequence: 1,
        phase: "Prerequisites".to_string(),
        title: "Create Azure resources and authentication".to_string(),
        description: "Set up service principals, resource groups, and access controls"
            .to_string(),
        commands: vec![
            "az group create --name integrated-lab --location eastus".to_string(),
            "az identity create --name lab-identity --resource-group integrated-lab".to_string(),
        ],
        estimated_minutes: 10,
        depends_on: Vec::new(),
    });

    for (i, component) in components.iter().enumerate() {
        let sequence = i + 2;
        steps.push(DeploymentStep {
            sequence,
            phase: format!("Deploy Component {}", i + 1),
            title: format!("Deploy {}", component.id),
            description: format!("Follow the {} deployment guide", component.id),
            commands: vec![
                format!("cd repos/{}", component.id),
                "az deployment group create --template-file main.bicep --resource-group integrated-lab"
                    .to_string(),
            ],
            estimated_minutes: 20,
            depends_on: vec![sequence - 1],
        });
    }

    let final_sequence = components.len() + 2;
    steps.push(DeploymentStep {
        sequence: final_sequence,
        phase: "Integration".to_string(),
        title: "Validate end-to-end data flow".to_string(),
        description: "Test the pipeline from source through all components".to_string(),
        commands: vec!["./run_integration_tests.sh".to_string()],
        estimated_minutes: 15,
        depends_on: vec![final_sequence - 1],
    });

    steps
}

/// Merged deployment assets: one script reference per component plus the
/// integration points between consecutive components.
pub fn deployment_assets(components: &[LabComponent]) -> DeploymentAssets {
    let scripts = components
        .iter()
        .enumerate()
        .map(|(i, component)| DeploymentScript {
            component_id: component.id.clone(),
            script_name: format!("{}_deploy.sh", component.id),
            execution_order: i + 1,
        })
        .collect();

    let integration_points = components
        .windows(2)
        .enumerate()
        .map(|(i, pair)| IntegrationPoint {
            from_id: pair[0].id.clone(),
            to_id: pair[1].id.clone(),
            connection_type: if i == 0 { "API" } else { "Event Hub" }.to_string(),
            protocol: "HTTPS".to_string(),
            authentication: "Service Principal".to_string(),
        })
        .collect();

    DeploymentAssets {
        scripts,
        integration_points,
    }
}
