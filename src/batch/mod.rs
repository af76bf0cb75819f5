//! Batch lab generation.
//!
//! Runs a list of scenarios against the engine, writing one JSON document
//! per scenario. Per-scenario failures are absorbed into the report so one
//! bad scenario never aborts the batch.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::compose::CompositeSynthesizer;
use crate::context::ContextProvider;

fn default_target_count() -> usize {
    2
}

/// One batch input scenario.
///
/// Scenarios with secondary areas produce composite labs; the rest produce
/// single-entry context blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchScenario {
    pub title: String,
    pub solution_area: String,
    #[serde(default)]
    pub complexity: Option<String>,
    #[serde(default)]
    pub secondary_areas: Vec<String>,
    #[serde(default = "default_target_count")]
    pub target_count: usize,
}

impl BatchScenario {
    pub fn is_composite(&self) -> bool {
        !self.secondary_areas.is_empty()
    }
}

/// Outcome of one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub scenario_number: usize,
    pub title: String,
    pub status: String,
    pub error: Option<String>,
    pub output_file: Option<PathBuf>,
    pub composite: bool,
    pub partial: bool,
}

/// Summary of a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub timestamp: String,
    pub total_scenarios: usize,
    pub successful: usize,
    pub failed: usize,
    pub composite_scenarios: usize,
    pub scenarios: Vec<ScenarioOutcome>,
}

/// Load scenarios from a JSON file
pub fn load_scenarios(path: &Path) -> Result<Vec<BatchScenario>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenarios file {}", path.display()))?;
    serde_json::from_str(&contents).context("Failed to parse scenarios file")
}

/// Processes scenario batches into lab documents on disk
pub struct BatchProcessor {
    synthesizer: CompositeSynthesizer,
    provider: ContextProvider,
    output_dir: PathBuf,
    show_progress: bool,
}

impl BatchProcessor {
    pub fn new(
        synthesizer: CompositeSynthesizer,
        provider: ContextProvider,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            synthesizer,
            provider,
            output_dir,
            show_progress: false,
        }
    }

    /// Show a progress bar while processing
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Process every scenario, writing one JSON document per success
    pub fn run(&self, scenarios: &[BatchScenario]) -> Result<BatchReport> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output directory {}", self.output_dir.display())
        })?;

        let bar = if self.show_progress {
            let bar = ProgressBar::new(scenarios.len() as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("[{bar:40.cyan/blue}] {pos}/{len} | {msg}")
                    .unwrap()
                    .progress_chars("=>-"),
            );
            bar
        } else {
            ProgressBar::hidden()
        };

        let mut report = BatchReport {
            timestamp: chrono::Utc::now().to_rfc3339(),
            total_scenarios: scenarios.len(),
            successful: 0,
            failed: 0,
            composite_scenarios: 0,
            scenarios: Vec::with_capacity(scenarios.len()),
        };

        for (idx, scenario) in scenarios.iter().enumerate() {
            let number = idx + 1;
            bar.set_message(scenario.title.clone());

            let outcome = self.process_scenario(scenario, number);
            if outcome.status == "completed" {
                report.successful += 1;
                if outcome.composite {
                    report.composite_scenarios += 1;
                }
            } else {
                report.failed += 1;
            }
            report.scenarios.push(outcome);
            bar.inc(1);
        }
        bar.finish_and_clear();

        let report_file = self.output_dir.join("batch_report.json");
        fs::write(&report_file, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("Failed to write {}", report_file.display()))?;

        Ok(report)
    }

    fn process_scenario(&self, scenario: &BatchScenario, number: usize) -> ScenarioOutcome {
        let file_name = format!("{:02}-{}.json", number, slugify(&scenario.title));
        let output_file = self.output_dir.join(file_name);

        let result = if scenario.is_composite() {
            self.synthesizer
                .compose(
                    &scenario.title,
                    &scenario.solution_area,
                    &scenario.secondary_areas,
                    scenario.target_count,
                )
                .map_err(|e| e.to_string())
                .and_then(|lab| {
                    let partial = lab.partial;
                    serde_json::to_string_pretty(&lab)
                        .map_err(|e| e.to_string())
                        .map(|json| (json, partial))
                })
        } else {
            self.provider
                .fetch(
                    &scenario.title,
                    Some(scenario.solution_area.as_str()),
                    scenario.complexity.as_deref(),
                )
                .ok_or_else(|| format!("no catalog entry matched '{}'", scenario.title))
                .and_then(|block| {
                    serde_json::to_string_pretty(&block)
                        .map_err(|e| e.to_string())
                        .map(|json| (json, false))
                })
        };

        match result {
            Ok((json, partial)) => match fs::write(&output_file, json) {
                Ok(()) => ScenarioOutcome {
                    scenario_number: number,
                    title: scenario.title.clone(),
                    status: "completed".to_string(),
                    error: None,
                    output_file: Some(output_file),
                    composite: scenario.is_composite(),
                    partial,
                },
                Err(e) => failed_outcome(scenario, number, e.to_string()),
            },
            Err(error) => failed_outcome(scenario, number, error),
        }
    }
}

fn failed_outcome(scenario: &BatchScenario, number: usize, error: String) -> ScenarioOutcome {
    ScenarioOutcome {
        scenario_number: number,
        title: scenario.title.clone(),
        status: "failed".to_string(),
        error: Some(error),
        output_file: None,
        composite: scenario.is_composite(),
        partial: false,
    }
}

/// Lowercase filesystem slug for a scenario title
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogEntry, ComplexityLevel};
    use crate::index::CatalogSnapshot;
    use crate::retrieval::Retriever;
    use std::sync::Arc;

    fn entry(id: &str, area: &str, text: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            name: id.to_string(),
            description: text.to_string(),
            solution_area: area.to_string(),
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

    fn snapshot() -> Arc<CatalogSnapshot> {
        CatalogSnapshot::from_entries(vec![
            entry("a1", "AI", "multi-agent automation"),
            entry("a2", "Data", "unified data fabric"),
        ])
        .unwrap()
    }

    fn processor(output_dir: PathBuf) -> BatchProcessor {
        let snapshot = snapshot();
        BatchProcessor::new(
            CompositeSynthesizer::new(Retriever::new(Arc::clone(&snapshot))),
            ContextProvider::new(Retriever::new(snapshot)),
            output_dir,
        )
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Build AI agent, with governance!"), "build-ai-agent-with-governance");
        assert_eq!(slugify("  spaced  "), "spaced");
    }

    #[test]
    fn test_batch_mixed_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let processor = processor(dir.path().to_path_buf());

        let scenarios = vec![
            BatchScenario {
                title: "agent with data automation".to_string(),
                solution_area: "AI".to_string(),
                complexity: None,
                secondary_areas: vec!["Data".to_string()],
                target_count: 2,
            },
            BatchScenario {
                title: "data fabric".to_string(),
                solution_area: "Data".to_string(),
                complexity: None,
                secondary_areas: Vec::new(),
                target_count: 2,
            },
            BatchScenario {
                title: "automation".to_string(),
                solution_area: "Governance & Security".to_string(),
                complexity: None,
                secondary_areas: vec!["AI".to_string()],
                target_count: 2,
            },
        ];

        let report = processor.run(&scenarios).unwrap();
        assert_eq!(report.total_scenarios, 3);
        assert_eq!(report.successful, 2);
        // Scenario 3 fails: primary area has no entries
        assert_eq!(report.failed, 1);
        assert_eq!(report.composite_scenarios, 1);
        assert!(report.scenarios[2].error.is_some());

        // Output files exist for the successes plus the report itself
        assert!(report.scenarios[0].output_file.as_ref().unwrap().exists());
        assert!(report.scenarios[1].output_file.as_ref().unwrap().exists());
        assert!(dir.path().join("batch_report.json").exists());
    }

    #[test]
    fn test_scenario_defaults() {
        let parsed: BatchScenario = serde_json::from_str(
            r#"{"title": "t", "solution_area": "AI"}"#,
        )
        .unwrap();
        assert_eq!(parsed.target_count, 2);
        assert!(parsed.secondary_areas.is_empty());
        assert!(!parsed.is_composite());
    }
}
