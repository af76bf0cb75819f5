//! labforge - Main CLI Entry Point

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use labforge::batch::{load_scenarios, BatchProcessor};
use labforge::catalog::load_catalog;
use labforge::cli::{Args, Commands, Verbosity};
use labforge::compose::CompositeSynthesizer;
use labforge::config::Config;
use labforge::context::ContextProvider;
use labforge::index::CatalogSnapshot;
use labforge::retrieval::{Retriever, SearchParams};
use labforge::telemetry::{TelemetryCollector, TelemetryEvent};

fn main() -> Result<()> {
    let args = Args::parse();
    let verbosity = args.verbosity();
    let config = Config::load()?;

    if let Commands::Config = args.command {
        return show_config(&config);
    }

    let catalog_path = resolve_catalog_path(&args, &config)?;
    let (catalog_file, store) = load_catalog(&catalog_path)?;
    let snapshot = Arc::new(CatalogSnapshot::build(store));

    let telemetry = TelemetryCollector::new();
    telemetry.record(TelemetryEvent::CatalogIndexed {
        entries: snapshot.index().entry_count(),
        distinct_tokens: snapshot.index().token_count(),
    });

    if verbosity.show_telemetry() {
        println!(
            "{} {} entries, {} distinct tokens (catalog v{})",
            "Indexed:".cyan(),
            snapshot.index().entry_count(),
            snapshot.index().token_count(),
            catalog_file.catalog_metadata.version,
        );
    }

    let retriever = Retriever::new(Arc::clone(&snapshot)).with_telemetry(telemetry.clone());

    match args.command {
        Commands::Search {
            ref query,
            ref area,
            ref complexity,
            top_k,
        } => {
            let params = SearchParams {
                top_k: top_k.unwrap_or(config.retrieval.default_top_k),
                area: area.clone(),
                complexity: complexity.clone(),
            };
            run_search(&retriever, query, &params)?;
        }
        Commands::Show { ref id } => run_show(&snapshot, id)?,
        Commands::List { ref area } => run_list(&snapshot, area.as_deref()),
        Commands::Context {
            ref title,
            ref area,
            ref complexity,
        } => run_context(retriever, title, area.as_deref(), complexity.as_deref()),
        Commands::Compose {
            ref title,
            ref primary_area,
            ref secondary_area,
            count,
            ref output,
        } => {
            let synthesizer =
                CompositeSynthesizer::new(retriever).with_telemetry(telemetry.clone());
            run_compose(
                &synthesizer,
                title,
                primary_area,
                secondary_area,
                count,
                output.as_deref(),
            )?;
        }
        Commands::Batch {
            ref scenarios,
            ref output_dir,
        } => {
            let synthesizer =
                CompositeSynthesizer::new(retriever).with_telemetry(telemetry.clone());
            let provider = ContextProvider::new(
                Retriever::new(Arc::clone(&snapshot)).with_telemetry(telemetry.clone()),
            );
            run_batch(synthesizer, provider, scenarios, output_dir, verbosity)?;
        }
        Commands::Config => unreachable!("handled above"),
    }

    if verbosity.show_telemetry() {
        let stats = telemetry.get_stats();
        println!();
        println!("{}", "Session summary".cyan());
        println!("  Searches:            {}", stats.searches);
        println!("  Empty searches:      {}", stats.empty_searches);
        println!("  Filter fallbacks:    {}", stats.filter_fallbacks);
        println!("  Compositions:        {}", stats.compositions);
        println!("  Partial compositions: {}", stats.partial_compositions);
    }

    Ok(())
}

/// Explicit --catalog wins; otherwise the configured default
fn resolve_catalog_path(args: &Args, config: &Config) -> Result<PathBuf> {
    if let Some(path) = &args.catalog {
        return Ok(path.clone());
    }
    if let Some(path) = &config.catalog.path {
        return Ok(path.clone());
    }
    bail!(
        "No catalog file given. Pass --catalog <FILE> or set catalog.path in {}",
        Config::config_path()?.display()
    );
}

fn run_search(retriever: &Retriever, query: &str, params: &SearchParams) -> Result<()> {
    let hits = retriever.search(query, params)?;

    if hits.is_empty() {
        println!("{}", "No matching entries.".yellow());
        return Ok(());
    }

    for (rank, hit) in hits.iter().enumerate() {
        println!(
            "{} {} {} {}",
            format!("{}.", rank + 1).bold(),
            hit.name.green(),
            format!("[{} / {}]", hit.solution_area, hit.technical_complexity).cyan(),
            format!("score {:.2}", hit.score).dimmed(),
        );
        println!("   {}", hit.id.dimmed());
        if !hit.summary.is_empty() {
            println!("   {}", hit.summary);
        }
        if !hit.services.is_empty() {
            println!("   {} {}", "services:".dimmed(), hit.services.join(", "));
        }
    }
    Ok(())
}

fn run_show(snapshot: &Arc<CatalogSnapshot>, id: &str) -> Result<()> {
    let Some(entry) = snapshot.store().get(id) else {
        bail!("No catalog entry with id '{}'", id);
    };

    println!("{}", entry.name.green().bold());
    println!("  id:          {}", entry.id);
    println!("  area:        {}", entry.solution_area);
    println!("  complexity:  {}", entry.technical_complexity);
    if !entry.repository_url.is_empty() {
        println!("  repository:  {}", entry.repository_url);
    }
    if entry.responsible_ai_flag {
        println!("  {}", "responsible-AI flagged".yellow());
    }
    if !entry.products_and_services.is_empty() {
        println!("  services:    {}", entry.products_and_services.join(", "));
    }
    if !entry.prerequisites.is_empty() {
        println!("  prerequisites:");
        for prerequisite in &entry.prerequisites {
            println!("    - {}", prerequisite);
        }
    }
    println!();
    println!("{}", entry.description);
    Ok(())
}

fn run_list(snapshot: &Arc<CatalogSnapshot>, area: Option<&str>) {
    let positions = snapshot.index().unranked(area, None);
    if positions.is_empty() {
        println!(
            "{} Known areas: {}",
            "No entries for that filter.".yellow(),
            snapshot.index().known_areas().join(", "),
        );
        return;
    }
    for position in positions {
        if let Some(entry) = snapshot.store().entry_at(position) {
            println!(
                "{} {} {}",
                entry.id.green(),
                format!("[{} / {}]", entry.solution_area, entry.technical_complexity).cyan(),
                entry.name,
            );
        }
    }
}

fn run_context(retriever: Retriever, title: &str, area: Option<&str>, complexity: Option<&str>) {
    let provider = ContextProvider::new(retriever);
    match provider.fetch(title, area, complexity) {
        Some(block) => {
            println!("{} {}", "Matched:".green(), block.solution_name.bold());
            println!("  id:         {}", block.catalog_item_id);
            println!("  area:       {}", block.solution_area);
            println!("  complexity: {}", block.complexity_level);
            println!("  {}", block.prerequisites_xml.dimmed());
            println!("  {}", block.products_xml.dimmed());
            if let Some(disclaimer) = &block.rai_disclaimer {
                println!();
                println!("{}", disclaimer.yellow());
            }
        }
        None => println!("{}", "No matching context found.".yellow()),
    }
}

fn run_compose(
    synthesizer: &CompositeSynthesizer,
    title: &str,
    primary_area: &str,
    secondary_areas: &[String],
    count: usize,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let lab = synthesizer.compose(title, primary_area, secondary_areas, count)?;

    if lab.partial {
        println!(
            "{}",
            format!(
                "Warning: requested {} components, found {}.",
                lab.requested_components,
                lab.components.len()
            )
            .yellow()
        );
    }

    println!(
        "{} {} ({}, {:.1}h)",
        "Composite lab:".green().bold(),
        lab.scenario,
        lab.architecture.integration_pattern,
        lab.estimated_duration_hours,
    );
    for component in &lab.components {
        println!(
            "  {}. {} {} {}",
            component.index,
            component.id.green(),
            format!("[{}]", component.solution_area).cyan(),
            component.role.dimmed(),
        );
    }
    for flow in &lab.architecture.data_flows {
        println!("  {} {} {}", flow.from.dimmed(), flow.data_type, flow.to.dimmed());
    }

    match output {
        Some(path) => {
            std::fs::write(path, serde_json::to_string_pretty(&lab)?)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} {}", "Wrote".green(), path.display());
        }
        None => {
            println!();
            println!("{}", lab.instructions);
        }
    }
    Ok(())
}

fn run_batch(
    synthesizer: CompositeSynthesizer,
    provider: ContextProvider,
    scenarios_path: &std::path::Path,
    output_dir: &std::path::Path,
    verbosity: Verbosity,
) -> Result<()> {
    let scenarios = load_scenarios(scenarios_path)?;
    let mut processor = BatchProcessor::new(synthesizer, provider, output_dir.to_path_buf());
    if verbosity.show_progress() {
        processor = processor.with_progress();
    }

    let report = processor.run(&scenarios)?;

    println!(
        "{} {} succeeded, {} failed ({} composite)",
        "Batch complete:".green().bold(),
        report.successful,
        report.failed,
        report.composite_scenarios,
    );
    for outcome in report.scenarios.iter().filter(|o| o.status == "failed") {
        println!(
            "  {} {}: {}",
            "failed".red(),
            outcome.title,
            outcome.error.as_deref().unwrap_or("unknown error"),
        );
    }
    Ok(())
}

fn show_config(config: &Config) -> Result<()> {
    println!("{} {}", "Config file:".cyan(), Config::config_path()?.display());
    match &config.catalog.path {
        Some(path) => println!("  catalog.path = {}", path.display()),
        None => println!("  catalog.path = {}", "(unset)".dimmed()),
    }
    println!("  retrieval.default_top_k = {}", config.retrieval.default_top_k);
    Ok(())
}
