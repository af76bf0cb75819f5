//! Command-line argument parsing for labforge
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// labforge - Turn a solution catalog into ranked matches and composite labs
#[derive(Parser, Debug)]
#[command(name = "labforge")]
#[command(version = "0.3.0")]
#[command(about = "Catalog retrieval and composite lab synthesis", long_about = None)]
pub struct Args {
    /// Catalog JSON file (falls back to the configured default)
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// Verbosity level: default (normal), -v (verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress all output except results)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the catalog for matching entries
    Search {
        /// Free-text query
        query: String,

        /// Filter by solution area
        #[arg(short, long)]
        area: Option<String>,

        /// Filter by complexity level (L200, L300, L400)
        #[arg(long)]
        complexity: Option<String>,

        /// Maximum results to return
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Show one catalog entry by id
    Show {
        /// Catalog entry id
        id: String,
    },

    /// List catalog entries, optionally filtered by area
    List {
        /// Filter by solution area
        #[arg(short, long)]
        area: Option<String>,
    },

    /// Fetch a formatted context block for a scenario
    Context {
        /// Scenario title
        title: String,

        /// Preferred solution area
        #[arg(short, long)]
        area: Option<String>,

        /// Preferred complexity level
        #[arg(long)]
        complexity: Option<String>,
    },

    /// Compose a multi-entry lab across solution areas
    Compose {
        /// Scenario title
        title: String,

        /// Primary solution area (required; a miss is fatal)
        #[arg(short, long)]
        primary_area: String,

        /// Secondary areas tried in order
        #[arg(short, long)]
        secondary_area: Vec<String>,

        /// Total components to aim for
        #[arg(short = 'n', long, default_value_t = 2)]
        count: usize,

        /// Write the lab JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate labs for a batch of scenarios
    Batch {
        /// Scenarios JSON file
        scenarios: PathBuf,

        /// Output directory for generated labs
        #[arg(short, long, default_value = "lab_runs")]
        output_dir: PathBuf,
    },

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose > 0 {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

impl Verbosity {
    /// Check if should show progress bars
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should show telemetry details
    pub fn show_telemetry(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with(verbose: u8, quiet: bool) -> Args {
        Args {
            catalog: None,
            verbose,
            quiet,
            command: Commands::Config,
        }
    }

    #[test]
    fn test_verbosity_quiet() {
        assert_eq!(args_with(0, true).verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_normal() {
        assert_eq!(args_with(0, false).verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_verbose() {
        assert_eq!(args_with(2, false).verbosity(), Verbosity::Verbose);
    }

    #[test]
    fn test_verbosity_methods() {
        assert!(!Verbosity::Quiet.show_progress());
        assert!(Verbosity::Normal.show_progress());
        assert!(!Verbosity::Normal.show_telemetry());
        assert!(Verbosity::Verbose.show_telemetry());
    }

    #[test]
    fn test_parse_search_command() {
        let args = Args::parse_from([
            "labforge", "search", "agent automation", "--area", "AI", "-k", "3",
        ]);
        match args.command {
            Commands::Search {
                query,
                area,
                top_k,
                complexity,
            } => {
                assert_eq!(query, "agent automation");
                assert_eq!(area.as_deref(), Some("AI"));
                assert_eq!(top_k, Some(3));
                assert!(complexity.is_none());
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_parse_compose_command() {
        let args = Args::parse_from([
            "labforge",
            "compose",
            "agent with governance",
            "--primary-area",
            "AI",
            "--secondary-area",
            "Data",
            "--secondary-area",
            "Governance & Security",
            "-n",
            "3",
        ]);
        match args.command {
            Commands::Compose {
                title,
                primary_area,
                secondary_area,
                count,
                output,
            } => {
                assert_eq!(title, "agent with governance");
                assert_eq!(primary_area, "AI");
                assert_eq!(secondary_area.len(), 2);
                assert_eq!(count, 3);
                assert!(output.is_none());
            }
            _ => panic!("expected compose command"),
        }
    }
}
