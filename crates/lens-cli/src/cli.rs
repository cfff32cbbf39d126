//! Command-line arguments

use clap::{Parser, Subcommand};
use lens_report::{ArtifactKind, StepType};
use std::path::PathBuf;

/// Corporate overview reports, chart exports and analysis prompts from a data snapshot
#[derive(Debug, Parser)]
#[command(name = "lens", version, about, long_about = None)]
pub struct Cli {
    /// JSON snapshot of the company data store
    #[arg(short, long, env = "LENS_SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render an overview, narratives or chart artifact
    Report {
        /// Ticker or company name
        company: String,

        #[arg(short, long, default_value = "overview")]
        kind: ArtifactKind,

        /// Write to the suggested filename inside this directory instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the analysis prompt of one workflow step
    Prompt {
        /// Ticker or company name
        company: String,

        #[arg(long, default_value = "overview")]
        step: StepType,
    },

    /// Print a persona system prompt
    Persona {
        /// Persona id, e.g. growth_scout
        #[arg(default_value = "value_hunter")]
        persona: String,
    },

    /// Support/resistance levels of the visible chart window
    Levels {
        /// Ticker or company name
        company: String,

        /// Number of most recent bars to analyze
        #[arg(long)]
        visible: Option<usize>,
    },

    /// Headline valuation metrics and segment mix
    Metrics {
        /// Ticker or company name
        company: String,
    },

    /// Look up a company by ticker or name fragment
    Search { query: String },
}
