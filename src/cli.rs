//! CLI argument definitions for the `tks` command.
//!
//! Defines all subcommands, their arguments, and long help text
//! using the `clap` derive macros.
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use taskscore::{FactorKind, Formula};

/// Top-level CLI parser with a single subcommand selector.
#[derive(Parser)]
#[command(name = "tks", version, about = "Behavioral scores for task completions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score every record in a JSON file (productivity, grit, execution)
    #[command(long_about = "\
Score every record in a JSON file.

The file holds a JSON array of task completion records. Each record may
carry its `predicted` and `actual` payloads as nested objects or as
JSON-encoded strings. Missing or malformed fields fall back to neutral
factor values; they never abort scoring.

Scores:
  productivity  completion × task type × efficiency [× goal] [× burnout], 0-100
  grit          completion × perseverance × focus × passion × time bonus
                × bonus multiplier; may exceed 100
  execution     50 × difficulty × speed × start speed × completion × momentum,
                0-100

The records themselves form the neighborhood for momentum, consistency,
sudden-spike and burnout terms. Synergy baselines come from --history, or
from the scored records when no history is given.

When a record has no completion_count, the number of records in the file
sharing its task_id is used.

Examples:
  tks score completions.json
  tks score completions.json --history last-quarter.json --breakdown
  tks score completions.json --formula v1.5c --json")]
    Score {
        /// JSON array of records to score
        records: PathBuf,

        /// JSON array of historical records for synergy baselines
        #[arg(long)]
        history: Option<PathBuf>,

        /// TOML engine configuration
        #[arg(long)]
        config: Option<PathBuf>,

        /// Formula version (overrides the configuration)
        #[arg(long)]
        formula: Option<Formula>,

        /// Tenant the baselines are cached under
        #[arg(long, default_value = "default")]
        tenant: String,

        /// Weekly goal target in minutes (enables the goal adjustment)
        #[arg(long, requires = "goal_achieved")]
        goal_target: Option<f64>,

        /// Minutes achieved toward the weekly goal
        #[arg(long, requires = "goal_target")]
        goal_achieved: Option<f64>,

        /// Print every factor behind each score
        #[arg(long)]
        breakdown: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Show only the first N records (default: 50)
        #[arg(long, default_value = "50")]
        top: usize,
    },

    /// Baseline statistics (mean, median, std) of one factor
    Stats {
        /// JSON array of historical records
        records: PathBuf,

        /// Factor to summarize, e.g. perseverance, focus, load
        #[arg(long)]
        factor: FactorKind,

        /// TOML engine configuration
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List formula versions and mark the canonical one
    Formulas,

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}
