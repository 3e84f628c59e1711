//! Subcommand implementations behind `tks score` and `tks stats`.

use std::error::Error;
use std::path::{Path, PathBuf};

use taskscore::{
    EngineConfig, FactorKind, Formula, GoalProgress, ScoringContext, ScoringEngine, TenantId,
};
use tracing::debug;

use crate::input::{fill_completion_counts, read_records};
use crate::report;
use crate::report_helpers;

pub struct ScoreArgs {
    pub records: PathBuf,
    pub history: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub formula: Option<Formula>,
    pub tenant: String,
    pub goal: Option<GoalProgress>,
    pub breakdown: bool,
    pub json: bool,
    pub top: usize,
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, Box<dyn Error>> {
    match path {
        Some(p) => Ok(EngineConfig::load(p)?),
        None => Ok(EngineConfig::default()),
    }
}

pub fn run_score(args: ScoreArgs) -> Result<(), Box<dyn Error>> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(formula) = args.formula {
        config.formula = formula;
    }
    let engine = ScoringEngine::new(config)?;

    let mut records = read_records(&args.records)?;
    fill_completion_counts(&mut records);
    let history_records = match &args.history {
        Some(path) => {
            let mut h = read_records(path)?;
            fill_completion_counts(&mut h);
            Some(h)
        }
        None => None,
    };
    let history = engine.history(history_records.as_deref().unwrap_or(&records));

    let tenant = TenantId::new(&args.tenant);
    let baselines = engine.baselines(&tenant, Some(&history));
    let mut ctx = ScoringContext::from_records(&records);
    if let Some(goal) = args.goal {
        ctx = ctx.with_goal(goal);
    }

    let scored = engine.score_batch(&records, &ctx, &baselines);
    debug!(scored = scored.len(), "scoring finished");
    let total = scored.len();
    let formula = engine.config().formula;
    report_helpers::print_top(
        &scored,
        args.top,
        args.json,
        |s| report::print_scores_json(s, total, formula),
        |s| report::print_scores(s, total, formula, args.breakdown),
    )
}

pub fn run_stats(
    path: &Path,
    factor: FactorKind,
    config: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let engine = ScoringEngine::new(load_config(config)?)?;
    let mut records = read_records(path)?;
    fill_completion_counts(&mut records);
    let history = engine.history(&records);
    let baseline = engine.compute_stats(&TenantId::new("default"), factor, &history);
    if json {
        report::print_stats_json(factor, &baseline, history.len())
    } else {
        report::print_stats(factor, &baseline, history.len());
        Ok(())
    }
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;
