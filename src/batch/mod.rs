//! Batch evaluation over a whole collection.
//!
//! Factors are computed once as columns ([`FactorTable`]), the spike SD
//! column is filled in parallel, and rows are then assembled in parallel
//! through the same code path as [`crate::score::evaluate`]. Output `i`
//! equals the scalar result for record `i`.

use rayon::prelude::*;
use tracing::debug;

use crate::config::EngineConfig;
use crate::factors::{FactorTable, ScoringContext};
use crate::record::TaskRecord;
use crate::score::{self, ScoredRecord};
use crate::synergy::{self, SynergyBaselines};

/// Score every record of `records` against `ctx`, preserving order.
pub fn evaluate_batch(
    records: &[TaskRecord],
    ctx: &ScoringContext,
    config: &EngineConfig,
    baselines: &SynergyBaselines,
) -> Vec<ScoredRecord> {
    debug!(records = records.len(), formula = %config.formula, "batch evaluation");
    let table = FactorTable::build(records, ctx, &config.load_weights);
    let spike: Vec<Option<f64>> = if config.formula.uses_bonus() {
        records
            .par_iter()
            .zip(table.load.par_iter())
            .map(|(r, load)| {
                synergy::record_spike_sd(
                    r,
                    *load,
                    ctx,
                    config.sudden_spike_window,
                    &config.load_weights,
                )
            })
            .collect()
    } else {
        vec![None; records.len()]
    };

    records
        .par_iter()
        .enumerate()
        .map(|(i, r)| score::assemble(r, table.row(i), spike[i], ctx, config, baselines))
        .collect()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
