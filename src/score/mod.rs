//! Composite scores for a single record.
//!
//! [`evaluate`] is the one entry point. It computes every factor, then
//! dispatches on the configured [`Formula`] to decide which terms enter
//! productivity, grit and execution. The batch evaluator reuses
//! [`assemble`] with factors it computed column wise.

pub mod composite;
mod formula;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::factors::{FactorValues, ScoringContext};
use crate::record::TaskRecord;
use crate::synergy::{self, BonusBreakdown, SynergyBaselines};
use composite::{ExecutionTerms, GritTerms, ProductivityTerms};

pub use formula::Formula;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSet {
    pub productivity: f64,
    pub grit: f64,
    pub execution: f64,
}

/// Intermediate values behind a [`ScoreSet`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub factors: FactorValues,
    pub bonus: BonusBreakdown,
    pub task_type_multiplier: f64,
    pub efficiency: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_adjustment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burnout_penalty: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    pub task_id: String,
    pub formula: Formula,
    pub scores: ScoreSet,
    pub breakdown: Breakdown,
}

/// Score one record against its neighborhood `ctx`.
pub fn evaluate(
    record: &TaskRecord,
    ctx: &ScoringContext,
    config: &EngineConfig,
    baselines: &SynergyBaselines,
) -> ScoredRecord {
    let values = FactorValues::compute(record, ctx, &config.load_weights);
    let spike_sd = spike_sd(record, &values, ctx, config);
    assemble(record, values, spike_sd, ctx, config, baselines)
}

/// Spike SD, only computed when the formula applies bonuses.
pub(crate) fn spike_sd(
    record: &TaskRecord,
    values: &FactorValues,
    ctx: &ScoringContext,
    config: &EngineConfig,
) -> Option<f64> {
    if !config.formula.uses_bonus() {
        return None;
    }
    synergy::record_spike_sd(
        record,
        values.load,
        ctx,
        config.sudden_spike_window,
        &config.load_weights,
    )
}

/// Build the scores of `record` from factors already computed for it.
pub(crate) fn assemble(
    record: &TaskRecord,
    values: FactorValues,
    spike_sd: Option<f64>,
    ctx: &ScoringContext,
    config: &EngineConfig,
    baselines: &SynergyBaselines,
) -> ScoredRecord {
    let formula = config.formula;
    let percent = record.completion();

    let bonus = if formula.uses_bonus() {
        synergy::record_bonus(record, &values, spike_sd, baselines, config)
    } else {
        BonusBreakdown::none()
    };

    let efficiency = if formula.uses_efficiency() {
        composite::efficiency_multiplier(
            record.predicted.time_estimate_minutes,
            record.actual.time_actual_minutes,
            percent,
        )
    } else {
        1.0
    };
    let task_type_multiplier = config.task_type_multiplier(record.task_type.as_deref());
    let goal_adjustment = composite::goal_adjustment(ctx.goal());
    let burnout_penalty = if record.is_work() {
        let minutes = record
            .reference_time()
            .and_then(|t| ctx.minutes_on(t.date_naive()));
        composite::burnout_penalty(minutes, config.burnout_threshold_minutes)
    } else {
        None
    };

    let productivity = composite::productivity(ProductivityTerms {
        percent,
        task_type_multiplier,
        efficiency,
        goal_adjustment,
        burnout_penalty,
    });
    let grit = match formula {
        Formula::V1_2 => {
            composite::grit_v1_2(percent, values.persistence_multiplier, values.time_bonus)
        }
        Formula::V1_5c | Formula::V1_7c => composite::grit(GritTerms {
            percent,
            perseverance: values.perseverance,
            focus: values.focus,
            passion: values.passion,
            time_bonus: values.time_bonus,
            bonus_multiplier: bonus.multiplier,
        }),
    };
    let execution = composite::execution(ExecutionTerms {
        difficulty: values.difficulty,
        speed: values.speed,
        start_speed: values.start_speed,
        completion: values.completion,
        momentum: formula.uses_momentum().then_some(values.momentum.value),
    });

    ScoredRecord {
        instance_id: record.instance_id.clone(),
        task_id: record.task_id.clone(),
        formula,
        scores: ScoreSet {
            productivity,
            grit,
            execution,
        },
        breakdown: Breakdown {
            factors: values,
            bonus,
            task_type_multiplier,
            efficiency,
            goal_adjustment,
            burnout_penalty,
        },
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
