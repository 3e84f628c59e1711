//! Synergy and bonus composer.
//!
//! Three independent components feed the grit multiplier:
//!
//! - **synergy**: both factors of the configured pair sit far above their
//!   own baselines; `(bonus_a · bonus_b)^p`, capped at [`SYNERGY_CAP`].
//! - **load**: linear in combined load, capped at [`LOAD_CAP`].
//! - **spike**: a routine task whose load jumps at least two standard
//!   deviations above its own recent loads, capped at [`SPIKE_CAP`].
//!
//! Components are capped individually, summed, and the sum is capped again
//! at the configured aggregate ceiling before becoming `1 + total`.

use serde::Serialize;

use crate::config::EngineConfig;
use crate::factors::curves::{SD_BONUS_CURVE, piecewise};
use crate::factors::{FactorKind, FactorValues, LoadWeights, ScoringContext};
use crate::record::TaskRecord;
use crate::stats::{Baseline, BaselineStats, ThresholdMode};

pub const SYNERGY_CAP: f64 = 0.15;
pub const LOAD_CAP: f64 = 0.10;
pub const SPIKE_CAP: f64 = 0.25;

/// A task needs this many completions before a spike counts as unexpected.
pub const SPIKE_MIN_COMPLETIONS: u32 = 10;
pub const SPIKE_MIN_SD: f64 = 2.0;
const SPIKE_BASE: f64 = 0.05;
const SPIKE_RANGE: f64 = 0.20;
const SPIKE_SPAN_SD: f64 = 3.0;
/// Floor on the recent-load std; a flat history still yields finite SDs.
const SPIKE_STD_FLOOR: f64 = 1.0;
const MIN_SPIKE_HISTORY: usize = 2;

/// Standard deviations of `value` above the factor's threshold. `None`
/// when the baseline has no spread.
pub fn sd_above(value: f64, stats: &BaselineStats, mode: ThresholdMode) -> Option<f64> {
    if stats.std.is_nan() || stats.std <= 0.0 || !value.is_finite() {
        return None;
    }
    let sd = (value - stats.threshold(mode)) / stats.std;
    sd.is_finite().then_some(sd)
}

/// Step curve from SD distance to bonus: 0 at or below the threshold,
/// 15% at 4 SD and beyond.
pub fn sd_bonus(sd: f64) -> f64 {
    if sd.is_nan() || sd <= 0.0 {
        return 0.0;
    }
    piecewise(sd, SD_BONUS_CURVE)
}

/// Bonus a single factor earns against its baseline; 0 without one.
pub fn factor_bonus(value: f64, baseline: &Baseline, mode: ThresholdMode) -> f64 {
    baseline
        .stats()
        .and_then(|s| sd_above(value, s, mode))
        .map_or(0.0, sd_bonus)
}

/// Sub-linear "both high" term. Zero unless both bonuses are positive.
pub fn synergy_bonus(bonus_a: f64, bonus_b: f64, exponent: f64) -> f64 {
    if !(bonus_a > 0.0 && bonus_b > 0.0) {
        return 0.0;
    }
    let raw = (bonus_a * bonus_b).powf(exponent);
    if raw.is_finite() { raw.min(SYNERGY_CAP) } else { 0.0 }
}

pub fn load_bonus(load: Option<f64>) -> f64 {
    load.map_or(0.0, |l| (l.max(0.0) / 100.0 * LOAD_CAP).min(LOAD_CAP))
}

/// Standard deviations of `load` above the mean of `recent` loads.
/// Mean and variance are accumulated in one pass.
pub fn spike_sd(load: Option<f64>, recent: impl IntoIterator<Item = f64>) -> Option<f64> {
    let load = load?;
    let (mut n, mut mean, mut m2) = (0usize, 0.0f64, 0.0f64);
    for x in recent {
        n += 1;
        let delta = x - mean;
        mean += delta / n as f64;
        m2 += delta * (x - mean);
    }
    if n < MIN_SPIKE_HISTORY {
        return None;
    }
    let std = (m2 / n as f64).sqrt();
    let sd = (load - mean) / std.max(SPIKE_STD_FLOOR);
    sd.is_finite().then_some(sd)
}

/// Spike SD of `record` against the trailing `window` loads of the same
/// task in `ctx`.
pub fn record_spike_sd(
    record: &TaskRecord,
    load: Option<f64>,
    ctx: &ScoringContext,
    window: usize,
    weights: &LoadWeights,
) -> Option<f64> {
    let t = record.reference_time()?;
    spike_sd(load, ctx.task_loads_before(&record.task_id, t, window, weights))
}

/// 5% at 2 SD rising linearly to 25% at 5 SD. Only routine tasks qualify.
pub fn spike_bonus(sd: Option<f64>, completion_count: Option<u32>) -> f64 {
    let routine = completion_count.is_some_and(|c| c >= SPIKE_MIN_COMPLETIONS);
    match sd {
        Some(sd) if routine && sd >= SPIKE_MIN_SD => {
            (SPIKE_BASE + (sd - SPIKE_MIN_SD) / SPIKE_SPAN_SD * SPIKE_RANGE).min(SPIKE_CAP)
        }
        _ => 0.0,
    }
}

/// One synergy factor with the baseline and threshold mode it is judged by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairBaseline {
    pub factor: FactorKind,
    pub mode: ThresholdMode,
    pub baseline: Baseline,
}

impl PairBaseline {
    pub fn bonus(&self, values: &FactorValues) -> f64 {
        self.factor
            .value(values)
            .map_or(0.0, |v| factor_bonus(v, &self.baseline, self.mode))
    }
}

/// Baselines for the configured synergy pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SynergyBaselines {
    pub first: PairBaseline,
    pub second: PairBaseline,
}

impl SynergyBaselines {
    /// No history: both baselines insufficient, so synergy is always 0.
    pub fn insufficient(config: &EngineConfig) -> Self {
        let [a, b] = config.synergy_pair;
        let none = Baseline::Insufficient { samples: 0 };
        Self {
            first: PairBaseline {
                factor: a,
                mode: config.threshold_mode(a),
                baseline: none,
            },
            second: PairBaseline {
                factor: b,
                mode: config.threshold_mode(b),
                baseline: none,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BonusBreakdown {
    pub synergy: f64,
    pub load: f64,
    pub spike: f64,
    pub spike_sd: Option<f64>,
    /// Sum of the capped components before the aggregate cap.
    pub uncapped: f64,
    pub total: f64,
    pub multiplier: f64,
}

impl BonusBreakdown {
    pub fn none() -> Self {
        Self {
            multiplier: 1.0,
            ..Self::default()
        }
    }
}

/// Apply per-component caps, sum, then cap the sum at `aggregate_cap`.
pub fn compose(synergy: f64, load: f64, spike: f64, aggregate_cap: f64) -> BonusBreakdown {
    let synergy = synergy.clamp(0.0, SYNERGY_CAP);
    let load = load.clamp(0.0, LOAD_CAP);
    let spike = spike.clamp(0.0, SPIKE_CAP);
    let uncapped = synergy + load + spike;
    let total = uncapped.min(aggregate_cap);
    BonusBreakdown {
        synergy,
        load,
        spike,
        spike_sd: None,
        uncapped,
        total,
        multiplier: 1.0 + total,
    }
}

/// Full bonus for one record from its factors and precomputed spike SD.
pub fn record_bonus(
    record: &TaskRecord,
    values: &FactorValues,
    spike_sd: Option<f64>,
    baselines: &SynergyBaselines,
    config: &EngineConfig,
) -> BonusBreakdown {
    let synergy = synergy_bonus(
        baselines.first.bonus(values),
        baselines.second.bonus(values),
        config.synergy_exponent,
    );
    let mut breakdown = compose(
        synergy,
        load_bonus(values.load),
        spike_bonus(spike_sd, record.completion_count),
        config.aggregate_bonus_cap,
    );
    breakdown.spike_sd = spike_sd;
    breakdown
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
