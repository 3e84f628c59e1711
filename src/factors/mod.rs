//! Factor calculators.
//!
//! Each factor is a pure function from record fields to a bounded value
//! with a documented neutral fallback. Composite scores multiply or add
//! factors; no factor ever yields NaN or infinity.
//!
//! | Factor | Range | Fallback |
//! |---|---|---|
//! | difficulty | 0–1 | 0.0 |
//! | speed | 0–1 | 0.5 |
//! | start_speed | 0–1 | 0.5 |
//! | completion | 0–1 | 1.0 |
//! | passion | 0.5–1.5 | 1.0 |
//! | persistence multiplier | 1–5 | 1.0 |
//! | persistence | 0–1 | 0.0 |
//! | perseverance | 0–1 | 0.0 per component |
//! | focus | 0–1 | 0.5 |
//! | momentum | 0–1 | 0.5 per component |
//! | time_bonus | 1–3 | 1.0 |

pub mod context;
pub mod curves;
pub mod drive;
pub mod effort;
pub mod load;
pub mod momentum;
pub mod relief;
mod table;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::TaskRecord;
pub use context::{GoalProgress, ScoringContext};
pub use load::LoadWeights;
pub use momentum::Momentum;
pub use relief::Relief;
pub use table::FactorTable;

/// Factors that can be baselined and named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Difficulty,
    Speed,
    StartSpeed,
    Completion,
    Passion,
    Persistence,
    Perseverance,
    Focus,
    Momentum,
    TimeBonus,
    Load,
    NetRelief,
}

impl FactorKind {
    pub const ALL: [FactorKind; 12] = [
        Self::Difficulty,
        Self::Speed,
        Self::StartSpeed,
        Self::Completion,
        Self::Passion,
        Self::Persistence,
        Self::Perseverance,
        Self::Focus,
        Self::Momentum,
        Self::TimeBonus,
        Self::Load,
        Self::NetRelief,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Difficulty => "difficulty",
            Self::Speed => "speed",
            Self::StartSpeed => "start_speed",
            Self::Completion => "completion",
            Self::Passion => "passion",
            Self::Persistence => "persistence",
            Self::Perseverance => "perseverance",
            Self::Focus => "focus",
            Self::Momentum => "momentum",
            Self::TimeBonus => "time_bonus",
            Self::Load => "load",
            Self::NetRelief => "net_relief",
        }
    }

    /// This factor's value for one record. `None` only for factors that are
    /// genuinely absent (load, net relief); those are left out of baselines.
    pub fn value(self, f: &FactorValues) -> Option<f64> {
        match self {
            Self::Difficulty => Some(f.difficulty),
            Self::Speed => Some(f.speed),
            Self::StartSpeed => Some(f.start_speed),
            Self::Completion => Some(f.completion),
            Self::Passion => Some(f.passion),
            Self::Persistence => Some(f.persistence),
            Self::Perseverance => Some(f.perseverance),
            Self::Focus => Some(f.focus),
            Self::Momentum => Some(f.momentum.value),
            Self::TimeBonus => Some(f.time_bonus),
            Self::Load => f.load,
            Self::NetRelief => f.relief.net,
        }
    }
}

impl fmt::Display for FactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown factor '{s}'"))
    }
}

/// Every factor for one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorValues {
    pub load: Option<f64>,
    pub difficulty: f64,
    pub speed: f64,
    pub start_speed: f64,
    pub completion: f64,
    pub passion: f64,
    pub persistence_multiplier: f64,
    pub persistence: f64,
    pub perseverance: f64,
    pub focus: f64,
    pub momentum: Momentum,
    pub time_bonus: f64,
    pub relief: Relief,
}

impl FactorValues {
    /// Compute every factor for `record`, looking up neighborhood data in
    /// `ctx`.
    pub fn compute(record: &TaskRecord, ctx: &ScoringContext, weights: &LoadWeights) -> Self {
        let p = &record.predicted;
        let a = &record.actual;
        let percent = record.completion();
        let reference = record.reference_time();

        let load = weights.combine(a.cognitive_load, a.emotional());
        let difficulty = effort::difficulty(p.initial_aversion, load);
        let completion = effort::completion(percent);
        let persistence = drive::persistence_factor(record.completion_count);
        let regularity = reference.and_then(|t| {
            let before = ctx.task_times_before(&record.task_id, t, drive::RECENT_TASK_WINDOW);
            drive::completion_regularity(before.iter().copied().chain(Some(t)))
        });
        let prior = reference.map_or(&[][..], |t| ctx.completions_before(t));

        Self {
            load,
            difficulty,
            speed: effort::speed(a.time_actual_minutes, p.time_estimate_minutes),
            start_speed: effort::start_speed(record.start_delay_minutes()),
            completion,
            passion: drive::passion(a.actual_relief, a.emotional(), percent),
            persistence_multiplier: drive::persistence_multiplier(record.completion_count),
            persistence,
            perseverance: drive::perseverance(drive::PerseveranceInputs {
                load,
                aversion: p.initial_aversion,
                completion_factor: completion,
                persistence_factor: persistence,
                regularity,
            }),
            focus: drive::focus(&a.emotions),
            momentum: momentum::momentum(reference, prior, ctx.has_timeline()),
            time_bonus: effort::time_bonus(
                a.time_actual_minutes,
                p.time_estimate_minutes,
                difficulty,
                record.completion_count,
            ),
            relief: Relief::new(p.expected_relief, a.actual_relief),
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
