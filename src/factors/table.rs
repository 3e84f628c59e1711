//! Columnar factor computation for a whole collection.
//!
//! Every factor is computed as one column over the collection, calling the
//! same calculators as [`FactorValues::compute`] with the same arguments,
//! so a row of the table equals the scalar result bit for bit.

use rayon::prelude::*;

use super::{
    FactorKind, FactorValues, LoadWeights, Momentum, Relief, ScoringContext, drive, effort,
    momentum,
};
use crate::record::TaskRecord;

/// Factor values for a collection, one `Vec` per factor.
#[derive(Debug, Clone, Default)]
pub struct FactorTable {
    pub load: Vec<Option<f64>>,
    pub difficulty: Vec<f64>,
    pub speed: Vec<f64>,
    pub start_speed: Vec<f64>,
    pub completion: Vec<f64>,
    pub passion: Vec<f64>,
    pub persistence_multiplier: Vec<f64>,
    pub persistence: Vec<f64>,
    pub perseverance: Vec<f64>,
    pub focus: Vec<f64>,
    pub momentum: Vec<Momentum>,
    pub time_bonus: Vec<f64>,
    pub relief: Vec<Relief>,
}

impl FactorTable {
    pub fn build(records: &[TaskRecord], ctx: &ScoringContext, weights: &LoadWeights) -> Self {
        let percent: Vec<Option<f64>> = records.iter().map(TaskRecord::completion).collect();
        let load: Vec<Option<f64>> = records
            .iter()
            .map(|r| weights.combine(r.actual.cognitive_load, r.actual.emotional()))
            .collect();

        let difficulty: Vec<f64> = records
            .iter()
            .zip(&load)
            .map(|(r, l)| effort::difficulty(r.predicted.initial_aversion, *l))
            .collect();
        let speed = records
            .iter()
            .map(|r| effort::speed(r.actual.time_actual_minutes, r.predicted.time_estimate_minutes))
            .collect();
        let start_speed = records
            .iter()
            .map(|r| effort::start_speed(r.start_delay_minutes()))
            .collect();
        let completion: Vec<f64> = percent.iter().map(|p| effort::completion(*p)).collect();
        let passion = records
            .iter()
            .zip(&percent)
            .map(|(r, p)| drive::passion(r.actual.actual_relief, r.actual.emotional(), *p))
            .collect();
        let persistence_multiplier = records
            .iter()
            .map(|r| drive::persistence_multiplier(r.completion_count))
            .collect();
        let persistence: Vec<f64> = records
            .iter()
            .map(|r| drive::persistence_factor(r.completion_count))
            .collect();

        // Neighborhood lookups dominate the cost; spread them across threads.
        let regularity: Vec<Option<f64>> = records
            .par_iter()
            .map(|r| {
                r.reference_time().and_then(|t| {
                    let before = ctx.task_times_before(&r.task_id, t, drive::RECENT_TASK_WINDOW);
                    drive::completion_regularity(before.iter().copied().chain(Some(t)))
                })
            })
            .collect();
        let has_timeline = ctx.has_timeline();
        let momentum = records
            .par_iter()
            .map(|r| {
                let reference = r.reference_time();
                let prior = reference.map_or(&[][..], |t| ctx.completions_before(t));
                momentum::momentum(reference, prior, has_timeline)
            })
            .collect();

        let perseverance = (0..records.len())
            .map(|i| {
                drive::perseverance(drive::PerseveranceInputs {
                    load: load[i],
                    aversion: records[i].predicted.initial_aversion,
                    completion_factor: completion[i],
                    persistence_factor: persistence[i],
                    regularity: regularity[i],
                })
            })
            .collect();
        let focus = records.iter().map(|r| drive::focus(&r.actual.emotions)).collect();
        let time_bonus = records
            .iter()
            .zip(&difficulty)
            .map(|(r, d)| {
                effort::time_bonus(
                    r.actual.time_actual_minutes,
                    r.predicted.time_estimate_minutes,
                    *d,
                    r.completion_count,
                )
            })
            .collect();
        let relief = records
            .iter()
            .map(|r| Relief::new(r.predicted.expected_relief, r.actual.actual_relief))
            .collect();

        Self {
            load,
            difficulty,
            speed,
            start_speed,
            completion,
            passion,
            persistence_multiplier,
            persistence,
            perseverance,
            focus,
            momentum,
            time_bonus,
            relief,
        }
    }

    pub fn len(&self) -> usize {
        self.difficulty.len()
    }

    pub fn is_empty(&self) -> bool {
        self.difficulty.is_empty()
    }

    /// Row `i` as a [`FactorValues`]. Panics if `i` is out of range.
    pub fn row(&self, i: usize) -> FactorValues {
        FactorValues {
            load: self.load[i],
            difficulty: self.difficulty[i],
            speed: self.speed[i],
            start_speed: self.start_speed[i],
            completion: self.completion[i],
            passion: self.passion[i],
            persistence_multiplier: self.persistence_multiplier[i],
            persistence: self.persistence[i],
            perseverance: self.perseverance[i],
            focus: self.focus[i],
            momentum: self.momentum[i],
            time_bonus: self.time_bonus[i],
            relief: self.relief[i],
        }
    }

    /// Present values of one factor across the collection, in row order.
    pub fn column(&self, kind: FactorKind) -> Vec<f64> {
        let dense = |col: &[f64]| col.to_vec();
        match kind {
            FactorKind::Difficulty => dense(&self.difficulty),
            FactorKind::Speed => dense(&self.speed),
            FactorKind::StartSpeed => dense(&self.start_speed),
            FactorKind::Completion => dense(&self.completion),
            FactorKind::Passion => dense(&self.passion),
            FactorKind::Persistence => dense(&self.persistence),
            FactorKind::Perseverance => dense(&self.perseverance),
            FactorKind::Focus => dense(&self.focus),
            FactorKind::Momentum => self.momentum.iter().map(|m| m.value).collect(),
            FactorKind::TimeBonus => dense(&self.time_bonus),
            FactorKind::Load => self.load.iter().flatten().copied().collect(),
            FactorKind::NetRelief => self.relief.iter().filter_map(|r| r.net).collect(),
        }
    }
}
