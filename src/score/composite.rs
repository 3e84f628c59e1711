//! Composite score functions.
//!
//! Pure functions over already computed factors. Productivity and execution
//! are clamped to `[0, 100]`; grit is floored at 0 and unbounded above.

use crate::factors::GoalProgress;

pub const MAX_SCORE: f64 = 100.0;
/// Completion percent assumed when a record does not say.
pub const ASSUMED_PERCENT: f64 = 100.0;
pub const EXECUTION_BASE: f64 = 50.0;

const MIN_EFFICIENCY: f64 = 0.5;
const MAX_EFFICIENCY: f64 = 1.5;
const EFFICIENCY_DAMPING: f64 = 0.5;
const MIN_GOAL_ADJUSTMENT: f64 = 0.9;
const MAX_GOAL_ADJUSTMENT: f64 = 1.1;
const GOAL_SLOPE: f64 = 0.2;
const MIN_BURNOUT_PENALTY: f64 = 0.5;

fn percent_or_assumed(percent: Option<f64>) -> f64 {
    percent.filter(|p| p.is_finite()).map_or(ASSUMED_PERCENT, |p| p.max(0.0))
}

/// Map a 0–1 factor into 0.5–1.5.
pub fn scaled(factor: f64) -> f64 {
    0.5 + factor
}

/// Actual time against the task's own estimate, credited for the share of
/// the task actually done. Twice as long for twice the work is neutral.
pub fn efficiency_multiplier(estimate: Option<f64>, actual: Option<f64>, percent: Option<f64>) -> f64 {
    let (Some(estimate), Some(actual)) = (estimate, actual) else {
        return 1.0;
    };
    if estimate <= 0.0 || actual <= 0.0 {
        return 1.0;
    }
    let earned = estimate * percent_or_assumed(percent) / 100.0;
    let raw = 1.0 + (earned / actual - 1.0) * EFFICIENCY_DAMPING;
    if raw.is_finite() {
        raw.clamp(MIN_EFFICIENCY, MAX_EFFICIENCY)
    } else {
        1.0
    }
}

/// Weekly goal adjustment, `None` without a usable goal.
pub fn goal_adjustment(goal: Option<GoalProgress>) -> Option<f64> {
    let ratio = goal?.ratio()?;
    Some((MIN_GOAL_ADJUSTMENT + GOAL_SLOPE * ratio).clamp(MIN_GOAL_ADJUSTMENT, MAX_GOAL_ADJUSTMENT))
}

/// Penalty for the day's work minutes beyond `threshold`; `None` when the
/// day's total is unknown.
pub fn burnout_penalty(daily_minutes: Option<f64>, threshold: f64) -> Option<f64> {
    let minutes = daily_minutes?;
    if threshold <= 0.0 {
        return None;
    }
    let excess = (minutes - threshold).max(0.0);
    Some((1.0 - excess / threshold * 0.5).max(MIN_BURNOUT_PENALTY))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductivityTerms {
    pub percent: Option<f64>,
    pub task_type_multiplier: f64,
    pub efficiency: f64,
    pub goal_adjustment: Option<f64>,
    pub burnout_penalty: Option<f64>,
}

pub fn productivity(t: ProductivityTerms) -> f64 {
    let raw = percent_or_assumed(t.percent)
        * t.task_type_multiplier
        * t.efficiency
        * t.goal_adjustment.unwrap_or(1.0)
        * t.burnout_penalty.unwrap_or(1.0);
    clamp_score(raw)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GritTerms {
    pub percent: Option<f64>,
    pub perseverance: f64,
    pub focus: f64,
    pub passion: f64,
    pub time_bonus: f64,
    pub bonus_multiplier: f64,
}

pub fn grit(t: GritTerms) -> f64 {
    let raw = percent_or_assumed(t.percent)
        * scaled(t.perseverance)
        * scaled(t.focus)
        * t.passion
        * t.time_bonus
        * t.bonus_multiplier;
    if raw.is_finite() { raw.max(0.0) } else { 0.0 }
}

/// v1.2 grit: completion scaled by the square root of the persistence
/// multiplier and the time bonus.
pub fn grit_v1_2(percent: Option<f64>, persistence_multiplier: f64, time_bonus: f64) -> f64 {
    let raw = percent_or_assumed(percent) * persistence_multiplier.max(0.0).sqrt() * time_bonus;
    if raw.is_finite() { raw.max(0.0) } else { 0.0 }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecutionTerms {
    pub difficulty: f64,
    pub speed: f64,
    pub start_speed: f64,
    pub completion: f64,
    /// `None` leaves momentum out.
    pub momentum: Option<f64>,
}

pub fn execution(t: ExecutionTerms) -> f64 {
    let raw = EXECUTION_BASE
        * (1.0 + t.difficulty)
        * (0.5 + 0.5 * t.speed)
        * (0.5 + 0.5 * t.start_speed)
        * t.completion
        * t.momentum.map_or(1.0, scaled);
    clamp_score(raw)
}

fn clamp_score(raw: f64) -> f64 {
    if raw.is_finite() { raw.clamp(0.0, MAX_SCORE) } else { 0.0 }
}

#[cfg(test)]
#[path = "composite_test.rs"]
mod tests;
