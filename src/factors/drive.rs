//! Drive factors: passion, persistence, perseverance and focus.

use chrono::{DateTime, Utc};

use super::curves::finite_or;
use crate::record::Emotions;

pub const NEUTRAL_PASSION: f64 = 1.0;
pub const NEUTRAL_FOCUS: f64 = 0.5;
pub const MIN_PERSISTENCE_MULTIPLIER: f64 = 1.0;
pub const MAX_PERSISTENCE_MULTIPLIER: f64 = 5.0;

/// Completions at which the persistence multiplier peaks.
const PERSISTENCE_PEAK: f64 = 100.0;
const PERSISTENCE_EXPONENT: f64 = 0.6;
/// Decay constant for completions beyond the peak.
const PERSISTENCE_DECAY: f64 = 300.0;
/// Passion dampening for incomplete tasks.
const INCOMPLETE_PASSION_DAMPING: f64 = 0.9;

/// Perseverance sub-score weights (sum to 1.0).
pub const W_OBSTACLE: f64 = 0.4;
pub const W_AVERSION_RESISTANCE: f64 = 0.3;
pub const W_REPETITION: f64 = 0.2;
pub const W_CONSISTENCY: f64 = 0.1;

/// How many of a task's previous completions feed the consistency score.
pub const RECENT_TASK_WINDOW: usize = 10;

/// Emotion tags that indicate focus.
const FOCUS_POSITIVE: &[&str] = &[
    "focused",
    "engaged",
    "absorbed",
    "flow",
    "calm",
    "determined",
    "motivated",
    "curious",
    "confident",
    "energized",
    "interested",
    "productive",
];

/// Emotion tags that indicate a scattered mind.
const FOCUS_NEGATIVE: &[&str] = &[
    "distracted",
    "scattered",
    "bored",
    "restless",
    "anxious",
    "overwhelmed",
    "frustrated",
    "stressed",
    "tired",
    "confused",
    "procrastinating",
    "unmotivated",
];

/// Passion in `[0.5, 1.5]`: relief outweighing emotional cost raises it.
///
/// `1 + (relief/100 − emotional/100)·0.5`, dampened by 0.9 when the task
/// was not fully completed. Missing relief is neutral; missing emotional
/// load counts as zero.
pub fn passion(relief: Option<f64>, emotional: Option<f64>, completion_percent: Option<f64>) -> f64 {
    let Some(relief) = relief else {
        return NEUTRAL_PASSION;
    };
    let relief_norm = (relief / 100.0).clamp(0.0, 1.0);
    let emotional_norm = (emotional.unwrap_or(0.0) / 100.0).clamp(0.0, 1.0);
    let mut value = 1.0 + (relief_norm - emotional_norm) * 0.5;
    if completion_percent.is_some_and(|p| p < 100.0) {
        value *= INCOMPLETE_PASSION_DAMPING;
    }
    finite_or(value, NEUTRAL_PASSION).clamp(0.5, 1.5)
}

/// Persistence multiplier in `[1, 5]` for the grit score.
///
/// Power-curve growth up to 100 completions, then a slow decay back
/// towards 1.0 as the task becomes pure routine.
pub fn persistence_multiplier(completion_count: Option<u32>) -> f64 {
    let count = completion_count.unwrap_or(0) as f64;
    if count <= 1.0 {
        return MIN_PERSISTENCE_MULTIPLIER;
    }
    let span = MAX_PERSISTENCE_MULTIPLIER - MIN_PERSISTENCE_MULTIPLIER;
    let value = if count <= PERSISTENCE_PEAK {
        let progress = (count - 1.0) / (PERSISTENCE_PEAK - 1.0);
        MIN_PERSISTENCE_MULTIPLIER + span * progress.powf(PERSISTENCE_EXPONENT)
    } else {
        MIN_PERSISTENCE_MULTIPLIER + span * (-(count - PERSISTENCE_PEAK) / PERSISTENCE_DECAY).exp()
    };
    value.clamp(MIN_PERSISTENCE_MULTIPLIER, MAX_PERSISTENCE_MULTIPLIER)
}

/// Persistence factor in `[0, 1]`; the multiplier rescaled.
pub fn persistence_factor(completion_count: Option<u32>) -> f64 {
    let span = MAX_PERSISTENCE_MULTIPLIER - MIN_PERSISTENCE_MULTIPLIER;
    (persistence_multiplier(completion_count) - MIN_PERSISTENCE_MULTIPLIER) / span
}

/// Regularity of a task's recent completions in `[0, 1]`: `1/(1+cv)` of the
/// gaps between consecutive timestamps. `times` must be ascending; at least
/// three timestamps are needed.
pub fn completion_regularity<I>(times: I) -> Option<f64>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    // Welford over the gaps, one pass, no buffer.
    let mut prev: Option<DateTime<Utc>> = None;
    let (mut n, mut mean, mut m2) = (0.0_f64, 0.0_f64, 0.0_f64);
    for t in times {
        if let Some(p) = prev {
            let gap = (t - p).num_milliseconds() as f64 / 60_000.0;
            n += 1.0;
            let delta = gap - mean;
            mean += delta / n;
            m2 += delta * (gap - mean);
        }
        prev = Some(t);
    }
    if n < 2.0 || mean <= 0.0 {
        return None;
    }
    let cv = (m2 / n).max(0.0).sqrt() / mean;
    Some(finite_or(1.0 / (1.0 + cv), 0.0).clamp(0.0, 1.0))
}

/// Inputs to [`perseverance`], each already resolved from the record.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerseveranceInputs {
    pub load: Option<f64>,
    pub aversion: Option<f64>,
    pub completion_factor: f64,
    pub persistence_factor: f64,
    pub regularity: Option<f64>,
}

/// Perseverance in `[0, 1]`: obstacle-overcoming (40%), aversion
/// resistance (30%), repetition (20%) and consistency (10%).
///
/// Missing components contribute 0.
pub fn perseverance(inputs: PerseveranceInputs) -> f64 {
    let done = inputs.completion_factor.clamp(0.0, 1.0);
    let obstacle = inputs
        .load
        .map_or(0.0, |l| (l / 100.0).clamp(0.0, 1.0) * done);
    let resistance = inputs
        .aversion
        .map_or(0.0, |a| (a / 100.0).clamp(0.0, 1.0) * done);
    let repetition = inputs.persistence_factor.clamp(0.0, 1.0);
    let consistency = inputs.regularity.unwrap_or(0.0).clamp(0.0, 1.0);

    let value = W_OBSTACLE * obstacle
        + W_AVERSION_RESISTANCE * resistance
        + W_REPETITION * repetition
        + W_CONSISTENCY * consistency;
    finite_or(value, 0.0).clamp(0.0, 1.0)
}

/// Focus in `[0, 1]` from emotion tags matched against the focus lexicons.
///
/// `0.5 + (positive − negative)·0.5` where both shares are fractions of the
/// matched intensity. No lexicon hit is neutral.
pub fn focus(emotions: &Emotions) -> f64 {
    let (mut positive, mut negative) = (0.0, 0.0);
    for (name, intensity) in emotions.iter() {
        if !intensity.is_finite() || intensity <= 0.0 {
            continue;
        }
        if FOCUS_POSITIVE.contains(&name) {
            positive += intensity;
        } else if FOCUS_NEGATIVE.contains(&name) {
            negative += intensity;
        }
    }
    let total = positive + negative;
    if total <= 0.0 {
        return NEUTRAL_FOCUS;
    }
    let value = 0.5 + (positive / total - negative / total) * 0.5;
    finite_or(value, NEUTRAL_FOCUS).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "drive_test.rs"]
mod tests;
