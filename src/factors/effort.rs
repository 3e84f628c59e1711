//! Effort factors: how hard the task was and how fast it went.
//!
//! All functions are pure and total. Missing or unusable inputs route to
//! the documented neutral value instead of producing NaN.

use super::curves::{COMPLETION_CURVE, START_DELAY_CURVE, finite_or, piecewise};

/// Neutral speed when time data is missing.
pub const NEUTRAL_SPEED: f64 = 0.5;
/// Neutral start speed when timestamps are missing.
pub const NEUTRAL_START_SPEED: f64 = 0.5;
/// Completion factor assumed when the percentage is missing.
pub const ASSUMED_COMPLETION: f64 = 1.0;

/// Delay (minutes) where start speed switches from linear to exponential decay.
const START_DECAY_KNEE: f64 = 120.0;
/// Decay constant (minutes) for delays beyond the knee.
const START_DECAY_TAU: f64 = 480.0;

/// Completions after which the time bonus starts to fade.
const TIME_BONUS_FADE_START: f64 = 10.0;
/// Completions over `TIME_BONUS_FADE_START` that halve the time bonus.
const TIME_BONUS_FADE_SPAN: f64 = 40.0;
pub const MAX_TIME_BONUS: f64 = 3.0;

/// Perceived difficulty in `[0, 1)`:
/// `1 − exp(−(0.7·aversion + 0.3·load)/50)`.
///
/// Returns 0.0 when aversion is missing. A missing load counts as zero.
pub fn difficulty(aversion: Option<f64>, load: Option<f64>) -> f64 {
    let Some(aversion) = aversion else {
        return 0.0;
    };
    let load = load.unwrap_or(0.0).max(0.0);
    let weighted = 0.7 * aversion.max(0.0) + 0.3 * load;
    finite_or(1.0 - (-weighted / 50.0).exp(), 0.0).clamp(0.0, 1.0)
}

/// Ratio of actual to estimated minutes, when both are usable.
pub fn time_ratio(actual: Option<f64>, estimate: Option<f64>) -> Option<f64> {
    let (actual, estimate) = (actual?, estimate?);
    if actual <= 0.0 || estimate <= 0.0 {
        return None;
    }
    let ratio = actual / estimate;
    ratio.is_finite().then_some(ratio)
}

/// Speed in `[0, 1]` from actual vs. estimated time.
///
/// At most half the estimate → 1.0; half to full estimate → linear 1.0 to
/// 0.5; slower than the estimate → `0.5 / ratio`.
pub fn speed(actual: Option<f64>, estimate: Option<f64>) -> f64 {
    let Some(ratio) = time_ratio(actual, estimate) else {
        return NEUTRAL_SPEED;
    };
    if ratio <= 0.5 {
        1.0
    } else if ratio <= 1.0 {
        1.0 - (ratio - 0.5)
    } else {
        0.5 / ratio
    }
}

/// Start speed in `[0, 1]` from the delay between initialization and start.
///
/// Linear from 1.0 (immediate) to 0.5 at two hours, then exponential decay.
/// Negative delays (clock skew) count as immediate.
pub fn start_speed(delay_minutes: Option<f64>) -> f64 {
    let Some(delay) = delay_minutes.filter(|d| d.is_finite()) else {
        return NEUTRAL_START_SPEED;
    };
    let delay = delay.max(0.0);
    if delay <= START_DECAY_KNEE {
        piecewise(delay, START_DELAY_CURVE)
    } else {
        0.5 * (-(delay - START_DECAY_KNEE) / START_DECAY_TAU).exp()
    }
}

/// Completion factor in `[0, 1]`. Missing completion assumes the task was done.
pub fn completion(percent: Option<f64>) -> f64 {
    match percent.filter(|p| p.is_finite()) {
        Some(p) => piecewise(p, COMPLETION_CURVE),
        None => ASSUMED_COMPLETION,
    }
}

/// Time bonus in `[1, 3]` for tasks that took longer than estimated.
///
/// The overrun ratio grows linearly up to 2× and with diminishing returns
/// beyond. The excess is weighted by difficulty (`0.5 + 0.5·difficulty`) and
/// fades once the task has been completed more than ten times.
pub fn time_bonus(
    actual: Option<f64>,
    estimate: Option<f64>,
    difficulty: f64,
    completion_count: Option<u32>,
) -> f64 {
    let Some(ratio) = time_ratio(actual, estimate).filter(|r| *r > 1.0) else {
        return 1.0;
    };
    let raw = if ratio <= 2.0 {
        ratio
    } else {
        2.0 + (1.0 - (-(ratio - 2.0) / 2.0).exp())
    };
    let weight = 0.5 + 0.5 * difficulty.clamp(0.0, 1.0);
    let count = completion_count.unwrap_or(0) as f64;
    let fade = 1.0 / (1.0 + (count - TIME_BONUS_FADE_START).max(0.0) / TIME_BONUS_FADE_SPAN);
    finite_or(1.0 + (raw - 1.0) * weight * fade, 1.0).clamp(1.0, MAX_TIME_BONUS)
}

#[cfg(test)]
#[path = "effort_test.rs"]
mod tests;
