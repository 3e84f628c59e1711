//! Piecewise linear curves shared by the factor calculators and the bonus
//! composer.
//!
//! Each curve is a list of breakpoints sorted by input. Values between
//! breakpoints are linearly interpolated; values beyond the endpoints are
//! clamped to the endpoint output.

/// A single point on a piecewise linear curve.
pub struct Breakpoint {
    pub input: f64,
    pub output: f64,
}

/// Shorthand constructor for curve tables.
pub const fn bp(input: f64, output: f64) -> Breakpoint {
    Breakpoint { input, output }
}

/// Piecewise linear interpolation. Values below the first breakpoint clamp
/// to its output; values above the last clamp to its output. NaN input
/// maps to the first breakpoint.
pub fn piecewise(value: f64, curve: &[Breakpoint]) -> f64 {
    debug_assert!(
        curve.windows(2).all(|w| w[0].input <= w[1].input),
        "Breakpoints must be sorted by input in ascending order"
    );
    let (Some(first), Some(last)) = (curve.first(), curve.last()) else {
        return 0.0;
    };
    if value.is_nan() || value <= first.input {
        return first.output;
    }
    for w in curve.windows(2) {
        if value <= w[1].input {
            let span = w[1].input - w[0].input;
            if span <= 0.0 {
                return w[1].output;
            }
            let frac = (value - w[0].input) / span;
            return w[0].output + frac * (w[1].output - w[0].output);
        }
    }
    last.output
}

/// Replace a non-finite value with `fallback`.
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

/// Completion percentage to completion factor.
/// 100% → 1.0, 90% → 0.9, 50% → 0.5, 0% → 0.0; over-completion clamps to 1.0.
pub const COMPLETION_CURVE: &[Breakpoint] = &[
    bp(0.0, 0.0),
    bp(50.0, 0.5),
    bp(90.0, 0.9),
    bp(100.0, 1.0),
];

/// Start delay in minutes to start-speed factor, up to the decay knee.
/// Immediate start → 1.0, 120 min → 0.5. Beyond the knee the factor
/// decays exponentially (see `effort::start_speed`).
pub const START_DELAY_CURVE: &[Breakpoint] = &[
    bp(0.0, 1.0),
    bp(120.0, 0.5),
];

/// Minutes since the previous completion to momentum clustering.
/// Back-to-back work (≤15 min) → 1.0, one hour → 0.7, four hours → 0.4,
/// a day → 0.1.
pub const CLUSTERING_CURVE: &[Breakpoint] = &[
    bp(15.0, 1.0),
    bp(60.0, 0.7),
    bp(240.0, 0.4),
    bp(1440.0, 0.1),
];

/// Completions in the previous 24 hours to momentum volume.
pub const VOLUME_CURVE: &[Breakpoint] = &[
    bp(0.0, 0.2),
    bp(2.0, 0.5),
    bp(5.0, 0.8),
    bp(10.0, 1.0),
];

/// Ratio of the last day's completions to the prior daily mean, to momentum
/// acceleration. Same pace → 0.5, double pace → 1.0.
pub const ACCELERATION_CURVE: &[Breakpoint] = &[
    bp(0.0, 0.0),
    bp(1.0, 0.5),
    bp(2.0, 1.0),
];

/// Standard deviations above threshold to bonus fraction.
/// 0–1 SD → 0–2%, 1–2 → 2–5%, 2–3 → 5–10%, 3–4 → 10–15%, ≥4 → 15%.
pub const SD_BONUS_CURVE: &[Breakpoint] = &[
    bp(0.0, 0.0),
    bp(1.0, 0.02),
    bp(2.0, 0.05),
    bp(3.0, 0.10),
    bp(4.0, 0.15),
];

#[cfg(test)]
#[path = "curves_test.rs"]
mod tests;
