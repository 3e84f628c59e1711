//! Momentum: how much the user was "on a roll" when completing a record.
//!
//! Looks only at *other* completions strictly before the record's reference
//! time: clustering (40%), 24h volume (30%), 7-day consistency (20%) and
//! acceleration versus the prior week (10%).

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::curves::{ACCELERATION_CURVE, CLUSTERING_CURVE, VOLUME_CURVE, piecewise};

pub const NEUTRAL_MOMENTUM: f64 = 0.5;

pub const W_CLUSTERING: f64 = 0.4;
pub const W_VOLUME: f64 = 0.3;
pub const W_CONSISTENCY: f64 = 0.2;
pub const W_ACCELERATION: f64 = 0.1;

const WEEK_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Momentum {
    pub clustering: f64,
    pub volume: f64,
    pub consistency: f64,
    pub acceleration: f64,
    pub value: f64,
}

impl Momentum {
    pub fn neutral() -> Self {
        Self::from_parts(
            NEUTRAL_MOMENTUM,
            NEUTRAL_MOMENTUM,
            NEUTRAL_MOMENTUM,
            NEUTRAL_MOMENTUM,
        )
    }

    fn from_parts(clustering: f64, volume: f64, consistency: f64, acceleration: f64) -> Self {
        let value = W_CLUSTERING * clustering
            + W_VOLUME * volume
            + W_CONSISTENCY * consistency
            + W_ACCELERATION * acceleration;
        Self {
            clustering,
            volume,
            consistency,
            acceleration,
            value: value.clamp(0.0, 1.0),
        }
    }
}

/// Momentum in `[0, 1]` for a record placed at `reference`.
///
/// `prior` must be the ascending completion times strictly before
/// `reference`. Without a reference time, when no neighborhood was supplied
/// at all, or when `reference` is too early to look a week back from, every
/// sub-score is neutral.
pub fn momentum(
    reference: Option<DateTime<Utc>>,
    prior: &[DateTime<Utc>],
    has_neighborhood: bool,
) -> Momentum {
    let Some(t) = reference else {
        return Momentum::neutral();
    };
    if !has_neighborhood {
        return Momentum::neutral();
    }

    let clustering = prior.last().map_or(NEUTRAL_MOMENTUM, |last| {
        let minutes = (t - *last).num_milliseconds() as f64 / 60_000.0;
        piecewise(minutes, CLUSTERING_CURVE)
    });

    let (Some(day_ago), Some(week_ago)) = (
        t.checked_sub_signed(Duration::hours(24)),
        t.checked_sub_signed(Duration::days(WEEK_DAYS)),
    ) else {
        return Momentum::neutral();
    };
    let last_day = count_since(prior, day_ago);
    let last_week = count_since(prior, week_ago);
    let volume = piecewise(last_day as f64, VOLUME_CURVE);

    let start = prior.partition_point(|x| *x <= week_ago);
    let active_days: HashSet<_> = prior[start..].iter().map(|x| x.date_naive()).collect();
    let consistency = (active_days.len() as f64 / WEEK_DAYS as f64).clamp(0.0, 1.0);

    let earlier = last_week - last_day;
    let acceleration = if last_day == 0 && earlier == 0 {
        NEUTRAL_MOMENTUM
    } else if earlier == 0 {
        1.0
    } else {
        let daily_mean = earlier as f64 / (WEEK_DAYS - 1) as f64;
        piecewise(last_day as f64 / daily_mean, ACCELERATION_CURVE)
    };

    Momentum::from_parts(clustering, volume, consistency, acceleration)
}

/// Count of times strictly after `since` in an ascending slice.
fn count_since(sorted: &[DateTime<Utc>], since: DateTime<Utc>) -> usize {
    sorted.len() - sorted.partition_point(|x| *x <= since)
}

#[cfg(test)]
#[path = "momentum_test.rs"]
mod tests;
