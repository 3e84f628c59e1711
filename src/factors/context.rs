//! Neighborhood context supplied by the caller.
//!
//! Momentum, perseverance consistency, the sudden-spike bonus and the
//! burnout penalty need to see records other than the one being scored.
//! The engine never fetches them; the caller hands over a collection and
//! this module indexes it once.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::load::LoadWeights;
use crate::record::TaskRecord;

/// Weekly goal progress, used by the productivity goal adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub target_minutes: f64,
    pub achieved_minutes: f64,
}

impl GoalProgress {
    pub fn ratio(&self) -> Option<f64> {
        if self.target_minutes <= 0.0 || !self.achieved_minutes.is_finite() {
            return None;
        }
        let ratio = self.achieved_minutes.max(0.0) / self.target_minutes;
        ratio.is_finite().then_some(ratio)
    }
}

/// Per-task series, sorted by time. Parallel vectors so time lookups can
/// hand out plain slices.
#[derive(Debug, Clone, Default)]
struct TaskSeries {
    times: Vec<DateTime<Utc>>,
    cognitive: Vec<Option<f64>>,
    emotional: Vec<Option<f64>>,
}

impl TaskSeries {
    fn end_before(&self, t: DateTime<Utc>) -> usize {
        self.times.partition_point(|x| *x < t)
    }
}

/// Indexed view of a record collection.
#[derive(Debug, Clone, Default)]
pub struct ScoringContext {
    timeline: Vec<DateTime<Utc>>,
    tasks: HashMap<String, TaskSeries>,
    daily_minutes: HashMap<NaiveDate, f64>,
    goal: Option<GoalProgress>,
}

impl ScoringContext {
    /// Index `records` by time and by `task_id`. Records without any
    /// timestamp cannot be placed and are skipped.
    pub fn from_records(records: &[TaskRecord]) -> Self {
        let mut ctx = Self::default();
        let mut entries: HashMap<&str, Vec<(DateTime<Utc>, Option<f64>, Option<f64>)>> =
            HashMap::new();
        for r in records {
            let Some(at) = r.reference_time() else {
                continue;
            };
            ctx.timeline.push(at);
            entries.entry(r.task_id.as_str()).or_default().push((
                at,
                r.actual.cognitive_load,
                r.actual.emotional(),
            ));
            if let (true, Some(minutes)) = (r.is_work(), r.actual.time_actual_minutes) {
                *ctx.daily_minutes.entry(at.date_naive()).or_default() += minutes.max(0.0);
            }
        }
        ctx.timeline.sort_unstable();
        for (task_id, mut list) in entries {
            list.sort_by_key(|e| e.0);
            let series = TaskSeries {
                times: list.iter().map(|e| e.0).collect(),
                cognitive: list.iter().map(|e| e.1).collect(),
                emotional: list.iter().map(|e| e.2).collect(),
            };
            ctx.tasks.insert(task_id.to_string(), series);
        }
        ctx
    }

    pub fn with_goal(mut self, goal: GoalProgress) -> Self {
        self.goal = Some(goal);
        self
    }

    pub fn goal(&self) -> Option<GoalProgress> {
        self.goal
    }

    /// Whether any placed record was supplied at all.
    pub fn has_timeline(&self) -> bool {
        !self.timeline.is_empty()
    }

    /// Completion times strictly before `t`, ascending.
    pub fn completions_before(&self, t: DateTime<Utc>) -> &[DateTime<Utc>] {
        let end = self.timeline.partition_point(|x| *x < t);
        &self.timeline[..end]
    }

    /// The last `limit` completion times of `task_id` strictly before `t`,
    /// ascending.
    pub fn task_times_before(&self, task_id: &str, t: DateTime<Utc>, limit: usize) -> &[DateTime<Utc>] {
        let Some(series) = self.tasks.get(task_id) else {
            return &[];
        };
        let end = series.end_before(t);
        &series.times[end.saturating_sub(limit)..end]
    }

    /// Combined loads of the last `window` records of `task_id` strictly
    /// before `t`. Records with no load are skipped, not counted.
    pub fn task_loads_before<'a>(
        &'a self,
        task_id: &str,
        t: DateTime<Utc>,
        window: usize,
        weights: &'a LoadWeights,
    ) -> impl Iterator<Item = f64> + 'a {
        let range = match self.tasks.get(task_id) {
            Some(series) => {
                let end = series.end_before(t);
                Some((series, end.saturating_sub(window)..end))
            }
            None => None,
        };
        range.into_iter().flat_map(move |(series, range)| {
            range.filter_map(move |i| weights.combine(series.cognitive[i], series.emotional[i]))
        })
    }

    /// Total work minutes logged on `date`.
    pub fn minutes_on(&self, date: NaiveDate) -> Option<f64> {
        self.daily_minutes.get(&date).copied()
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
