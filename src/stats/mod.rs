//! Statistical baseline engine.
//!
//! Computes `{mean, median, std}` of a factor across a historical record
//! set. Fewer than two qualifying values is not an error: it yields
//! [`Baseline::Insufficient`] so callers can skip bonus computation.
//! Results are cached per tenant, factor and collection fingerprint; see
//! [`StatsCache`].

mod cache;
mod fingerprint;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::factors::{FactorKind, FactorTable, LoadWeights, ScoringContext};
use crate::record::TaskRecord;

pub use cache::{CacheKey, StatsCache, TenantId};
pub use fingerprint::fingerprint;

/// Minimum qualifying values for a usable baseline.
pub const MIN_SAMPLES: usize = 2;

/// Which central value a factor's bonus threshold sits at.
///
/// Factors expected to improve over time use the mean so real improvement
/// moves the bar; factors expected to stay stable use the outlier-resistant
/// median.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMode {
    Mean,
    #[default]
    Median,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BaselineStats {
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std: f64,
    pub samples: usize,
}

impl BaselineStats {
    pub fn threshold(&self, mode: ThresholdMode) -> f64 {
        match mode {
            ThresholdMode::Mean => self.mean,
            ThresholdMode::Median => self.median,
        }
    }
}

/// Outcome of a baseline computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Baseline {
    Ready(BaselineStats),
    /// Fewer than [`MIN_SAMPLES`] qualifying values.
    Insufficient { samples: usize },
}

impl Baseline {
    pub fn stats(&self) -> Option<&BaselineStats> {
        match self {
            Self::Ready(s) => Some(s),
            Self::Insufficient { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Summarize `values`. Non-finite values are ignored. Deterministic: the
/// input order does not affect the median, and the mean is accumulated in
/// input order.
pub fn summarize(values: &[f64]) -> Baseline {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let n = finite.len();
    if n < MIN_SAMPLES {
        return Baseline::Insufficient { samples: n };
    }
    let mean = finite.iter().sum::<f64>() / n as f64;
    let var = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    finite.sort_by(f64::total_cmp);
    let median = if n % 2 == 0 {
        (finite[n / 2 - 1] + finite[n / 2]) / 2.0
    } else {
        finite[n / 2]
    };
    Baseline::Ready(BaselineStats {
        mean,
        median,
        std: var.sqrt(),
        samples: n,
    })
}

/// A historical record set prepared for baselining: factors computed once
/// (the set is its own neighborhood) and fingerprinted for the cache.
#[derive(Debug, Clone)]
pub struct History {
    table: FactorTable,
    fingerprint: u64,
}

impl History {
    pub fn new(records: &[TaskRecord], weights: &LoadWeights) -> Self {
        let ctx = ScoringContext::from_records(records);
        Self {
            table: FactorTable::build(records, &ctx, weights),
            fingerprint: fingerprint(records, weights),
        }
    }

    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn values(&self, factor: FactorKind) -> Vec<f64> {
        self.table.column(factor)
    }
}

/// Baseline statistics of `factor` over `history`, uncached.
pub fn compute_stats(factor: FactorKind, history: &History) -> Baseline {
    let baseline = summarize(&history.values(factor));
    if let Baseline::Insufficient { samples } = baseline {
        debug!(%factor, samples, "insufficient data for baseline");
    }
    baseline
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
