//! Validated configuration plus the baseline cache, behind one handle that
//! can be shared across threads.

use tracing::debug;

use crate::batch::evaluate_batch;
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::factors::{FactorKind, ScoringContext};
use crate::record::TaskRecord;
use crate::score::{ScoredRecord, evaluate};
use crate::stats::{Baseline, History, StatsCache, TenantId};
use crate::synergy::{PairBaseline, SynergyBaselines};

#[derive(Debug)]
pub struct ScoringEngine {
    config: EngineConfig,
    cache: StatsCache,
}

impl ScoringEngine {
    /// Fails fast on an invalid configuration.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            cache: StatsCache::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &StatsCache {
        &self.cache
    }

    /// Prepare `records` as a baseline history under this engine's load
    /// weighting.
    pub fn history(&self, records: &[TaskRecord]) -> History {
        History::new(records, &self.config.load_weights)
    }

    /// Cached baseline of `factor` over `history` for `tenant`.
    pub fn compute_stats(&self, tenant: &TenantId, factor: FactorKind, history: &History) -> Baseline {
        self.cache.get_or_compute(tenant, factor, history)
    }

    pub fn invalidate(&self, tenant: &TenantId, factor: FactorKind) -> usize {
        self.cache.invalidate(tenant, factor)
    }

    pub fn invalidate_tenant(&self, tenant: &TenantId) -> usize {
        self.cache.invalidate_tenant(tenant)
    }

    /// Baselines of the configured synergy pair. Without a history both are
    /// insufficient and synergy stays at zero.
    pub fn baselines(&self, tenant: &TenantId, history: Option<&History>) -> SynergyBaselines {
        let Some(history) = history else {
            return SynergyBaselines::insufficient(&self.config);
        };
        let pair = |factor| PairBaseline {
            factor,
            mode: self.config.threshold_mode(factor),
            baseline: self.compute_stats(tenant, factor, history),
        };
        let [a, b] = self.config.synergy_pair;
        let baselines = SynergyBaselines {
            first: pair(a),
            second: pair(b),
        };
        if !(baselines.first.baseline.is_ready() && baselines.second.baseline.is_ready()) {
            debug!(%tenant, "synergy disabled: insufficient baseline data");
        }
        baselines
    }

    pub fn score(
        &self,
        record: &TaskRecord,
        ctx: &ScoringContext,
        baselines: &SynergyBaselines,
    ) -> ScoredRecord {
        evaluate(record, ctx, &self.config, baselines)
    }

    pub fn score_batch(
        &self,
        records: &[TaskRecord],
        ctx: &ScoringContext,
        baselines: &SynergyBaselines,
    ) -> Vec<ScoredRecord> {
        evaluate_batch(records, ctx, &self.config, baselines)
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
