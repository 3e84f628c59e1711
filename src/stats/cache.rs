use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, trace};

use super::{Baseline, History, compute_stats};
use crate::factors::FactorKind;

/// Owner of a set of cached baselines. Every cache operation is scoped to
/// one tenant; there is no global entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TenantId(Arc<str>);

impl TenantId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TenantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub tenant: TenantId,
    pub factor: FactorKind,
    pub fingerprint: u64,
}

/// Concurrent baseline cache. Entries live until explicitly invalidated.
#[derive(Debug, Default)]
pub struct StatsCache {
    entries: DashMap<CacheKey, Baseline>,
}

impl StatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached baseline for `(tenant, factor, history)`, computing and
    /// storing it on a miss. The computation runs without holding a shard
    /// lock; when two callers race, the first insert wins and both see it.
    pub fn get_or_compute(&self, tenant: &TenantId, factor: FactorKind, history: &History) -> Baseline {
        let key = CacheKey {
            tenant: tenant.clone(),
            factor,
            fingerprint: history.fingerprint(),
        };
        if let Some(hit) = self.entries.get(&key) {
            trace!(%tenant, %factor, "baseline cache hit");
            return *hit;
        }
        debug!(%tenant, %factor, samples = history.len(), "baseline cache miss");
        let computed = compute_stats(factor, history);
        *self.entries.entry(key).or_insert(computed)
    }

    pub fn get(&self, key: &CacheKey) -> Option<Baseline> {
        self.entries.get(key).map(|e| *e)
    }

    /// Drop every entry of `factor` for `tenant`, whatever collection it was
    /// computed from. Returns the number of entries removed.
    pub fn invalidate(&self, tenant: &TenantId, factor: FactorKind) -> usize {
        self.remove_where(|k| k.tenant == *tenant && k.factor == factor)
    }

    pub fn invalidate_tenant(&self, tenant: &TenantId) -> usize {
        self.remove_where(|k| k.tenant == *tenant)
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_where(&self, pred: impl Fn(&CacheKey) -> bool) -> usize {
        let mut removed = 0;
        self.entries.retain(|k, _| {
            let drop = pred(k);
            removed += usize::from(drop);
            !drop
        });
        debug!(removed, "baseline cache invalidated");
        removed
    }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;
