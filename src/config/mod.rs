//! Engine configuration.
//!
//! Every option has a default, and an empty TOML document yields exactly
//! [`EngineConfig::default`]. Out-of-range values are rejected when the
//! configuration is loaded, never while scoring.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::factors::{FactorKind, LoadWeights};
use crate::score::Formula;
use crate::stats::ThresholdMode;

/// Task types without an explicit multiplier score at face value.
pub const DEFAULT_TASK_TYPE_MULTIPLIER: f64 = 1.0;

/// Built-in multipliers. Configured entries are layered over these.
const BUILTIN_TASK_TYPE_MULTIPLIERS: &[(&str, f64)] =
    &[("work", 1.0), ("self_care", 1.0), ("play", 0.5)];

/// Threshold mode of a factor the configuration does not list.
pub fn default_threshold_mode(factor: FactorKind) -> ThresholdMode {
    match factor {
        FactorKind::Perseverance => ThresholdMode::Mean,
        _ => ThresholdMode::Median,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub formula: Formula,
    pub synergy_exponent: f64,
    pub aggregate_bonus_cap: f64,
    pub sudden_spike_window: usize,
    pub burnout_threshold_minutes: f64,
    pub synergy_pair: [FactorKind; 2],
    pub load_weights: LoadWeights,
    /// Factor name to threshold mode. Unlisted factors keep
    /// [`default_threshold_mode`].
    pub baseline_threshold_mode: BTreeMap<String, ThresholdMode>,
    /// Task type to productivity multiplier, matched case-insensitively.
    /// Unlisted types keep their built-in multiplier.
    pub task_type_multipliers: BTreeMap<String, f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            formula: Formula::CANONICAL,
            synergy_exponent: 0.9,
            aggregate_bonus_cap: 0.25,
            sudden_spike_window: 10,
            burnout_threshold_minutes: 480.0,
            synergy_pair: [FactorKind::Perseverance, FactorKind::Focus],
            load_weights: LoadWeights::default(),
            baseline_threshold_mode: [FactorKind::Perseverance, FactorKind::Focus]
                .into_iter()
                .map(|f| (f.to_string(), default_threshold_mode(f)))
                .collect(),
            task_type_multipliers: BUILTIN_TASK_TYPE_MULTIPLIERS
                .iter()
                .map(|&(t, m)| (t.to_string(), m))
                .collect(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = self.synergy_exponent;
        if !p.is_finite() || p < 0.0 {
            return Err(ConfigError::InvalidSynergyExponent(p));
        }
        let cap = self.aggregate_bonus_cap;
        if !(0.0..=1.0).contains(&cap) {
            return Err(ConfigError::InvalidBonusCap(cap));
        }
        if self.sudden_spike_window < 2 {
            return Err(ConfigError::InvalidSpikeWindow(self.sudden_spike_window));
        }
        let t = self.burnout_threshold_minutes;
        if !t.is_finite() || t <= 0.0 {
            return Err(ConfigError::InvalidBurnoutThreshold(t));
        }
        let LoadWeights { cognitive, emotional } = self.load_weights;
        let weight_ok = |w: f64| w.is_finite() && w >= 0.0;
        if !weight_ok(cognitive) || !weight_ok(emotional) || cognitive + emotional <= 0.0 {
            return Err(ConfigError::InvalidLoadWeights { cognitive, emotional });
        }
        if self.synergy_pair[0] == self.synergy_pair[1] {
            return Err(ConfigError::DegenerateSynergyPair(self.synergy_pair[0]));
        }
        if let Some(name) = self
            .baseline_threshold_mode
            .keys()
            .find(|k| k.parse::<FactorKind>().is_err())
        {
            return Err(ConfigError::UnknownFactor(name.clone()));
        }
        for (task_type, &value) in &self.task_type_multipliers {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTaskTypeMultiplier {
                    task_type: task_type.clone(),
                    value,
                });
            }
        }
        Ok(())
    }

    pub fn threshold_mode(&self, factor: FactorKind) -> ThresholdMode {
        self.baseline_threshold_mode
            .get(factor.as_str())
            .copied()
            .unwrap_or_else(|| default_threshold_mode(factor))
    }

    pub fn task_type_multiplier(&self, task_type: Option<&str>) -> f64 {
        let Some(task_type) = task_type.map(|t| t.trim().to_lowercase()) else {
            return DEFAULT_TASK_TYPE_MULTIPLIER;
        };
        self.task_type_multipliers
            .iter()
            .find(|(k, _)| k.trim().to_lowercase() == task_type)
            .map(|(_, &m)| m)
            .or_else(|| {
                BUILTIN_TASK_TYPE_MULTIPLIERS
                    .iter()
                    .find(|(k, _)| *k == task_type)
                    .map(|&(_, m)| m)
            })
            .unwrap_or(DEFAULT_TASK_TYPE_MULTIPLIER)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
