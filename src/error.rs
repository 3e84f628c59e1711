use std::path::PathBuf;

use thiserror::Error;

use crate::factors::FactorKind;

/// Configuration rejected at load time. The only error the scoring engine
/// itself returns; data problems fall back to neutral values instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("synergy_exponent must be finite and >= 0, got {0}")]
    InvalidSynergyExponent(f64),

    #[error("aggregate_bonus_cap must be within [0, 1], got {0}")]
    InvalidBonusCap(f64),

    #[error("sudden_spike_window must be at least 2, got {0}")]
    InvalidSpikeWindow(usize),

    #[error("load_weights must be finite, non-negative and not both zero (cognitive {cognitive}, emotional {emotional})")]
    InvalidLoadWeights { cognitive: f64, emotional: f64 },

    #[error("task type multiplier for '{task_type}' must be finite and >= 0, got {value}")]
    InvalidTaskTypeMultiplier { task_type: String, value: f64 },

    #[error("burnout_threshold_minutes must be finite and > 0, got {0}")]
    InvalidBurnoutThreshold(f64),

    #[error("synergy_pair needs two different factors, got '{0}' twice")]
    DegenerateSynergyPair(FactorKind),

    #[error("unknown factor '{0}' in baseline_threshold_mode")]
    UnknownFactor(String),

    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Problems reading a record file in the command line tool.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{} must contain a JSON array of records", path.display())]
    NotAnArray { path: PathBuf },
}
