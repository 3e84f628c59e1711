//! Behavioral scoring for task completion records.
//!
//! Raw records are normalized by [`record`], turned into bounded factors by
//! [`factors`], compared against historical baselines from [`stats`], and
//! combined into productivity, grit and execution scores by [`score`]. The
//! [`batch`] evaluator produces the same results for a whole collection.
//!
//! ```no_run
//! use taskscore::{EngineConfig, ScoringContext, ScoringEngine, TaskRecord, TenantId};
//!
//! let engine = ScoringEngine::new(EngineConfig::default())?;
//! let records: Vec<TaskRecord> = Vec::new();
//! let history = engine.history(&records);
//! let baselines = engine.baselines(&TenantId::from("me"), Some(&history));
//! let ctx = ScoringContext::from_records(&records);
//! let scored = engine.score_batch(&records, &ctx, &baselines);
//! # Ok::<(), taskscore::ConfigError>(())
//! ```

pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod factors;
pub mod record;
pub mod score;
pub mod stats;
pub mod synergy;

pub use config::EngineConfig;
pub use engine::ScoringEngine;
pub use error::{ConfigError, InputError};
pub use factors::{FactorKind, FactorValues, GoalProgress, ScoringContext};
pub use record::TaskRecord;
pub use score::{Formula, ScoreSet, ScoredRecord};
pub use stats::{Baseline, BaselineStats, TenantId, ThresholdMode};
