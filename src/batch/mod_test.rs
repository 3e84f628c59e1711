use super::*;
use crate::record::Emotions;
use crate::score::{Formula, evaluate};
use crate::stats::{Baseline, BaselineStats};
use chrono::{DateTime, Duration, TimeZone, Utc};

const TOLERANCE: f64 = 1e-9;

fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 7, 0, 0).unwrap() + Duration::minutes(minutes)
}

/// A varied collection: repeated tasks, gaps of every size, missing
/// fields, over-completion and a spike on a routine task.
fn collection() -> Vec<TaskRecord> {
    let emotions = ["focused", "distracted", "calm", "anxious", "bored"];
    let mut records = Vec::new();
    for i in 0..120i64 {
        let mut r = TaskRecord::new(format!("task-{}", i % 7));
        r.instance_id = Some(format!("inst-{i}"));
        r.task_type = Some(["work", "play", "self_care"][(i % 3) as usize].to_string());
        if i % 11 != 0 {
            r.completion_percent = Some(((i * 37) % 130) as f64);
        }
        if i % 5 != 0 {
            r.predicted.time_estimate_minutes = Some(15.0 + (i % 9) as f64 * 10.0);
            r.actual.time_actual_minutes = Some(5.0 + ((i * 13) % 200) as f64);
        }
        r.predicted.initial_aversion = Some(((i * 17) % 100) as f64);
        r.predicted.expected_relief = Some(((i * 23) % 100) as f64);
        r.actual.actual_relief = Some(((i * 29) % 100) as f64);
        r.actual.cognitive_load = Some(((i * 31) % 100) as f64);
        if i % 4 != 0 {
            r.actual.emotional_load = Some(((i * 7) % 100) as f64);
        }
        r.actual.emotions = Emotions(vec![(emotions[(i % 5) as usize].to_string(), 1.0)]);
        r.completion_count = Some((i / 7) as u32 + 1);
        if i % 13 != 0 {
            let start = i * 97 % 5000 + i * 60;
            r.initialized_at = Some(at(start));
            r.started_at = Some(at(start + (i * 19) % 300));
            r.completed_at = Some(at(start + (i * 19) % 300 + 45));
        }
        records.push(r);
    }
    let mut spike = TaskRecord::new("task-0");
    spike.actual.cognitive_load = Some(100.0);
    spike.actual.emotional_load = Some(100.0);
    spike.completion_count = Some(40);
    spike.completed_at = Some(at(20_000));
    records.push(spike);
    records.push(TaskRecord::default());
    records
}

fn baselines(config: &EngineConfig) -> SynergyBaselines {
    let mut b = SynergyBaselines::insufficient(config);
    b.first.baseline = Baseline::Ready(BaselineStats {
        mean: 0.3,
        median: 0.28,
        std: 0.08,
        samples: 100,
    });
    b.second.baseline = Baseline::Ready(BaselineStats {
        mean: 0.5,
        median: 0.5,
        std: 0.2,
        samples: 100,
    });
    b
}

fn assert_close(batch: &ScoredRecord, scalar: &ScoredRecord, i: usize) {
    let pairs = [
        ("productivity", batch.scores.productivity, scalar.scores.productivity),
        ("grit", batch.scores.grit, scalar.scores.grit),
        ("execution", batch.scores.execution, scalar.scores.execution),
        ("bonus", batch.breakdown.bonus.total, scalar.breakdown.bonus.total),
    ];
    for (name, b, s) in pairs {
        assert!((b - s).abs() <= TOLERANCE, "record {i} {name}: batch {b} vs scalar {s}");
    }
    assert_eq!(batch.instance_id, scalar.instance_id);
}

#[test]
fn batch_matches_scalar_for_every_formula() {
    let records = collection();
    let ctx = ScoringContext::from_records(&records);
    for formula in Formula::ALL {
        let config = EngineConfig {
            formula,
            ..EngineConfig::default()
        };
        let baselines = baselines(&config);
        let batch = evaluate_batch(&records, &ctx, &config, &baselines);
        assert_eq!(batch.len(), records.len());
        for (i, r) in records.iter().enumerate() {
            let scalar = evaluate(r, &ctx, &config, &baselines);
            assert_close(&batch[i], &scalar, i);
        }
    }
}

#[test]
fn batch_exercises_bonus_paths() {
    let records = collection();
    let ctx = ScoringContext::from_records(&records);
    let config = EngineConfig::default();
    let batch = evaluate_batch(&records, &ctx, &config, &baselines(&config));
    assert!(batch.iter().any(|s| s.breakdown.bonus.synergy > 0.0));
    assert!(batch.iter().any(|s| s.breakdown.bonus.spike > 0.0));
    assert!(batch.iter().all(|s| s.breakdown.bonus.total <= config.aggregate_bonus_cap));
}

#[test]
fn batch_of_nothing_is_empty() {
    let config = EngineConfig::default();
    let out = evaluate_batch(
        &[],
        &ScoringContext::default(),
        &config,
        &SynergyBaselines::insufficient(&config),
    );
    assert!(out.is_empty());
}
