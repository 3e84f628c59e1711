use super::*;
use std::fs;

const RECORDS: &str = r#"[
  {"instance_id": 1, "task_id": "review", "task_type": "Work", "completion_percent": 100,
   "predicted": "{\"time_estimate_minutes\": 60, \"initial_aversion\": 40}",
   "actual": "{\"time_actual_minutes\": 45, \"cognitive_load\": 55, \"emotions\": \"focused, calm\"}",
   "initialized_at": "2024-05-06 09:00:00", "started_at": "2024-05-06 09:20:00",
   "completed_at": "2024-05-06 10:05:00"},
  {"instance_id": 2, "task_id": "review", "completion_percent": 80,
   "predicted": {"time_estimate_minutes": 60, "initial_aversion": 70},
   "actual": {"time_actual_minutes": 90, "cognitive_load": 70, "emotional_load": 40},
   "completed_at": "2024-05-07T11:00:00Z"},
  {"instance_id": 3, "task_id": "walk", "task_type": "play",
   "actual": "not json", "completed_at": "2024-05-07T18:00:00Z"}
]"#;

fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn args(records: PathBuf) -> ScoreArgs {
    ScoreArgs {
        records,
        history: None,
        config: None,
        formula: None,
        tenant: "test".to_string(),
        goal: None,
        breakdown: false,
        json: false,
        top: 50,
    }
}

#[test]
fn score_table_and_json() {
    let dir = tempfile::tempdir().unwrap();
    let records = write(&dir, "records.json", RECORDS);
    run_score(args(records.clone())).unwrap();
    run_score(ScoreArgs {
        json: true,
        breakdown: true,
        top: 1,
        formula: Some(Formula::V1_2),
        goal: Some(GoalProgress {
            target_minutes: 600.0,
            achieved_minutes: 450.0,
        }),
        ..args(records)
    })
    .unwrap();
}

#[test]
fn score_with_history_and_config() {
    let dir = tempfile::tempdir().unwrap();
    let records = write(&dir, "records.json", RECORDS);
    let history = write(&dir, "history.json", RECORDS);
    let config = write(&dir, "tks.toml", "synergy_exponent = 1.0\n");
    run_score(ScoreArgs {
        history: Some(history),
        config: Some(config),
        ..args(records)
    })
    .unwrap();
}

#[test]
fn score_fails_on_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let records = write(&dir, "records.json", RECORDS);
    let config = write(&dir, "tks.toml", "aggregate_bonus_cap = 3.0\n");
    let err = run_score(ScoreArgs {
        config: Some(config),
        ..args(records)
    })
    .unwrap_err();
    assert!(err.to_string().contains("aggregate_bonus_cap"));
}

#[test]
fn score_fails_on_missing_records() {
    let dir = tempfile::tempdir().unwrap();
    assert!(run_score(args(dir.path().join("none.json"))).is_err());
}

#[test]
fn stats_runs_for_ready_and_insufficient() {
    let dir = tempfile::tempdir().unwrap();
    let records = write(&dir, "records.json", RECORDS);
    run_stats(&records, FactorKind::Perseverance, None, false).unwrap();
    run_stats(&records, FactorKind::NetRelief, None, true).unwrap();
}
