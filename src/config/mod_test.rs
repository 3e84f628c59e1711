use super::*;
use std::io::Write;

#[test]
fn empty_document_is_default() {
    let config = EngineConfig::from_toml_str("").unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn defaults_match_documented_values() {
    let c = EngineConfig::default();
    assert_eq!(c.synergy_exponent, 0.9);
    assert_eq!(c.aggregate_bonus_cap, 0.25);
    assert_eq!(c.sudden_spike_window, 10);
    assert_eq!(c.formula, Formula::V1_7c);
    assert_eq!(c.threshold_mode(FactorKind::Perseverance), ThresholdMode::Mean);
    assert_eq!(c.threshold_mode(FactorKind::Focus), ThresholdMode::Median);
    assert_eq!(c.threshold_mode(FactorKind::Speed), ThresholdMode::Median);
    assert!(c.validate().is_ok());
}

#[test]
fn partial_document_overrides_only_given_keys() {
    let c = EngineConfig::from_toml_str(
        r#"
formula = "v1.5c"
synergy_exponent = 1.2
synergy_pair = ["momentum", "focus"]

[baseline_threshold_mode]
momentum = "mean"

[load_weights]
cognitive = 0.7
emotional = 0.3

[task_type_multipliers]
Play = 0.25
"#,
    )
    .unwrap();
    assert_eq!(c.formula, Formula::V1_5c);
    assert_eq!(c.synergy_exponent, 1.2);
    assert_eq!(c.aggregate_bonus_cap, 0.25);
    assert_eq!(c.synergy_pair, [FactorKind::Momentum, FactorKind::Focus]);
    assert_eq!(c.threshold_mode(FactorKind::Momentum), ThresholdMode::Mean);
    assert_eq!(c.threshold_mode(FactorKind::Perseverance), ThresholdMode::Mean);
    assert_eq!(c.load_weights.cognitive, 0.7);
    assert_eq!(c.task_type_multiplier(Some("play")), 0.25);
    assert_eq!(c.task_type_multiplier(Some("work")), 1.0);
}

#[test]
fn partial_threshold_table_keeps_builtin_modes() {
    let c = EngineConfig::from_toml_str("[baseline_threshold_mode]\nload = \"mean\"\n").unwrap();
    assert_eq!(c.threshold_mode(FactorKind::Load), ThresholdMode::Mean);
    assert_eq!(c.threshold_mode(FactorKind::Perseverance), ThresholdMode::Mean);
    assert_eq!(c.threshold_mode(FactorKind::Focus), ThresholdMode::Median);

    let c = EngineConfig::from_toml_str("[baseline_threshold_mode]\nperseverance = \"median\"\n")
        .unwrap();
    assert_eq!(c.threshold_mode(FactorKind::Perseverance), ThresholdMode::Median);
}

#[test]
fn partial_multiplier_table_keeps_builtin_types() {
    let c = EngineConfig::from_toml_str("[task_type_multipliers]\nchores = 0.8\n").unwrap();
    assert_eq!(c.task_type_multiplier(Some("chores")), 0.8);
    assert_eq!(c.task_type_multiplier(Some("play")), 0.5);
}

#[test]
fn task_type_keys_match_any_case() {
    let c = EngineConfig {
        task_type_multipliers: BTreeMap::from([("Play".to_string(), 0.25)]),
        ..EngineConfig::default()
    };
    assert!(c.validate().is_ok());
    assert_eq!(c.task_type_multiplier(Some("play")), 0.25);
    assert_eq!(c.task_type_multiplier(Some("PLAY")), 0.25);
    assert_eq!(c.task_type_multiplier(Some("work")), 1.0);
}

#[test]
fn task_type_multiplier_defaults() {
    let c = EngineConfig::default();
    assert_eq!(c.task_type_multiplier(Some("play")), 0.5);
    assert_eq!(c.task_type_multiplier(Some("self_care")), 1.0);
    assert_eq!(c.task_type_multiplier(Some("chores")), DEFAULT_TASK_TYPE_MULTIPLIER);
    assert_eq!(c.task_type_multiplier(None), DEFAULT_TASK_TYPE_MULTIPLIER);
}

#[test]
fn rejects_negative_exponent() {
    let err = EngineConfig::from_toml_str("synergy_exponent = -0.5").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidSynergyExponent(p) if p == -0.5));
}

#[test]
fn rejects_out_of_range_values() {
    let cases = [
        "aggregate_bonus_cap = 1.5",
        "aggregate_bonus_cap = -0.1",
        "sudden_spike_window = 1",
        "burnout_threshold_minutes = 0.0",
        "synergy_pair = [\"focus\", \"focus\"]",
        "[load_weights]\ncognitive = 0.0\nemotional = 0.0",
        "[load_weights]\ncognitive = -1.0",
        "[task_type_multipliers]\nwork = -2.0",
        "[baseline_threshold_mode]\ngrit = \"mean\"",
    ];
    for doc in cases {
        assert!(EngineConfig::from_toml_str(doc).is_err(), "accepted: {doc}");
    }
}

#[test]
fn rejects_unknown_keys_and_bad_syntax() {
    assert!(matches!(
        EngineConfig::from_toml_str("synergy_exponant = 1.0"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        EngineConfig::from_toml_str("synergy_exponent = "),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        EngineConfig::from_toml_str("formula = \"v9\""),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "aggregate_bonus_cap = 0.2").unwrap();
    let config = EngineConfig::load(file.path()).unwrap();
    assert_eq!(config.aggregate_bonus_cap, 0.2);
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("absent.toml"));
}
