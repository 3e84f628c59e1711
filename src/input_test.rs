use super::*;
use std::io::Write;

fn file_with(contents: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f
}

#[test]
fn reads_both_record_shapes() {
    let f = file_with(
        r#"[
  {"task_id": "a", "completion_percent": "80", "actual": "{\"time_actual_minutes\": 30}"},
  {"task_id": "b", "actual": {"time_actual_minutes": 45}},
  42
]"#,
    );
    let records = read_records(f.path()).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].completion_percent, Some(80.0));
    assert_eq!(records[0].actual.time_actual_minutes, Some(30.0));
    assert_eq!(records[1].actual.time_actual_minutes, Some(45.0));
    assert_eq!(records[2], TaskRecord::default());
}

#[test]
fn rejects_non_array_documents() {
    let f = file_with(r#"{"task_id": "a"}"#);
    assert!(matches!(read_records(f.path()), Err(InputError::NotAnArray { .. })));
}

#[test]
fn rejects_invalid_json() {
    let f = file_with("[{");
    let err = read_records(f.path()).unwrap_err();
    assert!(matches!(err, InputError::Json { .. }));
    assert!(err.to_string().contains("not valid JSON"));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_records(&dir.path().join("none.json")).unwrap_err();
    assert!(matches!(err, InputError::Read { .. }));
}

#[test]
fn completion_counts_fill_only_gaps() {
    let mut records = vec![
        TaskRecord::new("a"),
        TaskRecord::new("a"),
        TaskRecord::new("b"),
        TaskRecord {
            completion_count: Some(99),
            ..TaskRecord::new("a")
        },
    ];
    fill_completion_counts(&mut records);
    let counts: Vec<_> = records.iter().map(|r| r.completion_count).collect();
    assert_eq!(counts, vec![Some(3), Some(3), Some(1), Some(99)]);
}
