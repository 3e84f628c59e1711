//! Reading record files for the command line tool.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use taskscore::{InputError, TaskRecord};
use tracing::debug;

/// Read a JSON array of records. Array elements that are not objects
/// become empty records rather than errors.
pub fn read_records(path: &Path) -> Result<Vec<TaskRecord>, InputError> {
    let contents = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&contents).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Array(items) = value else {
        return Err(InputError::NotAnArray {
            path: path.to_path_buf(),
        });
    };
    let records: Vec<TaskRecord> = items.iter().map(TaskRecord::from_value).collect();
    debug!(path = %path.display(), records = records.len(), "records loaded");
    Ok(records)
}

/// Fill missing `completion_count`s with the number of records sharing the
/// same `task_id`. Counts already present are left alone.
pub fn fill_completion_counts(records: &mut [TaskRecord]) {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for r in records.iter() {
        *counts.entry(r.task_id.clone()).or_default() += 1;
    }
    for r in records.iter_mut() {
        if r.completion_count.is_none() {
            r.completion_count = counts.get(&r.task_id).copied();
        }
    }
}

#[cfg(test)]
#[path = "input_test.rs"]
mod tests;
