//! Task completion records and the accessor that normalizes them.
//!
//! Records arrive in one of two shapes:
//! - a flat tabular row where `predicted` and `actual` are JSON-encoded
//!   strings and every scalar may be text, or
//! - a mapping whose payloads are already nested objects.
//!
//! Both decode into [`TaskRecord`]. Decoding never fails: a payload that
//! cannot be decoded becomes an empty payload, and a scalar that cannot be
//! read becomes `None`.

mod payload;
mod timestamp;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

pub use payload::{Actual, Emotions, Predicted};
pub use timestamp::{parse_timestamp, parse_timestamp_str};

use payload::{number, number_from};

/// One completed (or partially completed) task instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskRecord {
    pub instance_id: Option<String>,
    /// Template identifier shared by repeated instances of the same task.
    pub task_id: String,
    pub task_type: Option<String>,
    pub completion_percent: Option<f64>,
    pub predicted: Predicted,
    pub actual: Actual,
    pub initialized_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Historical completions of `task_id`, supplied by the caller.
    pub completion_count: Option<u32>,
}

impl TaskRecord {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            ..Self::default()
        }
    }

    /// Decode any JSON value. Non-objects yield an empty record.
    pub fn from_value(value: &Value) -> Self {
        match value.as_object() {
            Some(obj) => Self::from_map(obj),
            None => {
                debug!("record is not a JSON object; treating as empty");
                Self::default()
            }
        }
    }

    /// Decode a record from either the tabular or the nested shape.
    pub fn from_map(obj: &Map<String, Value>) -> Self {
        let predicted = decode_payload(obj.get("predicted"), "predicted");
        let actual = decode_payload(obj.get("actual"), "actual");

        Self {
            instance_id: text(obj, &["instance_id", "id"]),
            task_id: text(obj, &["task_id"]).unwrap_or_default(),
            task_type: text(obj, &["task_type"]).map(|t| t.to_lowercase()),
            completion_percent: number(obj, &["completion_percent"]),
            predicted: Predicted::from_object(&predicted),
            actual: Actual::from_object(&actual),
            initialized_at: timestamp(obj, &["initialized_at", "created_at"]),
            started_at: timestamp(obj, &["started_at"]),
            completed_at: timestamp(obj, &["completed_at"]),
            completion_count: number(obj, &["completion_count"])
                .filter(|c| *c >= 0.0)
                .map(|c| c.min(u32::MAX as f64) as u32),
        }
    }

    /// Completion percentage from the top-level field, else from the
    /// `actual` payload. Negative values clamp to 0.
    pub fn completion(&self) -> Option<f64> {
        self.completion_percent
            .or(self.actual.completion_percent)
            .filter(|p| p.is_finite())
            .map(|p| p.max(0.0))
    }

    /// The moment this record is placed on the timeline.
    pub fn reference_time(&self) -> Option<DateTime<Utc>> {
        self.completed_at.or(self.started_at).or(self.initialized_at)
    }

    /// Untyped records count as work.
    pub fn is_work(&self) -> bool {
        self.task_type.as_deref().is_none_or(|t| t == "work")
    }

    /// Minutes between initialization and start, when both are known.
    pub fn start_delay_minutes(&self) -> Option<f64> {
        let (init, start) = (self.initialized_at?, self.started_at?);
        Some((start - init).num_milliseconds() as f64 / 60_000.0)
    }
}

/// Decode a sub-payload that may be an object, a JSON-encoded string, or
/// missing. Anything that is not ultimately an object becomes empty.
fn decode_payload(value: Option<&Value>, field: &str) -> Map<String, Value> {
    match value {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(obj)) => obj.clone(),
        Some(Value::String(s)) if s.trim().is_empty() => Map::new(),
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Object(obj)) => obj,
            Ok(other) => {
                debug!(field, kind = json_kind(&other), "payload decoded to a non-object");
                Map::new()
            }
            Err(err) => {
                debug!(field, %err, "malformed payload");
                Map::new()
            }
        },
        Some(other) => {
            debug!(field, kind = json_kind(other), "unexpected payload type");
            Map::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match obj.get(*k)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        v @ Value::Number(_) => number_from(v).map(|n| n.to_string()),
        _ => None,
    })
}

fn timestamp(obj: &Map<String, Value>, keys: &[&str]) -> Option<DateTime<Utc>> {
    keys.iter()
        .find_map(|k| obj.get(*k).and_then(parse_timestamp))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
