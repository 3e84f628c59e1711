//! Typed views over the `predicted` and `actual` payloads of a record.
//!
//! Payloads are free-form JSON objects. Every field is optional; a value
//! that is absent, non-numeric, or non-finite decodes to `None` so the
//! factor calculators see missing data instead of garbage.
use serde::Serialize;
use serde_json::{Map, Value};

/// Fields the user predicted before starting the task.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Predicted {
    pub time_estimate_minutes: Option<f64>,
    pub initial_aversion: Option<f64>,
    pub expected_relief: Option<f64>,
}

/// Fields recorded after the task was completed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Actual {
    pub time_actual_minutes: Option<f64>,
    pub actual_relief: Option<f64>,
    pub actual_emotional: Option<f64>,
    pub cognitive_load: Option<f64>,
    pub emotional_load: Option<f64>,
    pub task_difficulty: Option<f64>,
    pub completion_percent: Option<f64>,
    pub emotions: Emotions,
}

/// Emotion tags with an intensity each.
///
/// Accepts either a list of names (`["focused", "calm"]`, intensity 1 each)
/// or a mapping of name to intensity (`{"focused": 70}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Emotions(pub Vec<(String, f64)>);

impl Emotions {
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, w)| (name.as_str(), *w))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Array(items)) => Self(
                items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .map(|name| (name.trim().to_lowercase(), 1.0))
                    .collect(),
            ),
            Some(Value::Object(map)) => Self(
                map.iter()
                    .filter_map(|(name, v)| {
                        number_from(v)
                            .filter(|w| *w > 0.0)
                            .map(|w| (name.trim().to_lowercase(), w))
                    })
                    .collect(),
            ),
            Some(Value::String(s)) => Self(
                s.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(|name| (name.to_lowercase(), 1.0))
                    .collect(),
            ),
            _ => Self::default(),
        }
    }
}

impl Predicted {
    pub fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            time_estimate_minutes: number(obj, &["time_estimate_minutes", "time_estimate"]),
            initial_aversion: number(obj, &["initial_aversion", "aversion"]),
            expected_relief: number(obj, &["expected_relief"]),
        }
    }
}

impl Actual {
    pub fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            time_actual_minutes: number(obj, &["time_actual_minutes", "time_actual"]),
            actual_relief: number(obj, &["actual_relief", "relief_score"]),
            actual_emotional: number(obj, &["actual_emotional"]),
            cognitive_load: number(obj, &["cognitive_load", "actual_cognitive"]),
            emotional_load: number(obj, &["emotional_load"]),
            task_difficulty: number(obj, &["task_difficulty"]),
            completion_percent: number(obj, &["completion_percent"]),
            emotions: Emotions::from_value(obj.get("emotions")),
        }
    }

    /// Emotional load, falling back to the `actual_emotional` rating.
    pub fn emotional(&self) -> Option<f64> {
        self.emotional_load.or(self.actual_emotional)
    }
}

/// First finite number found under any of `keys`.
pub(crate) fn number(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| obj.get(*k).and_then(number_from))
}

/// Interpret a JSON value as a finite number. Numeric strings are accepted
/// because tabular exports store everything as text.
pub(crate) fn number_from(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}
