//! Combined cognitive + emotional load.
//!
//! The relative weight of the two loads is configuration, not a constant.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadWeights {
    pub cognitive: f64,
    pub emotional: f64,
}

impl Default for LoadWeights {
    fn default() -> Self {
        Self {
            cognitive: 0.5,
            emotional: 0.5,
        }
    }
}

impl LoadWeights {
    /// Weighted mean of the loads that are present, renormalized over their
    /// weights. `None` when neither load is known or every present load has
    /// zero weight.
    pub fn combine(&self, cognitive: Option<f64>, emotional: Option<f64>) -> Option<f64> {
        let parts = [(cognitive, self.cognitive), (emotional, self.emotional)];
        let (sum, weight) = parts
            .iter()
            .filter_map(|(v, w)| v.map(|v| (v.max(0.0), *w)))
            .fold((0.0, 0.0), |(s, ws), (v, w)| (s + v * w, ws + w));
        if weight <= 0.0 {
            return None;
        }
        let load = sum / weight;
        load.is_finite().then_some(load)
    }
}
