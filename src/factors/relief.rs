//! Net relief and its two one-sided views.
//!
//! `net = actual − expected`. Serendipity is the positive part, disappointment
//! the magnitude of the negative part, so at most one of them is non-zero.
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Relief {
    pub net: Option<f64>,
    pub serendipity: f64,
    pub disappointment: f64,
}

impl Relief {
    pub fn new(expected: Option<f64>, actual: Option<f64>) -> Self {
        let net = net_relief(expected, actual);
        Self {
            net,
            serendipity: net.map_or(0.0, serendipity_factor),
            disappointment: net.map_or(0.0, disappointment_factor),
        }
    }
}

pub fn net_relief(expected: Option<f64>, actual: Option<f64>) -> Option<f64> {
    let net = actual? - expected?;
    net.is_finite().then_some(net)
}

pub fn serendipity_factor(net: f64) -> f64 {
    if net > 0.0 { net } else { 0.0 }
}

pub fn disappointment_factor(net: f64) -> f64 {
    if net < 0.0 { -net } else { 0.0 }
}
