//! FNV-1a fingerprint of a record collection.
//!
//! Used as the collection-identity part of the statistics cache key. Every
//! field that can change a factor value is folded in, with a 0xFF separator
//! after variable-length fields so `"ab"+"c"` and `"a"+"bc"` differ.
use crate::factors::LoadWeights;
use crate::record::TaskRecord;

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

struct Fnv(u64);

impl Fnv {
    fn bytes(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.0 ^= *b as u64;
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }

    fn separator(&mut self) {
        self.0 ^= 0xff;
        self.0 = self.0.wrapping_mul(FNV_PRIME);
    }

    fn str(&mut self, s: &str) {
        self.bytes(s.as_bytes());
        self.separator();
    }

    fn u64(&mut self, v: u64) {
        self.bytes(&v.to_le_bytes());
    }

    fn opt_f64(&mut self, v: Option<f64>) {
        match v {
            Some(x) => {
                self.bytes(&[1]);
                self.u64(x.to_bits());
            }
            None => self.bytes(&[0]),
        }
    }

    fn opt_i64(&mut self, v: Option<i64>) {
        match v {
            Some(x) => {
                self.bytes(&[1]);
                self.u64(x as u64);
            }
            None => self.bytes(&[0]),
        }
    }
}

/// Deterministic fingerprint of `records` as seen through `weights`.
/// Order-sensitive: the same records in another order hash differently.
pub fn fingerprint(records: &[TaskRecord], weights: &LoadWeights) -> u64 {
    let mut h = Fnv(FNV_OFFSET);
    h.u64(weights.cognitive.to_bits());
    h.u64(weights.emotional.to_bits());
    h.u64(records.len() as u64);
    for r in records {
        h.str(r.instance_id.as_deref().unwrap_or(""));
        h.str(&r.task_id);
        h.str(r.task_type.as_deref().unwrap_or(""));
        h.opt_f64(r.completion_percent);
        h.opt_f64(r.predicted.time_estimate_minutes);
        h.opt_f64(r.predicted.initial_aversion);
        h.opt_f64(r.predicted.expected_relief);
        h.opt_f64(r.actual.time_actual_minutes);
        h.opt_f64(r.actual.actual_relief);
        h.opt_f64(r.actual.actual_emotional);
        h.opt_f64(r.actual.cognitive_load);
        h.opt_f64(r.actual.emotional_load);
        h.opt_f64(r.actual.task_difficulty);
        h.opt_f64(r.actual.completion_percent);
        for (name, intensity) in r.actual.emotions.iter() {
            h.str(name);
            h.u64(intensity.to_bits());
        }
        h.separator();
        h.opt_i64(r.initialized_at.map(|t| t.timestamp_millis()));
        h.opt_i64(r.started_at.map(|t| t.timestamp_millis()));
        h.opt_i64(r.completed_at.map(|t| t.timestamp_millis()));
        h.opt_i64(r.completion_count.map(i64::from));
    }
    h.0
}
