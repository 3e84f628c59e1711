use super::*;

#[test]
fn piecewise_interpolates_between_breakpoints() {
    let s = piecewise(70.0, COMPLETION_CURVE);
    assert!((s - 0.7).abs() < 1e-12, "70% should map to 0.7, got {s}");
}

#[test]
fn piecewise_clamps_below_and_above() {
    assert_eq!(piecewise(-5.0, COMPLETION_CURVE), 0.0);
    assert_eq!(piecewise(250.0, COMPLETION_CURVE), 1.0);
}

#[test]
fn piecewise_nan_maps_to_first_output() {
    assert_eq!(piecewise(f64::NAN, CLUSTERING_CURVE), 1.0);
}

#[test]
fn piecewise_empty_curve_is_zero() {
    assert_eq!(piecewise(3.0, &[]), 0.0);
}

#[test]
fn piecewise_duplicate_input_takes_upper_output() {
    let curve = [
        bp(1.0, 0.0),
        bp(1.0, 1.0),
        bp(2.0, 1.0),
    ];
    assert_eq!(piecewise(1.0, &curve), 0.0);
    assert_eq!(piecewise(1.5, &curve), 1.0);
}

#[test]
fn sd_bonus_curve_breakpoints() {
    let expect = [(0.0, 0.0), (1.0, 0.02), (2.0, 0.05), (3.0, 0.10), (4.0, 0.15), (9.0, 0.15)];
    for (sd, bonus) in expect {
        let got = piecewise(sd, SD_BONUS_CURVE);
        assert!((got - bonus).abs() < 1e-12, "sd={sd} -> expected {bonus}, got {got}");
    }
}

#[test]
fn curves_are_monotonic_in_the_documented_direction() {
    let inputs: Vec<f64> = (0..=300).map(|i| i as f64 * 5.0).collect();
    for w in inputs.windows(2) {
        assert!(piecewise(w[1], COMPLETION_CURVE) >= piecewise(w[0], COMPLETION_CURVE));
        assert!(piecewise(w[1], VOLUME_CURVE) >= piecewise(w[0], VOLUME_CURVE));
        assert!(piecewise(w[1], SD_BONUS_CURVE) >= piecewise(w[0], SD_BONUS_CURVE));
        assert!(piecewise(w[1], CLUSTERING_CURVE) <= piecewise(w[0], CLUSTERING_CURVE));
        assert!(piecewise(w[1], START_DELAY_CURVE) <= piecewise(w[0], START_DELAY_CURVE));
    }
}

#[test]
fn finite_or_replaces_nan_and_infinity() {
    assert_eq!(finite_or(f64::NAN, 0.5), 0.5);
    assert_eq!(finite_or(f64::INFINITY, 0.5), 0.5);
    assert_eq!(finite_or(0.25, 0.5), 0.25);
}
