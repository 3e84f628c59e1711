use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn difficulty_zero_inputs() {
    assert_eq!(difficulty(Some(0.0), Some(0.0)), 0.0);
}

#[test]
fn difficulty_missing_aversion_is_zero() {
    assert_eq!(difficulty(None, Some(90.0)), 0.0);
}

#[test]
fn difficulty_formula() {
    let d = difficulty(Some(50.0), Some(50.0));
    let expected = 1.0 - (-(0.7 * 50.0 + 0.3 * 50.0) / 50.0_f64).exp();
    assert!(approx(d, expected), "expected {expected}, got {d}");
}

#[test]
fn difficulty_stays_below_one_for_huge_inputs() {
    let d = difficulty(Some(1e12), Some(1e12));
    assert!((0.0..=1.0).contains(&d), "got {d}");
}

#[test]
fn speed_piecewise() {
    assert_eq!(speed(Some(20.0), Some(60.0)), 1.0);
    assert!(approx(speed(Some(30.0), Some(60.0)), 1.0));
    assert!(approx(speed(Some(45.0), Some(60.0)), 0.75));
    assert!(approx(speed(Some(60.0), Some(60.0)), 0.5));
    assert!(approx(speed(Some(120.0), Some(60.0)), 0.25));
}

#[test]
fn speed_missing_or_zero_time_is_neutral() {
    assert_eq!(speed(None, Some(60.0)), NEUTRAL_SPEED);
    assert_eq!(speed(Some(60.0), None), NEUTRAL_SPEED);
    assert_eq!(speed(Some(60.0), Some(0.0)), NEUTRAL_SPEED);
    assert_eq!(speed(Some(0.0), Some(60.0)), NEUTRAL_SPEED);
}

#[test]
fn start_speed_linear_then_decay() {
    assert_eq!(start_speed(Some(0.0)), 1.0);
    assert!(approx(start_speed(Some(60.0)), 0.75));
    assert!(approx(start_speed(Some(120.0)), 0.5));
    let later = start_speed(Some(600.0));
    assert!(approx(later, 0.5 * (-1.0_f64).exp()), "got {later}");
}

#[test]
fn start_speed_is_continuous_at_knee() {
    let before = start_speed(Some(119.999));
    let after = start_speed(Some(120.001));
    assert!((before - after).abs() < 1e-4);
}

#[test]
fn start_speed_negative_delay_counts_as_immediate() {
    assert_eq!(start_speed(Some(-30.0)), 1.0);
}

#[test]
fn start_speed_missing_is_neutral() {
    assert_eq!(start_speed(None), NEUTRAL_START_SPEED);
    assert_eq!(start_speed(Some(f64::NAN)), NEUTRAL_START_SPEED);
}

#[test]
fn completion_piecewise() {
    assert_eq!(completion(Some(100.0)), 1.0);
    assert_eq!(completion(Some(180.0)), 1.0);
    assert!(approx(completion(Some(95.0)), 0.95));
    assert!(approx(completion(Some(70.0)), 0.7));
    assert!(approx(completion(Some(25.0)), 0.25));
    assert_eq!(completion(Some(-10.0)), 0.0);
}

#[test]
fn completion_missing_assumes_done() {
    assert_eq!(completion(None), ASSUMED_COMPLETION);
}

#[test]
fn completion_monotonic_from_half_to_full() {
    let mut prev = completion(Some(50.0));
    for p in 51..=100 {
        let c = completion(Some(p as f64));
        assert!(c >= prev, "completion({p}) = {c} < {prev}");
        prev = c;
    }
}

#[test]
fn time_bonus_neutral_when_on_time() {
    assert_eq!(time_bonus(Some(60.0), Some(60.0), 1.0, Some(0)), 1.0);
    assert_eq!(time_bonus(Some(30.0), Some(60.0), 1.0, Some(0)), 1.0);
    assert_eq!(time_bonus(None, Some(60.0), 1.0, Some(0)), 1.0);
}

#[test]
fn time_bonus_linear_to_double() {
    // ratio 2.0, full difficulty, fresh task → 2.0
    assert!(approx(time_bonus(Some(120.0), Some(60.0), 1.0, Some(0)), 2.0));
    // zero difficulty halves the excess
    assert!(approx(time_bonus(Some(120.0), Some(60.0), 0.0, Some(0)), 1.5));
}

#[test]
fn time_bonus_diminishes_beyond_double() {
    let b4 = time_bonus(Some(240.0), Some(60.0), 1.0, None);
    let b10 = time_bonus(Some(600.0), Some(60.0), 1.0, None);
    assert!(b4 > 2.0 && b10 > b4 && b10 < MAX_TIME_BONUS, "b4={b4} b10={b10}");
}

#[test]
fn time_bonus_fades_with_repetition() {
    let fresh = time_bonus(Some(120.0), Some(60.0), 1.0, Some(10));
    let routine = time_bonus(Some(120.0), Some(60.0), 1.0, Some(50));
    assert!(approx(fresh, 2.0));
    // 40 completions past the fade start halve the excess
    assert!(approx(routine, 1.5), "got {routine}");
}
