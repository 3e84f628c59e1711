use super::*;
use chrono::TimeZone;

fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap() + Duration::minutes(minutes)
}

#[test]
fn weights_sum_to_one() {
    let total = W_CLUSTERING + W_VOLUME + W_CONSISTENCY + W_ACCELERATION;
    assert!((total - 1.0).abs() < 1e-12);
}

#[test]
fn neutral_without_reference_time() {
    let m = momentum(None, &[at(-10)], true);
    assert_eq!(m, Momentum::neutral());
    assert!((m.value - NEUTRAL_MOMENTUM).abs() < 1e-12);
}

#[test]
fn neutral_at_the_start_of_time() {
    let t = DateTime::<Utc>::MIN_UTC + Duration::hours(1);
    assert_eq!(momentum(Some(t), &[], true), Momentum::neutral());
    let t = DateTime::<Utc>::MIN_UTC + Duration::days(WEEK_DAYS) - Duration::seconds(1);
    assert_eq!(momentum(Some(t), &[], true), Momentum::neutral());
}

#[test]
fn neutral_without_neighborhood() {
    assert_eq!(momentum(Some(at(0)), &[], false), Momentum::neutral());
}

#[test]
fn first_record_of_a_collection() {
    let m = momentum(Some(at(0)), &[], true);
    assert_eq!(m.clustering, NEUTRAL_MOMENTUM);
    assert!((m.volume - 0.2).abs() < 1e-12);
    assert_eq!(m.consistency, 0.0);
    assert_eq!(m.acceleration, NEUTRAL_MOMENTUM);
    let expected = 0.4 * 0.5 + 0.3 * 0.2 + 0.1 * 0.5;
    assert!((m.value - expected).abs() < 1e-12, "got {}", m.value);
}

#[test]
fn back_to_back_completions_cluster() {
    let prior = [at(-30), at(-10)];
    let m = momentum(Some(at(0)), &prior, true);
    assert_eq!(m.clustering, 1.0);
    assert!((m.volume - 0.5).abs() < 1e-12);
    // nothing earlier in the week: the pace is all new
    assert_eq!(m.acceleration, 1.0);
}

#[test]
fn stale_completion_barely_clusters() {
    let prior = [at(-3 * 24 * 60)];
    let m = momentum(Some(at(0)), &prior, true);
    assert!((m.clustering - 0.1).abs() < 1e-12);
    assert!((m.volume - 0.2).abs() < 1e-12);
    // quiet day after an active week
    assert_eq!(m.acceleration, 0.0);
}

#[test]
fn daily_habit_is_consistent_and_steady() {
    let mut prior: Vec<_> = (1..=6).rev().map(|d| at(-d * 24 * 60 - 60)).collect();
    prior.push(at(-60));
    let m = momentum(Some(at(0)), &prior, true);
    assert!((m.consistency - 1.0).abs() < 1e-12, "7 active days, got {}", m.consistency);
    // one today vs. one per day before → same pace
    assert!((m.acceleration - 0.5).abs() < 1e-12, "got {}", m.acceleration);
}

#[test]
fn value_is_bounded() {
    let prior: Vec<_> = (1..200).rev().map(|i| at(-i)).collect();
    let m = momentum(Some(at(0)), &prior, true);
    assert!((0.0..=1.0).contains(&m.value));
}
