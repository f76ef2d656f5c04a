use std::time::Duration;

use super::*;

#[tokio::test]
async fn fixed_step_advances_by_step() {
    let mut t = FixedStepTicks::new(10.0, 5.0);
    assert_eq!(t.next_tick().await, 10.0);
    assert_eq!(t.next_tick().await, 15.0);
    assert_eq!(t.next_tick().await, 20.0);
}

#[tokio::test]
async fn scripted_replays_then_stalls() {
    let mut t = ScriptedTicks::new([0.0, 40.0]);
    assert_eq!(t.next_tick().await, 0.0);
    assert_eq!(t.next_tick().await, 40.0);
    assert_eq!(t.delivered(), 2);
    assert_eq!(t.remaining(), 0);

    let stalled = tokio::time::timeout(Duration::from_millis(20), t.next_tick()).await;
    assert!(stalled.is_err());
}

#[tokio::test(start_paused = true)]
async fn interval_ticks_follow_the_refresh_period() {
    let mut t = IntervalTicks::new(50.0).unwrap();
    assert_eq!(t.period(), Duration::from_millis(20));
    let first = t.next_tick().await;
    let second = t.next_tick().await;
    let third = t.next_tick().await;
    assert_eq!(first, 0.0);
    assert!((second - 20.0).abs() < 1e-6);
    assert!((third - 40.0).abs() < 1e-6);
}

#[test]
fn interval_ticks_reject_bad_rates() {
    assert!(IntervalTicks::new(0.0).is_err());
    assert!(IntervalTicks::new(f64::NAN).is_err());
}

#[tokio::test(start_paused = true)]
async fn cloned_interval_restarts_its_origin() {
    let mut t = IntervalTicks::new(50.0).unwrap();
    t.next_tick().await;
    t.next_tick().await;

    let mut fresh = t.clone();
    assert_eq!(fresh.period(), t.period());
    assert_eq!(fresh.next_tick().await, 0.0);
}
