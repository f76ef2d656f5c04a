use super::*;

#[test]
fn frame_rate_rejects_non_positive_and_non_finite() {
    assert!(FrameRate::new(0.0).is_err());
    assert!(FrameRate::new(-3.0).is_err());
    assert!(FrameRate::new(f64::NAN).is_err());
    assert!(FrameRate::new(f64::INFINITY).is_err());
}

#[test]
fn draw_interval_is_reciprocal_in_ms() {
    let fps = FrameRate::new(30.0).unwrap();
    assert!((fps.draw_interval_ms() - 33.333_333).abs() < 1e-3);
    assert_eq!(FrameRate::new(4.0).unwrap().draw_interval_ms(), 250.0);
}

#[test]
fn frame_index_next_and_display() {
    assert_eq!(FrameIndex(4).next(), FrameIndex(5));
    assert_eq!(FrameIndex(u64::MAX).next(), FrameIndex(u64::MAX));
    assert_eq!(FrameIndex(7).to_string(), "7");
}
