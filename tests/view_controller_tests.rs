use chart_engine::data_types::Range;
use chart_engine::view_controller::ViewController;

#[test]
fn test_pan_by_fraction_of_length() {
    let r = ViewController::pan(Range::new(0.0, 100.0).unwrap(), 0.1);
    assert_eq!(r.lower(), 10.0);
    assert_eq!(r.upper(), 110.0);
}

#[test]
fn test_resize_around_center() {
    let r = ViewController::resize(Range::new(0.0, 100.0).unwrap(), 0.5, 50.0).unwrap();
    assert_eq!(r.lower(), 25.0);
    assert_eq!(r.upper(), 75.0);
}

#[test]
fn test_resize_keeps_anchor_fraction() {
    let r = ViewController::resize(Range::new(0.0, 100.0).unwrap(), 2.0, 25.0).unwrap();
    assert_eq!(r.lower(), -25.0);
    assert_eq!(r.upper(), 175.0);
    // 25 was a quarter of the way in and stays there
    assert!(((25.0 - r.lower()) / r.length() - 0.25).abs() < 1e-12);
}

#[test]
fn test_resize_non_positive_means_auto() {
    let r = Range::new(0.0, 1.0).unwrap();
    assert!(ViewController::resize(r, 0.0, 0.5).is_none());
    assert!(ViewController::resize(r, -1.0, 0.5).is_none());
}

#[test]
fn test_resize_has_minimum_span() {
    let r = ViewController::resize(Range::new(0.0, 1.0).unwrap(), 1e-15, 0.5).unwrap();
    assert!(r.length() >= 1e-9 * 0.999);
}

#[test]
fn test_resize_log_in_decades() {
    let r = ViewController::resize_log(Range::new(1.0, 10_000.0).unwrap(), 0.5, 100.0).unwrap();
    assert!((r.lower() - 10.0).abs() < 1e-9);
    assert!((r.upper() - 1000.0).abs() < 1e-9);
}

#[test]
fn test_zoom_factor_direction() {
    assert!(ViewController::compute_zoom_factor(10.0, 100.0) < 1.0);
    assert!(ViewController::compute_zoom_factor(-10.0, 100.0) > 1.0);
}

#[test]
fn test_split_by_weight() {
    let spans = ViewController::split_by_weight(210.0, &[1.0, 2.0], 10.0);
    assert_eq!(spans, vec![(0.0, 200.0 / 3.0), (200.0 / 3.0 + 10.0, 400.0 / 3.0)]);
    assert!(ViewController::split_by_weight(100.0, &[], 5.0).is_empty());
}
