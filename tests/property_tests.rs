use chart_engine::axis::Axis;
use chart_engine::axis_space::AxisSpace;
use chart_engine::data_types::{Range, Rect, RectangleEdge};
use chart_engine::view_controller::ViewController;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EDGES: [RectangleEdge; 4] = [
    RectangleEdge::Top,
    RectangleEdge::Bottom,
    RectangleEdge::Left,
    RectangleEdge::Right,
];

fn random_range(rng: &mut StdRng) -> Range {
    let lower = rng.random_range(-1000.0..1000.0);
    let length = rng.random_range(0.001..500.0);
    Range::new(lower, lower + length).unwrap()
}

#[test]
fn test_combine_contains_both_inputs() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let a = random_range(&mut rng);
        let b = random_range(&mut rng);
        let c = Range::combine(Some(a), Some(b)).unwrap();
        assert!(c.lower() <= a.lower() && c.lower() <= b.lower());
        assert!(c.upper() >= a.upper() && c.upper() >= b.upper());
        assert_eq!(Range::combine(Some(b), Some(a)), Some(c));
        assert_eq!(Range::combine(Some(a), None), Some(a));
    }
}

#[test]
fn test_value_coordinate_round_trip() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..300 {
        let mut axis = Axis::new("x");
        let range = random_range(&mut rng);
        axis.set_range(range).unwrap();
        axis.set_inverted(rng.random_bool(0.5));
        let area = Rect::new(
            rng.random_range(0.0..100.0),
            rng.random_range(0.0..100.0),
            rng.random_range(10.0..800.0),
            rng.random_range(10.0..600.0),
        );
        let edge = EDGES[rng.random_range(0..4)];
        let value = rng.random_range(range.lower()..=range.upper());
        let c = axis.value_to_coordinate(value, area, edge).unwrap();
        let back = axis.coordinate_to_value(c, area, edge);
        assert!((back - value).abs() <= 1e-6 * range.length().max(1.0), "{value} -> {c} -> {back}");
    }
}

#[test]
fn test_axis_space_only_grows() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut space = AxisSpace::new();
    for _ in 0..1000 {
        let edge = EDGES[rng.random_range(0..4)];
        let before = space.get(edge);
        space.ensure_at_least(edge, rng.random_range(-10.0..100.0));
        assert!(space.get(edge) >= before);
    }
    space.ensure_at_least(RectangleEdge::Top, f64::NAN);
    assert!(space.top() >= 0.0);
}

#[test]
fn test_resize_keeps_anchor_fixed() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..300 {
        let range = random_range(&mut rng);
        let anchor = rng.random_range(range.lower()..=range.upper());
        let factor = rng.random_range(0.1..4.0);
        let resized = ViewController::resize(range, factor, anchor).unwrap();
        assert!((resized.length() - range.length() * factor).abs() < 1e-6);
        let before = (anchor - range.lower()) / range.length();
        let after = (anchor - resized.lower()) / resized.length();
        assert!((before - after).abs() < 1e-9);
    }
}
