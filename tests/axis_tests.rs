use chart_engine::axis::{Axis, AxisData};
use chart_engine::data_types::{AxisConfig, Range, Rect, RectangleEdge};
use chart_engine::scales::ScaleKind;
use chart_engine::PlotError;

fn data(lower: f64, upper: f64) -> AxisData {
    AxisData {
        range: Some(Range::new(lower, upper).unwrap()),
        categories: Vec::new(),
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_auto_range_applies_margins() {
    let mut axis = Axis::new("x");
    axis.configure(&data(0.0, 10.0));
    assert!(approx(axis.range().lower(), -0.5));
    assert!(approx(axis.range().upper(), 10.5));
}

#[test]
fn test_auto_range_is_idempotent() {
    let mut axis = Axis::new("x");
    axis.configure(&data(2.0, 8.0));
    let first = axis.range();
    axis.configure(&data(2.0, 8.0));
    assert_eq!(axis.range(), first);
}

#[test]
fn test_auto_range_includes_zero() {
    let mut axis = Axis::new("y");
    axis.set_margins(0.0, 0.0).unwrap();
    axis.set_auto_range_includes_zero(true);
    axis.configure(&data(5.0, 10.0));
    assert_eq!(axis.range(), Range::new(0.0, 10.0).unwrap());
}

#[test]
fn test_auto_range_minimum_size() {
    let mut axis = Axis::new("y");
    axis.configure(&data(5.0, 5.0));
    assert!(approx(axis.range().lower(), 4.5));
    assert!(approx(axis.range().upper(), 5.5));
}

#[test]
fn test_auto_range_without_data_uses_default() {
    let mut axis = Axis::new("y");
    axis.configure(&data(3.0, 9.0));
    axis.configure(&AxisData::default());
    assert_eq!(axis.range(), Range::new(0.0, 1.0).unwrap());
}

#[test]
fn test_fixed_range_is_not_reconfigured() {
    let mut axis = Axis::new("y");
    axis.set_range(Range::new(2.0, 3.0).unwrap()).unwrap();
    assert!(!axis.is_auto_range());
    axis.configure(&data(0.0, 100.0));
    assert_eq!(axis.range(), Range::new(2.0, 3.0).unwrap());
}

#[test]
fn test_log_axis_rejects_non_positive_range() {
    let mut axis = Axis::log("y");
    let err = axis.set_range(Range::new(-1.0, 10.0).unwrap());
    assert!(matches!(err, Err(PlotError::InvalidArgument(_))));
    assert_eq!(axis.range(), Range::new(1.0, 10.0).unwrap());
}

#[test]
fn test_log_auto_range_in_log_space() {
    let mut axis = Axis::log("y");
    axis.set_margins(0.0, 0.0).unwrap();
    axis.configure(&data(1.0, 100.0));
    assert!(approx(axis.range().lower(), 1.0));
    assert!(approx(axis.range().upper(), 100.0));
}

#[test]
fn test_category_axis_takes_categories_from_data() {
    let mut axis = Axis::category("c", Vec::new());
    axis.configure(&AxisData {
        range: None,
        categories: vec!["A".into(), "B".into(), "C".into()],
    });
    assert_eq!(axis.categories(), ["A", "B", "C"]);
    assert_eq!(axis.range(), Range::new(0.0, 2.0).unwrap());
    assert!(axis.is_discrete());
}

#[test]
fn test_unknown_category_is_an_error() {
    let axis = Axis::category("c", vec!["A".into(), "B".into()]);
    let area = Rect::new(0.0, 0.0, 200.0, 100.0);
    assert!(axis.category_to_coordinate("A", area, RectangleEdge::Bottom).is_ok());
    assert!(matches!(
        axis.category_to_coordinate("Z", area, RectangleEdge::Bottom),
        Err(PlotError::InvalidCategory(key)) if key == "Z"
    ));
    assert!(axis.value_to_coordinate(5.0, area, RectangleEdge::Bottom).is_err());
}

#[test]
fn test_category_slots_are_ordered() {
    let axis = Axis::category("c", vec!["A".into(), "B".into(), "C".into()]);
    let area = Rect::new(0.0, 0.0, 300.0, 100.0);
    let a = axis.category_to_coordinate("A", area, RectangleEdge::Bottom).unwrap();
    let b = axis.category_to_coordinate("B", area, RectangleEdge::Bottom).unwrap();
    let c = axis.category_to_coordinate("C", area, RectangleEdge::Bottom).unwrap();
    assert!(a < b && b < c);
    assert!(approx(b, 150.0));
}

#[test]
fn test_linear_value_to_coordinate() {
    let mut axis = Axis::new("x");
    axis.set_range(Range::new(0.0, 10.0).unwrap()).unwrap();
    let area = Rect::new(40.0, 0.0, 500.0, 300.0);
    assert!(approx(axis.value_to_coordinate(0.0, area, RectangleEdge::Bottom).unwrap(), 40.0));
    assert!(approx(axis.value_to_coordinate(10.0, area, RectangleEdge::Bottom).unwrap(), 540.0));
    // Vertical axes grow upward
    assert!(approx(axis.value_to_coordinate(0.0, area, RectangleEdge::Left).unwrap(), 300.0));
    assert!(approx(axis.value_to_coordinate(10.0, area, RectangleEdge::Left).unwrap(), 0.0));
    assert!(approx(axis.coordinate_to_value(290.0, area, RectangleEdge::Bottom), 5.0));
}

#[test]
fn test_inverted_axis() {
    let mut axis = Axis::new("x");
    axis.set_range(Range::new(0.0, 10.0).unwrap()).unwrap();
    axis.set_inverted(true);
    let area = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(approx(axis.value_to_coordinate(0.0, area, RectangleEdge::Bottom).unwrap(), 100.0));
    assert!(approx(axis.value_to_coordinate(0.0, area, RectangleEdge::Left).unwrap(), 0.0));
}

#[test]
fn test_zero_length_range_maps_to_middle() {
    let mut axis = Axis::new("x");
    axis.set_range(Range::new(3.0, 3.0).unwrap()).unwrap();
    let area = Rect::new(0.0, 0.0, 200.0, 100.0);
    let c = axis.value_to_coordinate(3.0, area, RectangleEdge::Bottom).unwrap();
    assert!(c.is_finite());
    assert!(approx(c, 100.0));
}

#[test]
fn test_ticks_stay_inside_range() {
    let mut axis = Axis::new("x");
    axis.set_range(Range::new(0.0, 100.0).unwrap()).unwrap();
    let ticks = axis.refresh_ticks(500.0, RectangleEdge::Bottom);
    assert!(ticks.len() >= 2);
    assert!(ticks.iter().all(|t| t.value >= 0.0 && t.value <= 100.0));
    assert!(ticks.windows(2).all(|w| w[0].value < w[1].value));
}

#[test]
fn test_log_ticks_are_decades() {
    let mut axis = Axis::log("y");
    axis.set_range(Range::new(1.0, 1000.0).unwrap()).unwrap();
    let values: Vec<f64> = axis
        .refresh_ticks(300.0, RectangleEdge::Left)
        .iter()
        .map(|t| t.value)
        .collect();
    assert_eq!(values, vec![1.0, 10.0, 100.0, 1000.0]);
}

#[test]
fn test_resize_and_pan() {
    let mut axis = Axis::new("x");
    axis.set_range(Range::new(0.0, 10.0).unwrap()).unwrap();
    axis.resize_range(0.5, 5.0);
    assert_eq!(axis.range(), Range::new(2.5, 7.5).unwrap());
    axis.pan(0.2);
    assert!(approx(axis.range().lower(), 3.5));
    axis.resize_range(0.0, 0.0);
    assert!(axis.is_auto_range());
}

#[test]
fn test_margins_are_validated() {
    let mut axis = Axis::new("x");
    assert!(axis.set_margins(-0.1, 0.0).is_err());
    assert_eq!(axis.margins(), (0.05, 0.05));
}

#[test]
fn test_axis_from_config() {
    let config = AxisConfig {
        label: "Price".into(),
        scale: ScaleKind::Log,
        range: Some(Range::new(1.0, 1000.0).unwrap()),
        fixed_dimension: Some(45.0),
        ..AxisConfig::default()
    };
    let axis = Axis::from_config(&config).unwrap();
    assert_eq!(axis.label(), "Price");
    assert!(!axis.is_auto_range());
    assert_eq!(axis.fixed_dimension(), Some(45.0));

    let bad = AxisConfig {
        scale: ScaleKind::Log,
        range: Some(Range::new(-5.0, 10.0).unwrap()),
        ..AxisConfig::default()
    };
    assert!(Axis::from_config(&bad).is_err());
}
