use chart_engine::axis::Axis;
use chart_engine::data_types::{AxisKind, AxisLocation, PlotOrientation, RectangleEdge};
use chart_engine::registry::{AxisRegistry, DatasetAxisMap, IndexRegistry};
use chart_engine::PlotError;

#[test]
fn test_sparse_indices() {
    let mut reg = IndexRegistry::new();
    reg.insert(0, "a");
    reg.insert(5, "b");
    assert_eq!(reg.indices(), vec![0, 5]);
    assert_eq!(reg.next_free_index(), 1);
    assert_eq!(reg.get(3), None);
    assert_eq!(reg.get_or_primary(3), Some(&"a"));
    assert_eq!(reg.index_of(|v| *v == "b"), Some(5));
}

#[test]
fn test_primary_fallback_needs_an_index_zero() {
    let mut reg = IndexRegistry::new();
    reg.insert(2, 7);
    assert_eq!(reg.get_or_primary(1), None);
    assert_eq!(reg.insert(2, 8), Some(7));
    assert_eq!(reg.remove(2), Some(8));
    assert!(reg.is_empty());
}

#[test]
fn test_unmapped_dataset_uses_axis_zero() {
    let map = DatasetAxisMap::default();
    assert_eq!(map.axis_indices_for(4), &[0]);
    assert_eq!(map.primary_axis_for(4), 0);
    assert!(!map.is_mapped(4));
}

#[test]
fn test_mapping_keeps_order() {
    let mut map = DatasetAxisMap::default();
    map.map(1, &[2, 0]).unwrap();
    assert_eq!(map.axis_indices_for(1), &[2, 0]);
    assert_eq!(map.primary_axis_for(1), 2);
    assert_eq!(map.datasets_for_axis(0, [0, 1, 2]), vec![0, 1, 2]);
    assert_eq!(map.datasets_for_axis(2, [0, 1, 2]), vec![1]);
}

#[test]
fn test_invalid_mapping_keeps_previous() {
    let mut map = DatasetAxisMap::default();
    map.map(0, &[1]).unwrap();
    assert!(matches!(map.map(0, &[]), Err(PlotError::InvalidMapping(_))));
    assert!(matches!(map.map(0, &[1, 1]), Err(PlotError::InvalidMapping(_))));
    assert_eq!(map.axis_indices_for(0), &[1]);
    map.clear(0);
    assert_eq!(map.axis_indices_for(0), &[0]);
}

#[test]
fn test_default_axis_locations() {
    let mut reg = AxisRegistry::new(AxisKind::Range);
    reg.insert(0, Axis::new("left").shared());
    reg.insert(1, Axis::new("right").shared());
    assert_eq!(reg.edge(0, PlotOrientation::Normal), RectangleEdge::Left);
    assert_eq!(reg.edge(1, PlotOrientation::Normal), RectangleEdge::Right);
    assert_eq!(reg.edge(0, PlotOrientation::Transposed), RectangleEdge::Bottom);
    assert_eq!(reg.edge(1, PlotOrientation::Transposed), RectangleEdge::Top);

    reg.set_location(0, AxisLocation::TopOrRight);
    assert_eq!(reg.edge(0, PlotOrientation::Normal), RectangleEdge::Right);
    assert_eq!(reg.edge(1, PlotOrientation::Normal), RectangleEdge::Left);
}

#[test]
fn test_domain_axis_edges() {
    let reg = AxisRegistry::new(AxisKind::Domain);
    assert_eq!(reg.edge(0, PlotOrientation::Normal), RectangleEdge::Bottom);
    assert_eq!(reg.edge(3, PlotOrientation::Normal), RectangleEdge::Top);
    assert_eq!(reg.edge(0, PlotOrientation::Transposed), RectangleEdge::Left);
}

#[test]
fn test_axis_index_by_identity() {
    let mut reg = AxisRegistry::new(AxisKind::Domain);
    let a = Axis::new("a").shared();
    let twin = Axis::new("a").shared();
    reg.insert(3, a.clone());
    assert_eq!(reg.index_of(&a), Some(3));
    assert_eq!(reg.index_of(&twin), None);
}
