use chart_engine::data_types::{CategoryTable, Dataset, DatasetGroup, DatasetShape, Range, VecDataset};

#[test]
fn test_vec_dataset_sorts_points() {
    let mut data = VecDataset::new();
    let series = data.add_series("close", vec![(3.0, 30.0), (1.0, 10.0), (2.0, 20.0)]);
    assert_eq!(series, 0);
    assert_eq!(data.series_count(), 1);
    assert_eq!(data.item_count(0), 3);
    let xs: Vec<f64> = (0..3).filter_map(|i| data.x_value_at(0, i)).collect();
    assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    assert_eq!(data.value_at(0, 2), Some(30.0));
    assert_eq!(data.series_key(0), "close");
    assert_eq!(data.series_key(5), "Series 5");
}

#[test]
fn test_vec_dataset_gaps_and_ranges() {
    let mut data = VecDataset::new();
    data.add_series("a", vec![(0.0, 4.0), (10.0, -2.0)]);
    data.add_point(0, 5.0, None);
    data.add_point(0, 7.0, Some(f64::NAN));
    data.add_point(3, 100.0, Some(1.0));

    assert_eq!(data.item_count(0), 4);
    assert_eq!(data.value_at(0, 1), None);
    assert_eq!(data.value_range(), Some(Range::new(-2.0, 4.0).unwrap()));
    assert_eq!(data.x_range(), Some(Range::new(0.0, 10.0).unwrap()));

    data.clear_series(0);
    assert!(data.is_empty());
    assert_eq!(data.value_range(), None);
}

#[test]
fn test_category_table_grows_keys() {
    let mut table = CategoryTable::new();
    table.set_value("2024", "Q1", Some(1.0));
    table.set_value("2025", "Q2", Some(4.0));
    table.set_value("2024", "Q2", Some(2.0));

    assert_eq!(table.row_keys(), ["2024", "2025"]);
    assert_eq!(table.column_keys(), ["Q1", "Q2"]);
    assert_eq!(table.value_at(0, 1), Some(2.0));
    assert_eq!(table.value_at(1, 0), None);
    assert_eq!(table.item_key(1).as_deref(), Some("Q2"));
    assert_eq!(table.item_key(2), None);
    assert_eq!(table.shape(), DatasetShape::Grid);
    assert_eq!(table.value_range(), Some(Range::new(1.0, 4.0).unwrap()));
}

#[test]
fn test_dataset_group_defaults() {
    let data = VecDataset::new();
    assert_eq!(data.group(), DatasetGroup::default());
    let table = CategoryTable::new().with_group(DatasetGroup("sales".into()));
    assert_eq!(table.group(), DatasetGroup("sales".into()));
    assert_eq!(data.shape(), DatasetShape::Series);
}
