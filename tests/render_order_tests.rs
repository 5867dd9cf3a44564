use chart_engine::render_order::{RenderOrderPolicy, RenderingOrder, SortOrder};

#[test]
fn test_default_dataset_order_is_reverse() {
    let policy = RenderOrderPolicy::default();
    assert_eq!(policy.dataset_visit_order([0, 1, 2]), vec![2, 1, 0]);
    assert_eq!(policy.renderer_visit_order([1, 0]), vec![1, 0]);
    assert_eq!(policy.series_visit_order(3), vec![0, 1, 2]);
}

#[test]
fn test_sparse_indices_are_sorted_first() {
    let policy = RenderOrderPolicy::default();
    assert_eq!(policy.dataset_visit_order([5, 0, 9, 5]), vec![9, 5, 0]);
    let forward = RenderOrderPolicy {
        dataset: RenderingOrder::Forward,
        ..RenderOrderPolicy::default()
    };
    assert_eq!(forward.dataset_visit_order([5, 0, 9]), vec![0, 5, 9]);
}

#[test]
fn test_row_and_column_orders() {
    let policy = RenderOrderPolicy {
        row: SortOrder::Descending,
        column: SortOrder::Ascending,
        series: RenderingOrder::Reverse,
        ..RenderOrderPolicy::default()
    };
    assert_eq!(policy.row_visit_order(3), vec![2, 1, 0]);
    assert_eq!(policy.column_visit_order(2), vec![0, 1]);
    assert_eq!(policy.series_visit_order(2), vec![1, 0]);
    assert!(policy.row_visit_order(0).is_empty());
}

#[test]
fn test_policy_json_round_trip() {
    let policy = RenderOrderPolicy::default();
    let json = serde_json::to_string(&policy).unwrap();
    let back: RenderOrderPolicy = serde_json::from_str(&json).unwrap();
    assert_eq!(back, policy);
}
