use chart_engine::axis::Axis;
use chart_engine::data_types::VecDataset;
use chart_engine::{Plot, PlotError};
use std::cell::Cell;
use std::rc::Rc;

fn counter(plot: &Plot) -> Rc<Cell<usize>> {
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    plot.add_change_listener(move |_| c.set(c.get() + 1));
    count
}

fn plot_with_axes() -> Plot {
    let mut plot = Plot::new();
    plot.set_domain_axis(0, Axis::new("x").shared());
    plot.set_range_axis(0, Axis::new("y").shared());
    plot
}

#[test]
fn test_dataset_change_fires_once_and_marks_stale() {
    let mut plot = plot_with_axes();
    let ds = VecDataset::new().shared();
    plot.set_dataset(0, ds.clone());
    let count = counter(&plot);

    ds.update(|d| d.add_series("s", vec![(0.0, 1.0), (10.0, 5.0)]));
    assert_eq!(count.get(), 1);
    assert!(plot.axes_stale());

    plot.configure_axes();
    assert!(!plot.axes_stale());
    let y = plot.range_axis(0).unwrap();
    let range = y.borrow().range();
    assert!(range.lower() < 1.0 && range.upper() > 5.0);
}

#[test]
fn test_dataset_at_two_indices_notifies_once() {
    let mut plot = plot_with_axes();
    let ds = VecDataset::new().shared();
    plot.set_dataset(0, ds.clone());
    plot.set_dataset(3, ds.clone());
    let count = counter(&plot);
    ds.update(|d| d.add_series("s", vec![(0.0, 1.0)]));
    assert_eq!(count.get(), 1);

    // Still listening through index 3
    plot.remove_dataset(0);
    count.set(0);
    ds.update(|d| d.add_point(0, 2.0, Some(3.0)));
    assert_eq!(count.get(), 1);

    plot.remove_dataset(3);
    count.set(0);
    ds.update(|d| d.add_point(0, 4.0, Some(3.0)));
    assert_eq!(count.get(), 0);
}

#[test]
fn test_replaced_axis_is_silenced() {
    let mut plot = Plot::new();
    let old = Axis::new("old").shared();
    let new = Axis::new("new").shared();
    plot.set_domain_axis(0, old.clone());
    plot.set_domain_axis(0, new.clone());
    let count = counter(&plot);

    old.update(|a| a.set_label("still old"));
    assert_eq!(count.get(), 0);
    new.update(|a| a.set_label("renamed"));
    assert_eq!(count.get(), 1);
}

#[test]
fn test_shared_axis_notifies_every_plot() {
    let axis = Axis::new("shared").shared();
    let mut a = Plot::new();
    let mut b = Plot::new();
    a.set_range_axis(0, axis.clone());
    b.set_range_axis(0, axis.clone());
    let count_a = counter(&a);
    let count_b = counter(&b);
    axis.update(|ax| ax.set_inverted(true));
    assert_eq!(count_a.get(), 1);
    assert_eq!(count_b.get(), 1);
}

#[test]
fn test_subplot_events_reach_root_only() {
    let x = Axis::new("x").shared();
    let mut root = Plot::new();
    root.set_domain_axis(0, x.clone());

    let ds = VecDataset::new().shared();
    let mut child = Plot::new();
    child.set_range_axis(0, Axis::new("y").shared());
    child.set_dataset(0, ds.clone());
    let child_count = counter(&child);
    root.add_subplot(child, 1.0).unwrap();
    let root_count = counter(&root);

    ds.update(|d| d.add_series("s", vec![(100.0, 1.0), (200.0, 2.0)]));
    assert_eq!(root_count.get(), 1);
    assert_eq!(child_count.get(), 0);
    assert!(root.axes_stale());

    // The shared domain axis ranges over the child's data
    root.configure_axes();
    let range = x.borrow().range();
    assert!(range.lower() < 100.0 && range.upper() > 200.0);
    assert!(root.subplot(0).unwrap().has_parent());
}

#[test]
fn test_removed_subplot_gets_its_listeners_back() {
    let mut root = Plot::new();
    root.add_subplot(plot_with_axes(), 1.0).unwrap();
    let child = root.remove_subplot(0).unwrap();
    assert!(!child.has_parent());
    let count = counter(&child);
    child.domain_axis(0).unwrap().update(|a| a.set_label("x2"));
    assert_eq!(count.get(), 1);
}

#[test]
fn test_notify_flag() {
    let plot = plot_with_axes();
    let count = counter(&plot);
    plot.set_notify(false);
    plot.domain_axis(0).unwrap().update(|a| a.set_label("quiet"));
    assert_eq!(count.get(), 0);
    plot.set_notify(true);
    assert_eq!(count.get(), 1);
}

#[test]
fn test_plot_does_not_keep_datasets_alive() {
    let mut plot = plot_with_axes();
    let ds = VecDataset::new().shared();
    plot.set_dataset(0, ds.clone());
    assert_eq!(plot.dataset_count(), 1);
    drop(ds);
    assert!(plot.dataset(0).is_none());
    assert_eq!(plot.dataset_count(), 0);
}

#[test]
fn test_invalid_mapping_fires_nothing() {
    let mut plot = plot_with_axes();
    plot.map_dataset_to_range_axis(0, 1).unwrap();
    let count = counter(&plot);
    assert!(matches!(
        plot.map_dataset_to_range_axes(0, &[]),
        Err(PlotError::InvalidMapping(_))
    ));
    assert!(plot.map_dataset_to_range_axes(0, &[2, 2]).is_err());
    assert_eq!(count.get(), 0);
    assert_eq!(plot.range_axis_indices_for_dataset(0), vec![1]);
}

#[test]
fn test_subplot_weight_must_be_positive() {
    let mut root = Plot::new();
    assert!(matches!(
        root.add_subplot(Plot::new(), 0.0),
        Err(PlotError::InvalidArgument(_))
    ));
    assert!(root.add_subplot(Plot::new(), f64::NAN).is_err());
    assert_eq!(root.subplot_count(), 0);
}

#[test]
fn test_removed_listener_is_not_called() {
    let plot = plot_with_axes();
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    let id = plot.add_change_listener(move |_| c.set(c.get() + 1));
    assert!(plot.remove_change_listener(id));
    plot.domain_axis(0).unwrap().update(|a| a.set_label("x"));
    assert_eq!(count.get(), 0);
}
