//! The plot: registries of axes, datasets and renderers, the listener
//! wiring between them, and the draw pass that lays everything out.

use crate::axis::{AxisData, AxisHandle, Tick};
use crate::axis_renderer::AxisRenderer;
use crate::axis_space::AxisSpace;
use crate::canvas::{Canvas, ImageRef, TextStyle};
use crate::data_types::{
    AnnotationHandle, AxisKind, AxisLocation, Crosshair, CrosshairConfig, CrosshairState, Dataset,
    DatasetGroup, DatasetHandle, DatasetShape, Insets, ItemIdentity, Layer, Marker, MarkerHandle,
    PlotConfig, PlotOrientation, Range, Rect, RectangleEdge,
};
use crate::error::{PlotError, Result};
use crate::layout::{AxisSlot, LayoutEngine};
use crate::notify::{subscription_key, ChangeEvent, ChangeSource, ListenerId, Observable, PlotSignal, SubscriptionSet};
use crate::plot_types::{annotation, ItemRenderContext, ItemRenderer, RendererHandle};
use crate::registry::{AxisSet, DatasetAxisMap, IndexRegistry};
use crate::render_order::RenderOrderPolicy;
use crate::rendering::{self, ItemEntity, RenderingInfo};
use crate::theme::ChartTheme;
use crate::transform::PlotTransform;
use crate::view_controller::ViewController;
use glam::DVec2;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

type PlacedAxes = Vec<(AxisHandle, RectangleEdge)>;

/// What a draw call produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawOutcome {
    Drawn { data_area: Rect },
    /// Layout left no room for data; nothing but the optional no-data
    /// message was drawn.
    NoDataArea,
}

struct DatasetSlot {
    handle: Weak<Observable<dyn Dataset>>,
    key: usize,
}

struct MarkerEntry {
    handle: MarkerHandle,
    kind: AxisKind,
    layer: Layer,
}

struct RendererAnnotation {
    handle: AnnotationHandle,
    layer: Layer,
}

struct Subplot {
    plot: Plot,
    weight: f64,
}

fn same_observable<A: ?Sized, B: ?Sized>(a: &Observable<A>, b: &Observable<B>) -> bool {
    subscription_key(a) == subscription_key(b)
}

/// Calls `f` with axis slots borrowed from `axes`.
fn with_axis_slots<R>(axes: &[(AxisHandle, RectangleEdge)], f: impl FnOnce(&[AxisSlot<'_>]) -> R) -> R {
    let guards: Vec<_> = axes.iter().map(|(axis, edge)| (axis.borrow(), *edge)).collect();
    let slots: Vec<AxisSlot<'_>> = guards
        .iter()
        .map(|(axis, edge)| AxisSlot {
            axis: &**axis,
            edge: *edge,
        })
        .collect();
    f(&slots)
}

fn initial_cursor(data_area: Rect, offset: &Insets, edge: RectangleEdge) -> f64 {
    match edge {
        RectangleEdge::Top => data_area.min_y() - offset.top,
        RectangleEdge::Bottom => data_area.max_y() + offset.bottom,
        RectangleEdge::Left => data_area.min_x() - offset.left,
        RectangleEdge::Right => data_area.max_x() + offset.right,
    }
}

pub struct Plot {
    signal: Rc<PlotSignal>,
    axes: Rc<AxisSet>,
    datasets: IndexRegistry<DatasetSlot>,
    renderers: IndexRegistry<RendererHandle>,
    domain_map: DatasetAxisMap,
    range_map: DatasetAxisMap,
    subscriptions: SubscriptionSet,
    layout: LayoutEngine,
    render_order: RenderOrderPolicy,
    insets: Insets,
    domain_gridlines_visible: bool,
    range_gridlines_visible: bool,
    domain_grid_bands_visible: bool,
    domain_crosshair: Crosshair,
    range_crosshair: Crosshair,
    crosshair_item: Option<ItemIdentity>,
    markers: BTreeMap<usize, Vec<MarkerEntry>>,
    annotations: Vec<AnnotationHandle>,
    renderer_annotations: BTreeMap<usize, Vec<RendererAnnotation>>,
    subplots: Vec<Subplot>,
    gap: f64,
    theme: ChartTheme,
    background_image: Option<(ImageRef, f32)>,
    no_data_message: Option<String>,
}

impl Default for Plot {
    fn default() -> Self {
        Self::new()
    }
}

impl Plot {
    pub fn new() -> Self {
        Self::with_config(PlotConfig::default())
    }

    pub fn with_config(config: PlotConfig) -> Self {
        let mut plot = Self {
            signal: Rc::new(PlotSignal::default()),
            axes: Rc::new(AxisSet::default()),
            datasets: IndexRegistry::new(),
            renderers: IndexRegistry::new(),
            domain_map: DatasetAxisMap::default(),
            range_map: DatasetAxisMap::default(),
            subscriptions: SubscriptionSet::default(),
            layout: LayoutEngine::default(),
            render_order: RenderOrderPolicy::default(),
            insets: Insets::ZERO,
            domain_gridlines_visible: true,
            range_gridlines_visible: true,
            domain_grid_bands_visible: false,
            domain_crosshair: Crosshair::default(),
            range_crosshair: Crosshair::default(),
            crosshair_item: None,
            markers: BTreeMap::new(),
            annotations: Vec::new(),
            renderer_annotations: BTreeMap::new(),
            subplots: Vec::new(),
            gap: 5.0,
            theme: ChartTheme::default(),
            background_image: None,
            no_data_message: None,
        };
        plot.set_config_fields(&config);
        plot
    }

    fn set_config_fields(&mut self, config: &PlotConfig) {
        self.layout.orientation = config.orientation;
        self.layout.axis_offset = config.axis_offset;
        self.layout.fixed_domain_space = config.fixed_domain_axis_space;
        self.layout.fixed_range_space = config.fixed_range_axis_space;
        self.insets = config.insets;
        self.render_order = RenderOrderPolicy {
            dataset: config.dataset_rendering_order,
            renderer: config.renderer_order,
            series: config.series_rendering_order,
            row: config.row_order,
            column: config.column_order,
        };
        self.domain_gridlines_visible = config.domain_gridlines_visible;
        self.range_gridlines_visible = config.range_gridlines_visible;
        self.domain_grid_bands_visible = config.domain_grid_bands_visible;
        let domain_value = self.domain_crosshair.value;
        let range_value = self.range_crosshair.value;
        self.domain_crosshair = Crosshair {
            value: domain_value,
            ..Crosshair::from_config(&config.domain_crosshair)
        };
        self.range_crosshair = Crosshair {
            value: range_value,
            ..Crosshair::from_config(&config.range_crosshair)
        };
    }

    /// Applies `config` and fires one change event.
    pub fn apply_config(&mut self, config: &PlotConfig) {
        self.set_config_fields(config);
        self.fire(ChangeSource::Plot);
    }

    pub fn config(&self) -> PlotConfig {
        let crosshair_config = |c: &Crosshair| CrosshairConfig {
            visible: c.visible,
            locked_on_data: c.locked_on_data,
        };
        PlotConfig {
            orientation: self.layout.orientation,
            axis_offset: self.layout.axis_offset,
            insets: self.insets,
            dataset_rendering_order: self.render_order.dataset,
            series_rendering_order: self.render_order.series,
            renderer_order: self.render_order.renderer,
            row_order: self.render_order.row,
            column_order: self.render_order.column,
            domain_crosshair: crosshair_config(&self.domain_crosshair),
            range_crosshair: crosshair_config(&self.range_crosshair),
            domain_gridlines_visible: self.domain_gridlines_visible,
            range_gridlines_visible: self.range_gridlines_visible,
            domain_grid_bands_visible: self.domain_grid_bands_visible,
            fixed_domain_axis_space: self.layout.fixed_domain_space,
            fixed_range_axis_space: self.layout.fixed_range_space,
        }
    }

    // ---- Notification ----

    /// Registers a listener for "plot changed" events. A sub-plot never
    /// calls its own listeners; its events reach the root plot instead.
    pub fn add_change_listener(&self, callback: impl Fn(&ChangeEvent) + 'static) -> ListenerId {
        self.signal.add_listener(callback)
    }

    pub fn remove_change_listener(&self, id: ListenerId) -> bool {
        self.signal.remove_listener(id)
    }

    pub fn listener_count(&self) -> usize {
        self.signal.listener_count()
    }

    pub fn is_notify(&self) -> bool {
        self.signal.is_notify()
    }

    /// Suspends or resumes external notification. Resuming fires one event.
    pub fn set_notify(&self, notify: bool) {
        let was = self.signal.is_notify();
        self.signal.set_notify(notify);
        if notify && !was {
            self.fire(ChangeSource::Plot);
        }
    }

    pub fn has_parent(&self) -> bool {
        self.signal.has_parent()
    }

    /// Whether a dataset or axis change is still waiting for
    /// [`configure_axes`](Self::configure_axes).
    pub fn axes_stale(&self) -> bool {
        self.signal.axes_stale()
    }

    fn fire(&self, source: ChangeSource) {
        self.signal.propagate(&ChangeEvent::new(source));
    }

    fn subscribe<T: ?Sized>(&mut self, observable: &Observable<T>) -> usize {
        self.subscriptions.acquire(observable, &self.signal)
    }

    // ---- Axes ----

    fn set_axis(&mut self, kind: AxisKind, index: usize, axis: AxisHandle) {
        self.subscribe(&*axis);
        let old = self.axes.registry(kind).borrow_mut().insert(index, axis);
        if let Some(old) = old {
            self.subscriptions.release(subscription_key(&*old));
        }
        self.configure_axes();
        self.fire(ChangeSource::Axis);
    }

    fn remove_axis(&mut self, kind: AxisKind, index: usize) -> Option<AxisHandle> {
        let old = self.axes.registry(kind).borrow_mut().remove(index)?;
        self.subscriptions.release(subscription_key(&*old));
        self.configure_axes();
        self.fire(ChangeSource::Axis);
        Some(old)
    }

    pub fn set_domain_axis(&mut self, index: usize, axis: AxisHandle) {
        self.set_axis(AxisKind::Domain, index, axis);
    }

    pub fn remove_domain_axis(&mut self, index: usize) -> Option<AxisHandle> {
        self.remove_axis(AxisKind::Domain, index)
    }

    /// Domain axis at `index`, falling back to axis 0 and then to the parent
    /// plot.
    pub fn domain_axis(&self, index: usize) -> Option<AxisHandle> {
        self.axes.resolve(AxisKind::Domain, index)
    }

    pub fn domain_axis_count(&self) -> usize {
        self.axes.domain.borrow().len()
    }

    pub fn domain_axis_index(&self, axis: &AxisHandle) -> Option<usize> {
        self.axes.domain.borrow().index_of(axis)
    }

    pub fn set_domain_axis_location(&mut self, index: usize, location: AxisLocation) {
        self.axes.domain.borrow_mut().set_location(index, location);
        self.fire(ChangeSource::Plot);
    }

    pub fn domain_axis_edge(&self, index: usize) -> RectangleEdge {
        self.axes.domain.borrow().edge(index, self.layout.orientation)
    }

    pub fn set_range_axis(&mut self, index: usize, axis: AxisHandle) {
        self.set_axis(AxisKind::Range, index, axis);
    }

    pub fn remove_range_axis(&mut self, index: usize) -> Option<AxisHandle> {
        self.remove_axis(AxisKind::Range, index)
    }

    pub fn range_axis(&self, index: usize) -> Option<AxisHandle> {
        self.axes.resolve(AxisKind::Range, index)
    }

    pub fn range_axis_count(&self) -> usize {
        self.axes.range.borrow().len()
    }

    pub fn range_axis_index(&self, axis: &AxisHandle) -> Option<usize> {
        self.axes.range.borrow().index_of(axis)
    }

    pub fn set_range_axis_location(&mut self, index: usize, location: AxisLocation) {
        self.axes.range.borrow_mut().set_location(index, location);
        self.fire(ChangeSource::Plot);
    }

    pub fn range_axis_edge(&self, index: usize) -> RectangleEdge {
        self.axes.range.borrow().edge(index, self.layout.orientation)
    }

    fn resolved_axis(&self, kind: AxisKind, index: usize) -> Option<(AxisHandle, RectangleEdge)> {
        let axis = self.axes.resolve(kind, index)?;
        let edge = self
            .axes
            .resolve_edge(kind, &axis, self.layout.orientation)
            .unwrap_or_else(|| self.axes.registry(kind).borrow().edge(0, self.layout.orientation));
        Some((axis, edge))
    }

    /// This plot's own axes of `kind` with their edges, in index order.
    fn placed_axes(&self, kind: AxisKind) -> PlacedAxes {
        let registry = self.axes.registry(kind).borrow();
        registry
            .iter()
            .map(|(index, axis)| (axis.clone(), registry.edge(index, self.layout.orientation)))
            .collect()
    }

    // ---- Datasets ----

    /// Forgets datasets whose owners dropped them.
    fn prune_datasets(&mut self) {
        let dead: Vec<usize> = self
            .datasets
            .iter()
            .filter(|(_, slot)| slot.handle.strong_count() == 0)
            .map(|(index, _)| index)
            .collect();
        for index in dead {
            if let Some(slot) = self.datasets.remove(index) {
                trace!(index, "dropping released dataset");
                self.subscriptions.release(slot.key);
            }
        }
    }

    /// Stores a reference to `dataset` at `index`. The plot listens to the
    /// dataset but does not keep it alive.
    pub fn set_dataset(&mut self, index: usize, dataset: DatasetHandle) {
        self.prune_datasets();
        let key = self.subscribe(&*dataset);
        let old = self.datasets.insert(
            index,
            DatasetSlot {
                handle: Rc::downgrade(&dataset),
                key,
            },
        );
        if let Some(old) = old {
            self.subscriptions.release(old.key);
        }
        self.configure_axes();
        self.fire(ChangeSource::Dataset);
    }

    /// Adds `dataset` at the first free index and returns that index.
    pub fn add_dataset(&mut self, dataset: DatasetHandle) -> usize {
        self.prune_datasets();
        let index = self.datasets.next_free_index();
        self.set_dataset(index, dataset);
        index
    }

    pub fn remove_dataset(&mut self, index: usize) -> Option<DatasetHandle> {
        let slot = self.datasets.remove(index)?;
        self.subscriptions.release(slot.key);
        self.configure_axes();
        self.fire(ChangeSource::Dataset);
        slot.handle.upgrade()
    }

    /// Dataset at exactly `index`; there is no fallback.
    pub fn dataset(&self, index: usize) -> Option<DatasetHandle> {
        self.datasets.get(index).and_then(|slot| slot.handle.upgrade())
    }

    pub fn dataset_indices(&self) -> Vec<usize> {
        self.datasets
            .iter()
            .filter(|(_, slot)| slot.handle.strong_count() > 0)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn dataset_count(&self) -> usize {
        self.dataset_indices().len()
    }

    pub fn index_of_dataset<T: ?Sized>(&self, dataset: &Observable<T>) -> Option<usize> {
        let key = subscription_key(dataset);
        self.datasets
            .index_of(|slot| slot.key == key && slot.handle.strong_count() > 0)
    }

    /// Indices of the datasets that belong to `group`.
    pub fn datasets_in_group(&self, group: &DatasetGroup) -> Vec<usize> {
        self.datasets
            .iter()
            .filter_map(|(index, slot)| {
                let handle = slot.handle.upgrade()?;
                let matches = handle.borrow().group() == *group;
                matches.then_some(index)
            })
            .collect()
    }

    fn axis_map(&self, kind: AxisKind) -> &DatasetAxisMap {
        match kind {
            AxisKind::Domain => &self.domain_map,
            AxisKind::Range => &self.range_map,
        }
    }

    /// Maps a dataset to one or more domain axes; the first is its primary
    /// axis. Fails on an empty or repeating list and keeps the old mapping.
    pub fn map_dataset_to_domain_axes(&mut self, dataset: usize, axes: &[usize]) -> Result<()> {
        self.domain_map.map(dataset, axes)?;
        self.configure_axes();
        self.fire(ChangeSource::Dataset);
        Ok(())
    }

    pub fn map_dataset_to_domain_axis(&mut self, dataset: usize, axis: usize) -> Result<()> {
        self.map_dataset_to_domain_axes(dataset, &[axis])
    }

    pub fn map_dataset_to_range_axes(&mut self, dataset: usize, axes: &[usize]) -> Result<()> {
        self.range_map.map(dataset, axes)?;
        self.configure_axes();
        self.fire(ChangeSource::Dataset);
        Ok(())
    }

    pub fn map_dataset_to_range_axis(&mut self, dataset: usize, axis: usize) -> Result<()> {
        self.map_dataset_to_range_axes(dataset, &[axis])
    }

    pub fn domain_axis_indices_for_dataset(&self, dataset: usize) -> Vec<usize> {
        self.domain_map.axis_indices_for(dataset).to_vec()
    }

    pub fn range_axis_indices_for_dataset(&self, dataset: usize) -> Vec<usize> {
        self.range_map.axis_indices_for(dataset).to_vec()
    }

    /// Primary domain axis of a dataset index. Unmapped datasets use axis 0;
    /// a sub-plot without axis 0 asks its parent.
    pub fn domain_axis_for_dataset(&self, dataset: usize) -> Option<AxisHandle> {
        self.axes
            .resolve(AxisKind::Domain, self.domain_map.primary_axis_for(dataset))
    }

    pub fn range_axis_for_dataset(&self, dataset: usize) -> Option<AxisHandle> {
        self.axes
            .resolve(AxisKind::Range, self.range_map.primary_axis_for(dataset))
    }

    /// Registered datasets that use domain axis `axis`.
    pub fn datasets_for_domain_axis(&self, axis: usize) -> Vec<usize> {
        self.domain_map.datasets_for_axis(axis, self.dataset_indices())
    }

    pub fn datasets_for_range_axis(&self, axis: usize) -> Vec<usize> {
        self.range_map.datasets_for_axis(axis, self.dataset_indices())
    }

    // ---- Renderers ----

    pub fn set_renderer(&mut self, index: usize, renderer: RendererHandle) {
        self.subscribe(&*renderer);
        if let Some(old) = self.renderers.insert(index, renderer) {
            self.subscriptions.release(subscription_key(&*old));
        }
        self.configure_axes();
        self.fire(ChangeSource::Renderer);
    }

    pub fn remove_renderer(&mut self, index: usize) -> Option<RendererHandle> {
        let old = self.renderers.remove(index)?;
        self.subscriptions.release(subscription_key(&*old));
        self.configure_axes();
        self.fire(ChangeSource::Renderer);
        Some(old)
    }

    /// Renderer at `index`, falling back to renderer 0.
    pub fn renderer(&self, index: usize) -> Option<RendererHandle> {
        self.renderers.get_or_primary(index).cloned()
    }

    pub fn renderer_count(&self) -> usize {
        self.renderers.len()
    }

    pub fn index_of_renderer<T: ?Sized>(&self, renderer: &Observable<T>) -> Option<usize> {
        self.renderers.index_of(|r| same_observable(&**r, renderer))
    }

    /// Renderer that draws `dataset`, or `None` when the dataset is not
    /// registered here.
    pub fn renderer_for_dataset<T: ?Sized>(&self, dataset: &Observable<T>) -> Option<RendererHandle> {
        let index = self.index_of_dataset(dataset)?;
        self.renderer(index)
    }

    // ---- Auto-range ----

    /// Recomputes the auto-range of every axis of this plot and its
    /// sub-plots from the datasets mapped to it. Axes are updated without
    /// notification.
    pub fn configure_axes(&self) {
        for kind in [AxisKind::Domain, AxisKind::Range] {
            for axis in self.axes.distinct(kind) {
                let data = self.axis_data(kind, &axis);
                axis.update_quiet(|a| a.configure(&data));
            }
        }
        self.signal.clear_axes_stale();
        for subplot in &self.subplots {
            subplot.plot.configure_axes();
        }
    }

    /// What the datasets mapped to `axis`, here and in sub-plots, contribute
    /// to its range.
    pub fn axis_data(&self, kind: AxisKind, axis: &AxisHandle) -> AxisData {
        let mut data = AxisData::default();
        self.collect_axis_data(kind, axis, &mut data);
        data
    }

    /// Combined data range of the datasets mapped to `axis`.
    pub fn data_range(&self, kind: AxisKind, axis: &AxisHandle) -> Option<Range> {
        self.axis_data(kind, axis).range
    }

    fn collect_axis_data(&self, kind: AxisKind, axis: &AxisHandle, data: &mut AxisData) {
        let map = self.axis_map(kind);
        for (index, slot) in self.datasets.iter() {
            let Some(handle) = slot.handle.upgrade() else {
                continue;
            };
            let uses_axis = map.axis_indices_for(index).iter().any(|i| {
                self.axes
                    .resolve(kind, *i)
                    .is_some_and(|a| Rc::ptr_eq(&a, axis))
            });
            if !uses_axis {
                continue;
            }
            let dataset = handle.borrow();
            let bounds = match (self.renderers.get_or_primary(index), kind) {
                (Some(r), AxisKind::Domain) => r.borrow().find_domain_bounds(&*dataset),
                (Some(r), AxisKind::Range) => r.borrow().find_range_bounds(&*dataset),
                (None, AxisKind::Domain) => dataset.x_range(),
                (None, AxisKind::Range) => dataset.value_range(),
            };
            data.include_range(bounds);
            if kind == AxisKind::Domain {
                let items = (0..dataset.series_count())
                    .map(|s| dataset.item_count(s))
                    .max()
                    .unwrap_or(0);
                for key in (0..items).filter_map(|i| dataset.item_key(i)) {
                    data.include_category(key);
                }
            }
        }
        for subplot in &self.subplots {
            subplot.plot.collect_axis_data(kind, axis, data);
        }
    }

    // ---- Markers and annotations ----

    fn add_marker(&mut self, kind: AxisKind, renderer_index: usize, marker: MarkerHandle, layer: Layer) {
        self.subscribe(&*marker);
        self.markers.entry(renderer_index).or_default().push(MarkerEntry {
            handle: marker,
            kind,
            layer,
        });
        self.fire(ChangeSource::Marker);
    }

    fn remove_marker(&mut self, kind: AxisKind, renderer_index: usize, marker: &Observable<Marker>, layer: Layer) -> bool {
        let Some(entries) = self.markers.get_mut(&renderer_index) else {
            return false;
        };
        let Some(position) = entries
            .iter()
            .position(|e| e.kind == kind && e.layer == layer && same_observable(&*e.handle, marker))
        else {
            return false;
        };
        let removed = entries.remove(position);
        self.subscriptions.release(subscription_key(&*removed.handle));
        self.fire(ChangeSource::Marker);
        true
    }

    fn clear_markers(&mut self, kind: AxisKind, renderer_index: usize) {
        let Some(entries) = self.markers.get_mut(&renderer_index) else {
            return;
        };
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(entries).into_iter().partition(|e| e.kind == kind);
        *entries = kept;
        if removed.is_empty() {
            return;
        }
        for entry in removed {
            self.subscriptions.release(subscription_key(&*entry.handle));
        }
        self.fire(ChangeSource::Marker);
    }

    fn markers_of(&self, kind: AxisKind, renderer_index: usize, layer: Layer) -> Vec<MarkerHandle> {
        self.markers
            .get(&renderer_index)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| e.kind == kind && e.layer == layer)
                    .map(|e| e.handle.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn add_domain_marker(&mut self, renderer_index: usize, marker: MarkerHandle, layer: Layer) {
        self.add_marker(AxisKind::Domain, renderer_index, marker, layer);
    }

    pub fn add_range_marker(&mut self, renderer_index: usize, marker: MarkerHandle, layer: Layer) {
        self.add_marker(AxisKind::Range, renderer_index, marker, layer);
    }

    pub fn remove_domain_marker(&mut self, renderer_index: usize, marker: &Observable<Marker>, layer: Layer) -> bool {
        self.remove_marker(AxisKind::Domain, renderer_index, marker, layer)
    }

    pub fn remove_range_marker(&mut self, renderer_index: usize, marker: &Observable<Marker>, layer: Layer) -> bool {
        self.remove_marker(AxisKind::Range, renderer_index, marker, layer)
    }

    pub fn clear_domain_markers(&mut self, renderer_index: usize) {
        self.clear_markers(AxisKind::Domain, renderer_index);
    }

    pub fn clear_range_markers(&mut self, renderer_index: usize) {
        self.clear_markers(AxisKind::Range, renderer_index);
    }

    pub fn domain_markers(&self, renderer_index: usize, layer: Layer) -> Vec<MarkerHandle> {
        self.markers_of(AxisKind::Domain, renderer_index, layer)
    }

    pub fn range_markers(&self, renderer_index: usize, layer: Layer) -> Vec<MarkerHandle> {
        self.markers_of(AxisKind::Range, renderer_index, layer)
    }

    /// Adds a plot-level annotation, drawn above everything else.
    pub fn add_annotation(&mut self, annotation: AnnotationHandle) {
        self.subscribe(&*annotation);
        self.annotations.push(annotation);
        self.fire(ChangeSource::Annotation);
    }

    pub fn remove_annotation(&mut self, annotation: &Observable<crate::data_types::Annotation>) -> bool {
        let Some(position) = self
            .annotations
            .iter()
            .position(|a| same_observable(&**a, annotation))
        else {
            return false;
        };
        let removed = self.annotations.remove(position);
        self.subscriptions.release(subscription_key(&*removed));
        self.fire(ChangeSource::Annotation);
        true
    }

    pub fn clear_annotations(&mut self) {
        for annotation in std::mem::take(&mut self.annotations) {
            self.subscriptions.release(subscription_key(&*annotation));
        }
        self.fire(ChangeSource::Annotation);
    }

    pub fn annotations(&self) -> Vec<AnnotationHandle> {
        self.annotations.clone()
    }

    /// Adds an annotation drawn with renderer `renderer_index`'s axes, in the
    /// given layer.
    pub fn add_renderer_annotation(&mut self, renderer_index: usize, annotation: AnnotationHandle, layer: Layer) {
        self.subscribe(&*annotation);
        self.renderer_annotations
            .entry(renderer_index)
            .or_default()
            .push(RendererAnnotation {
                handle: annotation,
                layer,
            });
        self.fire(ChangeSource::Annotation);
    }

    pub fn remove_renderer_annotation(
        &mut self,
        renderer_index: usize,
        annotation: &Observable<crate::data_types::Annotation>,
    ) -> bool {
        let Some(entries) = self.renderer_annotations.get_mut(&renderer_index) else {
            return false;
        };
        let Some(position) = entries
            .iter()
            .position(|e| same_observable(&*e.handle, annotation))
        else {
            return false;
        };
        let removed = entries.remove(position);
        self.subscriptions.release(subscription_key(&*removed.handle));
        self.fire(ChangeSource::Annotation);
        true
    }

    // ---- Appearance and layout settings ----

    pub fn orientation(&self) -> PlotOrientation {
        self.layout.orientation
    }

    pub fn set_orientation(&mut self, orientation: PlotOrientation) {
        self.layout.orientation = orientation;
        self.fire(ChangeSource::Plot);
    }

    pub fn axis_offset(&self) -> Insets {
        self.layout.axis_offset
    }

    pub fn set_axis_offset(&mut self, offset: Insets) {
        self.layout.axis_offset = offset;
        self.fire(ChangeSource::Plot);
    }

    pub fn insets(&self) -> Insets {
        self.insets
    }

    pub fn set_insets(&mut self, insets: Insets) {
        self.insets = insets;
        self.fire(ChangeSource::Plot);
    }

    pub fn render_order(&self) -> RenderOrderPolicy {
        self.render_order
    }

    pub fn set_render_order(&mut self, order: RenderOrderPolicy) {
        self.render_order = order;
        self.fire(ChangeSource::Plot);
    }

    pub fn set_fixed_domain_axis_space(&mut self, space: Option<AxisSpace>) {
        self.layout.fixed_domain_space = space;
        self.fire(ChangeSource::Plot);
    }

    pub fn set_fixed_range_axis_space(&mut self, space: Option<AxisSpace>) {
        self.layout.fixed_range_space = space;
        self.fire(ChangeSource::Plot);
    }

    pub fn set_domain_gridlines_visible(&mut self, visible: bool) {
        self.domain_gridlines_visible = visible;
        self.fire(ChangeSource::Plot);
    }

    pub fn set_range_gridlines_visible(&mut self, visible: bool) {
        self.range_gridlines_visible = visible;
        self.fire(ChangeSource::Plot);
    }

    pub fn set_domain_grid_bands_visible(&mut self, visible: bool) {
        self.domain_grid_bands_visible = visible;
        self.fire(ChangeSource::Plot);
    }

    pub fn theme(&self) -> &ChartTheme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: ChartTheme) {
        self.theme = theme;
        self.fire(ChangeSource::Plot);
    }

    /// Image drawn behind the data, blended at `alpha`.
    pub fn set_background_image(&mut self, image: Option<ImageRef>, alpha: f32) {
        self.background_image = image.map(|i| (i, alpha.clamp(0.0, 1.0)));
        self.fire(ChangeSource::Plot);
    }

    pub fn set_no_data_message(&mut self, message: Option<String>) {
        self.no_data_message = message;
        self.fire(ChangeSource::Plot);
    }

    // ---- Crosshairs ----

    pub fn domain_crosshair(&self) -> Crosshair {
        self.domain_crosshair
    }

    pub fn range_crosshair(&self) -> Crosshair {
        self.range_crosshair
    }

    pub fn set_domain_crosshair_visible(&mut self, visible: bool) {
        self.domain_crosshair.visible = visible;
        self.fire(ChangeSource::Plot);
    }

    pub fn set_range_crosshair_visible(&mut self, visible: bool) {
        self.range_crosshair.visible = visible;
        self.fire(ChangeSource::Plot);
    }

    pub fn set_domain_crosshair_locked_on_data(&mut self, locked: bool) {
        self.domain_crosshair.locked_on_data = locked;
        self.fire(ChangeSource::Plot);
    }

    pub fn set_range_crosshair_locked_on_data(&mut self, locked: bool) {
        self.range_crosshair.locked_on_data = locked;
        self.fire(ChangeSource::Plot);
    }

    pub fn set_domain_crosshair_value(&mut self, value: Option<f64>) {
        self.domain_crosshair.value = value;
        self.fire(ChangeSource::Plot);
    }

    pub fn set_range_crosshair_value(&mut self, value: Option<f64>) {
        self.range_crosshair.value = value;
        self.fire(ChangeSource::Plot);
    }

    /// Item that produced the current crosshair values, if any. Only a
    /// crosshair locked on data adopts an item.
    pub fn crosshair_item(&self) -> Option<ItemIdentity> {
        self.crosshair_item
    }

    // ---- Sub-plots ----

    /// Nests `plot` below this one. The sub-plot shares this plot's domain
    /// axes and forwards its change events here.
    pub fn add_subplot(&mut self, mut plot: Plot, weight: f64) -> Result<usize> {
        if weight <= 0.0 || !weight.is_finite() {
            return Err(PlotError::invalid_argument(format!(
                "sub-plot weight {weight} must be positive"
            )));
        }
        plot.insets = Insets::ZERO;
        plot.signal.set_parent(Some(&self.signal));
        plot.axes.set_parent(Some(&self.axes));
        self.subplots.push(Subplot { plot, weight });
        self.configure_axes();
        self.fire(ChangeSource::Plot);
        Ok(self.subplots.len() - 1)
    }

    pub fn remove_subplot(&mut self, index: usize) -> Option<Plot> {
        if index >= self.subplots.len() {
            return None;
        }
        let entry = self.subplots.remove(index);
        entry.plot.signal.set_parent(None);
        entry.plot.axes.set_parent(None);
        self.configure_axes();
        self.fire(ChangeSource::Plot);
        Some(entry.plot)
    }

    pub fn subplot(&self, index: usize) -> Option<&Plot> {
        self.subplots.get(index).map(|s| &s.plot)
    }

    pub fn subplot_mut(&mut self, index: usize) -> Option<&mut Plot> {
        self.subplots.get_mut(index).map(|s| &mut s.plot)
    }

    pub fn subplot_count(&self) -> usize {
        self.subplots.len()
    }

    pub fn set_gap(&mut self, gap: f64) {
        self.gap = gap.max(0.0);
        self.fire(ChangeSource::Plot);
    }

    // ---- Zoom and pan ----

    fn distinct_placed(&self, kind: AxisKind) -> PlacedAxes {
        let mut axes: PlacedAxes = Vec::new();
        for (axis, edge) in self.placed_axes(kind) {
            if !axes.iter().any(|(a, _)| Rc::ptr_eq(a, &axis)) {
                axes.push((axis, edge));
            }
        }
        axes
    }

    fn zoom_axes(&self, kind: AxisKind, factor: f64, anchor: Option<DVec2>, data_area: Rect) {
        for (axis, edge) in self.distinct_placed(kind) {
            let value = {
                let a = axis.borrow();
                match anchor {
                    Some(p) => {
                        let coordinate = if edge.is_top_or_bottom() { p.x } else { p.y };
                        a.coordinate_to_value(coordinate, data_area, edge)
                    }
                    None => a.range().central_value(),
                }
            };
            axis.update(|a| a.resize_range(factor, value));
        }
    }

    /// Zooms every domain axis by `factor` around the canvas point `anchor`
    /// (the range center when `None`). A non-positive factor restores
    /// auto-range.
    pub fn zoom_domain_axes(&self, factor: f64, anchor: Option<DVec2>, data_area: Rect) {
        self.zoom_axes(AxisKind::Domain, factor, anchor, data_area);
    }

    pub fn zoom_range_axes(&self, factor: f64, anchor: Option<DVec2>, data_area: Rect) {
        self.zoom_axes(AxisKind::Range, factor, anchor, data_area);
    }

    /// Zooms domain axes to show the canvas interval `[from, to]` along the
    /// domain direction. Fails without touching any axis when one of them
    /// cannot take its new range.
    pub fn zoom_domain_to(&self, from: f64, to: f64, data_area: Rect) -> Result<()> {
        let mut zoomed = Vec::new();
        for (axis, edge) in self.distinct_placed(AxisKind::Domain) {
            let range = {
                let a = axis.borrow();
                let v0 = a.coordinate_to_value(from, data_area, edge);
                let v1 = a.coordinate_to_value(to, data_area, edge);
                let range = Range::new_positive_length(v0.min(v1), v0.max(v1))?;
                a.check_range(range)?;
                range
            };
            zoomed.push((axis, range));
        }
        for (axis, range) in zoomed {
            axis.try_update(|a| a.set_range(range))?;
        }
        Ok(())
    }

    pub fn pan_domain_axes(&self, percent: f64) {
        for (axis, _) in self.distinct_placed(AxisKind::Domain) {
            axis.update(|a| a.pan(percent));
        }
    }

    pub fn pan_range_axes(&self, percent: f64) {
        for (axis, _) in self.distinct_placed(AxisKind::Range) {
            axis.update(|a| a.pan(percent));
        }
    }

    // ---- Drawing ----

    /// Data area this plot would use inside `area`, without drawing.
    pub fn compute_data_area(&self, canvas: &dyn Canvas, area: Rect) -> Rect {
        let plot_area = self.insets.trim(area);
        let domain = self.placed_axes(AxisKind::Domain);
        let range = self.placed_axes(AxisKind::Range);
        with_axis_slots(&domain, |d| {
            with_axis_slots(&range, |r| self.layout.compute_data_area(canvas, plot_area, d, r))
        })
    }

    fn measure_range_space(&self, canvas: &dyn Canvas, plot_area: Rect, space: AxisSpace) -> AxisSpace {
        let range = self.placed_axes(AxisKind::Range);
        with_axis_slots(&range, |r| self.layout.compute_range_space(canvas, plot_area, r, space))
    }

    /// Draws the plot into `area`.
    ///
    /// `anchor` is the pointer position used for crosshairs; `info`, when
    /// given, receives the data area and one entity per drawn item.
    pub fn draw(
        &mut self,
        canvas: &mut dyn Canvas,
        area: Rect,
        anchor: Option<DVec2>,
        info: Option<&mut RenderingInfo>,
    ) -> DrawOutcome {
        self.draw_with_range_space(canvas, area, anchor, info, None)
    }

    fn draw_with_range_space(
        &mut self,
        canvas: &mut dyn Canvas,
        area: Rect,
        anchor: Option<DVec2>,
        mut info: Option<&mut RenderingInfo>,
        forced_range_space: Option<AxisSpace>,
    ) -> DrawOutcome {
        if self.signal.axes_stale() {
            self.configure_axes();
        }
        let plot_area = self.insets.trim(area);
        if let Some(info) = info.as_deref_mut() {
            info.plot_area = plot_area;
        }
        if !self.subplots.is_empty() {
            return self.draw_combined(canvas, plot_area, anchor, info);
        }

        // 1. Layout
        let mut layout = self.layout.clone();
        if forced_range_space.is_some() {
            layout.fixed_range_space = forced_range_space;
            layout.axis_offset = Insets::ZERO;
        }
        let domain_axes = self.placed_axes(AxisKind::Domain);
        let range_axes = self.placed_axes(AxisKind::Range);
        let data_area = with_axis_slots(&domain_axes, |d| {
            with_axis_slots(&range_axes, |r| layout.compute_data_area(&*canvas, plot_area, d, r))
        });
        if data_area.is_empty() {
            self.draw_no_data(canvas, plot_area);
            return DrawOutcome::NoDataArea;
        }
        if let Some(info) = info.as_deref_mut() {
            info.data_area = data_area;
        }

        // 2. Background
        canvas.fill_rect(data_area, self.theme.background);
        if let Some((image, alpha)) = &self.background_image {
            canvas.with_composite(*alpha, &mut |c: &mut dyn Canvas| c.draw_image(image, data_area));
        }

        // 3. Axes, then gridlines from the primary axes' ticks
        let mut drawn = self.draw_axes(canvas, &domain_axes, data_area, layout.axis_offset);
        drawn.extend(self.draw_axes(canvas, &range_axes, data_area, layout.axis_offset));
        self.draw_gridlines(canvas, data_area, &drawn);

        // 4. Background markers and annotations
        self.draw_overlays(canvas, data_area, Layer::Background);

        // 5. Datasets
        canvas.set_clip(Some(data_area));
        let anchor = anchor.filter(|p| data_area.contains(*p));
        let mut crosshair = CrosshairState::new(anchor, self.domain_crosshair.value, self.range_crosshair.value);
        if let Some(p) = anchor {
            if let Some((x, y)) = self.with_primary_transform(data_area, |t| t.screen_to_data(p)) {
                crosshair.anchor_x = Some(x);
                crosshair.anchor_y = Some(y);
            }
        }
        let mut entities = Vec::new();
        for index in self.render_order.dataset_visit_order(self.datasets.indices()) {
            self.render_dataset(canvas, index, data_area, info.as_deref(), &mut crosshair, &mut entities);
        }
        canvas.set_clip(None);

        // 6. Crosshairs
        let winner = crosshair.winner();
        self.domain_crosshair
            .finalize(crosshair.crosshair_x, winner.is_some(), crosshair.anchor_x);
        self.range_crosshair
            .finalize(crosshair.crosshair_y, winner.is_some(), crosshair.anchor_y);
        let locked = self.domain_crosshair.locked_on_data || self.range_crosshair.locked_on_data;
        if winner.is_some() && locked {
            self.crosshair_item = winner;
        }
        self.draw_crosshairs(canvas, data_area);

        // 7. Foreground markers and annotations
        self.draw_overlays(canvas, data_area, Layer::Foreground);
        self.draw_plot_annotations(canvas, data_area);
        self.draw_outline(canvas, data_area);

        if let Some(info) = info {
            info.entities.extend(entities);
        }
        DrawOutcome::Drawn { data_area }
    }

    fn draw_outline(&self, canvas: &mut dyn Canvas, data_area: Rect) {
        let corners = [
            DVec2::new(data_area.min_x(), data_area.min_y()),
            DVec2::new(data_area.max_x(), data_area.min_y()),
            DVec2::new(data_area.max_x(), data_area.max_y()),
            DVec2::new(data_area.min_x(), data_area.max_y()),
        ];
        canvas.draw_polygon(&corners, None, Some(&self.theme.outline_stroke()));
    }

    fn draw_no_data(&self, canvas: &mut dyn Canvas, plot_area: Rect) {
        debug!(?plot_area, "no room left for the data area, skipping draw");
        if let Some(message) = &self.no_data_message {
            let font_size = 12.0;
            let extent = canvas.measure_text(message, font_size);
            let center = plot_area.center();
            canvas.draw_text(
                message,
                DVec2::new(center.x - extent.width / 2.0, center.y - extent.height / 2.0),
                &TextStyle::new(self.theme.no_data_text, font_size),
            );
        }
    }

    /// Draws `axes` outward from the data area; axes sharing an edge are
    /// stacked. Returns the ticks of every axis drawn.
    fn draw_axes(
        &self,
        canvas: &mut dyn Canvas,
        axes: &[(AxisHandle, RectangleEdge)],
        data_area: Rect,
        offset: Insets,
    ) -> Vec<(AxisHandle, Vec<Tick>)> {
        let mut cursors: HashMap<RectangleEdge, f64> = HashMap::new();
        let mut drawn = Vec::with_capacity(axes.len());
        for (axis, edge) in axes {
            let cursor = *cursors
                .entry(*edge)
                .or_insert_with(|| initial_cursor(data_area, &offset, *edge));
            let state = AxisRenderer::draw(&mut *canvas, &axis.borrow(), cursor, data_area, *edge, &self.theme);
            cursors.insert(*edge, state.cursor);
            drawn.push((axis.clone(), state.ticks));
        }
        drawn
    }

    fn ticks_for(
        &self,
        kind: AxisKind,
        data_area: Rect,
        drawn: &[(AxisHandle, Vec<Tick>)],
    ) -> Option<(AxisHandle, RectangleEdge, Vec<Tick>)> {
        let (axis, edge) = self.resolved_axis(kind, 0)?;
        let ticks = match drawn.iter().find(|(a, _)| Rc::ptr_eq(a, &axis)) {
            Some((_, ticks)) => ticks.clone(),
            None => {
                let length = if edge.is_top_or_bottom() {
                    data_area.width
                } else {
                    data_area.height
                };
                axis.borrow().refresh_ticks(length, edge)
            }
        };
        Some((axis, edge, ticks))
    }

    fn draw_gridlines(&self, canvas: &mut dyn Canvas, data_area: Rect, drawn: &[(AxisHandle, Vec<Tick>)]) {
        let orientation = self.layout.orientation;
        let renderer = self.renderers.get_or_primary(0).cloned();
        let stroke = self.theme.grid_stroke();

        if self.domain_gridlines_visible || self.domain_grid_bands_visible {
            if let Some((axis, edge, ticks)) = self.ticks_for(AxisKind::Domain, data_area, drawn) {
                let axis = axis.borrow();
                if self.domain_grid_bands_visible {
                    let bands: Vec<(f64, f64)> = if axis.is_discrete() {
                        (0..axis.categories().len())
                            .step_by(2)
                            .filter_map(|i| axis.category_span(i, data_area, edge))
                            .collect()
                    } else {
                        ticks
                            .chunks_exact(2)
                            .filter_map(|pair| {
                                let a = axis.value_to_coordinate(pair[0].value, data_area, edge).ok()?;
                                let b = axis.value_to_coordinate(pair[1].value, data_area, edge).ok()?;
                                Some((a, b))
                            })
                            .collect()
                    };
                    for (start, end) in bands {
                        match &renderer {
                            Some(r) => r.borrow().fill_domain_grid_band(
                                canvas,
                                data_area,
                                start,
                                end,
                                orientation,
                                self.theme.grid_band,
                            ),
                            None => rendering::fill_domain_band(
                                canvas,
                                data_area,
                                start,
                                end,
                                orientation,
                                self.theme.grid_band,
                            ),
                        }
                    }
                }
                if self.domain_gridlines_visible {
                    for tick in &ticks {
                        let Ok(c) = axis.value_to_coordinate(tick.value, data_area, edge) else {
                            continue;
                        };
                        match &renderer {
                            Some(r) => r
                                .borrow()
                                .draw_domain_gridline(canvas, data_area, c, orientation, &stroke),
                            None => rendering::draw_domain_line(canvas, data_area, c, orientation, &stroke),
                        }
                    }
                }
            }
        }

        if self.range_gridlines_visible {
            if let Some((axis, edge, ticks)) = self.ticks_for(AxisKind::Range, data_area, drawn) {
                let axis = axis.borrow();
                for tick in &ticks {
                    let Ok(c) = axis.value_to_coordinate(tick.value, data_area, edge) else {
                        continue;
                    };
                    match &renderer {
                        Some(r) => r
                            .borrow()
                            .draw_range_gridline(canvas, data_area, c, orientation, &stroke),
                        None => rendering::draw_range_line(canvas, data_area, c, orientation, &stroke),
                    }
                }
            }
        }
    }

    /// Runs `f` with the transform of the axes dataset `index` resolves to.
    fn with_dataset_transform<R>(
        &self,
        index: usize,
        data_area: Rect,
        f: impl FnOnce(&PlotTransform<'_>) -> R,
    ) -> Option<R> {
        let (domain, domain_edge) = self.resolved_axis(AxisKind::Domain, self.domain_map.primary_axis_for(index))?;
        let (range, range_edge) = self.resolved_axis(AxisKind::Range, self.range_map.primary_axis_for(index))?;
        let domain = domain.borrow();
        let range = range.borrow();
        let transform = PlotTransform::new(
            (&domain, domain_edge),
            (&range, range_edge),
            self.layout.orientation,
            data_area,
        );
        Some(f(&transform))
    }

    fn with_primary_transform<R>(&self, data_area: Rect, f: impl FnOnce(&PlotTransform<'_>) -> R) -> Option<R> {
        let (domain, domain_edge) = self.resolved_axis(AxisKind::Domain, 0)?;
        let (range, range_edge) = self.resolved_axis(AxisKind::Range, 0)?;
        let domain = domain.borrow();
        let range = range.borrow();
        let transform = PlotTransform::new(
            (&domain, domain_edge),
            (&range, range_edge),
            self.layout.orientation,
            data_area,
        );
        Some(f(&transform))
    }

    /// Markers and renderer annotations of `layer`, in renderer order.
    fn draw_overlays(&self, canvas: &mut dyn Canvas, data_area: Rect, layer: Layer) {
        let indices: BTreeSet<usize> = self
            .renderers
            .indices()
            .into_iter()
            .chain(self.markers.keys().copied())
            .chain(self.renderer_annotations.keys().copied())
            .collect();
        for index in self.render_order.renderer_visit_order(indices) {
            let Some(renderer) = self.renderers.get_or_primary(index).cloned() else {
                trace!(index, "no renderer for markers, skipping");
                continue;
            };
            let renderer = renderer.borrow();
            let markers = self.markers.get(&index).map(Vec::as_slice).unwrap_or_default();
            let annotations = self.renderer_annotations.get(&index).map(Vec::as_slice).unwrap_or_default();
            self.with_dataset_transform(index, data_area, |transform| {
                for entry in markers.iter().filter(|e| e.layer == layer) {
                    let marker = entry.handle.borrow();
                    let result = match entry.kind {
                        AxisKind::Domain => renderer.draw_domain_marker(canvas, &marker, transform, &self.theme),
                        AxisKind::Range => renderer.draw_range_marker(canvas, &marker, transform, &self.theme),
                    };
                    if let Err(err) = result {
                        trace!(index, %err, "marker not drawn");
                    }
                }
                for entry in annotations.iter().filter(|e| e.layer == layer) {
                    if let Err(err) = renderer.draw_annotation(canvas, &entry.handle.borrow(), transform) {
                        trace!(index, %err, "renderer annotation not drawn");
                    }
                }
            });
        }
    }

    fn draw_plot_annotations(&self, canvas: &mut dyn Canvas, data_area: Rect) {
        if self.annotations.is_empty() {
            return;
        }
        self.with_primary_transform(data_area, |transform| {
            for handle in &self.annotations {
                if let Err(err) = annotation::draw_annotation(canvas, &handle.borrow(), transform) {
                    trace!(%err, "annotation not drawn");
                }
            }
        });
    }

    fn draw_crosshairs(&self, canvas: &mut dyn Canvas, data_area: Rect) {
        let stroke = self.theme.crosshair_stroke();
        let orientation = self.layout.orientation;
        self.with_primary_transform(data_area, |transform| {
            if let (true, Some(value)) = (self.domain_crosshair.visible, self.domain_crosshair.value) {
                if let Ok(c) = transform.domain_to_coordinate(value) {
                    rendering::draw_domain_line(canvas, data_area, c, orientation, &stroke);
                }
            }
            if let (true, Some(value)) = (self.range_crosshair.visible, self.range_crosshair.value) {
                if let Ok(c) = transform.range_to_coordinate(value) {
                    rendering::draw_range_line(canvas, data_area, c, orientation, &stroke);
                }
            }
        });
    }

    /// Renders every item of dataset `index`, pass by pass.
    fn render_dataset(
        &self,
        canvas: &mut dyn Canvas,
        index: usize,
        data_area: Rect,
        info: Option<&RenderingInfo>,
        crosshair: &mut CrosshairState,
        entities: &mut Vec<ItemEntity>,
    ) {
        let Some(handle) = self.dataset(index) else {
            trace!(index, "dataset released, skipping");
            return;
        };
        let Some(renderer) = self.renderers.get_or_primary(index).cloned() else {
            trace!(index, "no renderer for dataset, skipping");
            return;
        };
        let dataset = handle.borrow();
        let renderer = renderer.borrow();
        let drawn = self.with_dataset_transform(index, data_area, |transform| {
            let ctx = ItemRenderContext {
                plot: self,
                dataset: &*dataset,
                dataset_index: index,
                transform: *transform,
            };
            let mut state = renderer.initialise(canvas, data_area, self, index, info);
            for pass in 0..renderer.pass_count() {
                match dataset.shape() {
                    DatasetShape::Series => {
                        for series in self.render_order.series_visit_order(dataset.series_count()) {
                            if !renderer.series_visible(series) {
                                continue;
                            }
                            for item in 0..dataset.item_count(series) {
                                Self::draw_one(&*renderer, canvas, &mut state, &ctx, crosshair, series, item, pass);
                            }
                        }
                    }
                    DatasetShape::Grid => {
                        for row in self.render_order.row_visit_order(dataset.series_count()) {
                            if !renderer.series_visible(row) {
                                continue;
                            }
                            for column in self.render_order.column_visit_order(dataset.item_count(row)) {
                                Self::draw_one(&*renderer, canvas, &mut state, &ctx, crosshair, row, column, pass);
                            }
                        }
                    }
                }
            }
            entities.append(&mut state.entities);
        });
        if drawn.is_none() {
            trace!(index, "no axes for dataset, skipping");
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_one(
        renderer: &dyn ItemRenderer,
        canvas: &mut dyn Canvas,
        state: &mut crate::plot_types::RendererState,
        ctx: &ItemRenderContext<'_>,
        crosshair: &mut CrosshairState,
        row: usize,
        column: usize,
        pass: usize,
    ) {
        match renderer.draw_item(canvas, state, ctx, crosshair, row, column, pass) {
            Ok(()) => {}
            Err(PlotError::InvalidCategory(key)) => {
                debug!(dataset = ctx.dataset_index, row, column, %key, "item outside the category axis, skipped");
            }
            Err(err) => {
                debug!(dataset = ctx.dataset_index, row, column, %err, "item skipped");
            }
        }
    }

    /// Shared-domain layout: the domain axes of this plot span the full data
    /// area and the sub-plots are stacked along the range direction by
    /// weight, all with the same range-axis space.
    fn draw_combined(
        &mut self,
        canvas: &mut dyn Canvas,
        plot_area: Rect,
        anchor: Option<DVec2>,
        info: Option<&mut RenderingInfo>,
    ) -> DrawOutcome {
        let orientation = self.layout.orientation;
        let domain_axes = self.placed_axes(AxisKind::Domain);
        let domain_space = with_axis_slots(&domain_axes, |d| {
            self.layout
                .compute_domain_space(&*canvas, plot_area, d, AxisSpace::default())
        });
        let mut range_space = AxisSpace::default();
        for subplot in &self.subplots {
            range_space = subplot.plot.measure_range_space(&*canvas, plot_area, range_space);
        }
        let mut space = domain_space;
        space.ensure_all_at_least(&range_space);
        let data_area = self.layout.data_area_for(plot_area, &space);
        if data_area.is_empty() {
            self.draw_no_data(canvas, plot_area);
            return DrawOutcome::NoDataArea;
        }

        self.draw_axes(canvas, &domain_axes, data_area, self.layout.axis_offset);

        // Sub-plots ignore their own offsets and share this one
        let adjusted = self.layout.axis_offset.trim(domain_space.shrink(plot_area));
        let weights: Vec<f64> = self.subplots.iter().map(|s| s.weight).collect();
        let along = match orientation {
            PlotOrientation::Normal => adjusted.height,
            PlotOrientation::Transposed => adjusted.width,
        };
        let spans = ViewController::split_by_weight(along, &weights, self.gap);
        let collect = info.is_some();
        let mut subplot_info = Vec::with_capacity(spans.len());
        for (subplot, (offset, length)) in self.subplots.iter_mut().zip(spans) {
            let area = match orientation {
                PlotOrientation::Normal => Rect::new(adjusted.x, adjusted.y + offset, adjusted.width, length),
                PlotOrientation::Transposed => Rect::new(adjusted.x + offset, adjusted.y, length, adjusted.height),
            };
            let mut sub_info = collect.then(RenderingInfo::default);
            subplot
                .plot
                .draw_with_range_space(canvas, area, anchor, sub_info.as_mut(), Some(range_space));
            subplot_info.extend(sub_info);
        }

        if let Some(info) = info {
            info.data_area = data_area;
            info.subplot_info = subplot_info;
        }
        DrawOutcome::Drawn { data_area }
    }
}
