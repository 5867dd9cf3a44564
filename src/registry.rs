//! Sparse index-keyed registries for the components of a plot.
//!
//! Indices need not be contiguous. Axis and renderer lookups fall back to the
//! entry at index 0; dataset lookups never fall back.

use crate::axis::AxisHandle;
use crate::data_types::{AxisKind, AxisLocation, PlotOrientation, RectangleEdge};
use crate::error::{PlotError, Result};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::{Rc, Weak};

/// Ordered `index -> T` map.
#[derive(Clone, Debug)]
pub struct IndexRegistry<T> {
    entries: BTreeMap<usize, T>,
}

impl<T> Default for IndexRegistry<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T> IndexRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(&index)
    }

    /// The entry at `index`, or the entry at index 0 when there is none.
    pub fn get_or_primary(&self, index: usize) -> Option<&T> {
        self.entries.get(&index).or_else(|| self.entries.get(&0))
    }

    /// Stores `value` at `index` and returns the previous occupant.
    pub fn insert(&mut self, index: usize, value: T) -> Option<T> {
        self.entries.insert(index, value)
    }

    pub fn remove(&mut self, index: usize) -> Option<T> {
        self.entries.remove(&index)
    }

    /// Entries in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.entries.iter().map(|(index, value)| (*index, value))
    }

    pub fn indices(&self) -> Vec<usize> {
        self.entries.keys().copied().collect()
    }

    /// First unused index.
    pub fn next_free_index(&self) -> usize {
        (0..).find(|i| !self.entries.contains_key(i)).unwrap_or(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lowest index whose entry satisfies `pred`.
    pub fn index_of(&self, mut pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.entries
            .iter()
            .find(|(_, value)| pred(value))
            .map(|(index, _)| *index)
    }

    pub fn clear(&mut self) -> Vec<T> {
        std::mem::take(&mut self.entries).into_values().collect()
    }
}

static PRIMARY_ONLY: [usize; 1] = [0];

/// Dataset index to ordered axis indices. The first axis of a list is the
/// dataset's primary axis. An unmapped dataset uses axis 0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatasetAxisMap {
    entries: BTreeMap<usize, Vec<usize>>,
}

impl DatasetAxisMap {
    /// Replaces the mapping of `dataset`. Fails without touching the current
    /// mapping when `axes` is empty or repeats an index.
    pub fn map(&mut self, dataset: usize, axes: &[usize]) -> Result<()> {
        if axes.is_empty() {
            return Err(PlotError::invalid_mapping(format!(
                "dataset {} must map to at least one axis",
                dataset
            )));
        }
        let unique: HashSet<usize> = axes.iter().copied().collect();
        if unique.len() != axes.len() {
            return Err(PlotError::invalid_mapping(format!(
                "duplicate axis index in {:?} for dataset {}",
                axes, dataset
            )));
        }
        self.entries.insert(dataset, axes.to_vec());
        Ok(())
    }

    pub fn axis_indices_for(&self, dataset: usize) -> &[usize] {
        self.entries
            .get(&dataset)
            .map(|axes| axes.as_slice())
            .unwrap_or(&PRIMARY_ONLY)
    }

    pub fn primary_axis_for(&self, dataset: usize) -> usize {
        self.axis_indices_for(dataset)[0]
    }

    pub fn is_mapped(&self, dataset: usize) -> bool {
        self.entries.contains_key(&dataset)
    }

    /// Drops an explicit mapping, returning the dataset to axis 0.
    pub fn clear(&mut self, dataset: usize) -> Option<Vec<usize>> {
        self.entries.remove(&dataset)
    }

    /// Which of `datasets` use `axis`, in the order given.
    pub fn datasets_for_axis(&self, axis: usize, datasets: impl IntoIterator<Item = usize>) -> Vec<usize> {
        datasets
            .into_iter()
            .filter(|d| self.axis_indices_for(*d).contains(&axis))
            .collect()
    }
}

/// Axes of one family with their preferred placements.
#[derive(Clone)]
pub struct AxisRegistry {
    kind: AxisKind,
    axes: IndexRegistry<AxisHandle>,
    locations: BTreeMap<usize, AxisLocation>,
}

impl AxisRegistry {
    pub fn new(kind: AxisKind) -> Self {
        Self {
            kind,
            axes: IndexRegistry::new(),
            locations: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    pub fn get(&self, index: usize) -> Option<&AxisHandle> {
        self.axes.get(index)
    }

    pub fn get_or_primary(&self, index: usize) -> Option<&AxisHandle> {
        self.axes.get_or_primary(index)
    }

    pub fn insert(&mut self, index: usize, axis: AxisHandle) -> Option<AxisHandle> {
        self.axes.insert(index, axis)
    }

    pub fn remove(&mut self, index: usize) -> Option<AxisHandle> {
        self.axes.remove(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &AxisHandle)> {
        self.axes.iter()
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    pub fn index_of(&self, axis: &AxisHandle) -> Option<usize> {
        self.axes.index_of(|a| Rc::ptr_eq(a, axis))
    }

    /// Explicit location, or the default: index 0 sits bottom/left and every
    /// other index on the side opposite to index 0.
    pub fn location(&self, index: usize) -> AxisLocation {
        if let Some(location) = self.locations.get(&index) {
            return *location;
        }
        let primary = self.locations.get(&0).copied().unwrap_or_default();
        if index == 0 {
            primary
        } else {
            primary.opposite()
        }
    }

    pub fn set_location(&mut self, index: usize, location: AxisLocation) {
        self.locations.insert(index, location);
    }

    pub fn edge(&self, index: usize, orientation: PlotOrientation) -> RectangleEdge {
        let location = self.location(index);
        match self.kind {
            AxisKind::Domain => orientation.domain_edge(location),
            AxisKind::Range => orientation.range_edge(location),
        }
    }
}

/// Domain and range registries of a plot, linked to the registries of the
/// parent plot for sub-plot fallback.
pub(crate) struct AxisSet {
    pub domain: RefCell<AxisRegistry>,
    pub range: RefCell<AxisRegistry>,
    parent: RefCell<Weak<AxisSet>>,
}

impl Default for AxisSet {
    fn default() -> Self {
        Self {
            domain: RefCell::new(AxisRegistry::new(AxisKind::Domain)),
            range: RefCell::new(AxisRegistry::new(AxisKind::Range)),
            parent: RefCell::new(Weak::new()),
        }
    }
}

impl AxisSet {
    pub fn registry(&self, kind: AxisKind) -> &RefCell<AxisRegistry> {
        match kind {
            AxisKind::Domain => &self.domain,
            AxisKind::Range => &self.range,
        }
    }

    pub fn set_parent(&self, parent: Option<&Rc<AxisSet>>) {
        *self.parent.borrow_mut() = parent.map(Rc::downgrade).unwrap_or_default();
    }

    /// Axis at `index`, then this plot's axis 0, then the parent's answer.
    pub fn resolve(&self, kind: AxisKind, index: usize) -> Option<AxisHandle> {
        if let Some(axis) = self.registry(kind).borrow().get_or_primary(index) {
            return Some(axis.clone());
        }
        let parent = self.parent.borrow().upgrade();
        parent.and_then(|p| p.resolve(kind, index))
    }

    /// Edge for an axis resolved through [`resolve`](Self::resolve): the
    /// location comes from whichever registry owns it.
    pub fn resolve_edge(
        &self,
        kind: AxisKind,
        axis: &AxisHandle,
        orientation: PlotOrientation,
    ) -> Option<RectangleEdge> {
        let registry = self.registry(kind).borrow();
        if let Some(index) = registry.index_of(axis) {
            return Some(registry.edge(index, orientation));
        }
        let parent = self.parent.borrow().upgrade();
        parent.and_then(|p| p.resolve_edge(kind, axis, orientation))
    }

    /// Distinct axes of `kind`, in index order.
    pub fn distinct(&self, kind: AxisKind) -> Vec<AxisHandle> {
        let mut axes: Vec<AxisHandle> = Vec::new();
        for (_, axis) in self.registry(kind).borrow().iter() {
            if !axes.iter().any(|a| Rc::ptr_eq(a, axis)) {
                axes.push(axis.clone());
            }
        }
        axes
    }
}
