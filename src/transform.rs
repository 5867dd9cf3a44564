//! Transform helper for coordinate projection

use crate::axis::Axis;
use crate::data_types::{Dataset, PlotOrientation, Rect, RectangleEdge};
use crate::error::Result;
use glam::DVec2;

/// The resolved axis pair of one dataset, projecting data to canvas points.
///
/// Domain and range coordinates are computed along their own edges, then
/// placed according to the orientation: in `Normal` the domain coordinate is
/// `x`, in `Transposed` it is `y`.
#[derive(Clone, Copy)]
pub struct PlotTransform<'a> {
    pub domain_axis: &'a Axis,
    pub range_axis: &'a Axis,
    pub domain_edge: RectangleEdge,
    pub range_edge: RectangleEdge,
    pub orientation: PlotOrientation,
    pub data_area: Rect,
}

impl<'a> PlotTransform<'a> {
    pub fn new(
        domain: (&'a Axis, RectangleEdge),
        range: (&'a Axis, RectangleEdge),
        orientation: PlotOrientation,
        data_area: Rect,
    ) -> Self {
        Self {
            domain_axis: domain.0,
            range_axis: range.0,
            domain_edge: domain.1,
            range_edge: range.1,
            orientation,
            data_area,
        }
    }

    /// Canvas point for a `(domain, range)` coordinate pair.
    pub fn point(&self, domain_coordinate: f64, range_coordinate: f64) -> DVec2 {
        match self.orientation {
            PlotOrientation::Normal => DVec2::new(domain_coordinate, range_coordinate),
            PlotOrientation::Transposed => DVec2::new(range_coordinate, domain_coordinate),
        }
    }

    pub fn domain_to_coordinate(&self, value: f64) -> Result<f64> {
        self.domain_axis
            .value_to_coordinate(value, self.data_area, self.domain_edge)
    }

    pub fn range_to_coordinate(&self, value: f64) -> Result<f64> {
        self.range_axis
            .value_to_coordinate(value, self.data_area, self.range_edge)
    }

    pub fn data_to_screen(&self, x: f64, y: f64) -> Result<DVec2> {
        Ok(self.point(self.domain_to_coordinate(x)?, self.range_to_coordinate(y)?))
    }

    /// Inverse of [`data_to_screen`](Self::data_to_screen).
    pub fn screen_to_data(&self, point: DVec2) -> (f64, f64) {
        let (domain_coordinate, range_coordinate) = match self.orientation {
            PlotOrientation::Normal => (point.x, point.y),
            PlotOrientation::Transposed => (point.y, point.x),
        };
        (
            self.domain_axis
                .coordinate_to_value(domain_coordinate, self.data_area, self.domain_edge),
            self.range_axis
                .coordinate_to_value(range_coordinate, self.data_area, self.range_edge),
        )
    }

    /// Domain value of an item: its x value on a continuous axis, its
    /// category index on a discrete one.
    pub fn item_domain_value(&self, dataset: &dyn Dataset, series: usize, item: usize) -> Option<f64> {
        if self.domain_axis.is_discrete() {
            match dataset.item_key(item) {
                Some(key) => self
                    .domain_axis
                    .categories()
                    .iter()
                    .position(|c| *c == key)
                    .map(|i| i as f64),
                None => Some(item as f64),
            }
        } else {
            dataset.x_value_at(series, item)
        }
    }

    /// Domain coordinate of an item. Fails with `InvalidCategory` when the
    /// item's key is not on a discrete domain axis.
    pub fn item_domain_coordinate(&self, dataset: &dyn Dataset, series: usize, item: usize) -> Result<Option<f64>> {
        if self.domain_axis.is_discrete() {
            return match dataset.item_key(item) {
                Some(key) => self
                    .domain_axis
                    .category_to_coordinate(&key, self.data_area, self.domain_edge)
                    .map(Some),
                None => self.domain_to_coordinate(item as f64).map(Some),
            };
        }
        match dataset.x_value_at(series, item) {
            Some(x) => self.domain_to_coordinate(x).map(Some),
            None => Ok(None),
        }
    }

    /// Canvas rectangle spanning `domain` and `range` coordinate intervals.
    pub fn rect(&self, domain: (f64, f64), range: (f64, f64)) -> Rect {
        let a = self.point(domain.0, range.0);
        let b = self.point(domain.1, range.1);
        Rect::from_corners(a.min(b), a.max(b))
    }

    pub fn domain_length(&self) -> f64 {
        if self.domain_edge.is_top_or_bottom() {
            self.data_area.width
        } else {
            self.data_area.height
        }
    }
}
