//! Axis space reservation and data area computation.

use crate::axis::Axis;
use crate::axis_space::AxisSpace;
use crate::canvas::Canvas;
use crate::data_types::{Insets, PlotOrientation, Rect, RectangleEdge};
use tracing::debug;

/// An axis together with the edge it is drawn on.
#[derive(Clone, Copy)]
pub struct AxisSlot<'a> {
    pub axis: &'a Axis,
    pub edge: RectangleEdge,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutEngine {
    pub orientation: PlotOrientation,
    /// Extra gap between the axes and the data area.
    pub axis_offset: Insets,
    /// When set, used instead of measuring the domain axes.
    pub fixed_domain_space: Option<AxisSpace>,
    /// When set, used instead of measuring the range axes.
    pub fixed_range_space: Option<AxisSpace>,
}

impl LayoutEngine {
    pub fn new(orientation: PlotOrientation) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }

    /// Space reserved by every axis. Range axes are measured first, against
    /// the whole plot area; domain axes are then measured against what the
    /// range axes left over.
    pub fn compute_axis_space(
        &self,
        canvas: &dyn Canvas,
        plot_area: Rect,
        domain: &[AxisSlot<'_>],
        range: &[AxisSlot<'_>],
    ) -> AxisSpace {
        let space = self.compute_range_space(canvas, plot_area, range, AxisSpace::default());
        let remaining = space.shrink(plot_area);
        self.compute_domain_space(canvas, remaining, domain, space)
    }

    pub fn compute_range_space(
        &self,
        canvas: &dyn Canvas,
        plot_area: Rect,
        range: &[AxisSlot<'_>],
        space: AxisSpace,
    ) -> AxisSpace {
        match &self.fixed_range_space {
            Some(fixed) => match self.orientation {
                PlotOrientation::Normal => space
                    .with_at_least(RectangleEdge::Left, fixed.left())
                    .with_at_least(RectangleEdge::Right, fixed.right()),
                PlotOrientation::Transposed => space
                    .with_at_least(RectangleEdge::Top, fixed.top())
                    .with_at_least(RectangleEdge::Bottom, fixed.bottom()),
            },
            None => range.iter().fold(space, |space, slot| {
                slot.axis.reserve_space(canvas, plot_area, slot.edge, space)
            }),
        }
    }

    pub fn compute_domain_space(
        &self,
        canvas: &dyn Canvas,
        plot_area: Rect,
        domain: &[AxisSlot<'_>],
        space: AxisSpace,
    ) -> AxisSpace {
        match &self.fixed_domain_space {
            Some(fixed) => match self.orientation {
                PlotOrientation::Normal => space
                    .with_at_least(RectangleEdge::Top, fixed.top())
                    .with_at_least(RectangleEdge::Bottom, fixed.bottom()),
                PlotOrientation::Transposed => space
                    .with_at_least(RectangleEdge::Left, fixed.left())
                    .with_at_least(RectangleEdge::Right, fixed.right()),
            },
            None => domain.iter().fold(space, |space, slot| {
                slot.axis.reserve_space(canvas, plot_area, slot.edge, space)
            }),
        }
    }

    /// Rectangle left for the data once `space` and the axis offset are
    /// taken off `plot_area`, snapped inward to whole canvas units. May be
    /// empty.
    pub fn data_area_for(&self, plot_area: Rect, space: &AxisSpace) -> Rect {
        let area = self.axis_offset.trim(space.shrink(plot_area));
        let rounded = area.round_inward();
        debug!(
            ?plot_area,
            ?space,
            data_area = ?rounded,
            "computed data area"
        );
        rounded
    }

    pub fn compute_data_area(
        &self,
        canvas: &dyn Canvas,
        plot_area: Rect,
        domain: &[AxisSlot<'_>],
        range: &[AxisSlot<'_>],
    ) -> Rect {
        let space = self.compute_axis_space(canvas, plot_area, domain, range);
        self.data_area_for(plot_area, &space)
    }
}
