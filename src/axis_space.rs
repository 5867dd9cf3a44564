use crate::data_types::{Insets, Rect, RectangleEdge};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Thickness reserved for axes on each edge of the plot area.
///
/// The only mutator is [`ensure_at_least`](Self::ensure_at_least), so a
/// reservation can grow but never shrink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Insets", into = "Insets")]
pub struct AxisSpace {
    top: f64,
    bottom: f64,
    left: f64,
    right: f64,
}

impl AxisSpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn get(&self, edge: RectangleEdge) -> f64 {
        match edge {
            RectangleEdge::Top => self.top,
            RectangleEdge::Bottom => self.bottom,
            RectangleEdge::Left => self.left,
            RectangleEdge::Right => self.right,
        }
    }

    /// Raises the thickness of `edge` to `value` if it is larger. Negative and
    /// NaN values are ignored.
    pub fn ensure_at_least(&mut self, edge: RectangleEdge, value: f64) {
        let slot = match edge {
            RectangleEdge::Top => &mut self.top,
            RectangleEdge::Bottom => &mut self.bottom,
            RectangleEdge::Left => &mut self.left,
            RectangleEdge::Right => &mut self.right,
        };
        if value > *slot {
            *slot = value;
        }
    }

    /// Builder form of [`ensure_at_least`](Self::ensure_at_least).
    pub fn with_at_least(mut self, edge: RectangleEdge, value: f64) -> Self {
        self.ensure_at_least(edge, value);
        self
    }

    /// Edge-wise maximum of `self` and `other`.
    pub fn ensure_all_at_least(&mut self, other: &AxisSpace) {
        for edge in [
            RectangleEdge::Top,
            RectangleEdge::Bottom,
            RectangleEdge::Left,
            RectangleEdge::Right,
        ] {
            self.ensure_at_least(edge, other.get(edge));
        }
    }

    /// `rect` inset by the reserved thickness; an empty rectangle when the
    /// reservation exceeds the available size.
    pub fn shrink(&self, rect: Rect) -> Rect {
        Rect::from_corners(
            DVec2::new(rect.min_x() + self.left, rect.min_y() + self.top),
            DVec2::new(rect.max_x() - self.right, rect.max_y() - self.bottom),
        )
    }

    pub fn total_width(&self) -> f64 {
        self.left + self.right
    }

    pub fn total_height(&self) -> f64 {
        self.top + self.bottom
    }
}

impl From<Insets> for AxisSpace {
    fn from(insets: Insets) -> Self {
        AxisSpace::new()
            .with_at_least(RectangleEdge::Top, insets.top)
            .with_at_least(RectangleEdge::Left, insets.left)
            .with_at_least(RectangleEdge::Bottom, insets.bottom)
            .with_at_least(RectangleEdge::Right, insets.right)
    }
}

impl From<AxisSpace> for Insets {
    fn from(space: AxisSpace) -> Self {
        Insets::new(space.top, space.left, space.bottom, space.right)
    }
}
