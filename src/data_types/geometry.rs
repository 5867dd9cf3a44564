use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in canvas units. The origin is the top-left corner
/// and `y` grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const EMPTY: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning two corners; collapses to an empty rectangle at the
    /// first corner when the corners are inverted.
    pub fn from_corners(min: DVec2, max: DVec2) -> Self {
        if max.x < min.x || max.y < min.y {
            return Self::new(min.x, min.y, 0.0, 0.0);
        }
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min_x() && p.x <= self.max_x() && p.y >= self.min_y() && p.y <= self.max_y()
    }

    /// Snaps to whole canvas units without ever growing: the min corner is
    /// rounded up and the max corner rounded down.
    pub fn round_inward(&self) -> Rect {
        let min = DVec2::new(self.min_x().ceil(), self.min_y().ceil());
        let max = DVec2::new(self.max_x().floor(), self.max_y().floor());
        Rect::from_corners(min, max)
    }
}

/// Per-edge padding in canvas units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    pub const ZERO: Insets = Insets {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Shrinks `rect` by these insets. Never produces a negative size.
    pub fn trim(&self, rect: Rect) -> Rect {
        Rect::from_corners(
            DVec2::new(rect.min_x() + self.left, rect.min_y() + self.top),
            DVec2::new(rect.max_x() - self.right, rect.max_y() - self.bottom),
        )
    }
}
