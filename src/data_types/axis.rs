use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl TimeUnit {
    pub fn to_seconds(&self, value: f64) -> f64 {
        match self {
            TimeUnit::Seconds => value,
            TimeUnit::Milliseconds => value / 1_000.0,
            TimeUnit::Microseconds => value / 1_000_000.0,
            TimeUnit::Nanoseconds => value / 1_000_000_000.0,
        }
    }
}

/// How tick labels of a continuous axis are formatted.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AxisFormat {
    #[default]
    Numeric,
    Time(TimeUnit),
}

/// One edge of a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RectangleEdge {
    Top,
    Bottom,
    Left,
    Right,
}

impl RectangleEdge {
    pub fn is_top_or_bottom(&self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    pub fn is_left_or_right(&self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    pub fn opposite(&self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Preferred placement of an axis, resolved against the plot orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisLocation {
    TopOrLeft,
    TopOrRight,
    #[default]
    BottomOrLeft,
    BottomOrRight,
}

impl AxisLocation {
    pub fn opposite(&self) -> Self {
        match self {
            Self::TopOrLeft => Self::BottomOrRight,
            Self::TopOrRight => Self::BottomOrLeft,
            Self::BottomOrLeft => Self::TopOrRight,
            Self::BottomOrRight => Self::TopOrLeft,
        }
    }
}

/// Whether the domain dimension runs along the horizontal (`Normal`) or the
/// vertical (`Transposed`) direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlotOrientation {
    #[default]
    Normal,
    Transposed,
}

impl PlotOrientation {
    pub fn domain_edge(&self, location: AxisLocation) -> RectangleEdge {
        use AxisLocation::*;
        match (self, location) {
            (Self::Normal, TopOrLeft | TopOrRight) => RectangleEdge::Top,
            (Self::Normal, BottomOrLeft | BottomOrRight) => RectangleEdge::Bottom,
            (Self::Transposed, TopOrLeft | BottomOrLeft) => RectangleEdge::Left,
            (Self::Transposed, TopOrRight | BottomOrRight) => RectangleEdge::Right,
        }
    }

    pub fn range_edge(&self, location: AxisLocation) -> RectangleEdge {
        use AxisLocation::*;
        match (self, location) {
            (Self::Normal, TopOrLeft | BottomOrLeft) => RectangleEdge::Left,
            (Self::Normal, TopOrRight | BottomOrRight) => RectangleEdge::Right,
            (Self::Transposed, TopOrLeft | TopOrRight) => RectangleEdge::Top,
            (Self::Transposed, BottomOrLeft | BottomOrRight) => RectangleEdge::Bottom,
        }
    }
}

/// Which family an axis belongs to in a plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisKind {
    Domain,
    Range,
}
