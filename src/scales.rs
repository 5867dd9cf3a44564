//! Value/coordinate mapping for the three axis scale families, plus tick
//! generation and tick label formatting.

use crate::data_types::{AxisFormat, Range, Rect, RectangleEdge, TimeUnit};
use crate::error::{PlotError, Result};
use crate::utils::date_formatter;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScaleKind {
    #[default]
    Linear,
    Log,
    Category,
}

/// Layout parameters of a discrete axis. Margins are fractions of the axis
/// length.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryScale {
    pub categories: Vec<String>,
    pub lower_margin: f64,
    pub upper_margin: f64,
    pub category_margin: f64,
}

impl Default for CategoryScale {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            lower_margin: 0.05,
            upper_margin: 0.05,
            category_margin: 0.2,
        }
    }
}

impl CategoryScale {
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == key)
    }

    /// Width of a single category slot in canvas units.
    pub fn category_size(&self, length: f64) -> f64 {
        let count = self.categories.len();
        if count == 0 {
            return 0.0;
        }
        let margin = if count > 1 { self.category_margin } else { 0.0 };
        length * (1.0 - self.lower_margin - self.upper_margin - margin) / count as f64
    }

    fn gap(&self, length: f64) -> f64 {
        let count = self.categories.len();
        if count > 1 {
            length * self.category_margin / (count - 1) as f64
        } else {
            0.0
        }
    }

    /// `(start, end)` of a category slot along the edge.
    pub fn span(&self, index: usize, area: Rect, edge: RectangleEdge) -> (f64, f64) {
        let (min, length) = edge_extent(area, edge);
        let size = self.category_size(length);
        let start = min + length * self.lower_margin + index as f64 * (size + self.gap(length));
        (start, start + size)
    }

    pub fn middle(&self, index: usize, area: Rect, edge: RectangleEdge) -> f64 {
        let (start, end) = self.span(index, area, edge);
        (start + end) / 2.0
    }

    /// Index of the category whose middle is closest to `coordinate`.
    pub fn nearest(&self, coordinate: f64, area: Rect, edge: RectangleEdge) -> Option<usize> {
        (0..self.categories.len()).min_by(|a, b| {
            let da = (self.middle(*a, area, edge) - coordinate).abs();
            let db = (self.middle(*b, area, edge) - coordinate).abs();
            da.total_cmp(&db)
        })
    }
}

/// `(start, length)` of the rectangle along the direction an edge runs.
/// Category slots run left-to-right and top-to-bottom.
fn edge_extent(area: Rect, edge: RectangleEdge) -> (f64, f64) {
    if edge.is_top_or_bottom() {
        (area.min_x(), area.width)
    } else {
        (area.min_y(), area.height)
    }
}

/// `(coordinate of range.lower, coordinate of range.upper)` for a continuous
/// axis. Vertical axes grow upward.
fn continuous_extent(area: Rect, edge: RectangleEdge, inverted: bool) -> (f64, f64) {
    let (min, max) = if edge.is_top_or_bottom() {
        (area.min_x(), area.max_x())
    } else {
        (area.max_y(), area.min_y())
    };
    if inverted {
        (max, min)
    } else {
        (min, max)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AxisScale {
    Linear,
    Log,
    Category(CategoryScale),
}

impl AxisScale {
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Linear => ScaleKind::Linear,
            Self::Log => ScaleKind::Log,
            Self::Category(_) => ScaleKind::Category,
        }
    }

    pub fn from_kind(kind: ScaleKind) -> Self {
        match kind {
            ScaleKind::Linear => Self::Linear,
            ScaleKind::Log => Self::Log,
            ScaleKind::Category => Self::Category(CategoryScale::default()),
        }
    }

    pub fn is_discrete(&self) -> bool {
        matches!(self, Self::Category(_))
    }

    /// Maps a data value to a canvas coordinate. Continuous scales
    /// extrapolate outside `range`; a category scale only accepts the
    /// integral index of an enumerated category.
    pub fn value_to_coordinate(
        &self,
        value: f64,
        range: Range,
        area: Rect,
        edge: RectangleEdge,
        inverted: bool,
    ) -> Result<f64> {
        match self {
            Self::Linear => {
                let (min, max) = continuous_extent(area, edge, inverted);
                if range.length() <= 0.0 {
                    return Ok((min + max) / 2.0);
                }
                Ok(min + (value - range.lower()) / range.length() * (max - min))
            }
            Self::Log => {
                let (min, max) = continuous_extent(area, edge, inverted);
                if range.length() <= 0.0 {
                    return Ok((min + max) / 2.0);
                }
                let (lo, hi) = (range.lower().log10(), range.upper().log10());
                Ok(min + (value.log10() - lo) / (hi - lo) * (max - min))
            }
            Self::Category(scale) => {
                let index = value.round();
                if value.fract() != 0.0 || index < 0.0 || index as usize >= scale.categories.len() {
                    return Err(PlotError::InvalidCategory(value.to_string()));
                }
                Ok(scale.middle(index as usize, area, edge))
            }
        }
    }

    /// Inverse of [`value_to_coordinate`](Self::value_to_coordinate). For a
    /// category scale the result is the index of the nearest category.
    pub fn coordinate_to_value(
        &self,
        coordinate: f64,
        range: Range,
        area: Rect,
        edge: RectangleEdge,
        inverted: bool,
    ) -> f64 {
        match self {
            Self::Linear => {
                let (min, max) = continuous_extent(area, edge, inverted);
                if max == min {
                    return range.lower();
                }
                range.lower() + (coordinate - min) / (max - min) * range.length()
            }
            Self::Log => {
                let (min, max) = continuous_extent(area, edge, inverted);
                if max == min {
                    return range.lower();
                }
                let (lo, hi) = (range.lower().log10(), range.upper().log10());
                10f64.powf(lo + (coordinate - min) / (max - min) * (hi - lo))
            }
            Self::Category(scale) => scale
                .nearest(coordinate, area, edge)
                .map(|i| i as f64)
                .unwrap_or(f64::NAN),
        }
    }
}

/// Picks a "nice" step (1, 2 or 5 times a power of ten) no smaller than
/// `raw_step`.
pub fn nice_step(raw_step: f64) -> f64 {
    let abs_step = raw_step.abs();
    if abs_step == 0.0 || !abs_step.is_finite() {
        return 1.0;
    }
    let mut candidate = 1.0;
    while candidate * 10.0 <= abs_step {
        candidate *= 10.0;
    }
    while candidate > abs_step {
        candidate /= 10.0;
    }
    [candidate, candidate * 2.0, candidate * 5.0, candidate * 10.0]
        .into_iter()
        .find(|c| *c >= abs_step)
        .unwrap_or(candidate * 10.0)
}

/// Tick values inside `range`, roughly `count` of them.
pub fn linear_ticks(range: Range, count: usize) -> Vec<f64> {
    let count = count.max(1);
    if range.length() <= 0.0 {
        return vec![range.lower()];
    }
    let step = nice_step(range.length() / count as f64);
    let first = (range.lower() / step).ceil() as i64;
    let last = (range.upper() / step).floor() as i64;
    (first..=last)
        .map(|i| i as f64 * step)
        .map(|v| if v.abs() < step * 1e-9 { 0.0 } else { v })
        .collect()
}

/// One tick per decade inside `range`.
pub fn log_ticks(range: Range) -> Vec<f64> {
    if range.lower() <= 0.0 {
        return Vec::new();
    }
    let first = range.lower().log10().ceil() as i32;
    let last = range.upper().log10().floor() as i32;
    (first..=last).map(|e| 10f64.powi(e)).collect()
}

pub fn format_tick(value: f64, format: &AxisFormat, range: Range) -> String {
    match format {
        AxisFormat::Time(unit) => {
            let fmt = date_formatter::determine_date_format(unit.to_seconds(range.length().abs()));
            return date_formatter::format_timestamp(value, fmt, *unit);
        }
        AxisFormat::Numeric => {
            // Only fall back to dates if it really looks like a timestamp.
            if value.abs() > 100_000_000_000.0 {
                let unit = if value.abs() > 3_000_000_000_000.0 {
                    TimeUnit::Milliseconds
                } else {
                    TimeUnit::Seconds
                };
                let fmt = date_formatter::determine_date_format(unit.to_seconds(range.length().abs()));
                return date_formatter::format_timestamp(value, fmt, unit);
            }
        }
    }

    if value.abs() < 0.001 && value.abs() > 0.0 {
        format!("{:.4}", value)
    } else if value.abs() > 1000.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
