//! A single plot axis: the mapping between data values and canvas
//! coordinates along one edge, plus its auto-range and tick state.

use crate::axis_renderer::AxisRenderer;
use crate::axis_space::AxisSpace;
use crate::canvas::Canvas;
use crate::data_types::{AxisConfig, AxisFormat, Range, Rect, RectangleEdge};
use crate::error::{PlotError, Result};
use crate::notify::{ChangeSource, Observable};
use crate::scales::{self, AxisScale, CategoryScale, ScaleKind};
use crate::view_controller::ViewController;
use std::rc::Rc;
use tracing::warn;

pub type AxisHandle = Rc<Observable<Axis>>;

/// One tick of an axis, in data units.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// What the datasets mapped to an axis contribute to its auto-range.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisData {
    pub range: Option<Range>,
    /// Category keys in first-seen order, for discrete axes.
    pub categories: Vec<String>,
}

impl AxisData {
    pub fn include_range(&mut self, range: Option<Range>) {
        self.range = Range::combine(self.range, range);
    }

    pub fn include_category(&mut self, key: String) {
        if !self.categories.contains(&key) {
            self.categories.push(key);
        }
    }
}

fn check_margins(lower: f64, upper: f64) -> Result<()> {
    if !(0.0..1.0).contains(&lower) || !(0.0..1.0).contains(&upper) {
        return Err(PlotError::invalid_argument(format!(
            "margins ({lower}, {upper}) must be in [0, 1)"
        )));
    }
    Ok(())
}

#[derive(Clone, Debug)]
pub struct Axis {
    label: String,
    scale: AxisScale,
    range: Range,
    auto_range: bool,
    inverted: bool,
    lower_margin: f64,
    upper_margin: f64,
    auto_range_includes_zero: bool,
    auto_range_minimum_size: f64,
    default_auto_range: Range,
    format: AxisFormat,
    visible: bool,
    fixed_dimension: Option<f64>,
    pub tick_label_font_size: f64,
    pub label_font_size: f64,
    pub tick_mark_outside_length: f64,
    pub tick_label_gap: f64,
    pub label_gap: f64,
    pub min_label_spacing: f64,
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            label: String::new(),
            scale: AxisScale::Linear,
            range: Range::default(),
            auto_range: true,
            inverted: false,
            lower_margin: 0.05,
            upper_margin: 0.05,
            auto_range_includes_zero: false,
            auto_range_minimum_size: 1.0,
            default_auto_range: Range::default(),
            format: AxisFormat::Numeric,
            visible: true,
            fixed_dimension: None,
            tick_label_font_size: 10.0,
            label_font_size: 12.0,
            tick_mark_outside_length: 2.0,
            tick_label_gap: 2.0,
            label_gap: 4.0,
            min_label_spacing: 10.0,
        }
    }
}

impl Axis {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn log(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            scale: AxisScale::Log,
            range: Range::new(1.0, 10.0).unwrap_or_default(),
            default_auto_range: Range::new(1.0, 10.0).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// A discrete axis. With auto-range on, the categories are taken from
    /// the mapped datasets on every configure.
    pub fn category(label: impl Into<String>, categories: Vec<String>) -> Self {
        Self {
            label: label.into(),
            scale: AxisScale::Category(CategoryScale {
                categories,
                ..CategoryScale::default()
            }),
            ..Self::default()
        }
    }

    pub fn from_config(config: &AxisConfig) -> Result<Self> {
        let mut axis = match config.scale {
            ScaleKind::Linear => Self::new(config.label.clone()),
            ScaleKind::Log => Self::log(config.label.clone()),
            ScaleKind::Category => Self::category(config.label.clone(), Vec::new()),
        };
        axis.apply_config(config)?;
        Ok(axis)
    }

    /// Applies every field of `config` except the scale family.
    pub fn apply_config(&mut self, config: &AxisConfig) -> Result<()> {
        check_margins(config.lower_margin, config.upper_margin)?;
        if let Some(size) = config.fixed_dimension {
            if size < 0.0 {
                return Err(PlotError::invalid_argument("fixed dimension must not be negative"));
            }
        }
        if let Some(range) = config.range {
            self.check_range(range)?;
        }
        self.lower_margin = config.lower_margin;
        self.upper_margin = config.upper_margin;
        self.label = config.label.clone();
        self.format = config.format;
        self.inverted = config.inverted;
        self.visible = config.visible;
        self.fixed_dimension = config.fixed_dimension;
        self.auto_range_includes_zero = config.auto_range_includes_zero;
        self.tick_label_font_size = config.tick_label_font_size;
        match config.range {
            Some(range) => {
                self.range = range;
                self.auto_range = false;
            }
            None => self.auto_range = config.auto_range,
        }
        Ok(())
    }

    pub fn shared(self) -> AxisHandle {
        Observable::new(ChangeSource::Axis, self)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn scale(&self) -> &AxisScale {
        &self.scale
    }

    pub fn is_discrete(&self) -> bool {
        self.scale.is_discrete()
    }

    pub fn categories(&self) -> &[String] {
        match &self.scale {
            AxisScale::Category(scale) => &scale.categories,
            _ => &[],
        }
    }

    pub fn set_categories(&mut self, categories: Vec<String>) {
        if let AxisScale::Category(scale) = &mut self.scale {
            scale.categories = categories;
        }
    }

    pub fn range(&self) -> Range {
        self.range
    }

    /// Whether `range` is acceptable to [`set_range`](Self::set_range).
    pub fn check_range(&self, range: Range) -> Result<()> {
        if matches!(self.scale, AxisScale::Log) && range.lower() <= 0.0 {
            return Err(PlotError::invalid_argument(format!(
                "log axis range {} must be strictly positive",
                range
            )));
        }
        Ok(())
    }

    /// Sets a fixed range and turns auto-range off.
    pub fn set_range(&mut self, range: Range) -> Result<()> {
        self.check_range(range)?;
        self.range = range;
        self.auto_range = false;
        Ok(())
    }

    pub fn is_auto_range(&self) -> bool {
        self.auto_range
    }

    /// Turning auto-range on takes effect at the plot's next configure.
    pub fn set_auto_range(&mut self, auto: bool) {
        self.auto_range = auto;
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    pub fn margins(&self) -> (f64, f64) {
        (self.lower_margin, self.upper_margin)
    }

    pub fn set_margins(&mut self, lower: f64, upper: f64) -> Result<()> {
        check_margins(lower, upper)?;
        self.lower_margin = lower;
        self.upper_margin = upper;
        Ok(())
    }

    pub fn auto_range_includes_zero(&self) -> bool {
        self.auto_range_includes_zero
    }

    pub fn set_auto_range_includes_zero(&mut self, include: bool) {
        self.auto_range_includes_zero = include;
    }

    pub fn auto_range_minimum_size(&self) -> f64 {
        self.auto_range_minimum_size
    }

    pub fn set_auto_range_minimum_size(&mut self, size: f64) -> Result<()> {
        if size <= 0.0 || !size.is_finite() {
            return Err(PlotError::invalid_argument("minimum auto-range size must be positive"));
        }
        self.auto_range_minimum_size = size;
        Ok(())
    }

    pub fn default_auto_range(&self) -> Range {
        self.default_auto_range
    }

    pub fn set_default_auto_range(&mut self, range: Range) -> Result<()> {
        self.check_range(range)?;
        self.default_auto_range = range;
        Ok(())
    }

    pub fn format(&self) -> AxisFormat {
        self.format
    }

    pub fn set_format(&mut self, format: AxisFormat) {
        self.format = format;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn fixed_dimension(&self) -> Option<f64> {
        self.fixed_dimension
    }

    /// Forces the thickness this axis reserves, bypassing measurement.
    pub fn set_fixed_dimension(&mut self, dimension: Option<f64>) -> Result<()> {
        if matches!(dimension, Some(d) if d < 0.0 || !d.is_finite()) {
            return Err(PlotError::invalid_argument("fixed dimension must be a non-negative number"));
        }
        self.fixed_dimension = dimension;
        Ok(())
    }

    /// Recomputes the auto-range from `data`. Does nothing when a fixed range
    /// is set; calling it twice with the same data gives the same range.
    pub fn configure(&mut self, data: &AxisData) {
        if !self.auto_range {
            return;
        }
        if let AxisScale::Category(scale) = &mut self.scale {
            if !data.categories.is_empty() {
                scale.categories = data.categories.clone();
            }
            let count = scale.categories.len();
            self.range = Range::new(0.0, count.saturating_sub(1) as f64).unwrap_or_default();
            return;
        }
        let Some(data_range) = data.range else {
            self.range = self.default_auto_range;
            return;
        };
        self.range = match self.scale {
            AxisScale::Log => self.log_auto_range(data_range),
            _ => self.linear_auto_range(data_range),
        };
    }

    fn linear_auto_range(&self, data: Range) -> Range {
        let mut lower = data.lower();
        let mut upper = data.upper();
        if self.auto_range_includes_zero {
            lower = lower.min(0.0);
            upper = upper.max(0.0);
        }
        let length = upper - lower;
        if length < self.auto_range_minimum_size {
            let expand = (self.auto_range_minimum_size - length) / 2.0;
            lower -= expand;
            upper += expand;
            if self.auto_range_includes_zero {
                if data.lower() >= 0.0 && lower < 0.0 {
                    upper -= lower;
                    lower = 0.0;
                } else if data.upper() <= 0.0 && upper > 0.0 {
                    lower -= upper;
                    upper = 0.0;
                }
            }
            return Range::new(lower, upper).unwrap_or(self.default_auto_range);
        }
        Range::new(lower, upper)
            .and_then(|r| r.expand(self.lower_margin, self.upper_margin))
            .unwrap_or(self.default_auto_range)
    }

    fn log_auto_range(&self, data: Range) -> Range {
        if data.upper() <= 0.0 {
            warn!("log axis '{}' has no positive data, using the default range", self.label);
            return self.default_auto_range;
        }
        let lower = if data.lower() > 0.0 {
            data.lower()
        } else {
            warn!(
                "log axis '{}' ignores non-positive data below {}",
                self.label,
                data.upper()
            );
            data.upper() / 10.0
        };
        let (mut lo, mut hi) = (lower.log10(), data.upper().log10());
        let length = hi - lo;
        if length <= 0.0 {
            lo -= 0.5;
            hi += 0.5;
        } else {
            lo -= length * self.lower_margin;
            hi += length * self.upper_margin;
        }
        Range::new(10f64.powf(lo), 10f64.powf(hi)).unwrap_or(self.default_auto_range)
    }

    /// Canvas coordinate of `value` along `edge` of `area`. Continuous axes
    /// extrapolate outside the range; a discrete axis only accepts category
    /// indices.
    pub fn value_to_coordinate(&self, value: f64, area: Rect, edge: RectangleEdge) -> Result<f64> {
        self.scale
            .value_to_coordinate(value, self.range, area, edge, self.inverted)
    }

    pub fn coordinate_to_value(&self, coordinate: f64, area: Rect, edge: RectangleEdge) -> f64 {
        self.scale
            .coordinate_to_value(coordinate, self.range, area, edge, self.inverted)
    }

    /// Middle of the slot of category `key`.
    pub fn category_to_coordinate(&self, key: &str, area: Rect, edge: RectangleEdge) -> Result<f64> {
        match &self.scale {
            AxisScale::Category(scale) => scale
                .index_of(key)
                .map(|index| scale.middle(index, area, edge))
                .ok_or_else(|| PlotError::InvalidCategory(key.to_string())),
            _ => Err(PlotError::InvalidCategory(key.to_string())),
        }
    }

    /// `(start, end)` of the slot of the category at `index`.
    pub fn category_span(&self, index: usize, area: Rect, edge: RectangleEdge) -> Option<(f64, f64)> {
        match &self.scale {
            AxisScale::Category(scale) if index < scale.categories.len() => Some(scale.span(index, area, edge)),
            _ => None,
        }
    }

    /// Width of one category slot, if this axis is discrete.
    pub fn category_size(&self, area: Rect, edge: RectangleEdge) -> Option<f64> {
        match &self.scale {
            AxisScale::Category(scale) => {
                let length = if edge.is_top_or_bottom() { area.width } else { area.height };
                Some(scale.category_size(length))
            }
            _ => None,
        }
    }

    /// Returns `space` with this axis' thickness on `edge` folded in. The
    /// axis itself is not modified.
    pub fn reserve_space(
        &self,
        canvas: &dyn Canvas,
        plot_area: Rect,
        edge: RectangleEdge,
        space: AxisSpace,
    ) -> AxisSpace {
        if !self.visible {
            return space;
        }
        let thickness = match self.fixed_dimension {
            Some(dimension) => dimension,
            None => AxisRenderer::required_thickness(canvas, self, plot_area, edge),
        };
        space.with_at_least(edge, thickness)
    }

    /// Ticks for an axis drawn over `length` canvas units.
    pub fn refresh_ticks(&self, length: f64, edge: RectangleEdge) -> Vec<Tick> {
        match &self.scale {
            AxisScale::Category(scale) => scale
                .categories
                .iter()
                .enumerate()
                .map(|(i, key)| Tick {
                    value: i as f64,
                    label: key.clone(),
                })
                .collect(),
            AxisScale::Log => scales::log_ticks(self.range)
                .into_iter()
                .map(|value| self.tick(value))
                .collect(),
            AxisScale::Linear => {
                // Dynamic density calculation
                let label_size = if edge.is_left_or_right() {
                    self.tick_label_font_size * 2.0
                } else {
                    match self.format {
                        AxisFormat::Time(_) => 80.0,
                        AxisFormat::Numeric => 50.0,
                    }
                };
                let label_size_est = label_size + self.min_label_spacing;
                let count = (length / label_size_est).floor().max(0.0) as usize;
                scales::linear_ticks(self.range, count.clamp(2, 20))
                    .into_iter()
                    .map(|value| self.tick(value))
                    .collect()
            }
        }
    }

    fn tick(&self, value: f64) -> Tick {
        Tick {
            value,
            label: scales::format_tick(value, &self.format, self.range),
        }
    }

    /// Zooms around `anchor` (data units). A non-positive factor restores
    /// auto-range.
    pub fn resize_range(&mut self, factor: f64, anchor: f64) {
        let resized = match self.scale {
            AxisScale::Category(_) => return,
            AxisScale::Log => ViewController::resize_log(self.range, factor, anchor),
            AxisScale::Linear => ViewController::resize(self.range, factor, anchor),
        };
        match resized {
            Some(range) => {
                self.range = range;
                self.auto_range = false;
            }
            None => self.auto_range = true,
        }
    }

    /// Moves the range by `percent` of its length.
    pub fn pan(&mut self, percent: f64) {
        self.range = match self.scale {
            AxisScale::Category(_) => return,
            AxisScale::Log => ViewController::pan_log(self.range, percent),
            AxisScale::Linear => ViewController::pan(self.range, percent),
        };
        self.auto_range = false;
    }
}
