use super::axis::{AxisFormat, PlotOrientation};
use super::geometry::Insets;
use super::range::Range;
use super::state::CrosshairConfig;
use crate::axis_space::AxisSpace;
use crate::canvas::Color;
use crate::error::Result;
use crate::render_order::{RenderingOrder, SortOrder};
use crate::scales::ScaleKind;
use palette::Srgba;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinePlotConfig {
    pub color: Color,
    pub line_width: f64,
    pub shapes_visible: bool,
    pub shape_size: f64,
}

impl Default for LinePlotConfig {
    fn default() -> Self {
        Self {
            color: Srgba::new(0.2, 0.4, 1.0, 1.0),
            line_width: 2.0,
            shapes_visible: false,
            shape_size: 6.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarPlotConfig {
    pub color: Color,
    /// 0.0 to 1.0 relative to data spacing
    pub bar_width_pct: f64,
    /// Value the bars grow from.
    pub base: f64,
}

impl Default for BarPlotConfig {
    fn default() -> Self {
        Self {
            color: Srgba::new(0.2, 0.4, 1.0, 1.0),
            bar_width_pct: 0.8,
            base: 0.0,
        }
    }
}

/// Serializable description of one axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    pub label: String,
    pub scale: ScaleKind,
    pub format: AxisFormat,
    pub inverted: bool,
    pub auto_range: bool,
    /// A fixed range; turns auto-range off.
    pub range: Option<Range>,
    pub lower_margin: f64,
    pub upper_margin: f64,
    pub auto_range_includes_zero: bool,
    pub fixed_dimension: Option<f64>,
    pub tick_label_font_size: f64,
    pub visible: bool,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            scale: ScaleKind::Linear,
            format: AxisFormat::Numeric,
            inverted: false,
            auto_range: true,
            range: None,
            lower_margin: 0.05,
            upper_margin: 0.05,
            auto_range_includes_zero: false,
            fixed_dimension: None,
            tick_label_font_size: 10.0,
            visible: true,
        }
    }
}

/// Plot-level settings that can be loaded from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub orientation: PlotOrientation,
    pub axis_offset: Insets,
    pub insets: Insets,
    pub dataset_rendering_order: RenderingOrder,
    pub series_rendering_order: RenderingOrder,
    pub renderer_order: RenderingOrder,
    pub row_order: SortOrder,
    pub column_order: SortOrder,
    pub domain_crosshair: CrosshairConfig,
    pub range_crosshair: CrosshairConfig,
    pub domain_gridlines_visible: bool,
    pub range_gridlines_visible: bool,
    pub domain_grid_bands_visible: bool,
    pub fixed_domain_axis_space: Option<AxisSpace>,
    pub fixed_range_axis_space: Option<AxisSpace>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            orientation: PlotOrientation::Normal,
            axis_offset: Insets::ZERO,
            insets: Insets::uniform(4.0),
            dataset_rendering_order: RenderingOrder::Reverse,
            series_rendering_order: RenderingOrder::Forward,
            renderer_order: RenderingOrder::Reverse,
            row_order: SortOrder::Ascending,
            column_order: SortOrder::Ascending,
            domain_crosshair: CrosshairConfig::default(),
            range_crosshair: CrosshairConfig::default(),
            domain_gridlines_visible: true,
            range_gridlines_visible: true,
            domain_grid_bands_visible: false,
            fixed_domain_axis_space: None,
            fixed_range_axis_space: None,
        }
    }
}

impl PlotConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
