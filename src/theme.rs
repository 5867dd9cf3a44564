use crate::canvas::{Color, Stroke, TextStyle};
use palette::Srgba;
use serde::{Deserialize, Serialize};

const fn white(alpha: f32) -> Color {
    Srgba::new(1.0, 1.0, 1.0, alpha)
}

const fn black(alpha: f32) -> Color {
    Srgba::new(0.0, 0.0, 0.0, alpha)
}

/// Paints used for everything the plot draws itself (the renderers pick
/// their own series colors).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartTheme {
    pub background: Color,
    pub outline: Color,
    pub grid_line: Color,
    pub grid_band: Color,
    pub axis_line: Color,
    pub axis_label: Color,
    pub tick_label: Color,
    pub crosshair_line: Color,
    pub marker: Color,
    pub marker_label: Color,
    pub no_data_text: Color,
    pub grid_line_width: f64,
    pub crosshair_line_width: f64,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: black(1.0),
            outline: white(0.2),
            grid_line: white(0.1),
            grid_band: white(0.03),
            axis_line: white(0.2),
            axis_label: white(0.8),
            tick_label: white(0.8),
            crosshair_line: white(0.3),
            marker: Srgba::new(0.9, 0.3, 0.3, 0.8),
            marker_label: white(0.8),
            no_data_text: white(0.6),
            grid_line_width: 1.0,
            crosshair_line_width: 1.0,
        }
    }
}

impl ChartTheme {
    pub fn grid_stroke(&self) -> Stroke {
        Stroke::new(self.grid_line, self.grid_line_width)
    }

    pub fn axis_stroke(&self) -> Stroke {
        Stroke::new(self.axis_line, 1.0)
    }

    /// Border drawn around the data area.
    pub fn outline_stroke(&self) -> Stroke {
        Stroke::new(self.outline, 1.0)
    }

    pub fn crosshair_stroke(&self) -> Stroke {
        Stroke::new(self.crosshair_line, self.crosshair_line_width)
    }

    pub fn tick_label_style(&self, font_size: f64) -> TextStyle {
        TextStyle::new(self.tick_label, font_size)
    }
}
