// Rendering helpers shared by the plot and the renderers
use crate::canvas::{Canvas, Color, Stroke};
use crate::data_types::{PlotOrientation, Rect};
use glam::DVec2;

/// Hit-test record for one drawn item.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemEntity {
    pub area: Rect,
    pub dataset: usize,
    pub series: usize,
    pub item: usize,
}

/// Geometry produced by a draw pass, for interaction code.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderingInfo {
    pub plot_area: Rect,
    pub data_area: Rect,
    pub entities: Vec<ItemEntity>,
    pub subplot_info: Vec<RenderingInfo>,
}

impl RenderingInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Topmost entity under `point`; items drawn later sit on top.
    pub fn entity_at(&self, point: DVec2) -> Option<&ItemEntity> {
        self.entities.iter().rev().find(|e| e.area.contains(point))
    }

    /// Index of the sub-plot whose data area contains `point`.
    pub fn subplot_index_at(&self, point: DVec2) -> Option<usize> {
        self.subplot_info
            .iter()
            .position(|info| info.data_area.contains(point))
    }
}

/// Line across the data area at a domain coordinate. Vertical in `Normal`
/// orientation, horizontal in `Transposed`.
pub fn draw_domain_line(
    canvas: &mut dyn Canvas,
    data_area: Rect,
    coordinate: f64,
    orientation: PlotOrientation,
    stroke: &Stroke,
) {
    match orientation {
        PlotOrientation::Normal => {
            if coordinate < data_area.min_x() || coordinate > data_area.max_x() {
                return;
            }
            canvas.draw_line(
                DVec2::new(coordinate, data_area.min_y()),
                DVec2::new(coordinate, data_area.max_y()),
                stroke,
            );
        }
        PlotOrientation::Transposed => {
            if coordinate < data_area.min_y() || coordinate > data_area.max_y() {
                return;
            }
            canvas.draw_line(
                DVec2::new(data_area.min_x(), coordinate),
                DVec2::new(data_area.max_x(), coordinate),
                stroke,
            );
        }
    }
}

/// Line across the data area at a range coordinate.
pub fn draw_range_line(
    canvas: &mut dyn Canvas,
    data_area: Rect,
    coordinate: f64,
    orientation: PlotOrientation,
    stroke: &Stroke,
) {
    let flipped = match orientation {
        PlotOrientation::Normal => PlotOrientation::Transposed,
        PlotOrientation::Transposed => PlotOrientation::Normal,
    };
    draw_domain_line(canvas, data_area, coordinate, flipped, stroke);
}

/// Fills the band between two domain coordinates, clipped to the data area.
pub fn fill_domain_band(
    canvas: &mut dyn Canvas,
    data_area: Rect,
    start: f64,
    end: f64,
    orientation: PlotOrientation,
    color: Color,
) {
    let (lo, hi) = (start.min(end), start.max(end));
    let band = match orientation {
        PlotOrientation::Normal => Rect::from_corners(
            DVec2::new(lo.max(data_area.min_x()), data_area.min_y()),
            DVec2::new(hi.min(data_area.max_x()), data_area.max_y()),
        ),
        PlotOrientation::Transposed => Rect::from_corners(
            DVec2::new(data_area.min_x(), lo.max(data_area.min_y())),
            DVec2::new(data_area.max_x(), hi.min(data_area.max_y())),
        ),
    };
    if !band.is_empty() {
        canvas.fill_rect(band, color);
    }
}

/// Same as [`fill_domain_band`] for range coordinates.
pub fn fill_range_band(
    canvas: &mut dyn Canvas,
    data_area: Rect,
    start: f64,
    end: f64,
    orientation: PlotOrientation,
    color: Color,
) {
    let flipped = match orientation {
        PlotOrientation::Normal => PlotOrientation::Transposed,
        PlotOrientation::Transposed => PlotOrientation::Normal,
    };
    fill_domain_band(canvas, data_area, start, end, flipped, color);
}
