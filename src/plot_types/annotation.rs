use crate::canvas::{Canvas, Stroke, TextStyle};
use crate::data_types::{Annotation, AxisKind, Marker, PlotOrientation, Rect};
use crate::error::Result;
use crate::rendering;
use crate::theme::ChartTheme;
use crate::transform::PlotTransform;
use glam::DVec2;

const MARKER_LABEL_SIZE: f64 = 10.0;

fn coordinate(transform: &PlotTransform<'_>, kind: AxisKind, value: f64) -> Result<f64> {
    match kind {
        AxisKind::Domain => transform.domain_to_coordinate(value),
        AxisKind::Range => transform.range_to_coordinate(value),
    }
}

/// Draws a domain or range marker across the data area.
pub fn draw_marker(
    canvas: &mut dyn Canvas,
    marker: &Marker,
    kind: AxisKind,
    transform: &PlotTransform<'_>,
    theme: &ChartTheme,
) -> Result<()> {
    let area = transform.data_area;
    let orientation = transform.orientation;
    let label_origin = match marker {
        Marker::Value { value, stroke, .. } => {
            let c = coordinate(transform, kind, *value)?;
            match kind {
                AxisKind::Domain => rendering::draw_domain_line(canvas, area, c, orientation, stroke),
                AxisKind::Range => rendering::draw_range_line(canvas, area, c, orientation, stroke),
            }
            c
        }
        Marker::Interval {
            start,
            end,
            fill,
            outline,
            ..
        } => {
            let c0 = coordinate(transform, kind, *start)?;
            let c1 = coordinate(transform, kind, *end)?;
            match kind {
                AxisKind::Domain => rendering::fill_domain_band(canvas, area, c0, c1, orientation, *fill),
                AxisKind::Range => rendering::fill_range_band(canvas, area, c0, c1, orientation, *fill),
            }
            if let Some(stroke) = outline {
                for c in [c0, c1] {
                    match kind {
                        AxisKind::Domain => rendering::draw_domain_line(canvas, area, c, orientation, stroke),
                        AxisKind::Range => rendering::draw_range_line(canvas, area, c, orientation, stroke),
                    }
                }
            }
            c0.min(c1)
        }
    };

    if let Some(text) = marker.label() {
        // Label near the top-left of the line or band
        let horizontal_line = matches!(
            (kind, orientation),
            (AxisKind::Range, PlotOrientation::Normal)
                | (AxisKind::Domain, PlotOrientation::Transposed)
        );
        let origin = if horizontal_line {
            DVec2::new(area.min_x() + 2.0, label_origin - MARKER_LABEL_SIZE - 2.0)
        } else {
            DVec2::new(label_origin + 2.0, area.min_y() + 2.0)
        };
        canvas.draw_text(text, origin, &TextStyle::new(theme.marker_label, MARKER_LABEL_SIZE));
    }
    Ok(())
}

pub fn draw_annotation(canvas: &mut dyn Canvas, annotation: &Annotation, transform: &PlotTransform<'_>) -> Result<()> {
    match annotation {
        Annotation::Text {
            x,
            y,
            text,
            color,
            font_size,
        } => {
            let p = transform.data_to_screen(*x, *y)?;
            canvas.draw_text(text, p, &TextStyle::new(*color, *font_size));
        }
        Annotation::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
        } => {
            let p1 = transform.data_to_screen(*x1, *y1)?;
            let p2 = transform.data_to_screen(*x2, *y2)?;
            canvas.draw_line(p1, p2, stroke);
        }
        Annotation::Box {
            x_min,
            y_min,
            x_max,
            y_max,
            fill,
            outline,
        } => {
            let a = transform.data_to_screen(*x_min, *y_min)?;
            let b = transform.data_to_screen(*x_max, *y_max)?;
            let rect = Rect::from_corners(a.min(b), a.max(b));
            if let Some(color) = fill {
                canvas.fill_rect(rect, *color);
            }
            if let Some(stroke) = outline {
                draw_outline(canvas, rect, stroke);
            }
        }
    }
    Ok(())
}

fn draw_outline(canvas: &mut dyn Canvas, rect: Rect, stroke: &Stroke) {
    let corners = [
        DVec2::new(rect.min_x(), rect.min_y()),
        DVec2::new(rect.max_x(), rect.min_y()),
        DVec2::new(rect.max_x(), rect.max_y()),
        DVec2::new(rect.min_x(), rect.max_y()),
    ];
    canvas.draw_polygon(&corners, None, Some(stroke));
}
