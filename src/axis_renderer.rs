use crate::axis::{Axis, Tick};
use crate::canvas::{Canvas, TextExtent, TextStyle};
use crate::data_types::{Rect, RectangleEdge};
use crate::theme::ChartTheme;
use glam::DVec2;

/// Result of drawing one axis: where the next axis on the same edge starts,
/// and the ticks that were drawn.
#[derive(Clone, Debug, Default)]
pub struct AxisDrawState {
    pub cursor: f64,
    pub ticks: Vec<Tick>,
}

pub struct AxisRenderer;

impl AxisRenderer {
    fn length_along(area: Rect, edge: RectangleEdge) -> f64 {
        if edge.is_top_or_bottom() {
            area.width
        } else {
            area.height
        }
    }

    fn largest_label(canvas: &dyn Canvas, axis: &Axis, ticks: &[Tick]) -> TextExtent {
        ticks
            .iter()
            .map(|t| canvas.measure_text(&t.label, axis.tick_label_font_size))
            .fold(TextExtent::default(), |acc, e| TextExtent {
                width: acc.width.max(e.width),
                height: acc.height.max(e.height),
            })
    }

    /// Category labels on a horizontal axis turn vertical once the widest
    /// one no longer fits its slot.
    fn rotates_labels(axis: &Axis, largest: TextExtent, area: Rect, edge: RectangleEdge) -> bool {
        edge.is_top_or_bottom()
            && axis
                .category_size(area, edge)
                .is_some_and(|slot| largest.width > slot)
    }

    fn label_depth(axis: &Axis, largest: TextExtent, area: Rect, edge: RectangleEdge) -> f64 {
        if edge.is_left_or_right() || Self::rotates_labels(axis, largest, area, edge) {
            largest.width
        } else {
            largest.height
        }
    }

    /// Thickness the axis needs next to `area`: tick marks, tick labels and
    /// the axis title.
    pub fn required_thickness(canvas: &dyn Canvas, axis: &Axis, area: Rect, edge: RectangleEdge) -> f64 {
        let ticks = axis.refresh_ticks(Self::length_along(area, edge), edge);
        let largest = Self::largest_label(canvas, axis, &ticks);
        let mut thickness = axis.tick_mark_outside_length;
        if !ticks.is_empty() {
            thickness += axis.tick_label_gap + Self::label_depth(axis, largest, area, edge);
        }
        if !axis.label().is_empty() {
            thickness += axis.label_gap + canvas.measure_text(axis.label(), axis.label_font_size).height;
        }
        thickness
    }

    /// Draws `axis` along `edge` of `data_area`, starting at `cursor` (the
    /// canvas coordinate of the axis line) and moving away from the data area.
    pub fn draw(
        canvas: &mut dyn Canvas,
        axis: &Axis,
        cursor: f64,
        data_area: Rect,
        edge: RectangleEdge,
        theme: &ChartTheme,
    ) -> AxisDrawState {
        let ticks = axis.refresh_ticks(Self::length_along(data_area, edge), edge);
        if !axis.is_visible() {
            return AxisDrawState { cursor, ticks };
        }
        let outward = match edge {
            RectangleEdge::Top | RectangleEdge::Left => -1.0,
            RectangleEdge::Bottom | RectangleEdge::Right => 1.0,
        };
        let along = |coordinate: f64, depth: f64| -> DVec2 {
            if edge.is_top_or_bottom() {
                DVec2::new(coordinate, cursor + outward * depth)
            } else {
                DVec2::new(cursor + outward * depth, coordinate)
            }
        };

        // 1. Axis line
        let stroke = theme.axis_stroke();
        if edge.is_top_or_bottom() {
            canvas.draw_line(
                DVec2::new(data_area.min_x(), cursor),
                DVec2::new(data_area.max_x(), cursor),
                &stroke,
            );
        } else {
            canvas.draw_line(
                DVec2::new(cursor, data_area.min_y()),
                DVec2::new(cursor, data_area.max_y()),
                &stroke,
            );
        }

        // 2. Tick marks and labels
        let largest = Self::largest_label(canvas, axis, &ticks);
        let rotate = Self::rotates_labels(axis, largest, data_area, edge);
        let label_offset = axis.tick_mark_outside_length + axis.tick_label_gap;
        let style = theme.tick_label_style(axis.tick_label_font_size);
        for tick in &ticks {
            let Ok(coordinate) = axis.value_to_coordinate(tick.value, data_area, edge) else {
                continue;
            };
            canvas.draw_line(
                along(coordinate, 0.0),
                along(coordinate, axis.tick_mark_outside_length),
                &stroke,
            );
            let extent = canvas.measure_text(&tick.label, axis.tick_label_font_size);
            let origin = match (edge, rotate) {
                (RectangleEdge::Bottom, false) => {
                    DVec2::new(coordinate - extent.width / 2.0, cursor + label_offset)
                }
                (RectangleEdge::Top, false) => DVec2::new(
                    coordinate - extent.width / 2.0,
                    cursor - label_offset - extent.height,
                ),
                (RectangleEdge::Bottom, true) => {
                    DVec2::new(coordinate + extent.height / 2.0, cursor + label_offset)
                }
                (RectangleEdge::Top, true) => DVec2::new(
                    coordinate + extent.height / 2.0,
                    cursor - label_offset - extent.width,
                ),
                (RectangleEdge::Left, _) => DVec2::new(
                    cursor - label_offset - extent.width,
                    coordinate - extent.height / 2.0,
                ),
                (RectangleEdge::Right, _) => {
                    DVec2::new(cursor + label_offset, coordinate - extent.height / 2.0)
                }
            };
            let style = if rotate { style.rotated(90.0) } else { style };
            canvas.draw_text(&tick.label, origin, &style);
        }

        // 3. Axis title
        let mut depth = axis.tick_mark_outside_length;
        if !ticks.is_empty() {
            depth = label_offset + Self::label_depth(axis, largest, data_area, edge);
        }
        if !axis.label().is_empty() {
            depth += axis.label_gap;
            let extent = canvas.measure_text(axis.label(), axis.label_font_size);
            let title_style = TextStyle::new(theme.axis_label, axis.label_font_size);
            let center = data_area.center();
            match edge {
                RectangleEdge::Bottom => canvas.draw_text(
                    axis.label(),
                    DVec2::new(center.x - extent.width / 2.0, cursor + depth),
                    &title_style,
                ),
                RectangleEdge::Top => canvas.draw_text(
                    axis.label(),
                    DVec2::new(center.x - extent.width / 2.0, cursor - depth - extent.height),
                    &title_style,
                ),
                RectangleEdge::Left => canvas.draw_text(
                    axis.label(),
                    DVec2::new(cursor - depth - extent.height, center.y + extent.width / 2.0),
                    &title_style.rotated(-90.0),
                ),
                RectangleEdge::Right => canvas.draw_text(
                    axis.label(),
                    DVec2::new(cursor + depth + extent.height, center.y - extent.width / 2.0),
                    &title_style.rotated(90.0),
                ),
            }
            depth += extent.height;
        }

        let thickness = axis.fixed_dimension().unwrap_or(depth);
        AxisDrawState {
            cursor: cursor + outward * thickness,
            ticks,
        }
    }
}
