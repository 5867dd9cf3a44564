use super::{ItemRenderContext, ItemRenderer, RendererState};
use crate::canvas::{Canvas, Color, Stroke};
use crate::data_types::{CrosshairState, LinePlotConfig, Rect};
use crate::error::Result;
use glam::DVec2;

/// Line renderer: connecting segments in pass 0, item shapes in pass 1.
///
/// Crosshair candidates and entities are reported in the shape pass so that
/// each item is offered exactly once.
#[derive(Clone, Debug, Default)]
pub struct LineRenderer {
    pub config: LinePlotConfig,
    /// Per-series colors; series without an entry use `config.color`.
    pub series_colors: Vec<Color>,
    pub hidden_series: Vec<usize>,
}

impl LineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LinePlotConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn series_color(&self, series: usize) -> Color {
        self.series_colors.get(series).copied().unwrap_or(self.config.color)
    }
}

impl ItemRenderer for LineRenderer {
    fn pass_count(&self) -> usize {
        2
    }

    fn series_visible(&self, series: usize) -> bool {
        !self.hidden_series.contains(&series)
    }

    fn draw_item(
        &self,
        canvas: &mut dyn Canvas,
        state: &mut RendererState,
        ctx: &ItemRenderContext<'_>,
        crosshair: &mut CrosshairState,
        row: usize,
        column: usize,
        pass: usize,
    ) -> Result<()> {
        let transform = &ctx.transform;
        let Some(y) = ctx.dataset.value_at(row, column) else {
            // Gap: the next point starts a new segment
            if pass == 0 {
                state.set_previous_point(row, None);
            }
            return Ok(());
        };
        let point = match transform.item_domain_coordinate(ctx.dataset, row, column) {
            Ok(None) => return Ok(()),
            Ok(Some(domain)) => transform
                .range_to_coordinate(y)
                .map(|range| transform.point(domain, range)),
            Err(err) => Err(err),
        };
        let point = match point {
            Ok(point) => point,
            Err(err) => {
                // An unplaceable item breaks the line like a gap
                if pass == 0 {
                    state.set_previous_point(row, None);
                }
                return Err(err);
            }
        };

        if pass == 0 {
            if let Some(previous) = state.previous_point(row) {
                let stroke = Stroke::new(self.series_color(row), self.config.line_width);
                canvas.draw_line(previous, point, &stroke);
            }
            state.set_previous_point(row, Some(point));
            return Ok(());
        }

        let half = self.config.shape_size / 2.0;
        let shape = Rect::from_corners(point - DVec2::splat(half), point + DVec2::splat(half));
        if self.config.shapes_visible {
            let corners = [
                DVec2::new(shape.min_x(), shape.min_y()),
                DVec2::new(shape.max_x(), shape.min_y()),
                DVec2::new(shape.max_x(), shape.max_y()),
                DVec2::new(shape.min_x(), shape.max_y()),
            ];
            canvas.draw_polygon(&corners, Some(self.series_color(row)), None);
        }
        state.add_entity(shape, row, column);
        if let Some(x) = transform.item_domain_value(ctx.dataset, row, column) {
            crosshair.update_crosshair(x, y, point, ctx.identity(row, column));
        }
        Ok(())
    }
}
