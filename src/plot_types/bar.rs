use super::{ItemRenderContext, ItemRenderer, RendererState};
use crate::canvas::{Canvas, Color};
use crate::data_types::{BarPlotConfig, CrosshairState, Dataset, Range};
use crate::error::{PlotError, Result};

/// Bar renderer for category and continuous domain axes.
///
/// On a category axis the series of a category share its slot side by side.
/// On a continuous axis a bar is centered on its x value and is as wide as
/// `bar_width_pct` of the distance to its neighbour.
#[derive(Clone, Debug, Default)]
pub struct BarRenderer {
    pub config: BarPlotConfig,
    pub series_colors: Vec<Color>,
}

impl BarRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BarPlotConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn series_color(&self, series: usize) -> Color {
        self.series_colors.get(series).copied().unwrap_or(self.config.color)
    }

    /// Distance to the nearest neighbour of an item, in data units.
    fn spacing(dataset: &dyn Dataset, series: usize, item: usize) -> Option<f64> {
        let x = dataset.x_value_at(series, item)?;
        let next = (item + 1 < dataset.item_count(series))
            .then(|| dataset.x_value_at(series, item + 1))
            .flatten()
            .map(|n| (n - x).abs());
        let prev = item
            .checked_sub(1)
            .and_then(|p| dataset.x_value_at(series, p))
            .map(|p| (x - p).abs());
        match (prev, next) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn domain_span(&self, ctx: &ItemRenderContext<'_>, row: usize, column: usize) -> Result<Option<(f64, f64)>> {
        let transform = &ctx.transform;
        let axis = transform.domain_axis;
        if axis.is_discrete() {
            let index = match ctx.dataset.item_key(column) {
                Some(key) => axis
                    .categories()
                    .iter()
                    .position(|c| *c == key)
                    .ok_or_else(|| PlotError::InvalidCategory(key.clone()))?,
                None => column,
            };
            let (start, end) = axis
                .category_span(index, transform.data_area, transform.domain_edge)
                .ok_or_else(|| PlotError::InvalidCategory(index.to_string()))?;
            let series_count = ctx.dataset.series_count().max(1) as f64;
            let width = (end - start) * self.config.bar_width_pct / series_count;
            let used = width * series_count;
            let first = start + ((end - start) - used) / 2.0;
            let bar_start = first + width * row as f64;
            return Ok(Some((bar_start, bar_start + width)));
        }

        let Some(x) = ctx.dataset.x_value_at(row, column) else {
            return Ok(None);
        };
        let center = transform.domain_to_coordinate(x)?;
        let width = match Self::spacing(ctx.dataset, row, column) {
            Some(spacing) => {
                let neighbour = transform.domain_to_coordinate(x + spacing)?;
                (neighbour - center).abs() * self.config.bar_width_pct
            }
            None => transform.domain_length() * 0.05,
        };
        let width = width.max(1.0);
        Ok(Some((center - width / 2.0, center + width / 2.0)))
    }
}

impl ItemRenderer for BarRenderer {
    fn find_range_bounds(&self, dataset: &dyn Dataset) -> Option<Range> {
        dataset
            .value_range()
            .and_then(|r| Range::expand_to_include(Some(r), self.config.base))
    }

    fn draw_item(
        &self,
        canvas: &mut dyn Canvas,
        state: &mut RendererState,
        ctx: &ItemRenderContext<'_>,
        crosshair: &mut CrosshairState,
        row: usize,
        column: usize,
        _pass: usize,
    ) -> Result<()> {
        let Some(value) = ctx.dataset.value_at(row, column) else {
            return Ok(());
        };
        let Some((start, end)) = self.domain_span(ctx, row, column)? else {
            return Ok(());
        };
        let transform = &ctx.transform;
        let base = transform.range_to_coordinate(self.config.base)?;
        let top = transform.range_to_coordinate(value)?;
        let bar = transform.rect((start, end), (base, top));
        if bar.is_empty() {
            return Ok(());
        }
        canvas.fill_rect(bar, self.series_color(row));
        state.add_entity(bar, row, column);

        let point = transform.point((start + end) / 2.0, top);
        if let Some(x) = transform.item_domain_value(ctx.dataset, row, column) {
            crosshair.update_crosshair(x, value, point, ctx.identity(row, column));
        }
        Ok(())
    }
}
