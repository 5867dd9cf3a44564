// Plot types module

pub mod annotation;
pub mod bar;
pub mod line;

pub use bar::BarRenderer;
pub use line::LineRenderer;

use crate::canvas::{Canvas, Color, Stroke};
use crate::data_types::{
    Annotation, AxisKind, CrosshairState, Dataset, ItemIdentity, Marker, PlotOrientation, Range, Rect,
};
use crate::error::Result;
use crate::notify::{ChangeSource, Observable};
use crate::plot::Plot;
use crate::rendering::{self, ItemEntity, RenderingInfo};
use crate::theme::ChartTheme;
use crate::transform::PlotTransform;
use glam::DVec2;
use std::collections::HashMap;
use std::rc::Rc;

pub type RendererHandle = Rc<Observable<dyn ItemRenderer>>;

/// Wraps a renderer into a shareable, observable handle.
pub fn shared_renderer<R: ItemRenderer + 'static>(renderer: R) -> Rc<Observable<R>> {
    Observable::new(ChangeSource::Renderer, renderer)
}

/// Per-dataset scratch state of a renderer during one draw pass.
#[derive(Debug)]
pub struct RendererState {
    pub data_area: Rect,
    pub dataset_index: usize,
    pub collect_entities: bool,
    pub entities: Vec<ItemEntity>,
    previous: HashMap<usize, DVec2>,
}

impl RendererState {
    pub fn new(data_area: Rect, dataset_index: usize, collect_entities: bool) -> Self {
        Self {
            data_area,
            dataset_index,
            collect_entities,
            entities: Vec::new(),
            previous: HashMap::new(),
        }
    }

    /// Last point drawn for `series`, for renderers that connect items.
    pub fn previous_point(&self, series: usize) -> Option<DVec2> {
        self.previous.get(&series).copied()
    }

    pub fn set_previous_point(&mut self, series: usize, point: Option<DVec2>) {
        match point {
            Some(p) => self.previous.insert(series, p),
            None => self.previous.remove(&series),
        };
    }

    pub fn add_entity(&mut self, area: Rect, series: usize, item: usize) {
        if self.collect_entities {
            self.entities.push(ItemEntity {
                area,
                dataset: self.dataset_index,
                series,
                item,
            });
        }
    }
}

/// Everything a renderer needs to draw one item of one dataset.
pub struct ItemRenderContext<'a> {
    pub plot: &'a Plot,
    pub dataset: &'a dyn Dataset,
    pub dataset_index: usize,
    pub transform: PlotTransform<'a>,
}

impl ItemRenderContext<'_> {
    pub fn identity(&self, row: usize, column: usize) -> ItemIdentity {
        ItemIdentity {
            dataset: self.dataset_index,
            row,
            column,
        }
    }
}

/// Draws the items of a dataset once the plot has resolved its axes.
///
/// A plot calls `initialise` once per dataset, then `draw_item` for every
/// item, once per pass: the whole dataset is visited in pass 0 before pass 1
/// starts.
pub trait ItemRenderer {
    fn initialise(
        &self,
        _canvas: &mut dyn Canvas,
        data_area: Rect,
        _plot: &Plot,
        dataset_index: usize,
        info: Option<&RenderingInfo>,
    ) -> RendererState {
        RendererState::new(data_area, dataset_index, info.is_some())
    }

    fn pass_count(&self) -> usize {
        1
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_item(
        &self,
        canvas: &mut dyn Canvas,
        state: &mut RendererState,
        ctx: &ItemRenderContext<'_>,
        crosshair: &mut CrosshairState,
        row: usize,
        column: usize,
        pass: usize,
    ) -> Result<()>;

    fn series_visible(&self, _series: usize) -> bool {
        true
    }

    /// Domain extent of the dataset as drawn by this renderer.
    fn find_domain_bounds(&self, dataset: &dyn Dataset) -> Option<Range> {
        dataset.x_range()
    }

    fn find_range_bounds(&self, dataset: &dyn Dataset) -> Option<Range> {
        dataset.value_range()
    }

    fn draw_domain_gridline(
        &self,
        canvas: &mut dyn Canvas,
        data_area: Rect,
        coordinate: f64,
        orientation: PlotOrientation,
        stroke: &Stroke,
    ) {
        rendering::draw_domain_line(canvas, data_area, coordinate, orientation, stroke);
    }

    fn draw_range_gridline(
        &self,
        canvas: &mut dyn Canvas,
        data_area: Rect,
        coordinate: f64,
        orientation: PlotOrientation,
        stroke: &Stroke,
    ) {
        rendering::draw_range_line(canvas, data_area, coordinate, orientation, stroke);
    }

    fn fill_domain_grid_band(
        &self,
        canvas: &mut dyn Canvas,
        data_area: Rect,
        start: f64,
        end: f64,
        orientation: PlotOrientation,
        color: Color,
    ) {
        rendering::fill_domain_band(canvas, data_area, start, end, orientation, color);
    }

    fn draw_domain_marker(
        &self,
        canvas: &mut dyn Canvas,
        marker: &Marker,
        transform: &PlotTransform<'_>,
        theme: &ChartTheme,
    ) -> Result<()> {
        annotation::draw_marker(canvas, marker, AxisKind::Domain, transform, theme)
    }

    fn draw_range_marker(
        &self,
        canvas: &mut dyn Canvas,
        marker: &Marker,
        transform: &PlotTransform<'_>,
        theme: &ChartTheme,
    ) -> Result<()> {
        annotation::draw_marker(canvas, marker, AxisKind::Range, transform, theme)
    }

    fn draw_annotation(
        &self,
        canvas: &mut dyn Canvas,
        annotation: &Annotation,
        transform: &PlotTransform<'_>,
    ) -> Result<()> {
        annotation::draw_annotation(canvas, annotation, transform)
    }
}
