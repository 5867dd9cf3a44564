//! chart_engine: layout, coordinate mapping and draw orchestration for
//! multi-axis, multi-dataset charts

pub mod axis;
pub mod axis_renderer;
pub mod axis_space;
pub mod canvas;
pub mod data_types;
pub mod error;
pub mod layout;
pub mod notify;
pub mod plot;
pub mod plot_types;
pub mod registry;
pub mod render_order;
pub mod rendering;
pub mod scales;
pub mod theme;
pub mod transform;
pub mod utils;
pub mod view_controller;

pub use axis::{Axis, AxisData, AxisHandle, Tick};
pub use axis_space::AxisSpace;
pub use canvas::{Canvas, Color, RecordingCanvas, Stroke, TextStyle};
pub use data_types::{
    Annotation, AxisKind, AxisLocation, CategoryTable, Dataset, DatasetHandle, Insets, Layer, Marker,
    PlotConfig, PlotOrientation, Range, Rect, RectangleEdge, VecDataset,
};
pub use error::{PlotError, Result};
pub use notify::{ChangeEvent, ChangeSource, Observable};
pub use plot::{DrawOutcome, Plot};
pub use plot_types::{shared_renderer, BarRenderer, ItemRenderer, LineRenderer, RendererHandle};
pub use render_order::{RenderOrderPolicy, RenderingOrder, SortOrder};
pub use rendering::RenderingInfo;
