use chart_engine::data_types::{AxisFormat, CrosshairConfig, Layer, Marker, TimeUnit};
use chart_engine::plot_types::{BarRenderer, LineRenderer};
use chart_engine::{
    shared_renderer, Axis, Color, DrawOutcome, Insets, Plot, PlotConfig, RecordingCanvas, Rect, RenderingInfo,
    Stroke, VecDataset,
};
use eyre::{eyre, Result};
use glam::DVec2;
use rand::Rng;
use tracing::info;

// A price pane and a volume pane sharing one time axis.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info,chart_engine=debug")
        .init();

    let now = chrono::Utc::now().timestamp_millis() as f64;
    let hour_ms = 3_600_000.0;
    let mut rng = rand::rng();

    let mut prices = VecDataset::new();
    let mut volumes = VecDataset::new();
    let mut price_points = Vec::new();
    let mut volume_points = Vec::new();
    let mut price: f64 = 100.0;
    for i in 0..48 {
        let t = now - (48 - i) as f64 * hour_ms;
        price += rng.random_range(-2.0..2.0);
        price_points.push((t, price));
        volume_points.push((t, rng.random_range(500.0..1500.0)));
    }
    prices.add_series("close", price_points);
    volumes.add_series("volume", volume_points);
    let (prices, volumes) = (prices.shared(), volumes.shared());

    let locked = CrosshairConfig {
        visible: true,
        locked_on_data: true,
    };
    let mut root = Plot::with_config(PlotConfig {
        insets: Insets::uniform(8.0),
        domain_crosshair: locked,
        ..PlotConfig::default()
    });
    let mut time = Axis::new("time");
    time.set_format(AxisFormat::Time(TimeUnit::Milliseconds));
    root.set_domain_axis(0, time.shared());
    root.set_gap(8.0);

    let mut price_pane = Plot::with_config(PlotConfig {
        domain_crosshair: locked,
        range_crosshair: locked,
        ..PlotConfig::default()
    });
    price_pane.set_range_axis(0, Axis::new("price").shared());
    price_pane.set_dataset(0, prices.clone());
    price_pane.set_renderer(0, shared_renderer(LineRenderer::new()));
    let target = Stroke::new(Color::new(0.9, 0.3, 0.3, 0.8), 1.0);
    price_pane.add_range_marker(0, Marker::value(100.0, target).with_label("open").shared(), Layer::Foreground);

    let mut volume_pane = Plot::new();
    let mut volume_axis = Axis::new("volume");
    volume_axis.set_auto_range_includes_zero(true);
    volume_pane.set_range_axis(0, volume_axis.shared());
    volume_pane.set_dataset(0, volumes.clone());
    volume_pane.set_renderer(0, shared_renderer(BarRenderer::new()));

    root.add_subplot(price_pane, 3.0)?;
    root.add_subplot(volume_pane, 1.0)?;
    root.add_change_listener(|event| info!(source = ?event.source, "chart changed"));

    let area = Rect::new(0.0, 0.0, 1024.0, 640.0);
    let mut canvas = RecordingCanvas::new();
    let mut rendering = RenderingInfo::new();
    let pointer = DVec2::new(600.0, 200.0);
    let DrawOutcome::Drawn { data_area } = root.draw(&mut canvas, area, Some(pointer), Some(&mut rendering)) else {
        return Err(eyre!("canvas too small for the chart"));
    };
    info!(?data_area, commands = canvas.commands.len(), "first frame");

    let pane = rendering
        .subplot_index_at(pointer)
        .ok_or_else(|| eyre!("pointer outside every pane"))?;
    let hovered = root
        .subplot(pane)
        .and_then(|p| p.crosshair_item())
        .map(|item| format!("dataset {} item {}", item.dataset, item.column));
    info!(pane, ?hovered, "crosshair");

    // Zoom into the last quarter of the time axis and redraw
    root.zoom_domain_axes(0.25, Some(DVec2::new(data_area.max_x(), data_area.center().y)), data_area);
    canvas.clear();
    root.draw(&mut canvas, area, None, None);
    let range = root
        .domain_axis(0)
        .map(|axis| axis.borrow().range())
        .ok_or_else(|| eyre!("missing time axis"))?;
    info!(%range, commands = canvas.commands.len(), "zoomed frame");
    Ok(())
}
