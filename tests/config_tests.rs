use chart_engine::axis::Axis;
use chart_engine::data_types::{AxisConfig, CrosshairConfig, Insets, PlotConfig, PlotOrientation, Range};
use chart_engine::render_order::RenderingOrder;
use chart_engine::scales::ScaleKind;
use chart_engine::theme::ChartTheme;
use chart_engine::{Plot, PlotError};

#[test]
fn test_plot_config_json_round_trip() {
    let config = PlotConfig {
        orientation: PlotOrientation::Transposed,
        insets: Insets::new(1.0, 2.0, 3.0, 4.0),
        dataset_rendering_order: RenderingOrder::Forward,
        domain_crosshair: CrosshairConfig {
            visible: true,
            locked_on_data: false,
        },
        ..PlotConfig::default()
    };
    let json = config.to_json().unwrap();
    assert_eq!(PlotConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_partial_json_uses_defaults() {
    let config = PlotConfig::from_json(r#"{ "orientation": "Transposed" }"#).unwrap();
    assert_eq!(config.orientation, PlotOrientation::Transposed);
    assert_eq!(config.insets, PlotConfig::default().insets);
    assert_eq!(config.dataset_rendering_order, RenderingOrder::Reverse);
}

#[test]
fn test_bad_json_is_a_config_error() {
    let err = PlotConfig::from_json("{ orientation: ").unwrap_err();
    assert!(matches!(err, PlotError::Config(_)));
    let err = PlotConfig::from_json(r#"{ "orientation": "Sideways" }"#).unwrap_err();
    assert!(matches!(err, PlotError::Config(_)));
}

#[test]
fn test_plot_reports_applied_config() {
    let config = PlotConfig {
        orientation: PlotOrientation::Transposed,
        insets: Insets::ZERO,
        range_gridlines_visible: false,
        ..PlotConfig::default()
    };
    let plot = Plot::with_config(config.clone());
    assert_eq!(plot.config(), config);
    assert_eq!(plot.orientation(), PlotOrientation::Transposed);
}

#[test]
fn test_axis_config_from_json() {
    let config: AxisConfig =
        serde_json::from_str(r#"{ "label": "price", "scale": "Log", "range": [1.0, 1000.0] }"#).unwrap();
    let axis = Axis::from_config(&config).unwrap();
    assert_eq!(axis.label(), "price");
    assert!(!axis.is_auto_range());
    assert_eq!(axis.range(), Range::new(1.0, 1000.0).unwrap());

    let bad = AxisConfig {
        scale: ScaleKind::Log,
        range: Some(Range::new(-1.0, 10.0).unwrap()),
        ..AxisConfig::default()
    };
    assert!(matches!(Axis::from_config(&bad), Err(PlotError::InvalidArgument(_))));
}

#[test]
fn test_theme_json_round_trip() {
    let theme = ChartTheme::default();
    let json = serde_json::to_string(&theme).unwrap();
    let back: ChartTheme = serde_json::from_str(&json).unwrap();
    assert_eq!(back, theme);
}
