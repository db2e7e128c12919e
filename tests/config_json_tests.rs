use chart_geometry::ChartError;
use chart_geometry::charts::bar::BarChartConfig;
use chart_geometry::charts::candlestick::CandlestickChartConfig;
use chart_geometry::charts::combo::{ComboChartConfig, ComboScale};
use chart_geometry::charts::pie::PieChartConfig;
use chart_geometry::charts::reference_line::ReferenceLineConfig;
use chart_geometry::charts::scaffold::ChartScaffoldConfig;
use chart_geometry::core::{CornerRadius, NegativeValuesDrawMode};
use serde_json::Value;

#[test]
fn bar_config_round_trips_through_json() {
    let config = BarChartConfig::default()
        .with_bar_width_fraction(0.4)
        .expect("valid fraction")
        .with_negative_values_draw_mode(NegativeValuesDrawMode::FromMinValue);
    let json = config.to_json_pretty().expect("serialize");
    let restored = BarChartConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn nested_configs_round_trip() {
    let config = ComboChartConfig::default()
        .with_scale(ComboScale::Independent)
        .with_reference_line(
            ReferenceLineConfig::new(42.0)
                .expect("valid reference line")
                .with_label("goal"),
        )
        .expect("valid combo config");
    let json = config.to_json_pretty().expect("serialize");
    let restored = ComboChartConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);

    let candles = CandlestickChartConfig::default()
        .with_corner_radius(CornerRadius::Small)
        .expect("valid radius");
    let json = candles.to_json_pretty().expect("serialize");
    let restored = CandlestickChartConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, candles);

    let scaffold = ChartScaffoldConfig::default().with_show_grid(false);
    let json = scaffold.to_json_pretty().expect("serialize");
    let restored = ChartScaffoldConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, scaffold);
}

#[test]
fn malformed_json_is_a_config_error() {
    let error = BarChartConfig::from_json_str("{ not json").expect_err("must fail");
    match error {
        ChartError::InvalidConfig(message) => {
            assert!(message.starts_with("failed to parse bar chart config"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn parsed_configs_are_validated() {
    let json = BarChartConfig::default().to_json_pretty().expect("serialize");
    let mut value: Value = serde_json::from_str(&json).expect("json value");
    value["bar_width_fraction"] = Value::from(1.5);
    let result = BarChartConfig::from_json_str(&value.to_string());
    assert!(matches!(result, Err(ChartError::InvalidConfig(_))));

    let json = PieChartConfig::default().to_json_pretty().expect("serialize");
    let mut value: Value = serde_json::from_str(&json).expect("json value");
    value["animation"] = serde_json::json!({ "Enabled": { "duration_ms": 0 } });
    assert!(PieChartConfig::from_json_str(&value.to_string()).is_err());
}
