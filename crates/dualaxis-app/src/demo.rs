//! Sample data: a quarter of daily revenue (primary) against margin and
//! conversion rate (secondary)

use chrono::{Duration, TimeZone, Utc};
use dualaxis_core::{
    AxisRole, CategoryColumn, DataView, DataViewObjects, LegendPosition, ValueColumn, Viewport,
    VisualUpdateOptions,
};
use serde_json::json;

pub const DAYS: usize = 90;

fn wave(day: usize, period: f64, amplitude: f64) -> f64 {
    (day as f64 / period * std::f64::consts::TAU).sin() * amplitude
}

pub fn formatting(legend: LegendPosition, palette: usize) -> DataViewObjects {
    DataViewObjects::new()
        .with("chart", "legendPosition", legend.as_str())
        .with("chart", "markerSize", 2)
        .with("chart", "backgroundColor", json!({ "solid": { "color": "#FAFAFA" } }))
        .with("xAxis", "xAxisTitle", "Day")
        .with("xAxis", "xAxisDateFormat", "%d %b")
        .with("xAxis", "xAxisLabelRotation", 45)
        .with("yAxis", "yAxisTitle", "Revenue")
        .with("yAxis", "yAxisLabelFormat", ",.0f")
        .with("y2Axis", "y2AxisTitle", "Rate")
        .with("y2Axis", "y2AxisLabelFormat", ".0%")
        .with("yColorSelector", "lineColor", palette)
}

pub fn data_view(legend: LegendPosition, palette: usize) -> DataView {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default();
    let dates = (0..DAYS).map(|d| start + Duration::days(d as i64)).collect();

    let revenue = (0..DAYS).map(|d| 12_000.0 + d as f64 * 40.0 + wave(d, 7.0, 1_500.0)).collect();
    let costs = (0..DAYS).map(|d| 8_000.0 + d as f64 * 25.0 + wave(d + 2, 7.0, 900.0)).collect();
    let margin = (0..DAYS).map(|d| 0.32 + wave(d, 30.0, 0.06)).collect();
    let conversion = (0..DAYS).map(|d| 0.045 + wave(d + 5, 14.0, 0.01)).collect();

    DataView::new(
        CategoryColumn::dates("Day", dates),
        vec![
            ValueColumn::new("Revenue", AxisRole::Primary, revenue),
            ValueColumn::new("Costs", AxisRole::Primary, costs),
            ValueColumn::new("Margin", AxisRole::Secondary, margin),
            ValueColumn::new("Conversion", AxisRole::Secondary, conversion),
        ],
    )
    .with_objects(formatting(legend, palette))
}

pub fn options(viewport: Viewport, legend: LegendPosition, palette: usize) -> VisualUpdateOptions {
    VisualUpdateOptions::new(viewport, data_view(legend, palette))
}
