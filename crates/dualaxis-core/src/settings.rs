//! Property-pane schema: current values and valid ranges per formatting object

use crate::{ChartViewModel, PaletteTable, DEFAULT_DATE_FORMAT, DEFAULT_NUMBER_FORMAT};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Formatting object names the visual exposes
pub mod object_names {
    pub const CHART: &str = "chart";
    pub const X_AXIS: &str = "xAxis";
    pub const Y_AXIS: &str = "yAxis";
    pub const Y2_AXIS: &str = "y2Axis";
    pub const COLOR_SELECTOR: &str = "yColorSelector";
}

/// Inclusive numeric range for a property
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumberRange {
    pub min: f64,
    pub max: f64,
}

impl NumberRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Constraint attached to a single property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidValues {
    NumberRange(NumberRange),
    /// Enumerated choices as `(value, display name)` pairs
    Enumeration(Vec<(Value, String)>),
}

const MARKER_SIZE_RANGE: NumberRange = NumberRange::new(1.0, 20.0);
const FONT_SIZE_RANGE: NumberRange = NumberRange::new(4.0, 30.0);
const ROTATION_RANGE: NumberRange = NumberRange::new(0.0, 360.0);

/// One enumerated formatting object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualObjectInstance {
    pub object_name: String,
    pub properties: Map<String, Value>,
    pub valid_values: BTreeMap<String, ValidValues>,
}

impl VisualObjectInstance {
    fn new(object_name: &str) -> Self {
        Self {
            object_name: object_name.to_string(),
            properties: Map::new(),
            valid_values: BTreeMap::new(),
        }
    }

    fn property(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(name.to_string(), value.into());
        self
    }

    fn range(mut self, name: &str, range: NumberRange) -> Self {
        self.valid_values
            .insert(name.to_string(), ValidValues::NumberRange(range));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

/// Current values and constraints for `object_name`. Unknown names yield
/// no instances.
pub fn enumerate_object_instances(
    view_model: &ChartViewModel,
    palettes: &PaletteTable,
    object_name: &str,
) -> Vec<VisualObjectInstance> {
    let instance = match object_name {
        object_names::CHART => VisualObjectInstance::new(object_name)
            .property("backgroundColor", view_model.background_color.as_str())
            .property("markerSize", view_model.marker_size)
            .property("lineStyle", view_model.line_style.as_str())
            .property("legendPosition", view_model.legend_position.as_str())
            .property("showGridLines", view_model.show_gridlines)
            .range("markerSize", MARKER_SIZE_RANGE),
        object_names::X_AXIS => {
            let axis = &view_model.x_axis;
            let (date_format, number_format) = if view_model.is_date_range {
                (axis.label_format.as_str(), DEFAULT_NUMBER_FORMAT)
            } else {
                (DEFAULT_DATE_FORMAT, axis.label_format.as_str())
            };
            VisualObjectInstance::new(object_name)
                .property("xAxisTitle", axis.title.as_str())
                .property("xAxisTitleColor", axis.title_color.as_str())
                .property("xAxisTitleSize", axis.title_size)
                .property("xAxisTitlefontFamily", axis.title_font.as_str())
                .property("xAxisLabelColor", axis.label_color.as_str())
                .property("xAxisLabelSize", axis.label_size)
                .property("xAxisLabelfontFamily", axis.label_font.as_str())
                .property("xAxisLabelFormat", number_format)
                .property("xAxisDateFormat", date_format)
                .property("xAxisLabelRotation", axis.rotation_degrees())
                .range("xAxisTitleSize", FONT_SIZE_RANGE)
                .range("xAxisLabelSize", FONT_SIZE_RANGE)
                .range("xAxisLabelRotation", ROTATION_RANGE)
        }
        object_names::Y_AXIS | object_names::Y2_AXIS => {
            let axis = if object_name == object_names::Y_AXIS {
                &view_model.y_axis
            } else {
                &view_model.y2_axis
            };
            let key = |suffix: &str| format!("{object_name}{suffix}");
            VisualObjectInstance::new(object_name)
                .property(&key("Title"), axis.title.as_str())
                .property(&key("TitleColor"), axis.title_color.as_str())
                .property(&key("TitleSize"), axis.title_size)
                .property(&key("TitlefontFamily"), axis.title_font.as_str())
                .property(&key("LabelColor"), axis.label_color.as_str())
                .property(&key("LabelSize"), axis.label_size)
                .property(&key("LabelfontFamily"), axis.label_font.as_str())
                .property(&key("LabelFormat"), axis.label_format.as_str())
                .range(&key("TitleSize"), FONT_SIZE_RANGE)
                .range(&key("LabelSize"), FONT_SIZE_RANGE)
        }
        object_names::COLOR_SELECTOR => {
            let choices = palettes
                .names()
                .enumerate()
                .map(|(id, name)| (json!(id), name.to_string()))
                .collect();
            let mut instance = VisualObjectInstance::new(object_name)
                .property("lineColor", view_model.palette_id)
                .range(
                    "lineColor",
                    NumberRange::new(0.0, palettes.len().saturating_sub(1) as f64),
                );
            instance
                .valid_values
                .insert("lineColorName".to_string(), ValidValues::Enumeration(choices));
            instance
        }
        _ => return Vec::new(),
    };
    vec![instance]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LegendPosition;

    fn range_of(instance: &VisualObjectInstance, name: &str) -> NumberRange {
        match instance.valid_values.get(name) {
            Some(ValidValues::NumberRange(r)) => *r,
            other => panic!("no range for {name}: {other:?}"),
        }
    }

    #[test]
    fn test_chart_object_reports_current_values() {
        let mut vm = ChartViewModel::empty();
        vm.marker_size = 4.0;
        vm.legend_position = LegendPosition::Split;
        let instances = enumerate_object_instances(&vm, &PaletteTable::default(), "chart");
        assert_eq!(instances.len(), 1);
        let chart = &instances[0];
        assert_eq!(chart.get("markerSize"), Some(&json!(4.0)));
        assert_eq!(chart.get("legendPosition"), Some(&json!("split")));
        assert_eq!(range_of(chart, "markerSize"), NumberRange::new(1.0, 20.0));
    }

    #[test]
    fn test_x_axis_inactive_format_reports_default() {
        let mut vm = ChartViewModel::empty();
        vm.is_date_range = false;
        vm.x_axis.label_format = ",.1f".into();
        let x = &enumerate_object_instances(&vm, &PaletteTable::default(), "xAxis")[0];
        assert_eq!(x.get("xAxisLabelFormat"), Some(&json!(",.1f")));
        assert_eq!(x.get("xAxisDateFormat"), Some(&json!("%d-%b-%y")));
        assert_eq!(range_of(x, "xAxisLabelRotation"), NumberRange::new(0.0, 360.0));

        vm.is_date_range = true;
        vm.x_axis.label_format = "%Y".into();
        let x = &enumerate_object_instances(&vm, &PaletteTable::default(), "xAxis")[0];
        assert_eq!(x.get("xAxisLabelFormat"), Some(&json!(".3s")));
        assert_eq!(x.get("xAxisDateFormat"), Some(&json!("%Y")));
    }

    #[test]
    fn test_y_axis_properties_are_prefixed() {
        let vm = ChartViewModel::empty();
        let y2 = &enumerate_object_instances(&vm, &PaletteTable::default(), "y2Axis")[0];
        assert!(y2.get("y2AxisTitle").is_some());
        assert!(y2.get("yAxisTitle").is_none());
        assert_eq!(range_of(y2, "y2AxisLabelSize"), NumberRange::new(4.0, 30.0));
    }

    #[test]
    fn test_palette_selector_range_and_unknown_object() {
        let vm = ChartViewModel::empty();
        let palettes = PaletteTable::default();
        let selector = &enumerate_object_instances(&vm, &palettes, "yColorSelector")[0];
        assert_eq!(range_of(selector, "lineColor"), NumberRange::new(0.0, 3.0));
        assert!(enumerate_object_instances(&vm, &palettes, "dataPoint").is_empty());
    }

    #[test]
    fn test_instances_serialize_camel_case() {
        let vm = ChartViewModel::empty();
        let chart = &enumerate_object_instances(&vm, &PaletteTable::default(), "chart")[0];
        let value = serde_json::to_value(chart).unwrap();
        assert_eq!(value["objectName"], "chart");
        assert_eq!(value["validValues"]["markerSize"]["numberRange"]["min"], 1.0);
    }
}
