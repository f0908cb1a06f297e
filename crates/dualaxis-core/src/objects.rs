//! Formatting objects: `object name -> property name -> value`
//!
//! The host persists property-pane edits as loosely typed JSON. Every read
//! goes through a typed lookup with an explicit default, so a missing or
//! mistyped property never reaches the renderer.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Formatting object store attached to a data view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataViewObjects(BTreeMap<String, Map<String, Value>>);

impl DataViewObjects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style property assignment
    pub fn with(mut self, object: &str, property: &str, value: impl Into<Value>) -> Self {
        self.set(object, property, value);
        self
    }

    pub fn set(&mut self, object: &str, property: &str, value: impl Into<Value>) {
        self.0
            .entry(object.to_string())
            .or_default()
            .insert(property.to_string(), value.into());
    }

    /// Untyped access to a stored property
    pub fn raw(&self, object: &str, property: &str) -> Option<&Value> {
        self.0.get(object).and_then(|props| props.get(property))
    }

    /// Typed lookup; a missing property or a type mismatch yields `default`
    pub fn get<T: DeserializeOwned>(&self, object: &str, property: &str, default: T) -> T {
        self.raw(object, property)
            .and_then(|v| T::deserialize(v).ok())
            .unwrap_or(default)
    }

    /// Color lookup. Accepts the host fill shape `{"solid": {"color": ..}}`
    /// as well as a bare color string.
    pub fn get_fill(&self, object: &str, property: &str, default: &str) -> String {
        let color = match self.raw(object, property) {
            Some(Value::String(s)) => Some(s.as_str()),
            Some(Value::Object(fill)) => fill
                .get("solid")
                .and_then(|solid| solid.get("color"))
                .and_then(Value::as_str),
            _ => None,
        };
        color
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(default)
            .to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_returns_default_when_missing() {
        let objects = DataViewObjects::new();
        assert_eq!(objects.get("chart", "markerSize", 2.0), 2.0);
        assert_eq!(objects.get("chart", "lineStyle", String::new()), "");
    }

    #[test]
    fn test_get_returns_default_on_type_mismatch() {
        let objects = DataViewObjects::new().with("chart", "markerSize", "large");
        assert_eq!(objects.get("chart", "markerSize", 2.0), 2.0);
    }

    #[test]
    fn test_get_reads_typed_values() {
        let objects = DataViewObjects::new()
            .with("chart", "markerSize", 6)
            .with("chart", "showGridLines", false)
            .with("xAxis", "xAxisTitle", "Month");
        assert_eq!(objects.get("chart", "markerSize", 2.0), 6.0);
        assert!(!objects.get("chart", "showGridLines", true));
        assert_eq!(objects.get("xAxis", "xAxisTitle", String::new()), "Month");
    }

    #[test]
    fn test_get_fill_accepts_both_shapes() {
        let objects = DataViewObjects::new()
            .with("chart", "backgroundColor", json!({ "solid": { "color": "#fafafa" } }))
            .with("xAxis", "xAxisLabelColor", "#123456");
        assert_eq!(objects.get_fill("chart", "backgroundColor", "#FFFFFF"), "#fafafa");
        assert_eq!(objects.get_fill("xAxis", "xAxisLabelColor", "#000000"), "#123456");
        assert_eq!(objects.get_fill("yAxis", "yAxisLabelColor", "#000000"), "#000000");
    }
}
