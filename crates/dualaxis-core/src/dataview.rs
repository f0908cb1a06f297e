//! Tabular query result as delivered by the host on every update

use crate::{roles, AxisRole, DataViewObjects};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// COLUMN METADATA
// ============================================================================

/// Declared source type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueKind {
    DateTime,
    Numeric,
    Integer,
    Text,
    Bool,
}

impl ValueKind {
    pub fn is_date_time(&self) -> bool {
        matches!(self, Self::DateTime)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric | Self::Integer)
    }
}

/// Column metadata: display name, declared type and data roles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSource {
    pub display_name: String,
    #[serde(default, rename = "type")]
    pub value_type: Option<ValueKind>,
    #[serde(default)]
    pub roles: HashMap<String, bool>,
}

impl ColumnSource {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, kind: ValueKind) -> Self {
        self.value_type = Some(kind);
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into(), true);
        self
    }

    /// Role membership test. The flag must be present and equal to `true`.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.get(role) == Some(&true)
    }
}

// ============================================================================
// CELL VALUES
// ============================================================================

/// A single cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimitiveValue {
    Null,
    Bool(bool),
    Number(f64),
    Date(DateTime<Utc>),
    Text(String),
}

impl PrimitiveValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<f64> for PrimitiveValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<DateTime<Utc>> for PrimitiveValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Date(dt)
    }
}

impl From<&str> for PrimitiveValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl<T: Into<PrimitiveValue>> From<Option<T>> for PrimitiveValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

// ============================================================================
// COLUMNS
// ============================================================================

/// Category (X) column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryColumn {
    #[serde(default)]
    pub source: Option<ColumnSource>,
    #[serde(default)]
    pub values: Vec<PrimitiveValue>,
}

impl CategoryColumn {
    pub fn new(source: ColumnSource, values: Vec<PrimitiveValue>) -> Self {
        Self {
            source: Some(source.with_role(roles::CATEGORY)),
            values,
        }
    }

    /// Date-time category column
    pub fn dates(name: impl Into<String>, values: Vec<DateTime<Utc>>) -> Self {
        Self::new(
            ColumnSource::new(name).with_type(ValueKind::DateTime),
            values.into_iter().map(PrimitiveValue::Date).collect(),
        )
    }

    /// Numeric category column
    pub fn numbers(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(
            ColumnSource::new(name).with_type(ValueKind::Numeric),
            values.into_iter().map(PrimitiveValue::Number).collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Measure (Y) column with host-reported extent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueColumn {
    pub source: ColumnSource,
    #[serde(default)]
    pub values: Vec<PrimitiveValue>,
    #[serde(default)]
    pub min_local: Option<f64>,
    #[serde(default)]
    pub max_local: Option<f64>,
}

impl ValueColumn {
    /// Numeric measure column assigned to an axis. The extent is taken from
    /// the finite values, as the host would report it.
    pub fn new(name: impl Into<String>, axis: AxisRole, values: Vec<f64>) -> Self {
        let finite = values.iter().copied().filter(|v| v.is_finite());
        let min_local = finite.clone().reduce(f64::min);
        let max_local = finite.reduce(f64::max);
        Self {
            source: ColumnSource::new(name)
                .with_type(ValueKind::Numeric)
                .with_role(axis.role_name()),
            values: values.into_iter().map(PrimitiveValue::Number).collect(),
            min_local,
            max_local,
        }
    }

    /// Measure column with arbitrary source metadata and no reported extent
    pub fn raw(source: ColumnSource, values: Vec<PrimitiveValue>) -> Self {
        Self {
            source,
            values,
            min_local: None,
            max_local: None,
        }
    }

    /// Axis assignment from the declared roles; secondary wins when both are set
    pub fn axis(&self) -> Option<AxisRole> {
        if self.source.has_role(roles::SECONDARY_VALUE) {
            Some(AxisRole::Secondary)
        } else if self.source.has_role(roles::PRIMARY_VALUE) {
            Some(AxisRole::Primary)
        } else {
            None
        }
    }
}

// ============================================================================
// DATA VIEW
// ============================================================================

/// Categorical section of a data view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Categorical {
    #[serde(default)]
    pub categories: Option<Vec<CategoryColumn>>,
    #[serde(default)]
    pub values: Option<Vec<ValueColumn>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataViewMetadata {
    #[serde(default)]
    pub objects: DataViewObjects,
}

/// One query result plus its formatting objects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataView {
    #[serde(default)]
    pub metadata: DataViewMetadata,
    #[serde(default)]
    pub categorical: Option<Categorical>,
}

impl DataView {
    pub fn new(category: CategoryColumn, values: Vec<ValueColumn>) -> Self {
        Self {
            metadata: DataViewMetadata::default(),
            categorical: Some(Categorical {
                categories: Some(vec![category]),
                values: Some(values),
            }),
        }
    }

    pub fn with_objects(mut self, objects: DataViewObjects) -> Self {
        self.metadata.objects = objects;
        self
    }

    pub fn objects(&self) -> &DataViewObjects {
        &self.metadata.objects
    }
}

/// Container size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Payload of a host update call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualUpdateOptions {
    pub viewport: Viewport,
    #[serde(default)]
    pub data_views: Vec<DataView>,
}

impl VisualUpdateOptions {
    pub fn new(viewport: Viewport, data_view: DataView) -> Self {
        Self {
            viewport,
            data_views: vec![data_view],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_membership_requires_true_flag() {
        let mut source = ColumnSource::new("Sales");
        source.roles.insert("y1Value".into(), false);
        assert!(!source.has_role("y1Value"));

        let source = source.with_role("y1Value");
        assert!(source.has_role("y1Value"));
        assert!(!source.has_role("y2Value"));
    }

    #[test]
    fn test_value_column_axis_assignment() {
        let y1 = ValueColumn::new("Revenue", AxisRole::Primary, vec![1.0]);
        let y2 = ValueColumn::new("Margin", AxisRole::Secondary, vec![1.0]);
        let neither = ValueColumn::raw(ColumnSource::new("Tooltip"), vec![]);
        assert_eq!(y1.axis(), Some(AxisRole::Primary));
        assert_eq!(y2.axis(), Some(AxisRole::Secondary));
        assert_eq!(neither.axis(), None);
    }

    #[test]
    fn test_value_column_extent_ignores_non_finite() {
        let col = ValueColumn::new("A", AxisRole::Primary, vec![3.0, f64::NAN, -2.0, 8.0]);
        assert_eq!(col.min_local, Some(-2.0));
        assert_eq!(col.max_local, Some(8.0));
    }

    #[test]
    fn test_data_view_deserializes_host_json() {
        let raw = json!({
            "metadata": { "objects": { "chart": { "markerSize": 4 } } },
            "categorical": {
                "categories": [{
                    "source": { "displayName": "Date", "type": "dateTime", "roles": { "category": true } },
                    "values": ["2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z"]
                }],
                "values": [{
                    "source": { "displayName": "Sales", "type": "numeric", "roles": { "y1Value": true } },
                    "values": [10.0, null],
                    "minLocal": 10.0,
                    "maxLocal": 10.0
                }]
            }
        });
        let view: DataView = serde_json::from_value(raw).unwrap();
        let categorical = view.categorical.unwrap();
        let category = &categorical.categories.unwrap()[0];
        assert!(category.values[0].as_date().is_some());
        let values = categorical.values.unwrap();
        assert!(values[0].values[1].is_null());
        assert_eq!(values[0].axis(), Some(AxisRole::Primary));
    }
}
