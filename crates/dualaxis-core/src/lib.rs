//! # dualaxis-core
//!
//! Core domain types for the dual-axis line chart visual.
//!
//! ## Modules
//!
//! - `dataview` - Tabular result delivered by the host (categories + measures)
//! - `objects` - Formatting objects with typed, defaulted lookups
//! - `model` - Chart view model produced by the transform
//! - `palette` - Static color palette table
//! - `host` - Narrow contracts for host selection and tooltip services
//! - `settings` - Property-pane schema enumeration

pub mod dataview;
pub mod host;
pub mod model;
pub mod objects;
pub mod palette;
pub mod settings;

pub use dataview::*;
pub use host::*;
pub use model::*;
pub use objects::*;
pub use palette::*;
pub use settings::*;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// DOMAIN VALUES
// ============================================================================

/// An X-axis value. The chart-wide `is_date_range` flag selects the variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum DomainValue {
    Date(DateTime<Utc>),
    Number(f64),
}

impl DomainValue {
    /// Numeric key used for ordering and scale mapping
    /// (milliseconds since epoch for dates).
    pub fn key(&self) -> f64 {
        match self {
            Self::Date(dt) => dt.timestamp_millis() as f64,
            Self::Number(n) => *n,
        }
    }

    /// Rebuild a value of the requested kind from a numeric key.
    pub fn from_key(key: f64, is_date: bool) -> Option<Self> {
        if !key.is_finite() {
            return None;
        }
        if is_date {
            Utc.timestamp_millis_opt(key.round() as i64)
                .single()
                .map(Self::Date)
        } else {
            Some(Self::Number(key))
        }
    }
}

impl From<DateTime<Utc>> for DomainValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Date(dt)
    }
}

impl From<f64> for DomainValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

// ============================================================================
// AXIS ROLES
// ============================================================================

/// Which vertical scale a series is plotted against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisRole {
    #[serde(rename = "y1")]
    Primary,
    #[serde(rename = "y2")]
    Secondary,
}

impl AxisRole {
    /// Data role name the host tags measure columns with
    pub fn role_name(&self) -> &'static str {
        match self {
            Self::Primary => roles::PRIMARY_VALUE,
            Self::Secondary => roles::SECONDARY_VALUE,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Primary => "y1",
            Self::Secondary => "y2",
        }
    }
}

/// Data role names declared by the visual's capabilities
pub mod roles {
    pub const CATEGORY: &str = "category";
    pub const PRIMARY_VALUE: &str = "y1Value";
    pub const SECONDARY_VALUE: &str = "y2Value";
}

// ============================================================================
// LEGEND POSITION
// ============================================================================

/// Legend placement policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
    Split,
    #[default]
    None,
}

impl LegendPosition {
    /// Parse the property-pane value. Unknown values disable the legend.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            "left" => Self::Left,
            "right" => Self::Right,
            "split" => Self::Split,
            _ => Self::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Split => "split",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for LegendPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const BACKGROUND: &str = "#FFFFFF";
    pub const AXIS_LABEL: &str = "#000000";
    pub const GRIDLINE: &str = "#c2c6c6";
    pub const BORDER: &str = "grey";
    pub const FOCUS: &str = "#555555";
    pub const READOUT_BG: &str = "#ffffff";
    pub const READOUT_BORDER: &str = "#999999";
    pub const READOUT_TEXT: &str = "#2F4F4F";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_value_key_roundtrip_for_dates() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let value = DomainValue::Date(dt);
        assert_eq!(DomainValue::from_key(value.key(), true), Some(value));
    }

    #[test]
    fn test_domain_value_rejects_non_finite_keys() {
        assert_eq!(DomainValue::from_key(f64::NAN, false), None);
        assert_eq!(
            DomainValue::from_key(4.5, false),
            Some(DomainValue::Number(4.5))
        );
    }

    #[test]
    fn test_legend_position_parsing() {
        assert_eq!(LegendPosition::parse("Split"), LegendPosition::Split);
        assert_eq!(LegendPosition::parse("bottom"), LegendPosition::Bottom);
        assert_eq!(LegendPosition::parse("sideways"), LegendPosition::None);
        assert_eq!(LegendPosition::Top.to_string(), "top");
    }

    #[test]
    fn test_axis_role_names() {
        assert_eq!(AxisRole::Primary.role_name(), "y1Value");
        assert_eq!(AxisRole::Secondary.role_name(), "y2Value");
    }
}
