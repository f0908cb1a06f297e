//! Chart view model produced by the transform and consumed by the renderer

use crate::{colors, AxisRole, DomainValue, LegendPosition, SelectionId};
use serde::{Deserialize, Serialize};

/// Default numeric tick format (SI prefix, 3 significant digits)
pub const DEFAULT_NUMBER_FORMAT: &str = ".3s";
/// Default date tick format
pub const DEFAULT_DATE_FORMAT: &str = "%d-%b-%y";
pub const DEFAULT_AXIS_TITLE: &str = "Default Value";
pub const DEFAULT_FONT: &str = "Arial";
pub const DEFAULT_FONT_SIZE: f64 = 12.0;
pub const DEFAULT_MARKER_SIZE: f64 = 2.0;
pub const DEFAULT_LEGEND_ROW_HEIGHT: f64 = 14.0;

// ============================================================================
// SERIES
// ============================================================================

/// One (x, y) sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub x_value: DomainValue,
    pub y_value: f64,
}

impl ChartDataPoint {
    pub fn new(x_value: impl Into<DomainValue>, y_value: f64) -> Self {
        Self {
            x_value: x_value.into(),
            y_value,
        }
    }
}

/// A named line plotted against one of the two vertical axes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub points: Vec<ChartDataPoint>,
    pub color: String,
    pub name: String,
    pub axis: AxisRole,
    pub selection_id: SelectionId,
}

impl Series {
    /// Smallest and largest X key, or `None` for an empty series
    pub fn x_extent(&self) -> Option<(DomainValue, DomainValue)> {
        let mut iter = self.points.iter().map(|p| p.x_value);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), x| {
            (
                if x.key() < lo.key() { x } else { lo },
                if x.key() > hi.key() { x } else { hi },
            )
        }))
    }
}

// ============================================================================
// STYLES
// ============================================================================

/// Title and tick-label styling for one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisStyle {
    pub title: String,
    pub title_size: f64,
    pub title_font: String,
    pub title_color: String,
    pub label_size: f64,
    pub label_font: String,
    pub label_color: String,
    pub label_format: String,
    pub rotation: Option<f64>,
}

impl AxisStyle {
    /// Default styling with the given tick format
    pub fn with_format(label_format: impl Into<String>) -> Self {
        Self {
            title: DEFAULT_AXIS_TITLE.to_string(),
            title_size: DEFAULT_FONT_SIZE,
            title_font: DEFAULT_FONT.to_string(),
            title_color: colors::AXIS_LABEL.to_string(),
            label_size: DEFAULT_FONT_SIZE,
            label_font: DEFAULT_FONT.to_string(),
            label_color: colors::AXIS_LABEL.to_string(),
            label_format: label_format.into(),
            rotation: None,
        }
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation.unwrap_or(0.0)
    }
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self::with_format(DEFAULT_NUMBER_FORMAT)
    }
}

// ============================================================================
// VIEW MODEL
// ============================================================================

/// Self-contained description of one render pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartViewModel {
    pub series: Vec<Series>,
    pub x_domain: Option<(DomainValue, DomainValue)>,
    pub y1_min: f64,
    pub y1_max: f64,
    pub y2_min: f64,
    pub y2_max: f64,
    /// SVG dash array applied to every line (empty = solid)
    pub line_style: String,
    pub marker_size: f64,
    pub background_color: String,
    pub show_gridlines: bool,
    pub x_axis: AxisStyle,
    pub y_axis: AxisStyle,
    pub y2_axis: AxisStyle,
    pub legend_position: LegendPosition,
    pub legend_row_height: f64,
    pub is_date_range: bool,
    pub palette_id: usize,
}

impl ChartViewModel {
    /// The canonical model for rejected input: nothing to draw
    pub fn empty() -> Self {
        Self {
            series: Vec::new(),
            x_domain: None,
            y1_min: 0.0,
            y1_max: 0.0,
            y2_min: 0.0,
            y2_max: 0.0,
            line_style: String::new(),
            marker_size: 0.0,
            background_color: colors::BACKGROUND.to_string(),
            show_gridlines: true,
            x_axis: AxisStyle::with_format(DEFAULT_DATE_FORMAT),
            y_axis: AxisStyle::default(),
            y2_axis: AxisStyle::default(),
            legend_position: LegendPosition::None,
            legend_row_height: DEFAULT_LEGEND_ROW_HEIGHT,
            is_date_range: true,
            palette_id: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Raw (unpadded) Y extent for an axis
    pub fn y_extent(&self, axis: AxisRole) -> (f64, f64) {
        match axis {
            AxisRole::Primary => (self.y1_min, self.y1_max),
            AxisRole::Secondary => (self.y2_min, self.y2_max),
        }
    }
}

impl Default for ChartViewModel {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(xs: &[f64]) -> Series {
        Series {
            points: xs.iter().map(|&x| ChartDataPoint::new(x, 1.0)).collect(),
            color: "#000".into(),
            name: "s".into(),
            axis: AxisRole::Primary,
            selection_id: SelectionId::new("s"),
        }
    }

    #[test]
    fn test_empty_view_model() {
        let vm = ChartViewModel::empty();
        assert!(vm.is_empty());
        assert!(vm.is_date_range);
        assert_eq!(vm.y1_min, 0.0);
        assert_eq!(vm.y2_max, 0.0);
        assert_eq!(vm.legend_position, LegendPosition::None);
    }

    #[test]
    fn test_series_x_extent_is_order_independent() {
        let s = series(&[5.0, 1.0, 9.0, 3.0]);
        let (lo, hi) = s.x_extent().unwrap();
        assert_eq!(lo, DomainValue::Number(1.0));
        assert_eq!(hi, DomainValue::Number(9.0));
        assert!(series(&[]).x_extent().is_none());
    }
}
