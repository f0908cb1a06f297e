//! Axis domains and the scales built from them

use crate::chartkit::{LinearScale, Scale, TimeScale};
use crate::layout::PlotRect;
use dualaxis_core::{AxisRole, ChartViewModel, DomainValue, Series};

/// Tick count requested for the X axis
pub const X_TICKS: usize = 10;
/// Tick count requested for both Y axes
pub const Y_TICKS: usize = 8;
/// Target tick count used when rounding domains outward
pub const NICE_COUNT: usize = 10;

/// `[min, max]` of the first series' X values
pub fn x_domain(series: &[Series]) -> Option<(DomainValue, DomainValue)> {
    series.first().and_then(Series::x_extent)
}

/// Widen a Y extent by 5% away from zero on each side
pub fn pad_y(min: f64, max: f64) -> (f64, f64) {
    let min = if min < 0.0 { min * 1.05 } else { min * 0.95 };
    let max = if max > 0.0 { max * 1.05 } else { max * 0.95 };
    (min, max)
}

// ============================================================================
// X SCALE
// ============================================================================

/// Horizontal scale over numeric keys (milliseconds for dates)
#[derive(Debug, Clone, PartialEq)]
pub enum XScale {
    Time(TimeScale),
    Linear(LinearScale),
}

impl XScale {
    pub fn is_time(&self) -> bool {
        matches!(self, Self::Time(_))
    }
}

impl Scale for XScale {
    fn scale(&self, value: f64) -> f64 {
        match self {
            Self::Time(s) => s.scale(value),
            Self::Linear(s) => s.scale(value),
        }
    }

    fn invert(&self, value: f64) -> f64 {
        match self {
            Self::Time(s) => s.invert(value),
            Self::Linear(s) => s.invert(value),
        }
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Time(s) => s.ticks(count),
            Self::Linear(s) => s.ticks(count),
        }
    }
}

// ============================================================================
// AXIS SCALES
// ============================================================================

/// The three scales of one render pass
#[derive(Debug, Clone, PartialEq)]
pub struct AxisScales {
    pub x: XScale,
    pub y1: LinearScale,
    pub y2: LinearScale,
}

impl AxisScales {
    /// Build niced scales for a non-empty view model
    pub fn build(view_model: &ChartViewModel, plot: &PlotRect) -> Option<Self> {
        let (lo, hi) = view_model.x_domain?;

        let x = match (lo, hi) {
            (DomainValue::Date(lo), DomainValue::Date(hi)) => XScale::Time(
                TimeScale::new()
                    .domain(lo.timestamp_millis(), hi.timestamp_millis())
                    .range(0.0, plot.width)
                    .nice(NICE_COUNT),
            ),
            _ => XScale::Linear(
                LinearScale::new()
                    .domain(lo.key(), hi.key())
                    .range(0.0, plot.width)
                    .nice(NICE_COUNT),
            ),
        };

        let y = |axis: AxisRole| {
            let (min, max) = view_model.y_extent(axis);
            let (min, max) = pad_y(min, max);
            LinearScale::new()
                .domain(min, max)
                .range(plot.height, 0.0)
                .nice(NICE_COUNT)
        };

        Some(Self {
            x,
            y1: y(AxisRole::Primary),
            y2: y(AxisRole::Secondary),
        })
    }

    pub fn y(&self, axis: AxisRole) -> &LinearScale {
        match axis {
            AxisRole::Primary => &self.y1,
            AxisRole::Secondary => &self.y2,
        }
    }

    /// Plot coordinates of a data point on the given axis
    pub fn project(&self, axis: AxisRole, x: &DomainValue, y: f64) -> (f64, f64) {
        (self.x.scale(x.key()), self.y(axis).scale(y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use dualaxis_core::{ChartDataPoint, LegendPosition, SelectionId, Viewport};

    fn series(axis: AxisRole, points: Vec<ChartDataPoint>) -> Series {
        Series {
            points,
            color: "#000".into(),
            name: "s".into(),
            axis,
            selection_id: SelectionId::new("s"),
        }
    }

    #[test]
    fn test_padding() {
        assert_eq!(pad_y(-10.0, 20.0), (-10.5, 21.0));
        assert_eq!(pad_y(5.0, 20.0), (4.75, 21.0));
        assert_eq!(pad_y(-20.0, -5.0), (-21.0, -4.75));
        assert_eq!(pad_y(0.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn test_x_domain_uses_first_series_only() {
        let first = series(
            AxisRole::Primary,
            vec![ChartDataPoint::new(3.0, 1.0), ChartDataPoint::new(1.0, 1.0)],
        );
        let second = series(AxisRole::Secondary, vec![ChartDataPoint::new(50.0, 1.0)]);
        assert_eq!(
            x_domain(&[first, second]),
            Some((DomainValue::Number(1.0), DomainValue::Number(3.0)))
        );
        assert_eq!(x_domain(&[]), None);
    }

    #[test]
    fn test_build_scales_for_numeric_domain() {
        let mut vm = ChartViewModel::empty();
        vm.is_date_range = false;
        vm.series = vec![series(AxisRole::Primary, vec![ChartDataPoint::new(0.0, 1.0)])];
        vm.x_domain = Some((DomainValue::Number(0.0), DomainValue::Number(97.0)));
        vm.y1_min = 1.0;
        vm.y1_max = 20.0;
        let plot = PlotRect::compute(LegendPosition::None, 1, 14.0, Viewport::new(800.0, 400.0));

        let scales = AxisScales::build(&vm, &plot).unwrap();
        assert!(!scales.x.is_time());
        assert_eq!(scales.y1.domain_bounds(), (0.0, 22.0));
        assert_eq!(scales.y1.range_bounds(), (plot.height, 0.0));
        // No secondary series: the [0, 0] extent stays degenerate
        assert_eq!(scales.y2.domain_bounds(), (0.0, 0.0));
        assert_eq!(scales.x.scale(100.0), plot.width);
    }

    #[test]
    fn test_build_scales_for_date_domain() {
        let lo = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let hi = Utc.with_ymd_and_hms(2024, 12, 15, 0, 0, 0).unwrap();
        let mut vm = ChartViewModel::empty();
        vm.x_domain = Some((lo.into(), hi.into()));
        let plot = PlotRect::compute(LegendPosition::None, 1, 14.0, Viewport::new(800.0, 400.0));

        let scales = AxisScales::build(&vm, &plot).unwrap();
        assert!(scales.x.is_time());
        assert_eq!(scales.x.scale(lo.timestamp_millis() as f64), 0.0);
        assert_eq!(scales.x.ticks(X_TICKS).len(), 13);
    }
}
