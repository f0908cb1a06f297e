//! Plot-area layout: axis indents around the plot rect, widened for the legend

use dualaxis_core::{LegendPosition, Viewport};

/// Default primary/secondary axis indent
pub const AXIS_INDENT: f64 = 84.0;
pub const TOP_INDENT: f64 = 10.0;
pub const BOTTOM_INDENT: f64 = 64.0;
/// Axis indent when a legend column sits beside it
pub const LEGEND_COLUMN_INDENT: f64 = 150.0;
/// Entries per row in top/bottom legends
pub const LEGEND_COLUMNS: usize = 5;

/// Number of legend rows for a horizontal legend
pub fn legend_rows(series_count: usize) -> usize {
    series_count.div_ceil(LEGEND_COLUMNS)
}

/// Indents and inner size of the plot area, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotRect {
    pub y1_indent: f64,
    pub y2_indent: f64,
    pub top_indent: f64,
    pub bottom_indent: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotRect {
    pub fn compute(
        position: LegendPosition,
        series_count: usize,
        row_height: f64,
        viewport: Viewport,
    ) -> Self {
        let mut y1_indent = AXIS_INDENT;
        let mut y2_indent = AXIS_INDENT;
        let mut top_indent = TOP_INDENT;
        let mut bottom_indent = BOTTOM_INDENT;
        let legend_height = row_height * legend_rows(series_count) as f64;

        match position {
            LegendPosition::Top => top_indent += legend_height,
            LegendPosition::Bottom => bottom_indent += legend_height,
            LegendPosition::Left => y1_indent = LEGEND_COLUMN_INDENT,
            LegendPosition::Right => y2_indent = LEGEND_COLUMN_INDENT,
            LegendPosition::Split => {
                y1_indent = LEGEND_COLUMN_INDENT;
                y2_indent = LEGEND_COLUMN_INDENT;
            }
            LegendPosition::None => {}
        }

        Self {
            y1_indent,
            y2_indent,
            top_indent,
            bottom_indent,
            width: (viewport.width - y1_indent - y2_indent).max(0.0),
            height: (viewport.height - top_indent - bottom_indent).max(0.0),
        }
    }

    /// SVG transform for the plot group
    pub fn inner_transform(&self) -> String {
        format!("translate({},{})", self.y1_indent, self.top_indent)
    }

    /// Root coordinates to plot coordinates; `None` outside the plot rect
    pub fn to_plot(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let px = x - self.y1_indent;
        let py = y - self.top_indent;
        let inside = (0.0..=self.width).contains(&px) && (0.0..=self.height).contains(&py);
        inside.then_some((px, py))
    }

    /// Plot coordinates back to root coordinates
    pub fn to_root(&self, x: f64, y: f64) -> (f64, f64) {
        (x + self.y1_indent, y + self.top_indent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport::new(800.0, 400.0);

    #[test]
    fn test_base_indents_without_legend() {
        let plot = PlotRect::compute(LegendPosition::None, 3, 14.0, VIEWPORT);
        assert_eq!(plot.y1_indent, 84.0);
        assert_eq!(plot.y2_indent, 84.0);
        assert_eq!(plot.width, 632.0);
        assert_eq!(plot.height, 326.0);
        assert_eq!(plot.inner_transform(), "translate(84,10)");
    }

    #[test]
    fn test_horizontal_legends_add_rows() {
        assert_eq!(legend_rows(12), 3);
        assert_eq!(legend_rows(5), 1);
        assert_eq!(legend_rows(0), 0);

        let top = PlotRect::compute(LegendPosition::Top, 12, 14.0, VIEWPORT);
        assert_eq!(top.top_indent, 10.0 + 42.0);
        let bottom = PlotRect::compute(LegendPosition::Bottom, 6, 14.0, VIEWPORT);
        assert_eq!(bottom.bottom_indent, 64.0 + 28.0);
        assert_eq!(bottom.height, 400.0 - 10.0 - 92.0);
    }

    #[test]
    fn test_side_legends_widen_indents() {
        let left = PlotRect::compute(LegendPosition::Left, 2, 14.0, VIEWPORT);
        assert_eq!((left.y1_indent, left.y2_indent), (150.0, 84.0));
        let right = PlotRect::compute(LegendPosition::Right, 2, 14.0, VIEWPORT);
        assert_eq!((right.y1_indent, right.y2_indent), (84.0, 150.0));
        let split = PlotRect::compute(LegendPosition::Split, 2, 14.0, VIEWPORT);
        assert_eq!(split.width, 500.0);
    }

    #[test]
    fn test_tiny_viewport_clamps_to_zero() {
        let plot = PlotRect::compute(LegendPosition::Split, 2, 14.0, Viewport::new(100.0, 50.0));
        assert_eq!(plot.width, 0.0);
        assert_eq!(plot.height, 0.0);
    }

    #[test]
    fn test_root_plot_conversion() {
        let plot = PlotRect::compute(LegendPosition::None, 1, 14.0, VIEWPORT);
        assert_eq!(plot.to_plot(94.0, 20.0), Some((10.0, 10.0)));
        assert_eq!(plot.to_plot(10.0, 20.0), None);
        assert_eq!(plot.to_root(10.0, 10.0), (94.0, 20.0));
    }
}
