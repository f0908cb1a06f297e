//! Legend layout, rendering and hit testing

use crate::layout::{PlotRect, LEGEND_COLUMNS, legend_rows};
use crate::scene::Element;
use dualaxis_core::{AxisRole, ChartViewModel, LegendPosition, Viewport};

/// Gap used around legend columns and the horizontal legend
pub const LEGEND_PADDING: f64 = 12.0;
/// Left edge of the left (or split primary) column
pub const LEGEND_LEFT_X: f64 = 4.0;
pub const SWATCH_SIZE: f64 = 10.0;
pub const LABEL_OFFSET_X: f64 = 12.0;
pub const LABEL_BASELINE: f64 = 9.0;

/// One positioned legend entry, in root coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Render-order index of the series (path id `tag{i}`)
    pub series_index: usize,
    pub label: String,
    pub color: String,
    pub x: f64,
    pub y: f64,
    pub row: usize,
    /// Width of the clickable row box
    pub width: f64,
    pub height: f64,
}

impl LegendEntry {
    pub fn label_origin(&self) -> (f64, f64) {
        (self.x + LABEL_OFFSET_X, self.y + LABEL_BASELINE)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Position every entry for the view model's legend policy
pub fn layout_legend(
    view_model: &ChartViewModel,
    plot: &PlotRect,
    viewport: Viewport,
) -> Vec<LegendEntry> {
    let series = &view_model.series;
    let row_height = view_model.legend_row_height;
    let right_x = plot.width + plot.y1_indent + plot.y2_indent / 2.0 - LEGEND_PADDING;
    let left_width = (plot.y1_indent - LEGEND_LEFT_X).max(SWATCH_SIZE);
    let right_width = (viewport.width - right_x).max(SWATCH_SIZE);

    let entry = |i: usize, x: f64, y_origin: f64, row: usize, width: f64| LegendEntry {
        series_index: i,
        label: series[i].name.clone(),
        color: series[i].color.clone(),
        x,
        y: y_origin + row as f64 * row_height,
        row,
        width,
        height: row_height,
    };

    match view_model.legend_position {
        LegendPosition::Top | LegendPosition::Bottom => {
            let y_origin = if view_model.legend_position == LegendPosition::Top {
                LEGEND_PADDING / 2.0
            } else {
                viewport.height - row_height * legend_rows(series.len()) as f64
            };
            let slot = plot.width / LEGEND_COLUMNS as f64;
            (0..series.len())
                .map(|i| {
                    let x = plot.y1_indent + slot * (i % LEGEND_COLUMNS) as f64;
                    entry(i, x, y_origin, i / LEGEND_COLUMNS, slot.max(SWATCH_SIZE))
                })
                .collect()
        }
        LegendPosition::Left => (0..series.len())
            .map(|i| entry(i, LEGEND_LEFT_X, plot.top_indent, i, left_width))
            .collect(),
        LegendPosition::Right => (0..series.len())
            .map(|i| entry(i, right_x, plot.top_indent, i, right_width))
            .collect(),
        LegendPosition::Split => {
            let mut primary_row = 0;
            let mut secondary_row = 0;
            series
                .iter()
                .enumerate()
                .map(|(i, s)| match s.axis {
                    AxisRole::Primary => {
                        primary_row += 1;
                        entry(i, LEGEND_LEFT_X, plot.top_indent, primary_row - 1, left_width)
                    }
                    AxisRole::Secondary => {
                        secondary_row += 1;
                        entry(i, right_x, plot.top_indent, secondary_row - 1, right_width)
                    }
                })
                .collect()
        }
        LegendPosition::None => Vec::new(),
    }
}

/// Legend layer: a swatch and a coloured label per entry
pub fn render_legend(entries: &[LegendEntry]) -> Element {
    Element::group().class("legend-layer").children(entries.iter().map(|e| {
        let (label_x, label_y) = e.label_origin();
        Element::group()
            .class("legend")
            .attr("data-series", e.series_index)
            .child(
                Element::new("rect")
                    .attr("x", e.x)
                    .attr("y", e.y)
                    .attr("width", SWATCH_SIZE)
                    .attr("height", SWATCH_SIZE)
                    .style("fill", &e.color),
            )
            .child(
                Element::new("text")
                    .attr("x", label_x)
                    .attr("y", label_y)
                    .style("fill", &e.color)
                    .style("cursor", "pointer")
                    .text(e.label.clone()),
            )
    }))
}

/// Entry under a root-coordinate point
pub fn hit_test(entries: &[LegendEntry], x: f64, y: f64) -> Option<&LegendEntry> {
    entries.iter().find(|e| e.contains(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dualaxis_core::{SelectionId, Series};

    const VIEWPORT: Viewport = Viewport::new(800.0, 400.0);

    fn view_model(axes: &[AxisRole], position: LegendPosition) -> ChartViewModel {
        let mut vm = ChartViewModel::empty();
        vm.legend_position = position;
        vm.series = axes
            .iter()
            .enumerate()
            .map(|(i, &axis)| Series {
                points: Vec::new(),
                color: format!("#{i}"),
                name: format!("S{i}"),
                axis,
                selection_id: SelectionId::new(format!("s{i}")),
            })
            .collect();
        vm
    }

    fn layout(vm: &ChartViewModel) -> (PlotRect, Vec<LegendEntry>) {
        let plot = PlotRect::compute(vm.legend_position, vm.series.len(), vm.legend_row_height, VIEWPORT);
        let entries = layout_legend(vm, &plot, VIEWPORT);
        (plot, entries)
    }

    #[test]
    fn test_horizontal_rows_wrap_every_five() {
        let vm = view_model(&[AxisRole::Primary; 12], LegendPosition::Top);
        let (plot, entries) = layout(&vm);
        assert_eq!(entries.len(), 12);
        assert_eq!(entries[7].row, 1);
        assert_eq!(entries[11].row, 2);
        let slot = plot.width / 5.0;
        assert_eq!(entries[7].x, plot.y1_indent + slot * 2.0);
        assert_eq!(entries[0].y, 6.0);
        assert_eq!(entries[7].y, 6.0 + 14.0);
        assert_eq!(entries[7].label_origin(), (entries[7].x + 12.0, entries[7].y + 9.0));
    }

    #[test]
    fn test_bottom_legend_anchors_to_viewport_bottom() {
        let vm = view_model(&[AxisRole::Primary; 12], LegendPosition::Bottom);
        let (_, entries) = layout(&vm);
        assert_eq!(entries[0].y, 400.0 - 14.0 * 3.0);
        assert_eq!(entries[10].y, 400.0 - 14.0);
    }

    #[test]
    fn test_side_columns() {
        let vm = view_model(&[AxisRole::Primary, AxisRole::Secondary], LegendPosition::Left);
        let (plot, entries) = layout(&vm);
        assert_eq!(entries[1].x, 4.0);
        assert_eq!(entries[1].y, plot.top_indent + 14.0);

        let vm = view_model(&[AxisRole::Primary, AxisRole::Secondary], LegendPosition::Right);
        let (plot, entries) = layout(&vm);
        assert_eq!(entries[0].x, plot.width + plot.y1_indent + plot.y2_indent / 2.0 - 12.0);
    }

    #[test]
    fn test_split_counts_rows_per_axis() {
        use AxisRole::{Primary, Secondary};
        let vm = view_model(
            &[Primary, Secondary, Primary, Secondary, Primary],
            LegendPosition::Split,
        );
        let (plot, entries) = layout(&vm);
        let right_x = plot.width + plot.y1_indent + plot.y2_indent / 2.0 - 12.0;

        assert_eq!(entries[4].row, 2);
        assert_eq!(entries[4].x, 4.0);
        assert_eq!(entries[3].row, 1);
        assert_eq!(entries[3].x, right_x);
    }

    #[test]
    fn test_none_has_no_entries() {
        let vm = view_model(&[AxisRole::Primary; 3], LegendPosition::None);
        assert!(layout(&vm).1.is_empty());
    }

    #[test]
    fn test_render_and_hit_test() {
        let vm = view_model(&[AxisRole::Primary; 2], LegendPosition::Left);
        let (_, entries) = layout(&vm);
        let layer = render_legend(&entries);
        assert_eq!(layer.find_by_class("legend").len(), 2);
        assert_eq!(layer.children[1].children[1].text.as_deref(), Some("S1"));

        let (x, y) = entries[1].label_origin();
        assert_eq!(hit_test(&entries, x, y - 2.0).map(|e| e.series_index), Some(1));
        assert!(hit_test(&entries, 400.0, 300.0).is_none());
    }
}
