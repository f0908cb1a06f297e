//! Crosshair inspector: nearest point per visible series under the pointer

use crate::chartkit::{PathBuilder, Scale};
use crate::domain::AxisScales;
use crate::format::ChartFormats;
use crate::layout::PlotRect;
use crate::scene::Element;
use dualaxis_core::{ChartViewModel, colors};

/// Element id of the crosshair group inside the plot
pub const CROSSHAIR_ID: &str = "crosshair";
/// Element id of the transparent hit-test rect covering the plot
pub const OVERLAY_ID: &str = "crosshair-overlay";

const FOCUS_RADIUS: f64 = 4.5;
const READOUT_OFFSET: f64 = 10.0;
const READOUT_LINE_HEIGHT: f64 = 14.0;
const READOUT_CHAR_WIDTH: f64 = 7.0;

/// Index of the key closest to `x` in ascending `keys`.
/// On an exact tie between the two bracketing keys the right one wins.
pub fn nearest_index(keys: &[f64], x: f64) -> Option<usize> {
    if keys.is_empty() {
        return None;
    }
    let i = keys.partition_point(|&k| k < x);
    if i == 0 {
        return Some(0);
    }
    if i == keys.len() {
        return Some(keys.len() - 1);
    }
    let left = x - keys[i - 1];
    let right = keys[i] - x;
    Some(if left < right { i - 1 } else { i })
}

/// Point indices of one series sorted by X key
#[derive(Debug, Clone, PartialEq)]
struct SortedSeries {
    keys: Vec<f64>,
    order: Vec<usize>,
}

/// One focused point
#[derive(Debug, Clone, PartialEq)]
pub struct FocusPoint {
    pub series_index: usize,
    pub name: String,
    pub color: String,
    pub value: String,
    /// Plot coordinates
    pub x: f64,
    pub y: f64,
}

/// Everything the crosshair shows for one pointer position
#[derive(Debug, Clone, PartialEq)]
pub struct CrosshairReadout {
    /// Plot X of the focus line
    pub x: f64,
    pub header: String,
    pub points: Vec<FocusPoint>,
}

impl CrosshairReadout {
    /// Text lines: the X header, then `name: value` per series
    pub fn lines(&self) -> Vec<String> {
        std::iter::once(self.header.clone())
            .chain(self.points.iter().map(|p| format!("{}: {}", p.name, p.value)))
            .collect()
    }
}

/// Per-render lookup structure over the view model's series
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Crosshair {
    series: Vec<SortedSeries>,
}

impl Crosshair {
    pub fn new(view_model: &ChartViewModel) -> Self {
        let series = view_model
            .series
            .iter()
            .map(|s| {
                let mut order: Vec<usize> = (0..s.points.len()).collect();
                order.sort_by(|&a, &b| s.points[a].x_value.key().total_cmp(&s.points[b].x_value.key()));
                let keys = order.iter().map(|&i| s.points[i].x_value.key()).collect();
                SortedSeries { keys, order }
            })
            .collect();
        Self { series }
    }

    /// Inspect at a root-coordinate pointer position. `visible[i]` gates series `i`.
    pub fn inspect(
        &self,
        view_model: &ChartViewModel,
        scales: &AxisScales,
        plot: &PlotRect,
        formats: &ChartFormats,
        visible: &[bool],
        pointer: (f64, f64),
    ) -> Option<CrosshairReadout> {
        let (px, _) = plot.to_plot(pointer.0, pointer.1)?;
        let key = scales.x.invert(px);

        let mut header = None;
        let mut line_x = px;
        let mut points = Vec::new();

        for (k, (series, sorted)) in view_model.series.iter().zip(&self.series).enumerate() {
            if !visible.get(k).copied().unwrap_or(true) {
                continue;
            }
            let Some(slot) = nearest_index(&sorted.keys, key) else {
                continue;
            };
            let point = &series.points[sorted.order[slot]];
            let (x, y) = scales.project(series.axis, &point.x_value, point.y_value);

            if header.is_none() {
                header = Some(formats.x.format_value(&point.x_value));
                line_x = x;
            }
            points.push(FocusPoint {
                series_index: k,
                name: series.name.clone(),
                color: series.color.clone(),
                value: formats.y(series.axis).format_key(point.y_value),
                x,
                y,
            });
        }

        Some(CrosshairReadout {
            x: line_x,
            header: header?,
            points,
        })
    }
}

/// Transparent rect receiving pointer events over the plot
pub fn render_overlay(plot: &PlotRect) -> Element {
    Element::new("rect")
        .id(OVERLAY_ID)
        .attr("width", plot.width)
        .attr("height", plot.height)
        .style("fill", "none")
        .style("pointer-events", "all")
}

/// Hidden crosshair placeholder
pub fn render_hidden() -> Element {
    Element::group().id(CROSSHAIR_ID).style("display", "none")
}

/// Focus line, focus circles and the readout box
pub fn render_readout(readout: &CrosshairReadout, plot: &PlotRect) -> Element {
    let lines = readout.lines();
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = longest as f64 * READOUT_CHAR_WIDTH + 2.0 * READOUT_OFFSET;
    let box_height = lines.len() as f64 * READOUT_LINE_HEIGHT + READOUT_OFFSET;

    // Flip to the left of the focus line when the box would leave the plot
    let box_x = if readout.x + READOUT_OFFSET + box_width > plot.width {
        readout.x - READOUT_OFFSET - box_width
    } else {
        readout.x + READOUT_OFFSET
    };

    let focus_line = Element::new("path")
        .class("focus-line")
        .attr(
            "d",
            PathBuilder::new()
                .move_to(readout.x, 0.0)
                .vertical_to(plot.height)
                .build(),
        )
        .style("stroke", colors::FOCUS)
        .style("stroke-dasharray", "3,3")
        .style("pointer-events", "none");

    let circles = readout.points.iter().map(|p| {
        Element::new("circle")
            .class("focus-point")
            .attr("cx", format!("{:.2}", p.x))
            .attr("cy", format!("{:.2}", p.y))
            .attr("r", FOCUS_RADIUS)
            .style("fill", "none")
            .style("stroke", &p.color)
            .style("stroke-width", 2)
    });

    let text = lines.into_iter().enumerate().map(|(i, line)| {
        let fill = match i {
            0 => colors::READOUT_TEXT.to_string(),
            _ => readout.points[i - 1].color.clone(),
        };
        Element::new("text")
            .attr("x", box_x + READOUT_OFFSET)
            .attr("y", READOUT_OFFSET + (i + 1) as f64 * READOUT_LINE_HEIGHT - 3.0)
            .style("fill", fill)
            .style("font-size", "11px")
            .text(line)
    });

    Element::group()
        .id(CROSSHAIR_ID)
        .style("pointer-events", "none")
        .child(focus_line)
        .children(circles)
        .child(
            Element::group()
                .class("readout")
                .child(
                    Element::new("rect")
                        .attr("x", box_x)
                        .attr("y", READOUT_OFFSET)
                        .attr("width", box_width)
                        .attr("height", box_height)
                        .style("fill", colors::READOUT_BG)
                        .style("stroke", colors::READOUT_BORDER),
                )
                .children(text),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dualaxis_core::{
        AxisRole, ChartDataPoint, DomainValue, LegendPosition, SelectionId, Series, Viewport,
    };

    #[test]
    fn test_nearest_index() {
        let keys = [1.0, 3.0, 7.0, 10.0];
        assert_eq!(nearest_index(&keys, 6.0), Some(2));
        assert_eq!(nearest_index(&keys, 4.0), Some(1));
        assert_eq!(nearest_index(&keys, -5.0), Some(0));
        assert_eq!(nearest_index(&keys, 50.0), Some(3));
        assert_eq!(nearest_index(&keys, 7.0), Some(2));
        // Exact midpoint goes right
        assert_eq!(nearest_index(&keys, 2.0), Some(1));
        assert_eq!(nearest_index(&[], 2.0), None);
    }

    fn fixture() -> (ChartViewModel, PlotRect, AxisScales) {
        let mut vm = ChartViewModel::empty();
        vm.is_date_range = false;
        let series = |name: &str, axis, xs: &[f64]| Series {
            points: xs.iter().map(|&x| ChartDataPoint::new(x, x * 2.0)).collect(),
            color: "#000".into(),
            name: name.into(),
            axis,
            selection_id: SelectionId::new(name),
        };
        // Unsorted on purpose: the lookup sorts its own copy
        vm.series = vec![
            series("A", AxisRole::Primary, &[10.0, 1.0, 7.0, 3.0]),
            series("B", AxisRole::Secondary, &[0.0, 5.0, 10.0]),
        ];
        vm.x_domain = Some((DomainValue::Number(1.0), DomainValue::Number(10.0)));
        vm.y1_max = 20.0;
        vm.y2_max = 20.0;
        let plot = PlotRect::compute(LegendPosition::None, 2, 14.0, Viewport::new(800.0, 400.0));
        let scales = AxisScales::build(&vm, &plot).unwrap();
        (vm, plot, scales)
    }

    fn formats() -> ChartFormats {
        let format = crate::format::TickFormat::number(".3s");
        ChartFormats { x: format.clone(), y1: format.clone(), y2: format }
    }

    #[test]
    fn test_inspect_finds_nearest_per_series() {
        let (vm, plot, scales) = fixture();
        let crosshair = Crosshair::new(&vm);
        let formats = formats();
        let px = scales.x.scale(6.0);
        let (rx, ry) = plot.to_root(px, 10.0);

        let readout = crosshair
            .inspect(&vm, &scales, &plot, &formats, &[true, true], (rx, ry))
            .unwrap();
        assert_eq!(readout.header, "7.00");
        assert_eq!(readout.x, scales.x.scale(7.0));
        assert_eq!(readout.points.len(), 2);
        assert_eq!(readout.points[1].name, "B");
        assert_eq!(readout.points[1].value, "10.0");
        assert_eq!(readout.lines()[1], "A: 14.0");
    }

    #[test]
    fn test_inspect_skips_hidden_and_outside() {
        let (vm, plot, scales) = fixture();
        let crosshair = Crosshair::new(&vm);
        let formats = formats();
        let inside = plot.to_root(10.0, 10.0);

        let readout = crosshair
            .inspect(&vm, &scales, &plot, &formats, &[false, true], inside)
            .unwrap();
        assert_eq!(readout.points.len(), 1);
        assert_eq!(readout.points[0].series_index, 1);

        assert!(crosshair
            .inspect(&vm, &scales, &plot, &formats, &[true, true], (1.0, 1.0))
            .is_none());
        assert!(crosshair
            .inspect(&vm, &scales, &plot, &formats, &[false, false], inside)
            .is_none());
    }

    #[test]
    fn test_render_readout() {
        let (vm, plot, scales) = fixture();
        let crosshair = Crosshair::new(&vm);
        let formats = formats();
        let readout = crosshair
            .inspect(&vm, &scales, &plot, &formats, &[true, true], plot.to_root(plot.width, 5.0))
            .unwrap();
        let group = render_readout(&readout, &plot);

        assert_eq!(group.id.as_deref(), Some(CROSSHAIR_ID));
        assert_eq!(group.find_by_class("focus-point").len(), 2);
        let readout_box = &group.find_by_class("readout")[0].children[0];
        let box_x: f64 = readout_box.get_attr("x").unwrap().parse().unwrap();
        assert!(box_x < readout.x);
    }
}
