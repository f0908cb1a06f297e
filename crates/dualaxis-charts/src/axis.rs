//! Axis generators: X, primary and secondary Y axes, titles, border, gridlines

use crate::chartkit::{LinearScale, PathBuilder, Scale};
use crate::domain::{XScale, X_TICKS, Y_TICKS};
use crate::format::TickFormat;
use crate::layout::PlotRect;
use crate::legend::LEGEND_PADDING;
use crate::scene::Element;
use dualaxis_core::{AxisStyle, colors};

/// Tick length on the X and secondary axes
pub const TICK_SIZE: f64 = 6.0;
/// Tick length on the primary axis
pub const Y1_TICK_SIZE: f64 = 8.0;
pub const X_TICK_PADDING: f64 = 8.0;
pub const TICK_PADDING: f64 = 3.0;
/// Distance from the plot edge to a Y axis title
pub const TITLE_OFFSET: f64 = LEGEND_PADDING * 5.0;

/// Offset applied before rotating an X label so it clears the axis line
pub fn rotation_translate(angle: f64, label_size: f64, label: &str) -> (f64, f64) {
    let sin = angle.to_radians().sin();
    (label_size * sin, sin.abs() * label.chars().count() as f64)
}

fn label_text(style: &AxisStyle) -> Element {
    Element::new("text")
        .style("fill", &style.label_color)
        .style("font-size", format!("{}px", style.label_size))
        .style("font-family", &style.label_font)
}

fn title_text(style: &AxisStyle) -> Element {
    Element::new("text")
        .style("text-anchor", "middle")
        .style("font-size", format!("{}px", style.title_size))
        .style("fill", &style.title_color)
        .style("font-family", &style.title_font)
        .text(style.title.clone())
}

fn tick_line(x2: f64, y2: f64) -> Element {
    Element::new("line")
        .attr("x2", x2)
        .attr("y2", y2)
        .style("stroke", colors::AXIS_LABEL)
}

fn domain_path(d: String) -> Element {
    Element::new("path")
        .class("domain")
        .attr("d", d)
        .style("fill", "none")
        .style("stroke", colors::AXIS_LABEL)
}

// ============================================================================
// X AXIS
// ============================================================================

/// Bottom axis with rotated, formatted tick labels
pub fn x_axis(scale: &XScale, plot: &PlotRect, style: &AxisStyle, format: &TickFormat) -> Element {
    let angle = style.rotation_degrees();
    let ticks = scale.ticks(X_TICKS).into_iter().map(|key| {
        let label = format.format_key(key);
        let (dx, dy) = rotation_translate(angle, style.label_size, &label);
        Element::group()
            .class("tick")
            .attr("transform", format!("translate({:.2},0)", scale.scale(key)))
            .child(tick_line(0.0, TICK_SIZE))
            .child(
                label_text(style)
                    .attr("y", TICK_SIZE + X_TICK_PADDING)
                    .attr("dy", ".71em")
                    .attr("transform", format!("translate({},{})rotate({})", dx, dy, angle))
                    .style("text-anchor", "middle")
                    .text(label),
            )
    });

    Element::group()
        .class("x axis")
        .attr("transform", format!("translate(0,{})", plot.height))
        .children(ticks)
        .child(domain_path(
            PathBuilder::new()
                .move_to(0.0, TICK_SIZE)
                .vertical_to(0.0)
                .horizontal_to(plot.width)
                .vertical_to(TICK_SIZE)
                .build(),
        ))
}

/// X title centred under the axis
pub fn x_title(plot: &PlotRect, style: &AxisStyle) -> Element {
    title_text(style)
        .class("x title")
        .attr("x", plot.width / 2.0)
        .attr("y", plot.height + plot.bottom_indent / 2.0 + LEGEND_PADDING)
}

// ============================================================================
// Y AXES
// ============================================================================

/// Left axis for primary series
pub fn y1_axis(scale: &LinearScale, plot: &PlotRect, style: &AxisStyle, format: &TickFormat) -> Element {
    y_axis(scale, plot, style, format, -1.0, Y1_TICK_SIZE)
        .class("y1 axis")
}

/// Right axis for secondary series
pub fn y2_axis(scale: &LinearScale, plot: &PlotRect, style: &AxisStyle, format: &TickFormat) -> Element {
    y_axis(scale, plot, style, format, 1.0, TICK_SIZE)
        .class("y2 axis")
        .attr("transform", format!("translate({},0)", plot.width))
}

/// Vertical axis; `side` is -1 for ticks pointing left, 1 for right
fn y_axis(
    scale: &LinearScale,
    plot: &PlotRect,
    style: &AxisStyle,
    format: &TickFormat,
    side: f64,
    tick_size: f64,
) -> Element {
    let anchor = if side < 0.0 { "end" } else { "start" };
    let ticks = scale.ticks(Y_TICKS).into_iter().map(|value| {
        Element::group()
            .class("tick")
            .attr("transform", format!("translate(0,{:.2})", scale.scale(value)))
            .child(tick_line(side * tick_size, 0.0))
            .child(
                label_text(style)
                    .attr("x", side * (tick_size + TICK_PADDING))
                    .attr("dy", ".32em")
                    .style("text-anchor", anchor)
                    .text(format.format_key(value)),
            )
    });

    Element::group()
        .style("fill", &style.label_color)
        .style("font-size", format!("{}px", style.label_size))
        .style("font-family", &style.label_font)
        .children(ticks)
        .child(domain_path(
            PathBuilder::new()
                .move_to(side * TICK_SIZE, plot.height)
                .horizontal_to(0.0)
                .vertical_to(0.0)
                .horizontal_to(side * TICK_SIZE)
                .build(),
        ))
}

/// Primary title, rotated to read bottom-up left of the axis
pub fn y1_title(plot: &PlotRect, style: &AxisStyle) -> Element {
    title_text(style)
        .class("y1 title")
        .attr("transform", "rotate(-90)")
        .attr("y", -TITLE_OFFSET)
        .attr("x", -plot.height / 2.0)
        .attr("dy", "1em")
}

/// Secondary title, rotated to read top-down right of the axis
pub fn y2_title(plot: &PlotRect, style: &AxisStyle) -> Element {
    title_text(style)
        .class("y2 title")
        .attr("x", plot.height / 2.0)
        .attr(
            "transform",
            format!("translate({},0) rotate(90)", plot.width + TITLE_OFFSET),
        )
        .attr("dy", "1em")
}

// ============================================================================
// PLOT FRAME
// ============================================================================

/// Plot border filled with the background colour
pub fn border(plot: &PlotRect, background: &str) -> Element {
    Element::new("rect")
        .class("border")
        .attr("x", 0)
        .attr("y", 0)
        .attr("width", plot.width)
        .attr("height", plot.height)
        .style("stroke", colors::BORDER)
        .style("fill", background)
        .style("stroke-width", 1)
}

/// Horizontal gridlines at the primary axis ticks
pub fn gridlines(scale: &LinearScale, plot: &PlotRect) -> Element {
    Element::group()
        .class("gridlines")
        .children(scale.ticks(Y_TICKS).into_iter().map(|value| {
            let y = scale.scale(value);
            Element::new("path")
                .class("gridline")
                .attr("d", PathBuilder::new().move_to(0.0, y).horizontal_to(plot.width).build())
                .style("stroke", colors::GRIDLINE)
                .style("stroke-width", 1)
                .style("shape-rendering", "crispEdges")
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dualaxis_core::{LegendPosition, Viewport};

    fn plot() -> PlotRect {
        PlotRect::compute(LegendPosition::None, 1, 14.0, Viewport::new(800.0, 400.0))
    }

    #[test]
    fn test_rotation_translate() {
        assert_eq!(rotation_translate(0.0, 12.0, "Jan"), (0.0, 0.0));
        let (dx, dy) = rotation_translate(90.0, 12.0, "Jan");
        assert!((dx - 12.0).abs() < 1e-9);
        assert!((dy - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_x_axis_ticks_and_labels() {
        let plot = plot();
        let scale = XScale::Linear(LinearScale::new().domain(0.0, 100.0).range(0.0, plot.width));
        let mut style = AxisStyle::default();
        style.rotation = Some(45.0);
        let axis = x_axis(&scale, &plot, &style, &TickFormat::number(".3s"));

        assert_eq!(axis.get_attr("transform"), Some("translate(0,326)"));
        let ticks = axis.find_by_class("tick");
        assert_eq!(ticks.len(), 11);
        let label = &ticks[10].children[1];
        assert_eq!(label.text.as_deref(), Some("100"));
        assert!(label.get_attr("transform").unwrap().ends_with("rotate(45)"));
        assert_eq!(label.get_style("text-anchor"), Some("middle"));
    }

    #[test]
    fn test_y_axes_orientation() {
        let plot = plot();
        let scale = LinearScale::new().domain(0.0, 22.0).range(plot.height, 0.0);
        let style = AxisStyle::default();
        let format = TickFormat::number(".3s");

        let left = y1_axis(&scale, &plot, &style, &format);
        assert!(left.has_class("y1"));
        let first = &left.find_by_class("tick")[0];
        assert_eq!(first.children[0].get_attr("x2"), Some("-8"));
        assert_eq!(first.children[1].get_style("text-anchor"), Some("end"));

        let right = y2_axis(&scale, &plot, &style, &format);
        assert_eq!(right.get_attr("transform"), Some("translate(632,0)"));
        assert_eq!(right.find_by_class("tick")[0].children[0].get_attr("x2"), Some("6"));
    }

    #[test]
    fn test_titles_follow_padding_offsets() {
        let plot = plot();
        let style = AxisStyle::default();
        assert_eq!(y1_title(&plot, &style).get_attr("y"), Some("-60"));
        assert_eq!(
            y2_title(&plot, &style).get_attr("transform"),
            Some("translate(692,0) rotate(90)")
        );
        assert_eq!(x_title(&plot, &style).get_attr("y"), Some("370"));
        assert_eq!(x_title(&plot, &style).text.as_deref(), Some("Default Value"));
    }

    #[test]
    fn test_border_and_gridlines() {
        let plot = plot();
        let frame = border(&plot, "#fafafa");
        assert_eq!(frame.get_style("fill"), Some("#fafafa"));
        assert_eq!(frame.get_style("stroke"), Some("grey"));

        let scale = LinearScale::new().domain(0.0, 22.0).range(plot.height, 0.0);
        let grid = gridlines(&scale, &plot);
        assert_eq!(grid.children.len(), 12);
        assert_eq!(grid.children[0].get_style("stroke"), Some("#c2c6c6"));
    }
}
