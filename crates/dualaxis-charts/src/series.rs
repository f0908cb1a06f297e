//! Series renderer: one stroked path plus point markers per series

use crate::chartkit::{LinePath, PathGenerator};
use crate::domain::AxisScales;
use crate::format::TickFormat;
use crate::layout::PlotRect;
use crate::scene::Element;
use dualaxis_core::{ChartViewModel, TooltipDataItem, TooltipService, TooltipTarget};
use std::sync::Arc;

pub const STROKE_WIDTH: &str = "1.5px";
/// Smallest tooltip hit radius, so tiny markers stay hoverable
pub const MIN_HIT_RADIUS: f64 = 4.0;

/// Element id of the path for the series at `index`
pub fn path_id(index: usize) -> String {
    format!("tag{index}")
}

/// Plot-space coordinates of every point, per series
pub fn project(view_model: &ChartViewModel, scales: &AxisScales) -> Vec<Vec<(f64, f64)>> {
    view_model
        .series
        .iter()
        .map(|s| {
            s.points
                .iter()
                .map(|p| scales.project(s.axis, &p.x_value, p.y_value))
                .collect()
        })
        .collect()
}

/// Series layer in render order; later series draw on top
pub fn render_series(view_model: &ChartViewModel, projected: &[Vec<(f64, f64)>]) -> Element {
    let layer = view_model
        .series
        .iter()
        .zip(projected)
        .enumerate()
        .map(|(k, (series, points))| {
            let line = Element::new("path")
                .id(path_id(k))
                .class("trend_line")
                .attr("d", LinePath.generate(points))
                .style("stroke-width", STROKE_WIDTH)
                .style("stroke-dasharray", &view_model.line_style)
                .style("stroke", &series.color)
                .style("fill", "none")
                .style("opacity", 1);

            let markers = points.iter().map(|&(cx, cy)| {
                Element::new("circle")
                    .attr("r", view_model.marker_size)
                    .attr("cx", format!("{:.2}", cx))
                    .attr("cy", format!("{:.2}", cy))
                    .style("fill", &series.color)
            });

            Element::group()
                .class("series")
                .attr("data-axis", series.axis.label())
                .child(line)
                .child(Element::group().class("markers").children(markers))
        });

    Element::group().class("series-layer").children(layer)
}

/// Register one tooltip target set per series with the host service
pub fn register_tooltips(
    view_model: &ChartViewModel,
    projected: &[Vec<(f64, f64)>],
    plot: &PlotRect,
    x_format: &TickFormat,
    tooltips: &dyn TooltipService,
) {
    let radius = view_model.marker_size.max(MIN_HIT_RADIUS);
    for (series, points) in view_model.series.iter().zip(projected) {
        let targets = points
            .iter()
            .map(|&(x, y)| {
                let (rx, ry) = plot.to_root(x, y);
                TooltipTarget::new(rx, ry, radius)
            })
            .collect();

        let items: Vec<TooltipDataItem> = series
            .points
            .iter()
            .map(|p| TooltipDataItem {
                header: x_format.format_value(&p.x_value),
                display_name: series.name.clone(),
                value: p.y_value.to_string(),
                color: series.color.clone(),
            })
            .collect();

        tooltips.add_tooltip(
            targets,
            Arc::new(move |index: usize| items.get(index).cloned().into_iter().collect()),
            None,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dualaxis_core::{
        AxisRole, ChartDataPoint, DomainValue, LegendPosition, SelectionId, Series,
        TooltipDataFn, TooltipRemoveFn, Viewport,
    };
    use std::sync::Mutex;
    use crate::chartkit::Scale;

    fn fixture() -> (ChartViewModel, PlotRect, AxisScales) {
        let mut vm = ChartViewModel::empty();
        vm.is_date_range = false;
        vm.marker_size = 3.0;
        vm.line_style = "5,5".into();
        vm.series = vec![
            Series {
                points: vec![ChartDataPoint::new(0.0, 0.0), ChartDataPoint::new(100.0, 20.0)],
                color: "#a6cee3".into(),
                name: "Revenue".into(),
                axis: AxisRole::Primary,
                selection_id: SelectionId::new("a"),
            },
            Series {
                points: vec![ChartDataPoint::new(50.0, 0.5)],
                color: "#1f78b4".into(),
                name: "Margin".into(),
                axis: AxisRole::Secondary,
                selection_id: SelectionId::new("b"),
            },
        ];
        vm.x_domain = Some((DomainValue::Number(0.0), DomainValue::Number(100.0)));
        vm.y1_max = 20.0;
        vm.y2_max = 1.0;
        let plot = PlotRect::compute(LegendPosition::None, 2, 14.0, Viewport::new(800.0, 400.0));
        let scales = AxisScales::build(&vm, &plot).unwrap();
        (vm, plot, scales)
    }

    #[test]
    fn test_paths_and_markers() {
        let (vm, _, scales) = fixture();
        let projected = project(&vm, &scales);
        let layer = render_series(&vm, &projected);

        let path = layer.find("tag0").unwrap();
        assert!(path.get_attr("d").unwrap().starts_with("M0.00,"));
        assert_eq!(path.get_style("stroke-dasharray"), Some("5,5"));
        assert_eq!(path.get_style("stroke-width"), Some("1.5px"));
        assert_eq!(path.get_style("fill"), Some("none"));
        assert!(layer.find("tag1").is_some());

        let markers = layer.find_by_class("markers");
        assert_eq!(markers[0].children.len(), 2);
        assert_eq!(markers[0].children[0].get_attr("r"), Some("3"));
    }

    #[test]
    fn test_secondary_series_uses_secondary_scale() {
        let (vm, plot, scales) = fixture();
        let projected = project(&vm, &scales);
        // 0.5 on a [0, 1.1] secondary domain sits above the primary baseline
        let (_, y) = projected[1][0];
        assert!(y < plot.height);
        assert_eq!(y, scales.y2.scale(0.5));
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<(Vec<TooltipTarget>, TooltipDataFn)>>);

    impl TooltipService for Recorder {
        fn add_tooltip(&self, targets: Vec<TooltipTarget>, data: TooltipDataFn, _: Option<TooltipRemoveFn>) {
            self.0.lock().unwrap().push((targets, data));
        }

        fn clear(&self) {
            self.0.lock().unwrap().clear();
        }
    }

    #[test]
    fn test_tooltip_registration() {
        let (vm, plot, scales) = fixture();
        let projected = project(&vm, &scales);
        let recorder = Recorder::default();
        register_tooltips(&vm, &projected, &plot, &TickFormat::number(".3s"), &recorder);

        let registered = recorder.0.lock().unwrap();
        assert_eq!(registered.len(), 2);
        let (targets, data) = &registered[0];
        assert_eq!(targets[0].x, plot.y1_indent);
        assert_eq!(targets[0].radius, 4.0);

        let items = data(1);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].header, "100");
        assert_eq!(items[0].display_name, "Revenue");
        assert_eq!(items[0].value, "20");
        assert_eq!(items[0].color, "#a6cee3");
        assert!(data(9).is_empty());
    }
}
