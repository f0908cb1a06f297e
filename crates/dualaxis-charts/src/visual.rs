//! The visual: owns the palette table, the cached view model and the scene,
//! and rebuilds everything on each host update.

use crate::axis;
use crate::crosshair::{self, Crosshair, CrosshairReadout};
use crate::domain::AxisScales;
use crate::format::ChartFormats;
use crate::layout::PlotRect;
use crate::legend::{self, LegendEntry};
use crate::scene::{Element, Scene};
use crate::series;
use crate::transform::visual_transform;
use dualaxis_core::{
    ChartViewModel, HostServices, PaletteTable, Viewport, VisualObjectInstance,
    VisualUpdateOptions, enumerate_object_instances,
};
use tracing::{debug, trace};

/// Element id of the inner plot group
pub const PLOT_ID: &str = "plot";

/// Derived geometry of the last non-empty render
#[derive(Debug, Clone)]
struct Frame {
    plot: PlotRect,
    scales: AxisScales,
    formats: ChartFormats,
    legend: Vec<LegendEntry>,
    crosshair: Crosshair,
}

/// Dual-Y-axis line chart renderer
#[derive(Debug)]
pub struct DualAxisVisual {
    services: HostServices,
    palettes: PaletteTable,
    viewport: Viewport,
    view_model: ChartViewModel,
    scene: Scene,
    visibility: Vec<bool>,
    frame: Option<Frame>,
}

impl DualAxisVisual {
    pub fn new(services: HostServices) -> Self {
        Self {
            services,
            palettes: PaletteTable::default(),
            viewport: Viewport::default(),
            view_model: ChartViewModel::empty(),
            scene: Scene::default(),
            visibility: Vec::new(),
            frame: None,
        }
    }

    pub fn view_model(&self) -> &ChartViewModel {
        &self.view_model
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Per-series draw state, indexed like the series paths
    pub fn visibility(&self) -> &[bool] {
        &self.visibility
    }

    /// Tear down and rebuild the whole chart
    pub fn update(&mut self, options: &VisualUpdateOptions) {
        let viewport = options.viewport;
        self.viewport = viewport;
        self.services.tooltips.clear();
        self.scene.clear(viewport.width, viewport.height);
        self.frame = None;

        self.view_model = visual_transform(
            &options.data_views,
            self.services.selection_ids.as_ref(),
            &self.palettes,
        );
        self.visibility = vec![true; self.view_model.series.len()];

        if self.view_model.is_empty() {
            debug!(
                width = viewport.width,
                height = viewport.height,
                "no series to draw, scene left blank"
            );
            return;
        }

        let vm = &self.view_model;
        let plot = PlotRect::compute(vm.legend_position, vm.series.len(), vm.legend_row_height, viewport);
        let Some(scales) = AxisScales::build(vm, &plot) else {
            debug!("first series has no points, scene left blank");
            return;
        };
        let formats = ChartFormats::from_view_model(vm);
        let projected = series::project(vm, &scales);

        let mut plot_group = Element::group()
            .id(PLOT_ID)
            .attr("transform", plot.inner_transform())
            .child(axis::border(&plot, &vm.background_color));
        if vm.show_gridlines {
            plot_group.push(axis::gridlines(&scales.y1, &plot));
        }
        plot_group = plot_group
            .child(axis::x_axis(&scales.x, &plot, &vm.x_axis, &formats.x))
            .child(axis::x_title(&plot, &vm.x_axis))
            .child(axis::y1_axis(&scales.y1, &plot, &vm.y_axis, &formats.y1))
            .child(axis::y1_title(&plot, &vm.y_axis))
            .child(axis::y2_axis(&scales.y2, &plot, &vm.y2_axis, &formats.y2))
            .child(axis::y2_title(&plot, &vm.y2_axis))
            .child(series::render_series(vm, &projected))
            .child(crosshair::render_overlay(&plot))
            .child(crosshair::render_hidden());
        self.scene.push(plot_group);

        let entries = legend::layout_legend(vm, &plot, viewport);
        if !entries.is_empty() {
            self.scene.push(legend::render_legend(&entries));
        }

        series::register_tooltips(vm, &projected, &plot, &formats.x, self.services.tooltips.as_ref());

        debug!(
            series = vm.series.len(),
            date_axis = vm.is_date_range,
            legend = vm.legend_position.as_str(),
            plot_width = plot.width,
            plot_height = plot.height,
            "chart rebuilt"
        );

        self.frame = Some(Frame {
            crosshair: Crosshair::new(vm),
            plot,
            scales,
            formats,
            legend: entries,
        });
    }

    /// Legend click at a root-coordinate point. Toggles the series' line.
    pub fn click(&mut self, x: f64, y: f64) -> bool {
        let Some(frame) = &self.frame else {
            return false;
        };
        let Some(index) = legend::hit_test(&frame.legend, x, y).map(|e| e.series_index) else {
            return false;
        };
        let Some(visible) = self.visibility.get_mut(index) else {
            return false;
        };
        *visible = !*visible;
        let opacity = if *visible { 1 } else { 0 };

        match self.scene.find_mut(&series::path_id(index)) {
            Some(path) => {
                path.set_style("opacity", opacity);
                trace!(series = index, opacity, "legend toggled series");
                true
            }
            None => false,
        }
    }

    /// Crosshair readout at a root-coordinate point, without touching the scene
    pub fn inspect(&self, x: f64, y: f64) -> Option<CrosshairReadout> {
        let frame = self.frame.as_ref()?;
        frame.crosshair.inspect(
            &self.view_model,
            &frame.scales,
            &frame.plot,
            &frame.formats,
            &self.visibility,
            (x, y),
        )
    }

    /// Move the crosshair to the pointer; hides it outside the plot
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let Some(plot) = self.frame.as_ref().map(|f| f.plot) else {
            return false;
        };
        match self.inspect(x, y) {
            Some(readout) => self.replace_crosshair(crosshair::render_readout(&readout, &plot)),
            None => self.pointer_leave(),
        }
    }

    /// Hide the crosshair
    pub fn pointer_leave(&mut self) -> bool {
        let hidden = crosshair::render_hidden();
        match self.scene.find(crosshair::CROSSHAIR_ID) {
            Some(current) if *current == hidden => false,
            Some(_) => self.replace_crosshair(hidden),
            None => false,
        }
    }

    fn replace_crosshair(&mut self, group: Element) -> bool {
        match self.scene.find_mut(crosshair::CROSSHAIR_ID) {
            Some(current) => {
                *current = group;
                true
            }
            None => false,
        }
    }

    /// Property-pane schema for one formatting object
    pub fn enumerate_object_instances(&self, object_name: &str) -> Vec<VisualObjectInstance> {
        enumerate_object_instances(&self.view_model, &self.palettes, object_name)
    }
}

impl Default for DualAxisVisual {
    fn default() -> Self {
        Self::new(HostServices::default())
    }
}
