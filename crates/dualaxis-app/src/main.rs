//! # dualaxis-app
//!
//! WASM demo host for the dual-axis line chart.

mod demo;

use dualaxis_components::{CrosshairPanel, DualAxisChart};
use dualaxis_core::{LegendPosition, PaletteTable, Viewport};
use dualaxis_state::provide_chart_state;
use leptos::prelude::*;
use tracing::info;

const VIEWPORT: Viewport = Viewport::new(960.0, 480.0);

const LEGEND_CHOICES: [LegendPosition; 6] = [
    LegendPosition::Top,
    LegendPosition::Bottom,
    LegendPosition::Left,
    LegendPosition::Right,
    LegendPosition::Split,
    LegendPosition::None,
];

#[component]
fn App() -> impl IntoView {
    let state = provide_chart_state();
    let legend = RwSignal::new(LegendPosition::Split);
    let palette = RwSignal::new(0usize);
    let palette_names: Vec<String> = PaletteTable::default().names().map(str::to_string).collect();

    // Formatting changes arrive as a fresh host update, like a property-pane edit
    let update_state = state.clone();
    Effect::new(move |_| {
        let (legend, palette) = (legend.get(), palette.get());
        info!(legend = legend.as_str(), palette, "pushing demo update");
        update_state.set_options(demo::options(VIEWPORT, legend, palette));
    });

    view! {
        <div class="demo">
            <header class="demo-controls">
                <span class="ctl-label">"Legend:"</span>
                {LEGEND_CHOICES
                    .into_iter()
                    .map(|position| {
                        view! {
                            <button
                                class=move || if legend.get() == position { "active" } else { "" }
                                on:click=move |_| legend.set(position)
                            >
                                {position.as_str()}
                            </button>
                        }
                    })
                    .collect_view()}
                <span class="ctl-label">"Palette:"</span>
                {palette_names
                    .into_iter()
                    .enumerate()
                    .map(|(index, name)| {
                        view! {
                            <button
                                class=move || if palette.get() == index { "active" } else { "" }
                                on:click=move |_| palette.set(index)
                            >
                                {name}
                            </button>
                        }
                    })
                    .collect_view()}
            </header>
            <DualAxisChart class="demo-chart" />
            <CrosshairPanel readout=state.readout />
        </div>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::DEBUG)
            .build(),
    );
    leptos::mount::mount_to_body(App);
}
