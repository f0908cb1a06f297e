//! Chart host component: mounts the visual's scene and routes pointer events

use dualaxis_charts::crosshair::CROSSHAIR_ID;
use dualaxis_charts::{DualAxisVisual, Element};
use dualaxis_core::HostServices;
use dualaxis_state::use_chart_state;
use leptos::ev::MouseEvent;
use leptos::html::Div;
use leptos::prelude::*;
use tracing::debug;

use crate::{SceneView, TooltipPopup};

/// Rough popup width used to keep tooltips inside the container
const TOOLTIP_WIDTH: f64 = 160.0;

/// Pointer position relative to the container's top-left corner
fn pointer_position(container: NodeRef<Div>, ev: &MouseEvent) -> Option<(f64, f64)> {
    let element = container.get_untracked()?;
    let rect = element.get_bounding_client_rect();
    Some((
        ev.client_x() as f64 - rect.left(),
        ev.client_y() as f64 - rect.top(),
    ))
}

/// Dual-axis line chart bound to the [`dualaxis_state::ChartState`] in context
#[component]
pub fn DualAxisChart(
    #[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
    let state = use_chart_state();
    let services = HostServices::default().with_tooltips(state.tooltips.clone());
    let visual = StoredValue::new(DualAxisVisual::new(services));
    let scene = RwSignal::new(None::<Element>);
    let visibility = RwSignal::new(Vec::<bool>::new());
    let crosshair = RwSignal::new(None::<Element>);
    let container = NodeRef::<Div>::new();

    // Full rebuild on every host update
    let options = state.options;
    Effect::new(move |_| {
        let Some(options) = options.get() else {
            return;
        };
        visual.update_value(|v| v.update(&options));
        let (root, shown) = visual.with_value(|v| (v.scene().root().clone(), v.visibility().to_vec()));
        crosshair.set(None);
        visibility.set(shown);
        scene.set(Some(root));
        debug!(
            width = options.viewport.width,
            height = options.viewport.height,
            "chart scene rebuilt"
        );
    });

    // Only the crosshair group is re-rendered on pointer moves
    let sync_crosshair = move || {
        crosshair.set(visual.with_value(|v| v.scene().find(CROSSHAIR_ID).cloned()));
    };

    let on_click = move |ev: MouseEvent| {
        let Some((x, y)) = pointer_position(container, &ev) else {
            return;
        };
        if visual.try_update_value(|v| v.click(x, y)).unwrap_or(false) {
            visibility.set(visual.with_value(|v| v.visibility().to_vec()));
        }
    };

    let move_state = state.clone();
    let on_move = move |ev: MouseEvent| {
        let Some((x, y)) = pointer_position(container, &ev) else {
            return;
        };
        if visual.try_update_value(|v| v.pointer_move(x, y)).unwrap_or(false) {
            sync_crosshair();
        }
        move_state.set_readout(visual.with_value(|v| v.inspect(x, y)));
        move_state.show_tooltip_at(x, y, TOOLTIP_WIDTH);
    };

    let leave_state = state.clone();
    let on_leave = move |_: MouseEvent| {
        if visual.try_update_value(|v| v.pointer_leave()).unwrap_or(false) {
            sync_crosshair();
        }
        leave_state.clear_pointer();
    };

    let class = format!("dual-axis-host {}", class.unwrap_or_default());

    view! {
        <div class=class style="position: relative;">
            <div
                node_ref=container
                class="dual-axis-canvas"
                on:click=on_click
                on:mousemove=on_move
                on:mouseleave=on_leave
            >
                <SceneView root=scene visibility=visibility crosshair=crosshair />
            </div>
            <TooltipPopup content=state.tooltip />
        </div>
    }
}
