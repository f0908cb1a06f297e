//! Tooltip popup and crosshair readout panel

use dualaxis_charts::CrosshairReadout;
use dualaxis_core::colors;
use dualaxis_state::TooltipContent;
use leptos::prelude::*;

/// Inline style placing the popup at its container coordinates
pub fn popup_style(content: &TooltipContent) -> String {
    format!(
        "position: absolute; left: {:.0}px; top: {:.0}px; pointer-events: none; \
         background: {}; border: 1px solid {}; color: {}; padding: 4px 8px; font-size: 11px;",
        content.x,
        content.y,
        colors::READOUT_BG,
        colors::READOUT_BORDER,
        colors::READOUT_TEXT,
    )
}

/// Host tooltip: the shared X header, then one coloured row per item
#[component]
pub fn TooltipPopup(#[prop(into)] content: Signal<Option<TooltipContent>>) -> impl IntoView {
    move || {
        content.get().map(|content| {
            let style = popup_style(&content);
            let header = content.header().unwrap_or_default().to_string();
            view! {
                <div class="tooltip-popup" style=style>
                    <div class="tt-header">{header}</div>
                    {content
                        .items
                        .into_iter()
                        .map(|item| {
                            view! {
                                <div class="tt-row">
                                    <span
                                        class="tt-swatch"
                                        style=format!(
                                            "display: inline-block; width: 8px; height: 8px; margin-right: 4px; background: {};",
                                            item.color,
                                        )
                                    />
                                    <span class="tt-name">{item.display_name}</span>
                                    ": "
                                    <span class="tt-value">{item.value}</span>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            }
        })
    }
}

/// Text panel mirroring the crosshair readout
#[component]
pub fn CrosshairPanel(#[prop(into)] readout: Signal<Option<CrosshairReadout>>) -> impl IntoView {
    view! {
        <div class="crosshair-panel">
            {move || match readout.get() {
                Some(readout) => {
                    view! {
                        <span class="ch-header">{readout.header.clone()}</span>
                        {readout
                            .points
                            .into_iter()
                            .map(|p| {
                                view! {
                                    <span class="ch-point" style=format!("color: {}", p.color)>
                                        {format!("{}: {}", p.name, p.value)}
                                    </span>
                                }
                            })
                            .collect_view()}
                    }
                        .into_any()
                }
                None => view! { <span class="ch-empty">"Hover the chart"</span> }.into_any(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_style_positions_box() {
        let content = TooltipContent {
            x: 112.4,
            y: 62.0,
            items: Vec::new(),
        };
        let style = popup_style(&content);
        assert!(style.contains("left: 112px"));
        assert!(style.contains("top: 62px"));
        assert!(style.contains(colors::READOUT_BORDER));
    }
}
