//! # dualaxis-state
//!
//! Reactive state for hosting the dual-axis chart in Leptos.
//! Signals carry the latest host update, the tooltip popup and the crosshair
//! readout; the tooltip registry is the host side of the tooltip service.

pub mod tooltip;

pub use tooltip::*;

use dualaxis_charts::CrosshairReadout;
use dualaxis_core::{TooltipDataItem, Viewport, VisualUpdateOptions};
use leptos::prelude::*;
use std::sync::Arc;

/// Offset of the tooltip popup from the pointer
pub const TOOLTIP_OFFSET: f64 = 12.0;

// ============================================================================
// TOOLTIP POPUP
// ============================================================================

/// Tooltip currently shown over the chart
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    /// Top-left corner in container coordinates
    pub x: f64,
    pub y: f64,
    pub items: Vec<TooltipDataItem>,
}

impl TooltipContent {
    /// Place the popup beside the pointer, flipping left near the right edge
    pub fn at_pointer(
        pointer: (f64, f64),
        items: Vec<TooltipDataItem>,
        viewport: Viewport,
        approx_width: f64,
    ) -> Self {
        let (px, py) = pointer;
        let x = if px + TOOLTIP_OFFSET + approx_width > viewport.width {
            (px - TOOLTIP_OFFSET - approx_width).max(0.0)
        } else {
            px + TOOLTIP_OFFSET
        };
        Self {
            x,
            y: (py + TOOLTIP_OFFSET).max(0.0),
            items,
        }
    }

    /// Shared header line of the rows (the formatted X value)
    pub fn header(&self) -> Option<&str> {
        self.items.first().map(|item| item.header.as_str())
    }
}

// ============================================================================
// CHART STATE
// ============================================================================

/// Reactive state of one mounted chart
#[derive(Clone)]
pub struct ChartState {
    /// Latest host update; the chart rebuilds whenever it changes
    pub options: RwSignal<Option<VisualUpdateOptions>>,
    /// Tooltip popup under the pointer
    pub tooltip: RwSignal<Option<TooltipContent>>,
    /// Crosshair readout under the pointer
    pub readout: RwSignal<Option<CrosshairReadout>>,
    /// Host tooltip service handed to the visual
    pub tooltips: Arc<TooltipRegistry>,
}

impl ChartState {
    pub fn new() -> Self {
        Self {
            options: RwSignal::new(None),
            tooltip: RwSignal::new(None),
            readout: RwSignal::new(None),
            tooltips: Arc::new(TooltipRegistry::new()),
        }
    }

    // ========================================================================
    // Host updates
    // ========================================================================

    /// Push a new host update; pointer state is reset with it
    pub fn set_options(&self, options: VisualUpdateOptions) {
        self.clear_pointer();
        self.options.set(Some(options));
    }

    /// Keep the data and change only the container size
    pub fn resize(&self, viewport: Viewport) {
        self.clear_pointer();
        self.options.update(|options| {
            if let Some(options) = options {
                options.viewport = viewport;
            }
        });
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.options.with(|options| options.as_ref().map(|o| o.viewport))
    }

    // ========================================================================
    // Pointer state
    // ========================================================================

    /// Hit-test the registry and show or hide the popup
    pub fn show_tooltip_at(&self, x: f64, y: f64, approx_width: f64) {
        let viewport = self.viewport().unwrap_or_default();
        let popup = self
            .tooltips
            .hover(x, y)
            .map(|hit| TooltipContent::at_pointer((x, y), hit.items, viewport, approx_width));
        self.tooltip.set(popup);
    }

    pub fn set_readout(&self, readout: Option<CrosshairReadout>) {
        self.readout.set(readout);
    }

    pub fn clear_pointer(&self) {
        self.tooltips.leave();
        self.tooltip.set(None);
        self.readout.set(None);
    }
}

impl Default for ChartState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CONTEXT HELPERS
// ============================================================================

/// Provide chart state context to component tree
pub fn provide_chart_state() -> ChartState {
    let state = ChartState::new();
    provide_context(state.clone());
    state
}

/// Use chart state from context
pub fn use_chart_state() -> ChartState {
    expect_context::<ChartState>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<TooltipDataItem> {
        vec![TooltipDataItem {
            header: "01-Jan-24".into(),
            display_name: "Revenue".into(),
            value: "12".into(),
            color: "#a6cee3".into(),
        }]
    }

    #[test]
    fn test_popup_sits_right_of_pointer() {
        let popup = TooltipContent::at_pointer((100.0, 50.0), items(), Viewport::new(800.0, 400.0), 120.0);
        assert_eq!((popup.x, popup.y), (112.0, 62.0));
        assert_eq!(popup.header(), Some("01-Jan-24"));
    }

    #[test]
    fn test_popup_flips_near_right_edge() {
        let popup = TooltipContent::at_pointer((750.0, 50.0), items(), Viewport::new(800.0, 400.0), 120.0);
        assert_eq!(popup.x, 750.0 - 12.0 - 120.0);

        let popup = TooltipContent::at_pointer((60.0, 50.0), items(), Viewport::new(100.0, 400.0), 120.0);
        assert_eq!(popup.x, 0.0);
    }
}
