//! # dualaxis-components
//!
//! Leptos components hosting the dual-axis line chart.
//!
//! ## Modules
//!
//! - `chart` - `DualAxisChart`, mounts the visual and routes pointer events
//! - `scene` - Renders the scene graph as SVG nodes with signal-bound overlays
//! - `tooltip` - Tooltip popup and crosshair readout panel

pub mod chart;
pub mod scene;
pub mod tooltip;

pub use chart::*;
pub use scene::*;
pub use tooltip::*;
