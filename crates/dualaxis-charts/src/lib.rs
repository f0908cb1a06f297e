//! # dualaxis-charts
//!
//! D3-style SVG rendering pipeline for the dual-Y-axis line chart.
//! Everything here is pure Rust over a retained scene graph; the Leptos
//! layer only mounts the serialised markup and forwards pointer events.
//!
//! ## Architecture
//!
//! Uses Strategy pattern for:
//! - Scale computation (linear, time)
//! - Path generation (line)
//! - Tick label formatting (d3 number specifiers, strftime dates)
//!
//! ## Modules
//!
//! - `chartkit` - Core primitives: scales, nice rounding, time intervals, paths
//! - `format` - Number and date label formatting
//! - `transform` - Host data view to chart view model
//! - `domain` - Axis domains and the scales built from them
//! - `layout` - Plot rect around the legend
//! - `axis` - Axis, title, border and gridline generators
//! - `series` - Line and marker rendering, tooltip registration
//! - `legend` - Legend layout, rendering and hit testing
//! - `crosshair` - Nearest-point inspector
//! - `scene` - Retained SVG element tree
//! - `visual` - `DualAxisVisual`, the full update pipeline

pub mod axis;
pub mod chartkit;
pub mod crosshair;
pub mod domain;
pub mod format;
pub mod layout;
pub mod legend;
pub mod scene;
pub mod series;
pub mod transform;
pub mod visual;

pub use chartkit::*;
pub use crosshair::{Crosshair, CrosshairReadout, FocusPoint, nearest_index};
pub use domain::{AxisScales, XScale};
pub use format::{ChartFormats, FormatError, NumberFormat, TickFormat, format_date};
pub use layout::PlotRect;
pub use legend::LegendEntry;
pub use scene::{Element, Scene};
pub use transform::{TransformError, try_transform, visual_transform};
pub use visual::DualAxisVisual;

// Re-export colors from dualaxis-core for convenience
pub use dualaxis_core::colors;
