//! Narrow contracts for the host services the visual consumes.
//!
//! The visual never implements selection or tooltip behavior itself; it only
//! calls through these traits. Implementations are injected at construction.

use crate::CategoryColumn;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// SELECTION
// ============================================================================

/// Opaque per-series identity token handed out by the host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionId(String);

impl SelectionId {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SelectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds identity tokens for `(category, index)` pairs
pub trait SelectionIdBuilder: Send + Sync {
    fn create_selection_id(&self, category: &CategoryColumn, index: usize) -> SelectionId;
}

/// Deterministic builder keyed on the category display name and index.
/// Used by standalone hosts that have no selection manager of their own.
#[derive(Debug, Clone, Default)]
pub struct CategorySelectionIds;

impl SelectionIdBuilder for CategorySelectionIds {
    fn create_selection_id(&self, category: &CategoryColumn, index: usize) -> SelectionId {
        let name = category
            .source
            .as_ref()
            .map_or("category", |s| s.display_name.as_str());
        SelectionId(format!("{}#{}", name, index))
    }
}

// ============================================================================
// TOOLTIPS
// ============================================================================

/// One row of a tooltip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipDataItem {
    pub header: String,
    pub display_name: String,
    pub value: String,
    pub color: String,
}

/// A circular hit region in root (container) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipTarget {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl TooltipTarget {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }

    /// Squared distance from the target center
    pub fn distance_sq(&self, x: f64, y: f64) -> f64 {
        (self.x - x).powi(2) + (self.y - y).powi(2)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.distance_sq(x, y) <= self.radius * self.radius
    }
}

/// Produces tooltip rows for the target at the given index
pub type TooltipDataFn = Arc<dyn Fn(usize) -> Vec<TooltipDataItem> + Send + Sync>;
/// Invoked when the tooltip for the target at the given index is dismissed
pub type TooltipRemoveFn = Arc<dyn Fn(usize) + Send + Sync>;

/// Host tooltip service
pub trait TooltipService: Send + Sync {
    /// Register a set of hit targets sharing one data callback
    fn add_tooltip(
        &self,
        targets: Vec<TooltipTarget>,
        data: TooltipDataFn,
        remove: Option<TooltipRemoveFn>,
    );

    /// Drop every registration (called before each rebuild)
    fn clear(&self);
}

/// Tooltip service that ignores every registration
#[derive(Debug, Clone, Default)]
pub struct NoopTooltipService;

impl TooltipService for NoopTooltipService {
    fn add_tooltip(&self, _: Vec<TooltipTarget>, _: TooltipDataFn, _: Option<TooltipRemoveFn>) {}

    fn clear(&self) {}
}

/// Services injected into the visual at construction
#[derive(Clone)]
pub struct HostServices {
    pub selection_ids: Arc<dyn SelectionIdBuilder>,
    pub tooltips: Arc<dyn TooltipService>,
}

impl HostServices {
    pub fn new(
        selection_ids: Arc<dyn SelectionIdBuilder>,
        tooltips: Arc<dyn TooltipService>,
    ) -> Self {
        Self {
            selection_ids,
            tooltips,
        }
    }

    pub fn with_tooltips(mut self, tooltips: Arc<dyn TooltipService>) -> Self {
        self.tooltips = tooltips;
        self
    }
}

impl Default for HostServices {
    fn default() -> Self {
        Self::new(Arc::new(CategorySelectionIds), Arc::new(NoopTooltipService))
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_selection_ids_are_deterministic() {
        let category = CategoryColumn::numbers("Week", vec![1.0, 2.0]);
        let builder = CategorySelectionIds;
        let a = builder.create_selection_id(&category, 3);
        let b = builder.create_selection_id(&category, 3);
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "Week#3");
        assert_ne!(a, builder.create_selection_id(&category, 4));
    }

    #[test]
    fn test_tooltip_target_contains() {
        let target = TooltipTarget::new(10.0, 10.0, 3.0);
        assert!(target.contains(12.0, 10.0));
        assert!(!target.contains(14.0, 10.0));
    }
}
