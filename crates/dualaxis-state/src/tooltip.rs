//! Host-side tooltip service: keeps the visual's registrations and answers
//! pointer hit tests against them.

use dualaxis_core::{TooltipDataFn, TooltipDataItem, TooltipRemoveFn, TooltipService, TooltipTarget};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::trace;

struct Registration {
    targets: Vec<TooltipTarget>,
    data: TooltipDataFn,
    remove: Option<TooltipRemoveFn>,
}

/// Tooltip content resolved for one pointer position
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipHit {
    /// Registration the target belongs to, in registration order
    pub set: usize,
    /// Target index within the set
    pub index: usize,
    /// Centre of the hit target in root coordinates
    pub anchor: (f64, f64),
    pub items: Vec<TooltipDataItem>,
}

/// In-memory [`TooltipService`] for a Leptos host
#[derive(Default)]
pub struct TooltipRegistry {
    sets: Mutex<Vec<Registration>>,
    /// `(set, index)` of the tooltip currently shown
    active: Mutex<Option<(usize, usize)>>,
}

impl TooltipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn sets(&self) -> MutexGuard<'_, Vec<Registration>> {
        self.sets.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of registered target sets
    pub fn len(&self) -> usize {
        self.sets().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets().is_empty()
    }

    /// Closest target whose radius covers `(x, y)`, with its payload
    pub fn hit(&self, x: f64, y: f64) -> Option<TooltipHit> {
        let sets = self.sets();
        let (set, index, target) = sets
            .iter()
            .enumerate()
            .flat_map(|(s, reg)| reg.targets.iter().enumerate().map(move |(i, t)| (s, i, t)))
            .filter(|(_, _, t)| t.contains(x, y))
            .min_by(|a, b| a.2.distance_sq(x, y).total_cmp(&b.2.distance_sq(x, y)))?;

        let items = (sets[set].data)(index);
        if items.is_empty() {
            return None;
        }
        Some(TooltipHit {
            set,
            index,
            anchor: (target.x, target.y),
            items,
        })
    }

    /// Hit-test for a moving pointer. The previously shown tooltip is
    /// dismissed when the pointer lands on a different target or on none.
    pub fn hover(&self, x: f64, y: f64) -> Option<TooltipHit> {
        let hit = self.hit(x, y);
        let current = hit.as_ref().map(|h| (h.set, h.index));
        let previous = std::mem::replace(&mut *self.active(), current);
        if let Some(previous) = previous.filter(|&p| Some(p) != current) {
            self.dismiss(previous);
        }
        hit
    }

    /// Pointer left the chart: dismiss whatever is shown
    pub fn leave(&self) {
        let previous = self.active().take();
        if let Some(previous) = previous {
            self.dismiss(previous);
        }
    }

    fn active(&self) -> MutexGuard<'_, Option<(usize, usize)>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn dismiss(&self, (set, index): (usize, usize)) {
        let remove = self.sets().get(set).and_then(|reg| reg.remove.clone());
        if let Some(remove) = remove {
            trace!(set, index, "tooltip dismissed");
            remove(index);
        }
    }
}

impl TooltipService for TooltipRegistry {
    fn add_tooltip(
        &self,
        targets: Vec<TooltipTarget>,
        data: TooltipDataFn,
        remove: Option<TooltipRemoveFn>,
    ) {
        trace!(targets = targets.len(), "tooltip targets registered");
        self.sets().push(Registration {
            targets,
            data,
            remove,
        });
    }

    fn clear(&self) {
        self.sets().clear();
        *self.active() = None;
    }
}

impl std::fmt::Debug for TooltipRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TooltipRegistry")
            .field("sets", &self.len())
            .finish()
    }
}
