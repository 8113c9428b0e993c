//! Pointer hit-testing, hover and selection.

use glam::Vec2;

use crate::api::types::{ExplorerEvent, StarId};

/// Pick distance in surface pixels.
pub const DEFAULT_HIT_RADIUS: f32 = 14.0;

/// Nearest visible star strictly closer than `threshold` to `pointer`.
///
/// `positions` is indexed by catalog position. Ties on exact distance go to
/// the star scanned first.
pub fn hit_test(visible: &[StarId], positions: &[Vec2], pointer: Vec2, threshold: f32) -> Option<StarId> {
    let mut best: Option<(StarId, f32)> = None;
    for &id in visible {
        let Some(pos) = positions.get(id.index()) else {
            continue;
        };
        let dist = pos.distance(pointer);
        if dist < threshold && best.map_or(true, |(_, d)| dist < d) {
            best = Some((id, dist));
        }
    }
    best.map(|(id, _)| id)
}

/// Hover and selection, each at most one star.
#[derive(Debug, Clone)]
pub struct Interaction {
    hover: Option<StarId>,
    selection: Option<StarId>,
    pointer: Option<Vec2>,
    threshold: f32,
}

impl Interaction {
    pub fn new(threshold: f32) -> Self {
        Self {
            hover: None,
            selection: None,
            pointer: None,
            threshold,
        }
    }

    pub fn hover(&self) -> Option<StarId> {
        self.hover
    }

    pub fn selection(&self) -> Option<StarId> {
        self.selection
    }

    /// Last surface-local pointer position, if the pointer is over the surface.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Pointer moved to surface-local `at`. Always reports the hover so the
    /// tooltip can follow the pointer.
    pub fn pointer_move(&mut self, at: Vec2, visible: &[StarId], positions: &[Vec2]) -> ExplorerEvent {
        self.pointer = Some(at);
        self.hover = hit_test(visible, positions, at, self.threshold);
        ExplorerEvent::HoverChanged {
            star: self.hover,
            pointer: at,
        }
    }

    pub fn pointer_leave(&mut self) -> Option<ExplorerEvent> {
        let at = self.pointer.take().unwrap_or(Vec2::ZERO);
        self.hover.take().map(|_| ExplorerEvent::HoverChanged { star: None, pointer: at })
    }

    /// A hit replaces the selection, a miss clears it. Reports only changes.
    pub fn click(&mut self, at: Vec2, visible: &[StarId], positions: &[Vec2]) -> Option<ExplorerEvent> {
        let hit = hit_test(visible, positions, at, self.threshold);
        if hit == self.selection {
            return None;
        }
        self.selection = hit;
        Some(ExplorerEvent::SelectionChanged { star: hit })
    }

    /// Forget hover and selection, e.g. after a catalog reload.
    pub fn clear(&mut self) {
        self.hover = None;
        self.selection = None;
    }
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new(DEFAULT_HIT_RADIUS)
    }
}
