use glam::Vec2;
use serde::Serialize;

/// Identity of a star system: its position in the currently loaded catalog.
///
/// Ids are only meaningful against the catalog they came from; loading a new
/// catalog invalidates all outstanding ids (hover and selection are cleared).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StarId(pub u32);

impl StarId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        StarId(index as u32)
    }
}

/// Notifications for the page chrome, drained once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExplorerEvent {
    /// The pointer moved over the surface (or left it). `pointer` is in
    /// surface-local pixels; used to position the tooltip.
    HoverChanged { star: Option<StarId>, pointer: Vec2 },
    /// A click replaced or cleared the selection.
    SelectionChanged { star: Option<StarId> },
}
