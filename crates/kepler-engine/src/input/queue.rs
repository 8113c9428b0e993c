/// Pointer input from the host page.
///
/// Coordinates are client (page) pixels; the frame step translates them to
/// surface-local pixels against the viewport it just read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMove { x: f32, y: f32 },
    /// The pointer left the surface.
    PointerLeave,
    Click { x: f32, y: f32 },
}

/// A queue of input events.
/// The host pushes events as they arrive; the engine drains them once per
/// frame, after star positions for that frame are known.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
