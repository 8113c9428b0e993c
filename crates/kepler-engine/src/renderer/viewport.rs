use glam::Vec2;

/// Bounds of the drawing surface: its size in surface pixels and where its
/// top-left corner sits in page (client) coordinates.
///
/// Re-read by the host every frame; nothing caches a previous size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// A surface anchored at the page origin.
    pub fn new(width: f32, height: f32) -> Self {
        Self::at(0.0, 0.0, width, height)
    }

    pub fn at(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.size() / 2.0
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width < 1.0 || self.height < 1.0
    }

    /// Translate a client-space pointer position to surface-local pixels.
    pub fn to_local(&self, client: Vec2) -> Vec2 {
        client - Vec2::new(self.left, self.top)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
