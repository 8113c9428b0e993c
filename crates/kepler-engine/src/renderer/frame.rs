use glam::Vec2;
use serde::Serialize;

use super::viewport::Viewport;
use crate::systems::vector::{VectorColor, VectorState};

/// Horizontal anchoring of a text label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// A piece of text for the host to draw over the triangle layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: VectorColor,
    pub alpha: f32,
    pub align: TextAlign,
}

/// Output of one paint: triangles plus labels, in surface pixels.
pub struct Frame {
    pub vectors: VectorState,
    pub labels: Vec<Label>,
    pub viewport: Viewport,
}

impl Frame {
    pub fn new() -> Self {
        Self {
            vectors: VectorState::new(),
            labels: Vec::new(),
            viewport: Viewport::default(),
        }
    }

    /// Reset for a new paint at the given size.
    pub fn begin(&mut self, viewport: Viewport) {
        self.vectors.clear();
        self.labels.clear();
        self.viewport = viewport;
    }

    pub fn label(&mut self, text: impl Into<String>, at: Vec2, size: f32, color: VectorColor, align: TextAlign) {
        self.labels.push(Label {
            text: text.into(),
            x: at.x,
            y: at.y,
            size,
            alpha: color.a,
            color,
            align,
        });
    }

    /// Labels as a JSON array for the host overlay.
    pub fn labels_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.labels)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}
