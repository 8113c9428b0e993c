//! Lyon-based vector drawing for the explorer surfaces.
//!
//! Every shape is tessellated on the CPU into a flat triangle list
//! (`VectorVertex`, 6 floats each) that the host uploads and draws as-is.
//! Soft effects such as glows and washes are built from stacked translucent
//! fills, so the host only ever needs a single colored-triangle pipeline.
//!
//! # Usage
//!
//! ```ignore
//! vectors.fill_rect(Vec2::ZERO, width, height, BACKGROUND);
//! vectors.fill_glow(center, 12.0, 3, VectorColor::WHITE.with_alpha(0.1));
//! vectors.stroke_dashed_circle(center, 9.0, 0.8, 18, HZ_RING);
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};
use serde::{Serialize, Serializer};

/// Tessellation tolerance in surface pixels.
const TOLERANCE: f32 = 0.35;

/// Per-vertex data: position followed by straight RGBA.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    fn at(position: lyon::math::Point, color: VectorColor) -> Self {
        Self {
            x: position.x,
            y: position.y,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }
}

/// RGBA color, components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque color from 0-255 channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Multiply the current alpha, clamped to [0, 1].
    pub fn fade(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// `#rrggbb` form, alpha dropped. Used when colors cross into page markup.
    pub fn to_hex(self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

impl Default for VectorColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Serialize for VectorColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

struct FillVertexCtor {
    color: VectorColor,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex::at(vertex.position(), self.color)
    }
}

struct StrokeVertexCtor {
    color: VectorColor,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex::at(vertex.position(), self.color)
    }
}

/// Tessellators plus the output triangle buffer for one drawing surface.
///
/// Cleared at the start of every paint and filled by drawing commands in
/// painter's order.
pub struct VectorState {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
}

impl VectorState {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(16384 * VectorVertex::FLOATS),
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    /// Flat `[x, y, r, g, b, a, ...]` triangle list.
    pub fn vertices(&self) -> &[f32] {
        &self.buffer
    }

    /// The same buffer viewed as typed vertices.
    pub fn vertex_slice(&self) -> &[VectorVertex] {
        bytemuck::cast_slice(&self.buffer)
    }

    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn polyline_path(points: &[Vec2], closed: bool) -> Path {
        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(closed);
        builder.build()
    }

    pub fn fill_polygon(&mut self, points: &[Vec2], color: VectorColor) {
        if points.len() < 3 || color.a <= 0.0 {
            return;
        }
        let path = Self::polyline_path(points, true);
        self.fill_path(&path, color);
    }

    pub fn fill_rect(&mut self, pos: Vec2, width: f32, height: f32, color: VectorColor) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let points = [
            pos,
            Vec2::new(pos.x + width, pos.y),
            Vec2::new(pos.x + width, pos.y + height),
            Vec2::new(pos.x, pos.y + height),
        ];
        self.fill_polygon(&points, color);
    }

    /// Fill a `length` x `thickness` rectangle centred on `center` and
    /// rotated by `angle` radians.
    pub fn fill_band(
        &mut self,
        center: Vec2,
        length: f32,
        thickness: f32,
        angle: f32,
        color: VectorColor,
    ) {
        if length <= 0.0 || thickness <= 0.0 {
            return;
        }
        let along = Vec2::from_angle(angle) * (length / 2.0);
        let across = along.perp().normalize_or_zero() * (thickness / 2.0);
        let points = [
            center - along - across,
            center + along - across,
            center + along + across,
            center - along + across,
        ];
        self.fill_polygon(&points, color);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: VectorColor) {
        if radius <= 0.0 || color.a <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, Winding::Positive);
        let path = builder.build();
        self.fill_path(&path, color);
    }

    /// Soft radial glow: `layers` concentric discs from `radius` inward, each
    /// adding `color`'s alpha so the centre ends up the brightest.
    pub fn fill_glow(&mut self, center: Vec2, radius: f32, layers: usize, color: VectorColor) {
        for i in 0..layers {
            let r = radius * (layers - i) as f32 / layers as f32;
            self.fill_circle(center, r, color);
        }
    }

    /// Filled ring between `inner` and `outer` radii (even-odd fill).
    pub fn fill_annulus(&mut self, center: Vec2, inner: f32, outer: f32, color: VectorColor) {
        if outer <= 0.0 || inner >= outer || color.a <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        let c = point(center.x, center.y);
        builder.add_circle(c, outer, Winding::Positive);
        if inner > 0.0 {
            builder.add_circle(c, inner, Winding::Negative);
        }
        let path = builder.build();
        self.fill_path(&path, color);
    }

    pub fn fill_path(&mut self, path: &Path, color: VectorColor) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(TOLERANCE),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );
        match result {
            Ok(_) => self.flush_geometry(),
            Err(err) => {
                log::debug!("fill tessellation skipped: {err:?}");
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }

    pub fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: VectorColor) {
        self.stroke_polyline(&[from, to], width, color);
    }

    pub fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: VectorColor) {
        if points.len() < 2 || color.a <= 0.0 {
            return;
        }
        let path = Self::polyline_path(points, false);
        self.stroke_path(&path, width, color);
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: VectorColor) {
        if radius <= 0.0 || color.a <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, Winding::Positive);
        let path = builder.build();
        self.stroke_path(&path, width, color);
    }

    /// Circle stroked as `dashes` evenly spaced arcs with equal gaps.
    pub fn stroke_dashed_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        width: f32,
        dashes: usize,
        color: VectorColor,
    ) {
        if radius <= 0.0 || dashes == 0 {
            return;
        }
        let step = std::f32::consts::TAU / dashes as f32;
        let samples = 4;
        let mut arc = Vec::with_capacity(samples + 1);
        for d in 0..dashes {
            let start = d as f32 * step;
            arc.clear();
            for s in 0..=samples {
                let angle = start + step * 0.5 * s as f32 / samples as f32;
                arc.push(center + Vec2::from_angle(angle) * radius);
            }
            self.stroke_polyline(&arc, width, color);
        }
    }

    pub fn stroke_path(&mut self, path: &Path, width: f32, color: VectorColor) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(TOLERANCE).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );
        match result {
            Ok(_) => self.flush_geometry(),
            Err(err) => {
                log::debug!("stroke tessellation skipped: {err:?}");
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(size_of::<VectorVertex>(), 24);
        assert_eq!(VectorVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn hex_conversion() {
        assert_eq!(VectorColor::rgb8(255, 128, 0).to_hex(), "#ff8000");
        assert_eq!(VectorColor::BLACK.to_hex(), "#000000");
        assert_eq!(VectorColor::new(2.0, -1.0, 1.0, 0.5).to_hex(), "#ff00ff");
    }

    #[test]
    fn fade_clamps_alpha() {
        let c = VectorColor::WHITE.with_alpha(0.8).fade(2.0);
        assert_eq!(c.a, 1.0);
        let c = VectorColor::WHITE.with_alpha(0.8).fade(0.5);
        assert!((c.a - 0.4).abs() < 1e-6);
    }

    #[test]
    fn fill_rect_produces_two_triangles() {
        let mut state = VectorState::new();
        state.fill_rect(Vec2::ZERO, 100.0, 50.0, VectorColor::WHITE);
        assert_eq!(state.vertex_count(), 6);
        assert_eq!(state.vertex_slice().len(), 6);
    }

    #[test]
    fn band_is_rotated_about_its_center() {
        let mut state = VectorState::new();
        state.fill_band(Vec2::new(50.0, 50.0), 40.0, 10.0, std::f32::consts::FRAC_PI_2, VectorColor::WHITE);
        assert_eq!(state.vertex_count(), 6);
        for v in state.vertex_slice() {
            // Vertical band: x within half thickness, y within half length.
            assert!((v.x - 50.0).abs() <= 5.0 + 1e-3, "x = {}", v.x);
            assert!((v.y - 50.0).abs() <= 20.0 + 1e-3, "y = {}", v.y);
        }
    }

    #[test]
    fn annulus_leaves_the_hole_empty() {
        let mut state = VectorState::new();
        state.fill_annulus(Vec2::ZERO, 10.0, 20.0, VectorColor::WHITE);
        assert!(state.vertex_count() > 0);
        // Every triangle centroid lies inside the ring.
        for tri in state.vertex_slice().chunks(3) {
            let cx = (tri[0].x + tri[1].x + tri[2].x) / 3.0;
            let cy = (tri[0].y + tri[1].y + tri[2].y) / 3.0;
            let r = (cx * cx + cy * cy).sqrt();
            assert!(r > 9.0 && r < 20.5, "centroid radius {r}");
        }
    }

    #[test]
    fn transparent_and_degenerate_shapes_are_skipped() {
        let mut state = VectorState::new();
        state.fill_circle(Vec2::ZERO, 10.0, VectorColor::TRANSPARENT);
        state.fill_circle(Vec2::ZERO, 0.0, VectorColor::WHITE);
        state.fill_polygon(&[Vec2::ZERO, Vec2::ONE], VectorColor::WHITE);
        state.stroke_polyline(&[Vec2::ZERO], 1.0, VectorColor::WHITE);
        state.fill_annulus(Vec2::ZERO, 5.0, 5.0, VectorColor::WHITE);
        assert_eq!(state.vertex_count(), 0);
    }

    #[test]
    fn dashed_circle_draws_each_dash() {
        let mut solid = VectorState::new();
        solid.stroke_line(Vec2::ZERO, Vec2::new(10.0, 0.0), 1.0, VectorColor::WHITE);
        let per_segment = solid.vertex_count();
        assert!(per_segment > 0);

        let mut dashed = VectorState::new();
        dashed.stroke_dashed_circle(Vec2::ZERO, 20.0, 1.0, 8, VectorColor::WHITE);
        assert!(dashed.vertex_count() >= 8 * per_segment);
    }

    #[test]
    fn glow_stacks_layers() {
        let mut one = VectorState::new();
        one.fill_glow(Vec2::ZERO, 10.0, 1, VectorColor::WHITE.with_alpha(0.1));
        let mut three = VectorState::new();
        three.fill_glow(Vec2::ZERO, 10.0, 3, VectorColor::WHITE.with_alpha(0.1));
        assert!(three.vertex_count() > one.vertex_count());
    }

    #[test]
    fn clear_resets_buffer() {
        let mut state = VectorState::new();
        state.fill_circle(Vec2::new(5.0, 5.0), 4.0, VectorColor::WHITE);
        assert!(state.vertex_count() > 0);
        state.clear();
        assert_eq!(state.vertex_count(), 0);
        assert!(state.vertices().is_empty());
    }
}
