//! CPU tessellation of sketch primitives into one indexed triangle list.
//!
//! All geometry is transformed on the CPU, so vertices are in logical screen
//! pixels (top-left origin, +Y down). Hairlines (points, lines, outlines) are
//! one logical pixel wide regardless of the current scale.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::coords::{Affine, Rect, Vec2};
use crate::paint::Color;
use crate::texture::TextureId;

/// Perimeter segments used for ellipses.
pub const ELLIPSE_SEGMENTS: usize = 36;

const HAIRLINE_WIDTH: f32 = 1.0;

/// UV used by untextured geometry; samples the renderer's white texel.
const WHITE_UV: [f32; 2] = [0.5, 0.5];

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct BatchVertex {
    /// Logical pixels.
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    /// Linear premultiplied RGBA.
    pub color: [f32; 4],
}

impl BatchVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32x4];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BatchVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// A run of indices drawn with one texture bound.
///
/// `TextureId::NULL` means the white texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawSpan {
    pub texture: TextureId,
    pub indices: Range<u32>,
}

/// Per-frame geometry, flushed and cleared by the renderer at frame end.
#[derive(Debug, Default)]
pub struct Batch {
    vertices: Vec<BatchVertex>,
    indices: Vec<u32>,
    spans: Vec<DrawSpan>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.spans.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn vertices(&self) -> &[BatchVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn spans(&self) -> &[DrawSpan] {
        &self.spans
    }

    // ── primitives ────────────────────────────────────────────────────────

    pub fn push_point(&mut self, xf: Affine, p: Vec2, color: Color) {
        let c = xf.transform_point(p);
        let r = Rect::new(c.x, c.y, HAIRLINE_WIDTH, HAIRLINE_WIDTH);
        self.push_solid_quad(r.corners(), color);
    }

    pub fn push_line(&mut self, xf: Affine, a: Vec2, b: Vec2, color: Color) {
        let (a, b) = (xf.transform_point(a), xf.transform_point(b));
        self.push_screen_line(a, b, color);
    }

    pub fn push_fill_rect(&mut self, xf: Affine, rect: Rect, color: Color) {
        let rect = rect.normalized();
        if rect.is_empty() {
            return;
        }
        let corners = rect.corners().map(|p| xf.transform_point(p));
        self.push_solid_quad(corners, color);
    }

    pub fn push_stroke_rect(&mut self, xf: Affine, rect: Rect, color: Color) {
        let corners = rect.normalized().corners().map(|p| xf.transform_point(p));
        self.push_screen_loop(&corners, color);
    }

    pub fn push_fill_ellipse(&mut self, xf: Affine, center: Vec2, radii: Vec2, color: Color) {
        if radii.x == 0.0 || radii.y == 0.0 {
            return;
        }
        let rim = ellipse_rim(xf, center, radii);
        let c = self.push_vertex(xf.transform_point(center), WHITE_UV, color);
        let first = self.vertices.len() as u32;
        for p in rim {
            self.push_vertex(p, WHITE_UV, color);
        }
        let n = ELLIPSE_SEGMENTS as u32;
        for i in 0..n {
            self.push_indices(TextureId::NULL, &[c, first + i, first + (i + 1) % n]);
        }
    }

    pub fn push_stroke_ellipse(&mut self, xf: Affine, center: Vec2, radii: Vec2, color: Color) {
        if radii.x == 0.0 && radii.y == 0.0 {
            return;
        }
        let rim = ellipse_rim(xf, center, radii);
        self.push_screen_loop(&rim, color);
    }

    pub fn push_fill_triangle(&mut self, xf: Affine, points: [Vec2; 3], color: Color) {
        let base = self.vertices.len() as u32;
        for p in points {
            self.push_vertex(xf.transform_point(p), WHITE_UV, color);
        }
        self.push_indices(TextureId::NULL, &[base, base + 1, base + 2]);
    }

    /// Textured quad covering `dst`, sampling the normalized `uv` rect.
    pub fn push_textured_quad(
        &mut self,
        xf: Affine,
        texture: TextureId,
        uv: Rect,
        dst: Rect,
        tint: Color,
    ) {
        if dst.is_empty() || texture.is_null() {
            return;
        }
        let corners = dst.corners().map(|p| xf.transform_point(p));
        let uvs = uv.corners().map(|p| [p.x, p.y]);
        let base = self.vertices.len() as u32;
        for (p, uv) in corners.into_iter().zip(uvs) {
            self.push_vertex(p, uv, tint);
        }
        self.push_indices(
            texture,
            &[base, base + 1, base + 2, base, base + 2, base + 3],
        );
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn push_vertex(&mut self, p: Vec2, uv: [f32; 2], color: Color) -> u32 {
        let i = self.vertices.len() as u32;
        self.vertices.push(BatchVertex {
            pos: [p.x, p.y],
            uv,
            color: color.to_linear_premul(),
        });
        i
    }

    fn push_indices(&mut self, texture: TextureId, idx: &[u32]) {
        let start = self.indices.len() as u32;
        self.indices.extend_from_slice(idx);
        let end = self.indices.len() as u32;

        match self.spans.last_mut() {
            Some(last) if last.texture == texture && last.indices.end == start => {
                last.indices.end = end;
            }
            _ => self.spans.push(DrawSpan {
                texture,
                indices: start..end,
            }),
        }
    }

    /// Quad from screen-space corners in TL, TR, BR, BL order.
    fn push_solid_quad(&mut self, corners: [Vec2; 4], color: Color) {
        let base = self.vertices.len() as u32;
        for p in corners {
            self.push_vertex(p, WHITE_UV, color);
        }
        self.push_indices(
            TextureId::NULL,
            &[base, base + 1, base + 2, base, base + 2, base + 3],
        );
    }

    fn push_screen_line(&mut self, a: Vec2, b: Vec2, color: Color) {
        let d = b - a;
        let len = d.length();
        if len <= f32::EPSILON {
            self.push_solid_quad(
                Rect::new(a.x, a.y, HAIRLINE_WIDTH, HAIRLINE_WIDTH).corners(),
                color,
            );
            return;
        }
        let n = d.perp() * (HAIRLINE_WIDTH * 0.5 / len);
        self.push_solid_quad([a + n, b + n, b - n, a - n], color);
    }

    fn push_screen_loop(&mut self, points: &[Vec2], color: Color) {
        for (i, &a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            self.push_screen_line(a, b, color);
        }
    }
}

fn ellipse_rim(xf: Affine, center: Vec2, radii: Vec2) -> [Vec2; ELLIPSE_SEGMENTS] {
    let step = std::f32::consts::TAU / ELLIPSE_SEGMENTS as f32;
    std::array::from_fn(|i| {
        let (s, c) = (i as f32 * step).sin_cos();
        xf.transform_point(Vec2::new(center.x + radii.x * c, center.y + radii.y * s))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(b: &Batch) -> Vec<[f32; 2]> {
        b.vertices().iter().map(|v| v.pos).collect()
    }

    #[test]
    fn fill_rect_is_two_triangles_at_transformed_corners() {
        let mut b = Batch::new();
        b.push_fill_rect(
            Affine::from_translation(10.0, 20.0),
            Rect::new(0.0, 0.0, 4.0, 2.0),
            Color::WHITE,
        );
        assert_eq!(b.indices().len(), 6);
        assert_eq!(
            positions(&b),
            vec![[10.0, 20.0], [14.0, 20.0], [14.0, 22.0], [10.0, 22.0]]
        );
    }

    #[test]
    fn empty_rect_and_degenerate_ellipse_emit_nothing() {
        let mut b = Batch::new();
        b.push_fill_rect(Affine::IDENTITY, Rect::new(5.0, 5.0, 0.0, 3.0), Color::WHITE);
        b.push_fill_ellipse(Affine::IDENTITY, Vec2::zero(), Vec2::new(3.0, 0.0), Color::WHITE);
        assert!(b.is_empty());
    }

    #[test]
    fn line_is_a_hairline_quad() {
        let mut b = Batch::new();
        b.push_line(
            Affine::IDENTITY,
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Color::BLACK,
        );
        let ys: Vec<f32> = b.vertices().iter().map(|v| v.pos[1]).collect();
        assert_eq!(ys, vec![0.5, 0.5, -0.5, -0.5]);
    }

    #[test]
    fn stroke_rect_is_four_lines() {
        let mut b = Batch::new();
        b.push_stroke_rect(Affine::IDENTITY, Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK);
        assert_eq!(b.indices().len(), 4 * 6);
    }

    #[test]
    fn fill_ellipse_is_a_fan() {
        let mut b = Batch::new();
        b.push_fill_ellipse(
            Affine::IDENTITY,
            Vec2::new(50.0, 50.0),
            Vec2::new(10.0, 5.0),
            Color::WHITE,
        );
        assert_eq!(b.vertices().len(), ELLIPSE_SEGMENTS + 1);
        assert_eq!(b.indices().len(), ELLIPSE_SEGMENTS * 3);
        assert_eq!(b.vertices()[1].pos, [60.0, 50.0]);
    }

    #[test]
    fn spans_merge_by_texture() {
        let tex = TextureId::from_raw(3);
        let uv = Rect::new(0.0, 0.0, 1.0, 1.0);
        let dst = Rect::new(0.0, 0.0, 8.0, 8.0);

        let mut b = Batch::new();
        b.push_fill_rect(Affine::IDENTITY, dst, Color::WHITE);
        b.push_point(Affine::IDENTITY, Vec2::zero(), Color::WHITE);
        b.push_textured_quad(Affine::IDENTITY, tex, uv, dst, Color::WHITE);
        b.push_textured_quad(Affine::IDENTITY, tex, uv, dst, Color::WHITE);
        b.push_fill_triangle(
            Affine::IDENTITY,
            [Vec2::zero(), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
            Color::WHITE,
        );

        assert_eq!(
            b.spans(),
            &[
                DrawSpan { texture: TextureId::NULL, indices: 0..12 },
                DrawSpan { texture: tex, indices: 12..24 },
                DrawSpan { texture: TextureId::NULL, indices: 24..27 },
            ]
        );
    }

    #[test]
    fn clear_resets_everything() {
        let mut b = Batch::new();
        b.push_point(Affine::IDENTITY, Vec2::zero(), Color::WHITE);
        b.clear();
        assert!(b.is_empty());
        assert!(b.vertices().is_empty());
        assert!(b.spans().is_empty());
    }
}
