//! Backend contract between the sketch runtime and a renderer/window system.
//!
//! The runtime owns all sketch state (style, transforms, input snapshot) and
//! talks to the platform only through [`Backend`]. Two implementations ship:
//! - [`crate::window::WgpuBackend`]: winit window + wgpu renderer
//! - [`HeadlessBackend`]: no window; records calls for tests and offscreen runs
//!
//! Every draw call carries the transform that was current when the sketch
//! issued it. Geometry is in that transform's local space.

mod headless;

use std::time::Duration;

use anyhow::Result;

use crate::coords::{Affine, Rect, Vec2};
use crate::input::{Key, MouseButton};
use crate::paint::Color;
use crate::texture::{TextureData, TextureError, TextureId};
use crate::window::WindowConfig;

pub use headless::{BackendCall, HeadlessBackend};

pub trait Backend {
    // ── window lifecycle ──────────────────────────────────────────────────

    /// Creates the window and rendering context. Called once.
    fn open_window(&mut self, config: &WindowConfig) -> Result<()>;

    /// Sets the frame rate the backend paces `end_frame` to. `0` disables pacing.
    fn set_target_fps(&mut self, fps: u32);

    /// Processes pending platform events and reports whether the window
    /// should close. Called once per loop iteration, between frames.
    fn should_close(&mut self) -> bool;

    /// Releases the window and all GPU resources.
    fn close_window(&mut self);

    /// Asks an open window to change its inner size (logical pixels).
    fn resize_window(&mut self, width: u32, height: u32);

    // ── frame bracketing ──────────────────────────────────────────────────

    fn begin_frame(&mut self);

    /// Presents the frame and waits for the next frame deadline.
    fn end_frame(&mut self);

    /// Replaces everything drawn so far this frame with `color`.
    fn clear(&mut self, color: Color);

    // ── rasterization ─────────────────────────────────────────────────────

    /// One-pixel point with its top-left corner at `p`.
    fn draw_point(&mut self, xf: Affine, p: Vec2, color: Color);

    fn draw_line(&mut self, xf: Affine, a: Vec2, b: Vec2, color: Color);

    fn fill_rect(&mut self, xf: Affine, rect: Rect, color: Color);

    fn stroke_rect(&mut self, xf: Affine, rect: Rect, color: Color);

    fn fill_ellipse(&mut self, xf: Affine, center: Vec2, radii: Vec2, color: Color);

    fn stroke_ellipse(&mut self, xf: Affine, center: Vec2, radii: Vec2, color: Color);

    fn fill_triangle(&mut self, xf: Affine, points: [Vec2; 3], color: Color);

    // ── textures ──────────────────────────────────────────────────────────

    /// Uploads decoded pixels. The returned handle is never `TextureId::NULL`.
    fn create_texture(&mut self, data: &TextureData) -> Result<TextureId, TextureError>;

    /// Releases a texture. Unknown or null handles are ignored.
    fn destroy_texture(&mut self, id: TextureId);

    /// Blits the `src` region of a texture (texel coordinates) into `dst`,
    /// modulated by `tint`.
    fn draw_texture(&mut self, xf: Affine, id: TextureId, src: Rect, dst: Rect, tint: Color);

    // ── input + time ──────────────────────────────────────────────────────

    /// Last known pointer position in logical pixels.
    fn pointer_position(&self) -> Vec2;

    fn button_down(&self, button: MouseButton) -> bool;

    fn key_down(&self, key: Key) -> bool;

    fn any_key_down(&self) -> bool;

    /// Monotonic time since the window opened.
    fn elapsed(&self) -> Duration;
}
