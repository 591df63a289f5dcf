use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use anyhow::{bail, Result};

use crate::coords::{Affine, Rect, Vec2};
use crate::input::{InputEvent, InputState, Key, MouseButton};
use crate::paint::Color;
use crate::texture::{TextureData, TextureError, TextureId};
use crate::window::WindowConfig;

use super::Backend;

/// A call received by [`HeadlessBackend`], in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    OpenWindow(WindowConfig),
    SetTargetFps(u32),
    CloseWindow,
    ResizeWindow { width: u32, height: u32 },
    BeginFrame,
    EndFrame,
    Clear(Color),
    Point { xf: Affine, p: Vec2, color: Color },
    Line { xf: Affine, a: Vec2, b: Vec2, color: Color },
    FillRect { xf: Affine, rect: Rect, color: Color },
    StrokeRect { xf: Affine, rect: Rect, color: Color },
    FillEllipse { xf: Affine, center: Vec2, radii: Vec2, color: Color },
    StrokeEllipse { xf: Affine, center: Vec2, radii: Vec2, color: Color },
    FillTriangle { xf: Affine, points: [Vec2; 3], color: Color },
    CreateTexture { id: TextureId, width: u32, height: u32 },
    DestroyTexture(TextureId),
    DrawTexture { xf: Affine, id: TextureId, src: Rect, dst: Rect, tint: Color },
}

/// Windowless backend that records every call.
///
/// - Closes after a configurable number of frames (never, by default).
/// - Input comes from a script: one batch of [`InputEvent`]s is applied per
///   `should_close` poll, mirroring when the window backend pumps events.
/// - Time is simulated: `elapsed` advances by one target interval per frame.
#[derive(Debug)]
pub struct HeadlessBackend {
    calls: Vec<BackendCall>,

    close_after: Option<u64>,
    frames_completed: u64,
    window_open: bool,
    open_error: Option<String>,
    target_fps: u32,

    input: InputState,
    script: VecDeque<Vec<InputEvent>>,

    next_texture: u32,
    textures: HashMap<TextureId, (u32, u32)>,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            close_after: None,
            frames_completed: 0,
            window_open: false,
            open_error: None,
            target_fps: 60,
            input: InputState::default(),
            script: VecDeque::new(),
            next_texture: 1,
            textures: HashMap::new(),
        }
    }

    /// Requests a close once `frames` frames have completed.
    pub fn close_after_frames(mut self, frames: u64) -> Self {
        self.close_after = Some(frames);
        self
    }

    /// Input batches, one per loop iteration, starting with the first frame.
    pub fn with_input_script(mut self, frames: Vec<Vec<InputEvent>>) -> Self {
        self.script = frames.into();
        self
    }

    /// Makes `open_window` fail with `message`.
    pub fn failing_open(mut self, message: impl Into<String>) -> Self {
        self.open_error = Some(message.into());
        self
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<BackendCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn frames_completed(&self) -> u64 {
        self.frames_completed
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    /// Applies an event immediately, outside the script.
    pub fn inject(&mut self, ev: InputEvent) {
        self.input.apply_event(&ev);
    }
}

impl Backend for HeadlessBackend {
    fn open_window(&mut self, config: &WindowConfig) -> Result<()> {
        if let Some(msg) = &self.open_error {
            bail!("headless window refused to open: {msg}");
        }
        if self.window_open {
            bail!("headless window is already open");
        }
        self.window_open = true;
        self.calls.push(BackendCall::OpenWindow(config.clone()));
        Ok(())
    }

    fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps;
        self.calls.push(BackendCall::SetTargetFps(fps));
    }

    fn should_close(&mut self) -> bool {
        if let Some(batch) = self.script.pop_front() {
            for ev in &batch {
                self.input.apply_event(ev);
            }
        }
        !self.window_open || self.close_after.is_some_and(|n| self.frames_completed >= n)
    }

    fn close_window(&mut self) {
        self.window_open = false;
        // Textures die with the window, as on the GPU backend.
        self.textures.clear();
        self.calls.push(BackendCall::CloseWindow);
    }

    fn resize_window(&mut self, width: u32, height: u32) {
        self.calls.push(BackendCall::ResizeWindow { width, height });
    }

    fn begin_frame(&mut self) {
        self.calls.push(BackendCall::BeginFrame);
    }

    fn end_frame(&mut self) {
        self.frames_completed += 1;
        self.calls.push(BackendCall::EndFrame);
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(BackendCall::Clear(color));
    }

    fn draw_point(&mut self, xf: Affine, p: Vec2, color: Color) {
        self.calls.push(BackendCall::Point { xf, p, color });
    }

    fn draw_line(&mut self, xf: Affine, a: Vec2, b: Vec2, color: Color) {
        self.calls.push(BackendCall::Line { xf, a, b, color });
    }

    fn fill_rect(&mut self, xf: Affine, rect: Rect, color: Color) {
        self.calls.push(BackendCall::FillRect { xf, rect, color });
    }

    fn stroke_rect(&mut self, xf: Affine, rect: Rect, color: Color) {
        self.calls.push(BackendCall::StrokeRect { xf, rect, color });
    }

    fn fill_ellipse(&mut self, xf: Affine, center: Vec2, radii: Vec2, color: Color) {
        self.calls.push(BackendCall::FillEllipse { xf, center, radii, color });
    }

    fn stroke_ellipse(&mut self, xf: Affine, center: Vec2, radii: Vec2, color: Color) {
        self.calls.push(BackendCall::StrokeEllipse { xf, center, radii, color });
    }

    fn fill_triangle(&mut self, xf: Affine, points: [Vec2; 3], color: Color) {
        self.calls.push(BackendCall::FillTriangle { xf, points, color });
    }

    fn create_texture(&mut self, data: &TextureData) -> Result<TextureId, TextureError> {
        if !self.window_open {
            return Err(TextureError::NoDevice);
        }
        let id = TextureId::from_raw(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(id, (data.width, data.height));
        self.calls.push(BackendCall::CreateTexture {
            id,
            width: data.width,
            height: data.height,
        });
        Ok(id)
    }

    fn destroy_texture(&mut self, id: TextureId) {
        if self.textures.remove(&id).is_some() {
            self.calls.push(BackendCall::DestroyTexture(id));
        } else {
            log::warn!("destroy_texture: unknown texture {id:?}");
        }
    }

    fn draw_texture(&mut self, xf: Affine, id: TextureId, src: Rect, dst: Rect, tint: Color) {
        self.calls.push(BackendCall::DrawTexture { xf, id, src, dst, tint });
    }

    fn pointer_position(&self) -> Vec2 {
        self.input.pointer
    }

    fn button_down(&self, button: MouseButton) -> bool {
        self.input.button_down(button)
    }

    fn key_down(&self, key: Key) -> bool {
        self.input.key_down(key)
    }

    fn any_key_down(&self) -> bool {
        self.input.any_key_down()
    }

    fn elapsed(&self) -> Duration {
        if self.target_fps == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames_completed as f64 / self.target_fps as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyState;

    #[test]
    fn closes_after_requested_frames() {
        let mut b = HeadlessBackend::new().close_after_frames(2);
        b.open_window(&WindowConfig::default()).unwrap();
        assert!(!b.should_close());
        b.end_frame();
        assert!(!b.should_close());
        b.end_frame();
        assert!(b.should_close());
    }

    #[test]
    fn second_open_is_an_error() {
        let mut b = HeadlessBackend::new();
        b.open_window(&WindowConfig::default()).unwrap();
        assert!(b.open_window(&WindowConfig::default()).is_err());
    }

    #[test]
    fn script_is_applied_one_batch_per_poll() {
        let mut b = HeadlessBackend::new().with_input_script(vec![
            vec![InputEvent::PointerMoved { x: 1.0, y: 2.0 }],
            vec![InputEvent::Key { key: Key::Space, state: KeyState::Pressed, repeat: false }],
        ]);
        b.open_window(&WindowConfig::default()).unwrap();

        b.should_close();
        assert_eq!(b.pointer_position(), Vec2::new(1.0, 2.0));
        assert!(!b.any_key_down());

        b.should_close();
        assert!(b.key_down(Key::Space));
    }

    #[test]
    fn textures_need_an_open_window_and_destroy_once() {
        let mut b = HeadlessBackend::new();
        let data = TextureData::from_rgba(1, 1, vec![255; 4]).unwrap();
        assert_eq!(b.create_texture(&data), Err(TextureError::NoDevice));

        b.open_window(&WindowConfig::default()).unwrap();
        let id = b.create_texture(&data).unwrap();
        assert!(!id.is_null());
        assert_eq!(b.live_textures(), 1);

        b.destroy_texture(id);
        b.destroy_texture(id);
        let destroys = b
            .calls()
            .iter()
            .filter(|c| matches!(c, BackendCall::DestroyTexture(_)))
            .count();
        assert_eq!(destroys, 1);
        assert_eq!(b.live_textures(), 0);
    }

    #[test]
    fn closing_the_window_releases_textures() {
        let mut b = HeadlessBackend::new();
        b.open_window(&WindowConfig::default()).unwrap();
        let data = TextureData::from_rgba(1, 1, vec![255; 4]).unwrap();
        let id = b.create_texture(&data).unwrap();

        b.close_window();
        assert_eq!(b.live_textures(), 0);

        b.destroy_texture(id);
        assert!(!b.calls().iter().any(|c| matches!(c, BackendCall::DestroyTexture(_))));
    }

    #[test]
    fn simulated_time_follows_frames() {
        let mut b = HeadlessBackend::new();
        b.set_target_fps(50);
        for _ in 0..50 {
            b.end_frame();
        }
        assert_eq!(b.elapsed(), Duration::from_secs(1));
    }
}
