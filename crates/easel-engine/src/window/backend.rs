use std::time::Duration;

use anyhow::{bail, Context, Result};
use winit::dpi::LogicalSize;
use winit::event_loop::EventLoop;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::Window;

use crate::backend::Backend;
use crate::coords::{Affine, Rect, Vec2, Viewport};
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::input::{Key, MouseButton};
use crate::paint::Color;
use crate::render::{Batch, BatchRenderer, RenderCtx, RenderTarget};
use crate::texture::{TextureData, TextureError, TextureId};
use crate::time::FramePacer;

use super::host::Host;
use super::WindowConfig;

/// Pump iterations allowed for the platform to deliver `resumed`.
const OPEN_ATTEMPTS: usize = 200;
const OPEN_PUMP_TIMEOUT: Duration = Duration::from_millis(10);

/// winit window + wgpu renderer.
///
/// Draw calls are tessellated into a per-frame [`Batch`]; `end_frame` renders
/// it, presents, then sleeps until the next frame deadline.
pub struct WgpuBackend {
    gpu_init: GpuInit,

    // Created on first open and kept: winit allows one event loop per process.
    event_loop: Option<EventLoop<()>>,
    host: Option<Host>,

    pacer: FramePacer,
    batch: Batch,
    renderer: BatchRenderer,
    clear_color: Color,
}

impl Default for WgpuBackend {
    fn default() -> Self {
        Self::new(GpuInit::default())
    }
}

impl WgpuBackend {
    pub fn new(gpu_init: GpuInit) -> Self {
        Self {
            gpu_init,
            event_loop: None,
            host: None,
            pacer: FramePacer::default(),
            batch: Batch::new(),
            renderer: BatchRenderer::new(),
            clear_color: Color::BLANK,
        }
    }

    fn is_open(&self) -> bool {
        self.host.as_ref().is_some_and(Host::is_open)
    }
}

impl Backend for WgpuBackend {
    fn open_window(&mut self, config: &WindowConfig) -> Result<()> {
        if self.host.is_some() {
            bail!("window is already open");
        }

        let mut event_loop = match self.event_loop.take() {
            Some(el) => el,
            None => EventLoop::new().context("failed to create winit EventLoop")?,
        };
        let mut host = Host::new(config.clone(), self.gpu_init.clone());

        for _ in 0..OPEN_ATTEMPTS {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(OPEN_PUMP_TIMEOUT), &mut host)
            {
                bail!("event loop exited with code {code} while opening the window");
            }
            if let Some(e) = host.init_error.take() {
                return Err(e);
            }
            if host.is_open() {
                break;
            }
        }

        if !host.is_open() {
            bail!("platform did not deliver a window within {OPEN_ATTEMPTS} event pumps");
        }

        self.event_loop = Some(event_loop);
        self.host = Some(host);
        self.pacer.restart();
        Ok(())
    }

    fn set_target_fps(&mut self, fps: u32) {
        self.pacer.set_target_fps(fps);
    }

    fn should_close(&mut self) -> bool {
        let (Some(event_loop), Some(host)) = (self.event_loop.as_mut(), self.host.as_mut()) else {
            return true;
        };

        if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(Duration::ZERO), host) {
            log::info!("event loop exited with code {code}");
            host.close_requested = true;
        }

        host.close_requested || !host.is_open()
    }

    fn close_window(&mut self) {
        // Textures go before the device they were created on.
        self.renderer = BatchRenderer::new();
        self.batch.clear();
        if self.host.take().is_some() {
            log::info!("window closed");
        }
    }

    fn resize_window(&mut self, width: u32, height: u32) {
        let Some(host) = self.host.as_mut() else {
            return;
        };
        host.with_gpu_mut(|window, gpu| {
            // `Some` means the platform applied the size synchronously.
            if let Some(size) = window.request_inner_size(LogicalSize::new(width, height)) {
                gpu.resize(size);
            }
        });
    }

    fn begin_frame(&mut self) {
        self.batch.clear();
        self.clear_color = Color::BLANK;
    }

    fn end_frame(&mut self) {
        if let Some(host) = self.host.as_mut() {
            let (renderer, batch, clear) = (&mut self.renderer, &self.batch, self.clear_color);
            let fatal = host
                .with_gpu_mut(|window, gpu| render_frame(window, gpu, renderer, batch, clear))
                .unwrap_or(false);
            if fatal {
                log::error!("GPU surface out of memory; closing window");
                host.close_requested = true;
            }
        }

        self.batch.clear();
        self.pacer.wait();
    }

    fn clear(&mut self, color: Color) {
        self.batch.clear();
        self.clear_color = color;
    }

    fn draw_point(&mut self, xf: Affine, p: Vec2, color: Color) {
        self.batch.push_point(xf, p, color);
    }

    fn draw_line(&mut self, xf: Affine, a: Vec2, b: Vec2, color: Color) {
        self.batch.push_line(xf, a, b, color);
    }

    fn fill_rect(&mut self, xf: Affine, rect: Rect, color: Color) {
        self.batch.push_fill_rect(xf, rect, color);
    }

    fn stroke_rect(&mut self, xf: Affine, rect: Rect, color: Color) {
        self.batch.push_stroke_rect(xf, rect, color);
    }

    fn fill_ellipse(&mut self, xf: Affine, center: Vec2, radii: Vec2, color: Color) {
        self.batch.push_fill_ellipse(xf, center, radii, color);
    }

    fn stroke_ellipse(&mut self, xf: Affine, center: Vec2, radii: Vec2, color: Color) {
        self.batch.push_stroke_ellipse(xf, center, radii, color);
    }

    fn fill_triangle(&mut self, xf: Affine, points: [Vec2; 3], color: Color) {
        self.batch.push_fill_triangle(xf, points, color);
    }

    fn create_texture(&mut self, data: &TextureData) -> Result<TextureId, TextureError> {
        let Some(host) = self.host.as_ref() else {
            return Err(TextureError::NoDevice);
        };
        let renderer = &mut self.renderer;
        host.with_gpu(|window, gpu| renderer.create_texture(&render_ctx(window, gpu), data))
            .unwrap_or(Err(TextureError::NoDevice))
    }

    fn destroy_texture(&mut self, id: TextureId) {
        if !self.renderer.destroy_texture(id) {
            log::warn!("destroy_texture: unknown texture {id:?}");
        }
    }

    fn draw_texture(&mut self, xf: Affine, id: TextureId, src: Rect, dst: Rect, tint: Color) {
        let Some((w, h)) = self.renderer.texture_size(id) else {
            log::debug!("draw_texture: unknown texture {id:?}");
            return;
        };
        let uv = Rect::new(
            src.origin.x / w as f32,
            src.origin.y / h as f32,
            src.size.x / w as f32,
            src.size.y / h as f32,
        );
        self.batch.push_textured_quad(xf, id, uv, dst, tint);
    }

    fn pointer_position(&self) -> Vec2 {
        self.host.as_ref().map(|h| h.input.pointer).unwrap_or_default()
    }

    fn button_down(&self, button: MouseButton) -> bool {
        self.host.as_ref().is_some_and(|h| h.input.button_down(button))
    }

    fn key_down(&self, key: Key) -> bool {
        self.host.as_ref().is_some_and(|h| h.input.key_down(key))
    }

    fn any_key_down(&self) -> bool {
        self.host.as_ref().is_some_and(|h| h.input.any_key_down())
    }

    fn elapsed(&self) -> Duration {
        if !self.is_open() {
            return Duration::ZERO;
        }
        self.pacer.elapsed()
    }
}

fn render_ctx<'a>(window: &Window, gpu: &'a Gpu<'_>) -> RenderCtx<'a> {
    let logical = gpu.size().to_logical::<f32>(window.scale_factor());
    RenderCtx::new(
        gpu.device(),
        gpu.queue(),
        gpu.surface_format(),
        Viewport::new(logical.width, logical.height),
    )
}

/// Renders and presents one frame. Returns `true` on a fatal surface error.
fn render_frame(
    window: &Window,
    gpu: &mut Gpu<'_>,
    renderer: &mut BatchRenderer,
    batch: &Batch,
    clear: Color,
) -> bool {
    let size = gpu.size();
    if size.width == 0 || size.height == 0 {
        return false;
    }

    let mut frame = match gpu.begin_frame() {
        Ok(frame) => frame,
        Err(err) => {
            log::debug!("surface error: {err}");
            return gpu.handle_surface_error(err) == SurfaceErrorAction::Fatal;
        }
    };

    let ctx = render_ctx(window, gpu);
    let mut target = RenderTarget {
        encoder: &mut frame.encoder,
        color_view: &frame.view,
    };
    renderer.render(&ctx, &mut target, batch, clear);

    window.pre_present_notify();
    gpu.submit(frame);
    false
}
