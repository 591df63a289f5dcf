use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowId};

use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::InputState;

use super::WindowConfig;

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// winit application state for the single sketch window.
///
/// The backend pumps the event loop between frames; this handler only
/// records what happened (input, close, resize) for the backend to read.
pub(super) struct Host {
    config: WindowConfig,
    gpu_init: GpuInit,

    entry: Option<WindowEntry>,
    pub(super) input: InputState,
    pub(super) close_requested: bool,

    /// Set if window or GPU creation failed inside `resumed`.
    pub(super) init_error: Option<anyhow::Error>,
}

impl Host {
    pub(super) fn new(config: WindowConfig, gpu_init: GpuInit) -> Self {
        Self {
            config,
            gpu_init,
            entry: None,
            input: InputState::default(),
            close_requested: false,
            init_error: None,
        }
    }

    pub(super) fn is_open(&self) -> bool {
        self.entry.is_some()
    }

    /// Runs `f` with the window and GPU, if the window exists.
    pub(super) fn with_gpu<R>(&self, f: impl FnOnce(&Window, &Gpu<'_>) -> R) -> Option<R> {
        self.entry
            .as_ref()
            .map(|entry| entry.with(|fields| f(fields.window, fields.gpu)))
    }

    pub(super) fn with_gpu_mut<R>(
        &mut self,
        f: impl FnOnce(&Window, &mut Gpu<'_>) -> R,
    ) -> Option<R> {
        self.entry
            .as_mut()
            .map(|entry| entry.with_mut(|fields| f(fields.window, fields.gpu)))
    }

    fn create_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_resizable(false);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = &self.gpu_init;
        WindowEntryTryBuilder {
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }
}

impl ApplicationHandler for Host {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
        if self.entry.is_some() || self.init_error.is_some() {
            return;
        }

        match self.create_entry(event_loop) {
            Ok(entry) => {
                log::info!(
                    "window opened: \"{}\" {}x{}",
                    self.config.title,
                    self.config.width,
                    self.config.height
                );
                self.entry = Some(entry);
            }
            Err(e) => {
                log::error!("failed to open window: {e:#}");
                self.init_error = Some(e);
            }
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        if let Some(ev) = entry.with_window(|w| translate_window_event(w, &event)) {
            self.input.apply_event(&ev);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::debug!("close requested");
                self.close_requested = true;
            }
            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            }
            _ => {}
        }
    }
}
