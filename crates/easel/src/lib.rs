//! easel: an immediate-mode sketch runtime.
//!
//! A sketch implements [`Sketch`] (`setup` once, `draw` every frame) and
//! draws through the [`Canvas`] it is handed:
//!
//! ```no_run
//! use easel::prelude::*;
//!
//! struct Hello;
//!
//! impl Sketch for Hello {
//!     fn setup(&mut self, c: &mut Canvas) {
//!         c.size((640, 360, "hello"));
//!     }
//!
//!     fn draw(&mut self, c: &mut Canvas) {
//!         c.background(30);
//!         c.fill((255, 120, 0));
//!         c.ellipse(c.mouse_x(), c.mouse_y(), 20.0, 20.0);
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     easel::run(&mut Hello)
//! }
//! ```
//!
//! All runtime state (session, style, transforms, input snapshot) lives in
//! the `Canvas`; the platform is reached only through
//! [`easel_engine::backend::Backend`].

mod canvas;
mod draw;
mod frame_loop;
mod image;
mod input;
mod overload;
mod session;
mod sketch;
mod style;
mod transform;
mod util;

use anyhow::Result;

pub use easel_engine as engine;
pub use easel_engine::backend::{Backend, HeadlessBackend};
pub use easel_engine::device::GpuInit;
pub use easel_engine::input::Key;
pub use easel_engine::logging::LoggingConfig;
pub use easel_engine::paint::Color;
pub use easel_engine::window::WgpuBackend;

pub use canvas::Canvas;
pub use frame_loop::LoopState;
pub use image::Image;
pub use input::{InputSnapshot, PointerButton};
pub use overload::{Channel, IntoColor, SizeArgs, SizeRequest};
pub use session::Session;
pub use sketch::Sketch;
pub use style::{AnchorMode, Style};
pub use transform::TransformStack;

/// Frame rate `run` targets unless configured otherwise.
pub const DEFAULT_TARGET_FPS: u32 = 60;

/// Options for [`run_with_config`].
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Frames per second; `0` runs unpaced.
    pub target_fps: u32,
    pub gpu: GpuInit,
    pub logging: LoggingConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            gpu: GpuInit::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Runs `sketch` in a window with default settings until the window closes.
pub fn run<S: Sketch>(sketch: &mut S) -> Result<()> {
    run_with_config(sketch, RunConfig::default())
}

/// Runs `sketch` in a window until the window closes.
///
/// Initializes logging, opens the window, calls `setup` once, then `draw`
/// every frame. Window or GPU initialization failures are returned.
pub fn run_with_config<S: Sketch>(sketch: &mut S, config: RunConfig) -> Result<()> {
    easel_engine::logging::init_logging(config.logging);
    let mut canvas =
        Canvas::new(WgpuBackend::new(config.gpu)).with_target_fps(config.target_fps);
    canvas.run(sketch)
}

pub mod prelude {
    pub use crate::{
        AnchorMode, Canvas, Color, Image, IntoColor, Key, PointerButton, RunConfig, Sketch,
        run, run_with_config,
    };
}
