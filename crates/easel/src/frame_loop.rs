use anyhow::{bail, Context, Result};

use easel_engine::backend::Backend;
use easel_engine::paint::Color;

use crate::canvas::Canvas;
use crate::sketch::Sketch;

/// Where a canvas is in its one-shot lifecycle.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum LoopState {
    /// `run` not called yet.
    #[default]
    Uninitialized,
    /// Window open, `setup` called, no frame drawn yet.
    Initialized,
    /// At least one frame drawn.
    Running,
    /// Loop finished and window released. Terminal.
    Terminated,
}

impl<B: Backend> Canvas<B> {
    /// Opens the window, calls `setup` once, then draws frames until the
    /// backend reports a close request or the sketch calls [`Canvas::exit`].
    ///
    /// A canvas runs once: calling `run` again is an error. Panics in
    /// sketch callbacks are not caught.
    pub fn run<S: Sketch<B> + ?Sized>(&mut self, sketch: &mut S) -> Result<()> {
        if self.state != LoopState::Uninitialized {
            bail!("canvas already ran (state {:?}); a canvas runs once", self.state);
        }

        let config = self.session.window_config();
        if let Err(e) = self.backend.open_window(&config) {
            self.state = LoopState::Terminated;
            return Err(e).context("failed to open the sketch window");
        }
        self.session.mark_realized();
        self.backend.set_target_fps(self.target_fps);
        self.state = LoopState::Initialized;
        log::info!(
            "sketch started: \"{}\" {}x{} at {} fps",
            config.title,
            config.width,
            config.height,
            self.target_fps
        );

        sketch.setup(self);

        while !self.exit_requested && !self.backend.should_close() {
            self.step(sketch);
        }

        self.backend.close_window();
        self.state = LoopState::Terminated;
        log::info!("sketch finished after {} frames", self.input.frame_count);
        Ok(())
    }

    /// One loop iteration.
    fn step<S: Sketch<B> + ?Sized>(&mut self, sketch: &mut S) {
        self.state = LoopState::Running;
        self.input.refresh(&self.backend);
        self.transform.reset();

        self.backend.begin_frame();
        self.backend.clear(Color::BLANK);
        sketch.draw(self);
        self.backend.end_frame();

        self.input.frame_count += 1;
    }
}
