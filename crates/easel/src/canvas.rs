use rand::SeedableRng;
use rand::rngs::StdRng;

use easel_engine::backend::Backend;
use easel_engine::window::WgpuBackend;

use crate::frame_loop::LoopState;
use crate::input::InputSnapshot;
use crate::session::Session;
use crate::style::Style;
use crate::transform::TransformStack;
use crate::DEFAULT_TARGET_FPS;

/// The sketch runtime context.
///
/// Owns the backend and every piece of mutable runtime state. Sketch
/// callbacks receive it as `&mut Canvas<B>`; all drawing, style, transform,
/// image and input operations are methods on it.
pub struct Canvas<B: Backend = WgpuBackend> {
    pub(crate) backend: B,
    pub(crate) session: Session,
    pub(crate) input: InputSnapshot,
    pub(crate) style: Style,
    pub(crate) transform: TransformStack,
    pub(crate) state: LoopState,
    pub(crate) target_fps: u32,
    pub(crate) exit_requested: bool,
    pub(crate) rng: StdRng,
}

impl<B: Backend> Canvas<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            session: Session::default(),
            input: InputSnapshot::default(),
            style: Style::default(),
            transform: TransformStack::default(),
            state: LoopState::Uninitialized,
            target_fps: DEFAULT_TARGET_FPS,
            exit_requested: false,
            rng: StdRng::from_entropy(),
        }
    }

    /// Sets the frame rate applied when the window opens.
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn transform(&self) -> &TransformStack {
        &self.transform
    }

    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Changes the target frame rate, live if the window is open.
    pub fn frame_rate(&mut self, fps: u32) {
        self.target_fps = fps;
        if self.session.is_realized() {
            self.backend.set_target_fps(fps);
        }
    }

    /// Stops the frame loop after the current iteration.
    pub fn exit(&mut self) {
        log::debug!("exit requested by sketch");
        self.exit_requested = true;
    }
}

impl<B: Backend + Default> Default for Canvas<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}
