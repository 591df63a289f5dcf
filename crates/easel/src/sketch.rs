use easel_engine::backend::Backend;
use easel_engine::window::WgpuBackend;

use crate::canvas::Canvas;

/// A sketch: `setup` runs once after the window opens, `draw` once per frame.
///
/// Implement `Sketch` (the window backend) for a runnable program, or
/// `impl<B: Backend> Sketch<B>` to also drive it headless.
pub trait Sketch<B: Backend = WgpuBackend> {
    fn setup(&mut self, canvas: &mut Canvas<B>);

    fn draw(&mut self, canvas: &mut Canvas<B>);
}
