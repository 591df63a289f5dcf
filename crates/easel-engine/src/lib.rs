//! easel engine crate.
//!
//! Platform + GPU pieces used by the `easel` sketch runtime: the [`backend::Backend`]
//! contract, a wgpu/winit window backend, a headless recording backend, and the
//! geometry, color, input and timing types they share.

pub mod backend;
pub mod coords;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod texture;
pub mod time;
pub mod window;
