//! Paint model shared between the runtime and the backends.
//!
//! Sketches speak straight-alpha sRGB bytes; the GPU backend converts to
//! linear premultiplied floats at tessellation time.

mod color;

pub use color::Color;
