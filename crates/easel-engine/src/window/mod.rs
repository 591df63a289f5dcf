//! Window backend.
//!
//! Owns the winit event loop and window and wires them to the GPU layer.
//! The loop is pumped (`pump_app_events`) rather than run, so the sketch
//! runtime keeps control of its own frame loop.

mod backend;
mod host;

pub use backend::WgpuBackend;

/// Window configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    /// Inner width in logical pixels.
    pub width: u32,
    /// Inner height in logical pixels.
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "easel".to_string(),
            width: 800,
            height: 450,
        }
    }
}
