//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The window backend translates platform events into [`InputEvent`]s
//! (see `platform::winit`); the headless backend feeds them from a script.

pub(crate) mod platform;
mod state;
mod types;

pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, MouseButton, MouseButtonState};
