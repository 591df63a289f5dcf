use std::collections::HashSet;

use crate::coords::Vec2;

use super::types::{InputEvent, Key, KeyState, MouseButton, MouseButtonState};

/// Current input state for the sketch window.
///
/// Holds "is down" information and the last known pointer position. The
/// runtime samples this once per frame; nothing here is per-frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Last known pointer position in logical pixels.
    ///
    /// Kept when the pointer leaves the window so sketches keep seeing the
    /// exit position rather than a jump to the origin.
    pub pointer: Vec2,

    /// Whether the pointer is currently over the window.
    pub pointer_inside: bool,

    pub keys_down: HashSet<Key>,

    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::PointerMoved { x, y } => {
                self.pointer = Vec2::new(*x, *y);
                self.pointer_inside = true;
            }

            InputEvent::PointerLeft => {
                self.pointer_inside = false;
            }

            InputEvent::PointerButton { button, state } => match state {
                MouseButtonState::Pressed => {
                    self.buttons_down.insert(*button);
                }
                MouseButtonState::Released => {
                    self.buttons_down.remove(button);
                }
            },

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(*key);
                }
                KeyState::Released => {
                    self.keys_down.remove(key);
                }
            },

            InputEvent::Focused(true) => {}
            InputEvent::Focused(false) => {
                // Releases are not delivered to unfocused windows.
                self.keys_down.clear();
                self.buttons_down.clear();
            }
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn any_key_down(&self) -> bool {
        !self.keys_down.is_empty()
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    #[test]
    fn key_press_and_release_track_held_set() {
        let mut s = InputState::default();
        s.apply_event(&key(Key::Space, KeyState::Pressed));
        assert!(s.key_down(Key::Space));
        assert!(s.any_key_down());

        s.apply_event(&key(Key::Space, KeyState::Released));
        assert!(!s.key_down(Key::Space));
        assert!(!s.any_key_down());
    }

    #[test]
    fn repeat_press_keeps_single_entry() {
        let mut s = InputState::default();
        s.apply_event(&key(Key::A, KeyState::Pressed));
        s.apply_event(&InputEvent::Key { key: Key::A, state: KeyState::Pressed, repeat: true });
        s.apply_event(&key(Key::A, KeyState::Released));
        assert!(!s.any_key_down());
    }

    #[test]
    fn pointer_position_survives_leaving_the_window() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::PointerMoved { x: 12.0, y: 34.0 });
        s.apply_event(&InputEvent::PointerLeft);
        assert_eq!(s.pointer, Vec2::new(12.0, 34.0));
        assert!(!s.pointer_inside);
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::Focused(true));
        s.apply_event(&key(Key::W, KeyState::Pressed));
        s.apply_event(&InputEvent::PointerButton {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
        });

        s.apply_event(&InputEvent::Focused(false));
        assert!(!s.any_key_down());
        assert!(!s.button_down(MouseButton::Left));
    }
}
