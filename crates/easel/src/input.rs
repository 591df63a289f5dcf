use easel_engine::backend::Backend;
use easel_engine::coords::Vec2;
use easel_engine::input::{Key, MouseButton};

use crate::canvas::Canvas;

/// The pointer button a sketch sees. When several are held the first of
/// Left, Right, Middle wins.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PointerButton {
    #[default]
    None,
    Left,
    Right,
    Middle,
}

/// Input as sampled at the start of the current frame.
///
/// Overwritten once per frame before `draw`; `frame_count` only grows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub pointer_x: f32,
    pub pointer_y: f32,
    /// Previous frame's pointer, truncated. `(0, 0)` on the first frame.
    pub prev_pointer_x: i32,
    pub prev_pointer_y: i32,
    pub button: PointerButton,
    /// Any key held.
    pub key_active: bool,
    pub frame_count: u64,

    last_pointer: Vec2,
}

impl InputSnapshot {
    pub(crate) fn refresh<B: Backend>(&mut self, backend: &B) {
        let p = backend.pointer_position();

        self.prev_pointer_x = self.last_pointer.x as i32;
        self.prev_pointer_y = self.last_pointer.y as i32;
        self.pointer_x = p.x;
        self.pointer_y = p.y;
        self.last_pointer = p;

        self.button = if backend.button_down(MouseButton::Left) {
            PointerButton::Left
        } else if backend.button_down(MouseButton::Right) {
            PointerButton::Right
        } else if backend.button_down(MouseButton::Middle) {
            PointerButton::Middle
        } else {
            PointerButton::None
        };

        self.key_active = backend.any_key_down();
    }
}

impl<B: Backend> Canvas<B> {
    pub fn mouse_x(&self) -> f32 {
        self.input.pointer_x
    }

    pub fn mouse_y(&self) -> f32 {
        self.input.pointer_y
    }

    pub fn pmouse_x(&self) -> i32 {
        self.input.prev_pointer_x
    }

    pub fn pmouse_y(&self) -> i32 {
        self.input.prev_pointer_y
    }

    pub fn mouse_button(&self) -> PointerButton {
        self.input.button
    }

    /// Left, right or middle button held this frame.
    pub fn mouse_pressed(&self) -> bool {
        self.input.button != PointerButton::None
    }

    /// Any key held this frame.
    pub fn key_pressed(&self) -> bool {
        self.input.key_active
    }

    /// Whether `key` is held right now (not frame-sampled).
    pub fn key_down(&self, key: Key) -> bool {
        self.backend.key_down(key)
    }

    /// Frames completed so far; `0` during the first `draw`.
    pub fn frame_count(&self) -> u64 {
        self.input.frame_count
    }
}

#[cfg(test)]
mod tests {
    use easel_engine::backend::HeadlessBackend;
    use easel_engine::input::{InputEvent, KeyState, MouseButtonState};

    use super::*;

    fn press(button: MouseButton) -> InputEvent {
        InputEvent::PointerButton {
            button,
            state: MouseButtonState::Pressed,
        }
    }

    #[test]
    fn previous_pointer_lags_one_frame_and_starts_at_origin() {
        let mut b = HeadlessBackend::new();
        let mut s = InputSnapshot::default();

        b.inject(InputEvent::PointerMoved { x: 10.7, y: 20.2 });
        s.refresh(&b);
        assert_eq!((s.pointer_x, s.pointer_y), (10.7, 20.2));
        assert_eq!((s.prev_pointer_x, s.prev_pointer_y), (0, 0));

        b.inject(InputEvent::PointerMoved { x: 30.0, y: 40.0 });
        s.refresh(&b);
        assert_eq!((s.prev_pointer_x, s.prev_pointer_y), (10, 20));
    }

    #[test]
    fn button_priority_is_left_right_middle() {
        let mut b = HeadlessBackend::new();
        let mut s = InputSnapshot::default();

        b.inject(press(MouseButton::Middle));
        s.refresh(&b);
        assert_eq!(s.button, PointerButton::Middle);

        b.inject(press(MouseButton::Right));
        s.refresh(&b);
        assert_eq!(s.button, PointerButton::Right);

        b.inject(press(MouseButton::Left));
        s.refresh(&b);
        assert_eq!(s.button, PointerButton::Left);
    }

    #[test]
    fn other_buttons_do_not_count_as_pressed() {
        let mut b = HeadlessBackend::new();
        b.inject(press(MouseButton::Other(4)));
        let mut c = Canvas::new(b);
        c.input.refresh(&c.backend);
        assert!(!c.mouse_pressed());
    }

    #[test]
    fn any_held_key_sets_key_active() {
        let mut b = HeadlessBackend::new();
        let mut s = InputSnapshot::default();
        b.inject(InputEvent::Key {
            key: Key::Q,
            state: KeyState::Pressed,
            repeat: false,
        });
        s.refresh(&b);
        assert!(s.key_active);
    }
}
