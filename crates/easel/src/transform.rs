use easel_engine::backend::Backend;
use easel_engine::coords::Affine;

use crate::canvas::Canvas;

/// Current model transform plus the transforms saved by `push_matrix`.
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    current: Affine,
    saved: Vec<Affine>,
}

impl TransformStack {
    pub fn current(&self) -> Affine {
        self.current
    }

    /// Number of unmatched pushes.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Back to identity with nothing saved. Keeps the allocation.
    pub fn reset(&mut self) {
        self.current = Affine::IDENTITY;
        self.saved.clear();
    }

    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restores the last pushed transform. Returns `false` (and changes
    /// nothing) when there is none.
    pub fn pop(&mut self) -> bool {
        match self.saved.pop() {
            Some(xf) => {
                self.current = xf;
                true
            }
            None => false,
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.current = self.current.translate(dx, dy);
    }

    pub fn rotate(&mut self, degrees: f32) {
        self.current = self.current.rotate(degrees);
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.current = self.current.scale(sx, sy);
    }
}

impl<B: Backend> Canvas<B> {
    pub fn push_matrix(&mut self) {
        self.transform.push();
    }

    /// Restores the transform saved by the matching `push_matrix`.
    /// Without one, logs a warning and does nothing.
    pub fn pop_matrix(&mut self) {
        if !self.transform.pop() {
            log::warn!("pop_matrix without matching push_matrix; ignored");
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.transform.translate(dx, dy);
    }

    /// Rotates by `degrees`, clockwise on screen.
    pub fn rotate(&mut self, degrees: f32) {
        self.transform.rotate(degrees);
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.transform.scale(sx, sy);
    }
}

#[cfg(test)]
mod tests {
    use easel_engine::backend::HeadlessBackend;
    use easel_engine::coords::Vec2;

    use super::*;

    #[test]
    fn pop_restores_exactly_what_push_saved() {
        let mut t = TransformStack::default();
        t.translate(10.0, 5.0);
        let outer = t.current();

        t.push();
        t.rotate(30.0);
        let inner = t.current();

        t.push();
        t.scale(2.0, 3.0);
        t.translate(-4.0, 1.0);

        assert!(t.pop());
        assert_eq!(t.current(), inner);
        assert!(t.pop());
        assert_eq!(t.current(), outer);
        assert_eq!(t.depth(), 0);
    }

    #[test]
    fn unbalanced_pop_is_a_no_op() {
        let mut c = Canvas::new(HeadlessBackend::new());
        c.translate(3.0, 4.0);
        let before = c.transform().current();
        c.pop_matrix();
        assert_eq!(c.transform().current(), before);
    }

    #[test]
    fn operations_compose_on_the_right() {
        let mut c = Canvas::new(HeadlessBackend::new());
        c.translate(100.0, 0.0);
        c.scale(2.0, 2.0);
        let p = c.transform().current().transform_point(Vec2::new(1.0, 1.0));
        assert_eq!(p, Vec2::new(102.0, 2.0));
    }

    #[test]
    fn reset_empties_the_stack() {
        let mut t = TransformStack::default();
        t.push();
        t.push();
        t.rotate(45.0);
        t.reset();
        assert!(t.current().is_identity());
        assert_eq!(t.depth(), 0);
        assert!(!t.pop());
    }
}
