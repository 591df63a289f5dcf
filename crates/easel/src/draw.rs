use easel_engine::backend::Backend;
use easel_engine::coords::{Rect, Vec2};
use easel_engine::paint::Color;

use crate::canvas::Canvas;
use crate::overload::IntoColor;
use crate::style::AnchorMode;

impl<B: Backend> Canvas<B> {
    /// Clears the whole frame: `background(v)`, `background((r, g, b))`,
    /// `background((r, g, b, a))` or `background(Color)`.
    pub fn background(&mut self, color: impl IntoColor) {
        self.backend.clear(color.into_color());
    }

    pub fn point(&mut self, x: f32, y: f32) {
        let color = self.style.line_color();
        self.backend
            .draw_point(self.transform.current(), Vec2::new(x, y), color);
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let color = self.style.line_color();
        self.backend.draw_line(
            self.transform.current(),
            Vec2::new(x1, y1),
            Vec2::new(x2, y2),
            color,
        );
    }

    /// Rectangle at `x, y` (corner or center, see `rect_mode`).
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let rect = match self.style.anchor {
            AnchorMode::Corner => Rect::new(x, y, w, h),
            AnchorMode::Center => Rect::from_center(x, y, w, h),
        };
        let xf = self.transform.current();
        if let Some(fill) = self.style.fill_color() {
            self.backend.fill_rect(xf, rect, fill);
        }
        if let Some(stroke) = self.style.stroke_color() {
            self.backend.stroke_rect(xf, rect, stroke);
        }
    }

    /// Ellipse centered on `cx, cy` with radii `rx, ry`.
    pub fn ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32) {
        let (center, radii) = (Vec2::new(cx, cy), Vec2::new(rx, ry));
        let xf = self.transform.current();
        if let Some(fill) = self.style.fill_color() {
            self.backend.fill_ellipse(xf, center, radii, fill);
        }
        if let Some(stroke) = self.style.stroke_color() {
            self.backend.stroke_ellipse(xf, center, radii, stroke);
        }
    }

    pub fn triangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
        let pts = [Vec2::new(x1, y1), Vec2::new(x2, y2), Vec2::new(x3, y3)];
        let xf = self.transform.current();
        if let Some(fill) = self.style.fill_color() {
            self.backend.fill_triangle(xf, pts, fill);
        }
        if let Some(stroke) = self.style.stroke_color() {
            self.outline(pts, stroke);
        }
    }

    fn outline(&mut self, pts: [Vec2; 3], color: Color) {
        let xf = self.transform.current();
        for i in 0..3 {
            self.backend.draw_line(xf, pts[i], pts[(i + 1) % 3], color);
        }
    }
}

#[cfg(test)]
mod tests {
    use easel_engine::backend::{BackendCall, HeadlessBackend};
    use easel_engine::coords::Affine;

    use super::*;

    fn canvas() -> Canvas<HeadlessBackend> {
        Canvas::new(HeadlessBackend::new())
    }

    #[test]
    fn rect_fills_then_strokes() {
        let mut c = canvas();
        c.rect(1.0, 2.0, 3.0, 4.0);
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(
            c.backend().calls(),
            &[
                BackendCall::FillRect { xf: Affine::IDENTITY, rect: r, color: Color::WHITE },
                BackendCall::StrokeRect { xf: Affine::IDENTITY, rect: r, color: Color::BLACK },
            ]
        );
    }

    #[test]
    fn centered_rect_equals_shifted_corner_rect() {
        let mut centered = canvas();
        centered.rect_mode(AnchorMode::Center);
        centered.rect(50.0, 40.0, 20.0, 10.0);

        let mut corner = canvas();
        corner.rect(40.0, 35.0, 20.0, 10.0);

        assert_eq!(centered.backend().calls(), corner.backend().calls());
    }

    #[test]
    fn disabled_fill_and_stroke_draw_nothing() {
        let mut c = canvas();
        c.no_fill();
        c.no_stroke();
        c.rect(0.0, 0.0, 10.0, 10.0);
        c.ellipse(0.0, 0.0, 5.0, 5.0);
        c.triangle(0.0, 0.0, 1.0, 0.0, 0.0, 1.0);
        assert!(c.backend().calls().is_empty());
    }

    #[test]
    fn points_and_lines_fall_back_to_white() {
        let mut c = canvas();
        c.no_stroke();
        c.point(1.0, 1.0);
        c.line(0.0, 0.0, 5.0, 5.0);
        let colors: Vec<Color> = c
            .backend()
            .calls()
            .iter()
            .filter_map(|call| match call {
                BackendCall::Point { color, .. } | BackendCall::Line { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![Color::WHITE, Color::WHITE]);
    }

    #[test]
    fn triangle_outline_is_three_lines() {
        let mut c = canvas();
        c.no_fill();
        c.stroke((255, 0, 0));
        c.triangle(0.0, 0.0, 10.0, 0.0, 0.0, 10.0);
        let lines: Vec<(Vec2, Vec2)> = c
            .backend()
            .calls()
            .iter()
            .filter_map(|call| match call {
                BackendCall::Line { a, b, .. } => Some((*a, *b)),
                _ => None,
            })
            .collect();
        assert_eq!(
            lines,
            vec![
                (Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)),
                (Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)),
                (Vec2::new(0.0, 10.0), Vec2::new(0.0, 0.0)),
            ]
        );
    }

    #[test]
    fn draws_carry_the_current_transform() {
        let mut c = canvas();
        c.translate(5.0, 6.0);
        c.ellipse(0.0, 0.0, 1.0, 2.0);
        match &c.backend().calls()[0] {
            BackendCall::FillEllipse { xf, center, radii, .. } => {
                assert_eq!(*xf, Affine::from_translation(5.0, 6.0));
                assert_eq!(*center, Vec2::zero());
                assert_eq!(*radii, Vec2::new(1.0, 2.0));
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn background_overloads_agree() {
        let mut c = canvas();
        c.background(51);
        c.background((51, 51, 51));
        c.background((51, 51, 51, 255));
        c.background(Color::gray(51));
        let clears: Vec<&BackendCall> = c.backend().calls().iter().collect();
        assert!(clears.iter().all(|call| **call == BackendCall::Clear(Color::gray(51))));
        assert_eq!(clears.len(), 4);
    }
}
