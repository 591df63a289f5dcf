use easel_engine::backend::Backend;
use easel_engine::paint::Color;

use crate::canvas::Canvas;
use crate::overload::IntoColor;

/// How `rect` interprets its `x, y` arguments.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum AnchorMode {
    /// `x, y` is the top-left corner.
    #[default]
    Corner,
    /// `x, y` is the center.
    Center,
}

/// Drawing style. Persists across frames until changed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Style {
    pub stroke: Color,
    pub stroke_enabled: bool,
    pub fill: Color,
    pub fill_enabled: bool,
    pub anchor: AnchorMode,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: Color::BLACK,
            stroke_enabled: true,
            fill: Color::WHITE,
            fill_enabled: true,
            anchor: AnchorMode::Corner,
        }
    }
}

impl Style {
    /// Color for points and lines: the stroke when enabled, else white.
    pub fn line_color(&self) -> Color {
        if self.stroke_enabled {
            self.stroke
        } else {
            Color::WHITE
        }
    }

    pub fn fill_color(&self) -> Option<Color> {
        self.fill_enabled.then_some(self.fill)
    }

    pub fn stroke_color(&self) -> Option<Color> {
        self.stroke_enabled.then_some(self.stroke)
    }
}

impl<B: Backend> Canvas<B> {
    /// Sets and enables the outline color.
    pub fn stroke(&mut self, color: impl IntoColor) {
        self.style.stroke = color.into_color();
        self.style.stroke_enabled = true;
    }

    pub fn no_stroke(&mut self) {
        self.style.stroke_enabled = false;
    }

    /// Sets and enables the fill color.
    pub fn fill(&mut self, color: impl IntoColor) {
        self.style.fill = color.into_color();
        self.style.fill_enabled = true;
    }

    pub fn no_fill(&mut self) {
        self.style.fill_enabled = false;
    }

    pub fn rect_mode(&mut self, mode: AnchorMode) {
        self.style.anchor = mode;
    }
}

#[cfg(test)]
mod tests {
    use easel_engine::backend::HeadlessBackend;

    use super::*;

    #[test]
    fn initial_style() {
        let s = Style::default();
        assert_eq!(s.stroke_color(), Some(Color::BLACK));
        assert_eq!(s.fill_color(), Some(Color::WHITE));
        assert_eq!(s.anchor, AnchorMode::Corner);
    }

    #[test]
    fn setters_enable_and_disablers_keep_color() {
        let mut c = Canvas::new(HeadlessBackend::new());
        c.no_stroke();
        c.no_fill();
        assert_eq!(c.style().stroke_color(), None);
        assert_eq!(c.style().fill_color(), None);
        assert_eq!(c.style().fill, Color::WHITE);

        c.stroke((255, 0, 0));
        c.fill(128);
        assert_eq!(c.style().stroke_color(), Some(Color::rgb(255, 0, 0)));
        assert_eq!(c.style().fill_color(), Some(Color::gray(128)));
    }

    #[test]
    fn line_color_falls_back_to_white() {
        let mut s = Style::default();
        assert_eq!(s.line_color(), Color::BLACK);
        s.stroke_enabled = false;
        assert_eq!(s.line_color(), Color::WHITE);
    }
}
