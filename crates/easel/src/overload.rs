//! Argument-shape dispatch for `size`, `background`, `stroke` and `fill`.
//!
//! Each accepted shape is a tuple (or scalar) implementing a conversion
//! trait, so the choice is made at compile time and the call is
//! monomorphized.

use easel_engine::paint::Color;

/// A resolved `size` call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SizeRequest<'a> {
    pub width: i32,
    pub height: i32,
    pub title: Option<&'a str>,
}

/// Argument shapes accepted by `Canvas::size`.
pub trait SizeArgs<'a> {
    fn into_request(self) -> SizeRequest<'a>;
}

impl<'a> SizeArgs<'a> for (i32, i32) {
    fn into_request(self) -> SizeRequest<'a> {
        SizeRequest {
            width: self.0,
            height: self.1,
            title: None,
        }
    }
}

impl<'a> SizeArgs<'a> for (i32, i32, &'a str) {
    fn into_request(self) -> SizeRequest<'a> {
        SizeRequest {
            width: self.0,
            height: self.1,
            title: Some(self.2),
        }
    }
}

impl<'a> SizeArgs<'a> for (i32, i32, &'a String) {
    fn into_request(self) -> SizeRequest<'a> {
        (self.0, self.1, self.2.as_str()).into_request()
    }
}

/// One color channel in 0..=255. Out-of-range values clamp.
pub trait Channel: Copy {
    fn to_channel(self) -> u8;
}

impl Channel for u8 {
    #[inline]
    fn to_channel(self) -> u8 {
        self
    }
}

impl Channel for i32 {
    #[inline]
    fn to_channel(self) -> u8 {
        self.clamp(0, 255) as u8
    }
}

impl Channel for f32 {
    #[inline]
    fn to_channel(self) -> u8 {
        if self.is_nan() {
            return 0;
        }
        self.clamp(0.0, 255.0).round() as u8
    }
}

/// Color argument shapes: a gray level, `(r, g, b)`, `(r, g, b, a)` or a
/// [`Color`]. Gray and RGB are opaque.
pub trait IntoColor {
    fn into_color(self) -> Color;
}

impl IntoColor for Color {
    #[inline]
    fn into_color(self) -> Color {
        self
    }
}

impl<C: Channel> IntoColor for C {
    #[inline]
    fn into_color(self) -> Color {
        Color::gray(self.to_channel())
    }
}

impl<C: Channel> IntoColor for (C, C, C) {
    #[inline]
    fn into_color(self) -> Color {
        Color::rgb(self.0.to_channel(), self.1.to_channel(), self.2.to_channel())
    }
}

impl<C: Channel> IntoColor for (C, C, C, C) {
    #[inline]
    fn into_color(self) -> Color {
        Color::rgba(
            self.0.to_channel(),
            self.1.to_channel(),
            self.2.to_channel(),
            self.3.to_channel(),
        )
    }
}
