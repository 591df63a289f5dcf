/// Straight-alpha sRGB color with 8-bit channels.
///
/// This is the color type sketches pass to `stroke`, `fill` and `background`.
/// Conversion to the GPU representation happens in [`Color::to_linear_premul`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Fully transparent black; the per-frame clear color.
    pub const BLANK: Self = Self::rgba(0, 0, 0, 0);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::rgba(v, v, v, 255)
    }

    /// Linear premultiplied RGBA, the layout expected by the batch shader
    /// and by wgpu clear colors.
    #[inline]
    pub fn to_linear_premul(self) -> [f32; 4] {
        let a = self.a as f32 / 255.0;
        [
            srgb_to_linear(self.r) * a,
            srgb_to_linear(self.g) * a,
            srgb_to_linear(self.b) * a,
            a,
        ]
    }
}

#[inline]
fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_and_blank_are_exact() {
        assert_eq!(Color::WHITE.to_linear_premul(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(Color::BLANK.to_linear_premul(), [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn mid_gray_is_darker_in_linear_space() {
        let [r, g, b, a] = Color::gray(128).to_linear_premul();
        assert!((r - 0.2158).abs() < 1e-3);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(a, 1.0);
    }

    #[test]
    fn alpha_premultiplies_rgb() {
        let [r, _, _, a] = Color::rgba(255, 0, 0, 51).to_linear_premul();
        assert!((a - 0.2).abs() < 1e-6);
        assert!((r - a).abs() < 1e-6);
    }
}
