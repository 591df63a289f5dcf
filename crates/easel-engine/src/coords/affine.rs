use core::ops::Mul;

use super::Vec2;

/// 2D affine transform in column-major form.
///
/// Maps `(x, y)` to `(a*x + c*y + tx, b*x + d*y + ty)`.
///
/// Composition follows model-stack semantics: `self.translate(..)` applies the
/// translation in the *local* space of `self`, i.e. `self * T`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Affine {
    pub const IDENTITY: Self = Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, tx: 0.0, ty: 0.0 };

    #[inline]
    pub const fn from_translation(dx: f32, dy: f32) -> Self {
        Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, tx: dx, ty: dy }
    }

    #[inline]
    pub const fn from_scale(sx: f32, sy: f32) -> Self {
        Self { a: sx, b: 0.0, c: 0.0, d: sy, tx: 0.0, ty: 0.0 }
    }

    /// Rotation by `degrees`; positive values turn clockwise on a +Y-down screen.
    #[inline]
    pub fn from_rotation_degrees(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self { a: c, b: s, c: -s, d: c, tx: 0.0, ty: 0.0 }
    }

    #[inline]
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        self * Self::from_translation(dx, dy)
    }

    #[inline]
    pub fn rotate(self, degrees: f32) -> Self {
        self * Self::from_rotation_degrees(degrees)
    }

    #[inline]
    pub fn scale(self, sx: f32, sy: f32) -> Self {
        self * Self::from_scale(sx, sy)
    }

    #[inline]
    pub fn transform_point(self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    #[inline]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// Component-wise comparison within `eps`.
    pub fn approx_eq(self, other: Affine, eps: f32) -> bool {
        (self.a - other.a).abs() <= eps
            && (self.b - other.b).abs() <= eps
            && (self.c - other.c).abs() <= eps
            && (self.d - other.d).abs() <= eps
            && (self.tx - other.tx).abs() <= eps
            && (self.ty - other.ty).abs() <= eps
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Affine {
    type Output = Affine;

    /// `self * rhs` applies `rhs` first, then `self`.
    #[inline]
    fn mul(self, rhs: Affine) -> Affine {
        Affine {
            a: self.a * rhs.a + self.c * rhs.b,
            b: self.b * rhs.a + self.d * rhs.b,
            c: self.a * rhs.c + self.c * rhs.d,
            d: self.b * rhs.c + self.d * rhs.d,
            tx: self.a * rhs.tx + self.c * rhs.ty + self.tx,
            ty: self.b * rhs.tx + self.d * rhs.ty + self.ty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() <= EPS && (a.y - b.y).abs() <= EPS
    }

    #[test]
    fn identity_leaves_points_alone() {
        let p = Vec2::new(3.0, -7.5);
        assert_eq!(Affine::IDENTITY.transform_point(p), p);
    }

    #[test]
    fn rotation_is_clockwise_on_screen() {
        let r = Affine::from_rotation_degrees(90.0);
        assert!(close(r.transform_point(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn translate_then_rotate_rotates_in_local_space() {
        // Move origin to (100, 0), then rotate: local +X now points down.
        let t = Affine::IDENTITY.translate(100.0, 0.0).rotate(90.0);
        assert!(close(t.transform_point(Vec2::new(10.0, 0.0)), Vec2::new(100.0, 10.0)));
    }

    #[test]
    fn scale_then_translate_scales_the_offset() {
        let t = Affine::IDENTITY.scale(2.0, 3.0).translate(5.0, 5.0);
        assert!(close(t.transform_point(Vec2::zero()), Vec2::new(10.0, 15.0)));
    }

    #[test]
    fn multiplication_is_associative() {
        let a = Affine::from_translation(3.0, 4.0);
        let b = Affine::from_rotation_degrees(30.0);
        let c = Affine::from_scale(2.0, 0.5);
        assert!(((a * b) * c).approx_eq(a * (b * c), EPS));
    }
}
