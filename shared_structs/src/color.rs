use std::ops::{Add, AddAssign, Mul, MulAssign};

/// Four linear-space scalars. Transport code keeps every component finite
/// and non-negative; clamping only ever happens at output time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::splat3(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::splat3(1.0, 1.0, 1.0);

    /// The documented "missing texture" sentinel color.
    pub const MISSING_TEXTURE: Color = Color {
        r: 1.0,
        g: 0.0,
        b: 0.5,
        a: 1.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn splat3(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Replace any non-finite component with zero, per the integrator's
    /// NaN-clamping policy.
    pub fn mask_nan(self) -> Color {
        Color {
            r: if self.r.is_finite() { self.r } else { 0.0 },
            g: if self.g.is_finite() { self.g } else { 0.0 },
            b: if self.b.is_finite() { self.b } else { 0.0 },
            a: if self.a.is_finite() { self.a } else { 0.0 },
        }
    }

    /// Component-wise multiply (throughput composition along a path).
    pub fn attenuate(self, by: Color) -> Color {
        Color::new(self.r * by.r, self.g * by.g, self.b * by.b, self.a * by.a)
    }

    pub fn to_srgb(self) -> Color {
        Color::new(
            linear_to_srgb(self.r),
            linear_to_srgb(self.g),
            linear_to_srgb(self.b),
            self.a,
        )
    }

    pub fn from_srgb(self) -> Color {
        Color::new(
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
            self.a,
        )
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        let clamp = |c: f32| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        [clamp(self.r), clamp(self.g), clamp(self.b)]
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    c.max(0.0).powf(1.0 / 2.2)
}

fn srgb_to_linear(c: f32) -> f32 {
    c.max(0.0).powf(2.2)
}

impl Add for Color {
    type Output = Color;
    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b, self.a + rhs.a)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        *self = *self + rhs;
    }
}

impl Mul<f32> for Color {
    type Output = Color;
    fn mul(self, rhs: f32) -> Color {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs, self.a * rhs)
    }
}

impl MulAssign<f32> for Color {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_exact_componentwise() {
        let a = Color::new(0.5, 0.25, 0.125, 1.0);
        let b = Color::new(0.5, 0.25, 0.125, 1.0);
        assert_eq!(a, b);
        let c = Color::new(0.5, 0.25, 0.125, 0.999_999);
        assert_ne!(a, c);
    }

    #[test]
    fn mask_nan_clamps_to_zero() {
        let c = Color::new(f32::NAN, 1.0, f32::INFINITY, -f32::INFINITY);
        let masked = c.mask_nan();
        assert_eq!(masked, Color::new(0.0, 1.0, 0.0, 0.0));
    }

    #[test]
    fn srgb_round_trip_is_close() {
        let c = Color::splat3(0.18, 0.5, 0.8);
        let round_tripped = c.to_srgb().from_srgb();
        assert!((c.r - round_tripped.r).abs() < 1e-4);
        assert!((c.g - round_tripped.g).abs() < 1e-4);
        assert!((c.b - round_tripped.b).abs() < 1e-4);
    }
}
