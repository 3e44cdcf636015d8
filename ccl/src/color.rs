//! RGBA fill colors attached to components for display.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    /// Scale all channels by `t`, clamped to [0, 1].
    pub fn lerp(self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * t).round() as u8;
        Self::rgba(scale(self.r), scale(self.g), scale(self.b), scale(self.a))
    }

    /// Opaque color with random RGB channels.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::rgb(rng.random(), rng.random(), rng.random())
    }
}

/// Opaque random color from the thread-local generator.
pub fn random_color() -> Color {
    Color::random(&mut rand::rng())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_constants_are_opaque() {
        for c in [Color::BLACK, Color::WHITE, Color::RED, Color::GRAY] {
            assert_eq!(c.a, 255);
        }
        assert_eq!(Color::gray(7), Color::rgb(7, 7, 7));
    }

    #[test]
    fn test_lerp_clamps() {
        assert_eq!(Color::WHITE.lerp(2.0), Color::WHITE);
        assert_eq!(Color::WHITE.lerp(-1.0), Color::rgba(0, 0, 0, 0));
        assert_eq!(Color::rgb(200, 100, 50).lerp(0.5), Color::rgba(100, 50, 25, 128));
    }

    #[test]
    fn test_random_is_seeded() {
        let a = Color::random(&mut StdRng::seed_from_u64(42));
        let b = Color::random(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(a.a, 255);
        assert_eq!(random_color().a, 255);
    }
}
