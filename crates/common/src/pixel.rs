//! RGBA8 pixel sample.

use serde::{Deserialize, Serialize};

/// One RGBA sample, 8 bits per channel, unpremultiplied.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque gray with `value` in all color channels.
    pub const fn gray(value: u8, a: u8) -> Self {
        Self::new(value, value, value, a)
    }

    /// Build from an `[r, g, b, a]` slice of at least four bytes.
    #[inline]
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    #[inline]
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Same pixel with r, g and b replaced by `value`; alpha kept.
    #[inline]
    pub fn with_gray(self, value: u8) -> Self {
        Self::gray(value, self.a)
    }
}

impl From<[u8; 4]> for Pixel {
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Pixel> for [u8; 4] {
    fn from(p: Pixel) -> Self {
        p.to_array()
    }
}

/// Clamp an `f32` to [0, 255] and truncate it into a channel.
#[inline(always)]
pub fn clamp_u8(val: f32) -> u8 {
    if val.is_nan() {
        0
    } else {
        val.clamp(0.0, 255.0) as u8
    }
}

/// Clamp an `i32` to [0, 255].
#[inline(always)]
pub fn clamp_u8_i32(val: i32) -> u8 {
    val.clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_transparent_black() {
        assert_eq!(Pixel::default(), Pixel::TRANSPARENT);
    }

    #[test]
    fn array_conversions() {
        let p = Pixel::from([1, 2, 3, 4]);
        assert_eq!(p, Pixel::new(1, 2, 3, 4));
        let arr: [u8; 4] = p.into();
        assert_eq!(arr, [1, 2, 3, 4]);
        assert_eq!(Pixel::from_slice(&[9, 8, 7, 6, 5]), Pixel::new(9, 8, 7, 6));
    }

    #[test]
    fn with_gray_keeps_alpha() {
        let p = Pixel::new(10, 20, 30, 40).with_gray(99);
        assert_eq!(p, Pixel::new(99, 99, 99, 40));
    }

    #[test]
    fn clamping() {
        assert_eq!(clamp_u8(-3.0), 0);
        assert_eq!(clamp_u8(254.9), 254);
        assert_eq!(clamp_u8(1000.0), 255);
        assert_eq!(clamp_u8(f32::NAN), 0);
        assert_eq!(clamp_u8_i32(-1), 0);
        assert_eq!(clamp_u8_i32(300), 255);
        assert_eq!(clamp_u8_i32(17), 17);
    }
}
