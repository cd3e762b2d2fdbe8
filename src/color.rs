use std::fmt;
use std::str::FromStr;

use crate::ParseColorError;

/// Straight (not premultiplied) 8-bit ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const TRANSPARENT: Self = Self::from_argb(0, 255, 255, 255);

    #[inline]
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(255, r, g, b)
    }

    /// Color from bytes in `[R, G, B, A]` order.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::from_argb(bytes[3], bytes[0], bytes[1], bytes[2])
    }

    /// Bytes of color in `[R, G, B, A]` order.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Returns `true` if the color is not fully transparent.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.a != 0
    }

    /// Mean absolute difference of RGB channels.
    pub fn rgb_distance(&self, other: &Self) -> u32 {
        let d = |a: u8, b: u8| (a as i32 - b as i32).unsigned_abs();
        (d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)) / 3
    }

    /// Average of all channels of given colors.
    ///
    /// Returns `None` if there are no colors.
    pub fn mix<I>(colors: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut sum = [0u64; 4];
        let mut count = 0u64;
        for color in colors {
            for (s, c) in sum.iter_mut().zip(color.to_bytes()) {
                *s += c as u64;
            }
            count += 1;
        }
        if count == 0 {
            return None;
        }
        Some(Self::from_bytes(sum.map(|s| (s / count) as u8)))
    }
}

/// Formats color as `#AARRGGBB`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.a, self.r, self.g, self.b
        )
    }
}

/// Parses `#RRGGBB` or `#AARRGGBB` (the leading `#` is optional).
impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let value = u32::from_str_radix(hex, 16).map_err(|_| ParseColorError(s.to_string()))?;
        let [a, r, g, b] = value.to_be_bytes();
        match hex.len() {
            6 => Ok(Self::from_rgb(r, g, b)),
            8 => Ok(Self::from_argb(a, r, g, b)),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}
