//! Pixel formats and fixed-size memory layouts of pixels.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// One byte with index of a color in the palette of image.
    Indexed8,
    /// Three bytes per pixel in `R, G, B` order.
    Rgb24,
    /// Four bytes per pixel in `R, G, B, X` order, the fourth byte is unused.
    Rgb32,
    /// Four bytes per pixel in `R, G, B, A` order with straight alpha.
    Argb32,
}

impl PixelFormat {
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Indexed8 => 1,
            Self::Rgb24 => 3,
            Self::Rgb32 | Self::Argb32 => 4,
        }
    }

    #[inline]
    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::Argb32)
    }

    #[inline]
    pub fn is_indexed(&self) -> bool {
        matches!(self, Self::Indexed8)
    }

    /// Formats that may be used as a target of cloning or drawing.
    #[inline]
    pub fn is_supported_target(&self) -> bool {
        !self.is_indexed()
    }

    /// Bytes per row, rounded up to a multiple of 4 bytes.
    #[inline]
    pub fn stride(&self, width: u32) -> usize {
        (width as usize * self.bytes_per_pixel() + 3) & !3
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Indexed8 => "Indexed8",
            Self::Rgb24 => "Rgb24",
            Self::Rgb32 => "Rgb32",
            Self::Argb32 => "Argb32",
        }
    }
}

/// Fixed-size layout of a direct-color pixel.
///
/// Generic code over this trait compiles into separate monomorphic
/// inner loops for every format.
pub trait PixelLayout: Copy + 'static {
    const FORMAT: PixelFormat;
    const SIZE: usize;
    const HAS_ALPHA: bool;

    /// Reads pixel from `bytes` into `[R, G, B, A]`.
    fn read(bytes: &[u8]) -> [u8; 4];

    /// Writes `[R, G, B, A]` into `bytes`.
    fn write(bytes: &mut [u8], rgba: [u8; 4]);
}

macro_rules! pixel_layout {
    ($name:ident, $format:expr, $size:literal, alpha: $alpha:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl PixelLayout for $name {
            const FORMAT: PixelFormat = $format;
            const SIZE: usize = $size;
            const HAS_ALPHA: bool = $alpha;

            #[inline(always)]
            fn read(bytes: &[u8]) -> [u8; 4] {
                let a = if $alpha { bytes[3] } else { 255 };
                [bytes[0], bytes[1], bytes[2], a]
            }

            #[inline(always)]
            fn write(bytes: &mut [u8], rgba: [u8; 4]) {
                bytes[..3].copy_from_slice(&rgba[..3]);
                if $size == 4 {
                    bytes[3] = if $alpha { rgba[3] } else { 255 };
                }
            }
        }
    };
}

pixel_layout!(Rgb24, PixelFormat::Rgb24, 3, alpha: false);
pixel_layout!(Rgb32, PixelFormat::Rgb32, 4, alpha: false);
pixel_layout!(Argb32, PixelFormat::Argb32, 4, alpha: true);
