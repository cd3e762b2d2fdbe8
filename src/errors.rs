use thiserror::Error;

use crate::color::Color;
use crate::pixels::PixelFormat;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageBufferError {
    #[error("Size of buffer is smaller than required")]
    InvalidBufferSize,
    #[error("Palette of an indexed image can't hold more than 256 colors")]
    PaletteTooLarge,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelBufferError {
    #[error("Pixel format {0} is not supported by this operation")]
    UnsupportedPixelFormat(&'static str),
    #[error("Color {0} is not present in the palette of the image")]
    ColorNotInPalette(Color),
    #[error("Algorithm is used incorrectly: {0}")]
    AlgorithmMisuse(&'static str),
}

impl PixelBufferError {
    pub(crate) fn unsupported(format: PixelFormat) -> Self {
        Self::UnsupportedPixelFormat(format.name())
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionError {
    #[error("Region has zero area")]
    EmptyArea,
    #[error("Region is out of the image boundaries")]
    OutOfImageBoundaries,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectError {
    #[error(transparent)]
    PixelBuffer(#[from] PixelBufferError),
    #[error(transparent)]
    Region(#[from] RegionError),
    #[error(transparent)]
    ImageBuffer(#[from] ImageBufferError),
    #[error("Rotation by {0} degrees is not supported")]
    UnsupportedAngle(i32),
    #[error("Invalid value of parameter: {0}")]
    InvalidParameter(&'static str),
    #[error("Failed to scale image")]
    ScaleFailed,
}

/// Failure of one effect inside a chain of effects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Effect #{index} ({effect}) failed on {width}x{height} image: {source}")]
pub struct ChainError {
    pub index: usize,
    pub effect: &'static str,
    pub width: u32,
    pub height: u32,
    pub source: EffectError,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Can't parse rectangle from {0:?}, expected \"left,top,width,height\"")]
pub struct ParseRectangleError(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Can't parse color from {0:?}, expected \"#RRGGBB\" or \"#AARRGGBB\"")]
pub struct ParseColorError(pub String);
