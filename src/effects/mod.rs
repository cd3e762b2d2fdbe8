//! Transforms applied to screenshots.
//!
//! Every effect takes the source image by reference and returns a new
//! image together with the offset of the visual origin: effects that grow
//! the canvas (border, shadow) shift the original pixels to the right and
//! down, and overlay elements anchored to the source image must be moved
//! by the same offset.
use std::fmt::Debug;

pub use blur::BlurEffect;
pub use border::BorderEffect;
pub use color_adjust::{GrayscaleEffect, InvertEffect};
pub use drop_shadow::DropShadowEffect;
pub use orientation::{FlipDirection, FlipEffect, RotateEffect};
pub use pixelate::PixelateEffect;
pub use resize::{ResizeCanvasEffect, ResizeEffect};
pub use sharpen::SharpenEffect;
pub use torn_edge::TornEdgeEffect;

use crate::geometry::Point;
use crate::image::Image;
use crate::raster::Raster;
use crate::EffectError;

mod blur;
mod border;
mod color_adjust;
mod drop_shadow;
mod orientation;
mod pixelate;
mod resize;
mod sharpen;
mod torn_edge;

/// Result of applying an effect.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectOutput {
    pub image: Image,
    /// Shift of the visual origin introduced by the effect.
    pub offset: Point,
}

impl EffectOutput {
    pub fn new(image: Image, offset: Point) -> Self {
        Self { image, offset }
    }

    /// Output of an effect that doesn't move the origin.
    pub fn in_place(image: Image) -> Self {
        Self::new(image, Point::ZERO)
    }
}

pub trait Effect: Debug {
    /// Short name of effect used in logs and errors.
    fn name(&self) -> &'static str;

    /// Returns `true` if the effect may be applied to a part of image
    /// (e.g. to a selection) without affecting the rest of it.
    fn supports_partial_region(&self) -> bool;

    fn apply(&self, image: &Image, raster: &dyn Raster) -> Result<EffectOutput, EffectError>;
}

/// Copy of image in a format with direct colors.
#[inline]
pub(crate) fn direct_color_copy(image: &Image) -> Image {
    image.convert(image.clone_format(None))
}

/// Size of canvas that adds `margin` pixels on every side of the image.
///
/// Canvas coordinates are `i32`, so both sides must fit into it.
pub(crate) fn grown_size(
    image: &Image,
    margin: u32,
    too_large: &'static str,
) -> Result<(u32, u32), EffectError> {
    let grow = |side: u32| {
        margin
            .checked_mul(2)
            .and_then(|m| m.checked_add(side))
            .filter(|&v| v <= i32::MAX as u32)
            .ok_or(EffectError::InvalidParameter(too_large))
    };
    Ok((grow(image.width())?, grow(image.height())?))
}
