use super::{direct_color_copy, Effect, EffectOutput};
use crate::algorithms::mix_colors;
use crate::buffer::PixelBuffer;
use crate::image::Image;
use crate::raster::Raster;
use crate::EffectError;

/// Replaces squares of pixels by their average color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelateEffect {
    pixel_size: u32,
}

impl Default for PixelateEffect {
    fn default() -> Self {
        Self { pixel_size: 5 }
    }
}

impl PixelateEffect {
    pub fn new(pixel_size: u32) -> Self {
        Self { pixel_size }
    }

    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }
}

impl Effect for PixelateEffect {
    fn name(&self) -> &'static str {
        "pixelate"
    }

    fn supports_partial_region(&self) -> bool {
        true
    }

    fn apply(&self, image: &Image, _raster: &dyn Raster) -> Result<EffectOutput, EffectError> {
        let pixel_size = self
            .pixel_size
            .min(image.width())
            .min(image.height());
        let mut res = direct_color_copy(image);
        let mut buffer = PixelBuffer::new(&mut res, None);
        mix_colors(&mut buffer, pixel_size)?;
        drop(buffer);
        Ok(EffectOutput::in_place(res))
    }
}
