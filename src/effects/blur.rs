use log::trace;

use super::{direct_color_copy, Effect, EffectOutput};
use crate::algorithms::apply_box_blur;
use crate::buffer::PixelBuffer;
use crate::image::Image;
use crate::raster::Raster;
use crate::EffectError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurEffect {
    radius: u32,
}

impl Default for BlurEffect {
    fn default() -> Self {
        Self { radius: 3 }
    }
}

impl BlurEffect {
    pub fn new(radius: u32) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }
}

/// Blurs the image in place, with the native blur of raster if it has one.
pub(crate) fn blur_image(
    image: &mut Image,
    radius: u32,
    raster: &dyn Raster,
) -> Result<(), EffectError> {
    if raster.native_blur(image, radius)? {
        return Ok(());
    }
    trace!("native blur is not available, using box blur with radius {radius}");
    let mut buffer = PixelBuffer::new(image, None);
    apply_box_blur(&mut buffer, radius)?;
    Ok(())
}

impl Effect for BlurEffect {
    fn name(&self) -> &'static str {
        "blur"
    }

    fn supports_partial_region(&self) -> bool {
        true
    }

    fn apply(&self, image: &Image, raster: &dyn Raster) -> Result<EffectOutput, EffectError> {
        let mut res = direct_color_copy(image);
        blur_image(&mut res, self.radius, raster)?;
        Ok(EffectOutput::in_place(res))
    }
}
