use super::{direct_color_copy, Effect, EffectOutput};
use crate::image::Image;
use crate::raster::Raster;
use crate::EffectError;

/// Amplifies the difference between every pixel and its
/// top-left neighbour.
///
/// Neighbours are always read from the unmodified image, so already
/// sharpened pixels don't feed into the next ones and the result
/// doesn't depend on the scan order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharpenEffect {
    depth: f32,
}

impl Default for SharpenEffect {
    fn default() -> Self {
        Self { depth: 0.5 }
    }
}

impl SharpenEffect {
    pub fn new(depth: f32) -> Self {
        Self { depth }
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }
}

impl Effect for SharpenEffect {
    fn name(&self) -> &'static str {
        "sharpen"
    }

    fn supports_partial_region(&self) -> bool {
        true
    }

    fn apply(&self, image: &Image, _raster: &dyn Raster) -> Result<EffectOutput, EffectError> {
        if !self.depth.is_finite() {
            return Err(EffectError::InvalidParameter("depth of sharpen must be finite"));
        }
        let source = direct_color_copy(image);
        let mut res = source.clone();
        for y in 0..source.height() {
            for x in 0..source.width() {
                let current = source.read_pixel(x, y);
                let neighbour = source.read_pixel(x.saturating_sub(1), y.saturating_sub(1));
                let mut rgba = current;
                for c in 0..3 {
                    let value = current[c] as f32;
                    let sharpened = value + self.depth * (value - neighbour[c] as f32);
                    rgba[c] = sharpened.trunc().clamp(0., 255.) as u8;
                }
                res.write_pixel(x, y, rgba);
            }
        }
        Ok(EffectOutput::in_place(res))
    }
}
