use super::blur::blur_image;
use super::{grown_size, Effect, EffectOutput};
use crate::geometry::Point;
use crate::image::Image;
use crate::pixels::PixelFormat;
use crate::raster::{ColorMatrix, CompositeMode, Raster};
use crate::EffectError;

/// Draws a blurred shadow under the image.
///
/// The canvas grows by `2 * size - 1` pixels on every side and always
/// has [PixelFormat::Argb32] format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropShadowEffect {
    darkness: f32,
    size: u32,
    shadow_offset: Point,
}

impl Default for DropShadowEffect {
    fn default() -> Self {
        Self {
            darkness: 0.6,
            size: 7,
            shadow_offset: Point::new(2, 2),
        }
    }
}

impl DropShadowEffect {
    pub fn new(size: u32) -> Self {
        Self::default().with_size(size)
    }

    /// Opacity of the shadow in range `0.0..=1.0`.
    pub fn with_darkness(mut self, darkness: f32) -> Self {
        self.darkness = darkness;
        self
    }

    /// Range of blur of the shadow. Even values are increased by one.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Displacement of the shadow relative to the image.
    pub fn with_shadow_offset(mut self, offset: Point) -> Self {
        self.shadow_offset = offset;
        self
    }

    pub fn darkness(&self) -> f32 {
        self.darkness
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn shadow_offset(&self) -> Point {
        self.shadow_offset
    }

    /// Count of pixels added to every side of the image.
    pub fn margin(&self) -> u32 {
        (self.size | 1).saturating_mul(2) - 1
    }
}

/// Position of shadow on canvas, if all its edges fit into `i32`.
fn shadow_position(margin: i32, shadow_offset: Point, image: &Image) -> Option<Point> {
    let x = margin.checked_add(shadow_offset.x)?;
    let y = margin.checked_add(shadow_offset.y)?;
    x.checked_add(image.width() as i32)?;
    y.checked_add(image.height() as i32)?;
    Some(Point::new(x, y))
}

impl Effect for DropShadowEffect {
    fn name(&self) -> &'static str {
        "drop_shadow"
    }

    fn supports_partial_region(&self) -> bool {
        false
    }

    fn apply(&self, image: &Image, raster: &dyn Raster) -> Result<EffectOutput, EffectError> {
        if !(0.0..=1.0).contains(&self.darkness) {
            return Err(EffectError::InvalidParameter(
                "darkness of shadow must be in range 0.0..=1.0",
            ));
        }
        let size = self.size | 1;
        let margin = self.margin();
        let (width, height) = grown_size(image, margin, "size of shadow is too large")?;
        let m = margin as i32;
        let shadow_at = shadow_position(m, self.shadow_offset, image)
            .ok_or(EffectError::InvalidParameter("offset of shadow is too large"))?;

        let source = image.convert(PixelFormat::Argb32);
        let mask = raster.apply_color_matrix(&source, &ColorMatrix::shadow_mask(self.darkness))?;

        let mut canvas = Image::create_empty(width, height, PixelFormat::Argb32, None);
        canvas.set_resolution(image.resolution());
        raster.draw_image(&mut canvas, &mask, shadow_at, CompositeMode::SourceCopy)?;
        blur_image(&mut canvas, size, raster)?;

        let offset = Point::new(m, m);
        raster.draw_image(&mut canvas, &source, offset, CompositeMode::SourceOver)?;
        Ok(EffectOutput::new(canvas, offset))
    }
}
