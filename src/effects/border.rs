use super::{grown_size, Effect, EffectOutput};
use crate::color::Color;
use crate::geometry::{Point, Rectangle};
use crate::image::Image;
use crate::raster::{CompositeMode, Raster};
use crate::EffectError;

/// Surrounds the image by a frame of solid color.
///
/// The canvas grows by `width` pixels on every side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderEffect {
    width: u32,
    color: Color,
}

impl Default for BorderEffect {
    fn default() -> Self {
        Self {
            width: 2,
            color: Color::BLACK,
        }
    }
}

impl BorderEffect {
    pub fn new(width: u32, color: Color) -> Self {
        Self { width, color }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl Effect for BorderEffect {
    fn name(&self) -> &'static str {
        "border"
    }

    fn supports_partial_region(&self) -> bool {
        false
    }

    fn apply(&self, image: &Image, raster: &dyn Raster) -> Result<EffectOutput, EffectError> {
        let (width, height) = grown_size(image, self.width, "border width is too large")?;
        let border = self.width as i32;
        let mut canvas = Image::create_empty(width, height, image.clone_format(None), None);
        canvas.set_resolution(image.resolution());

        let (w, h) = (width as i32, height as i32);
        let bands = [
            Rectangle::new(0, 0, w, border),
            Rectangle::new(0, h - border, w, border),
            Rectangle::new(0, border, border, h - 2 * border),
            Rectangle::new(w - border, border, border, h - 2 * border),
        ];
        for band in bands {
            raster.fill_rectangle(&mut canvas, band, self.color)?;
        }

        let offset = Point::new(border, border);
        raster.draw_image(&mut canvas, image, offset, CompositeMode::SourceOver)?;
        Ok(EffectOutput::new(canvas, offset))
    }
}
