use super::{Effect, EffectOutput};
use crate::color::Color;
use crate::geometry::Point;
use crate::image::Image;
use crate::operations::{resize_canvas, resize_image, ResizeOptions};
use crate::raster::Raster;
use crate::EffectError;

/// Scales the image.
///
/// With kept aspect ratio zero width or height is computed
/// from the other dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeEffect {
    width: u32,
    height: u32,
    maintain_aspect_ratio: bool,
}

impl ResizeEffect {
    pub fn new(width: u32, height: u32, maintain_aspect_ratio: bool) -> Self {
        Self {
            width,
            height,
            maintain_aspect_ratio,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn maintain_aspect_ratio(&self) -> bool {
        self.maintain_aspect_ratio
    }
}

impl Effect for ResizeEffect {
    fn name(&self) -> &'static str {
        "resize"
    }

    fn supports_partial_region(&self) -> bool {
        false
    }

    fn apply(&self, image: &Image, raster: &dyn Raster) -> Result<EffectOutput, EffectError> {
        let options = ResizeOptions::new(self.width, self.height)
            .maintain_aspect_ratio(self.maintain_aspect_ratio);
        let (res, offset) = resize_image(image, raster, &options)?;
        Ok(EffectOutput::new(res, offset))
    }
}

/// Adds (or removes with negative values) margins around the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeCanvasEffect {
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
    background: Option<Color>,
}

impl ResizeCanvasEffect {
    pub fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
            background: None,
        }
    }

    /// Color of added margins. `None` means transparent for images
    /// with alpha channel and white for others.
    pub fn with_background(mut self, color: Option<Color>) -> Self {
        self.background = color;
        self
    }

    /// Margins in `(left, right, top, bottom)` order.
    pub fn margins(&self) -> (i32, i32, i32, i32) {
        (self.left, self.right, self.top, self.bottom)
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }
}

impl Effect for ResizeCanvasEffect {
    fn name(&self) -> &'static str {
        "resize_canvas"
    }

    fn supports_partial_region(&self) -> bool {
        false
    }

    fn apply(&self, image: &Image, raster: &dyn Raster) -> Result<EffectOutput, EffectError> {
        let res = resize_canvas(
            image,
            raster,
            self.background,
            self.left,
            self.right,
            self.top,
            self.bottom,
        )?;
        Ok(EffectOutput::new(res, Point::new(self.left, self.top)))
    }
}
