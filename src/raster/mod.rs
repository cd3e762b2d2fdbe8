//! Drawing primitives used by effects.
//!
//! Effects never draw pixels by themselves, they call a [Raster].
//! [SoftwareRaster] implements all primitives on the CPU, hosts may
//! provide an implementation backed by a native drawing API.
pub use color_matrix::ColorMatrix;
pub use scale::FilterType;

use crate::alpha::source_over;
use crate::color::Color;
use crate::geometry::{Point, Rectangle};
use crate::image::Image;
use crate::{EffectError, PixelBufferError};

mod color_matrix;
mod polygon;
mod scale;

/// How pixels of a source are combined with pixels of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Alpha-blend the source over the target.
    #[default]
    SourceOver,
    /// Replace target pixels by source pixels.
    SourceCopy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateFlip {
    /// Clockwise rotation by 90 degrees.
    Rotate90,
    Rotate180,
    /// Clockwise rotation by 270 degrees.
    Rotate270,
    /// Mirror around the vertical axis.
    FlipHorizontal,
    /// Mirror around the horizontal axis.
    FlipVertical,
}

pub trait Raster {
    /// Draws `source` into `target` with its left-top corner at `at`.
    fn draw_image(
        &self,
        target: &mut Image,
        source: &Image,
        at: Point,
        mode: CompositeMode,
    ) -> Result<(), EffectError>;

    /// Blends `color` over pixels of `target` inside `rect`.
    fn fill_rectangle(
        &self,
        target: &mut Image,
        rect: Rectangle,
        color: Color,
    ) -> Result<(), EffectError>;

    fn scale_image(&self, source: &Image, width: u32, height: u32) -> Result<Image, EffectError>;

    fn apply_color_matrix(
        &self,
        source: &Image,
        matrix: &ColorMatrix,
    ) -> Result<Image, EffectError>;

    /// Fills the closed polygon (even-odd rule) with pixels of `texture`
    /// aligned to the left-top corner of `target`.
    fn fill_polygon_with_texture(
        &self,
        target: &mut Image,
        polygon: &[Point],
        texture: &Image,
    ) -> Result<(), EffectError>;

    fn rotate_flip(&self, source: &Image, operation: RotateFlip) -> Result<Image, EffectError>;

    /// Fast path for blurring of images.
    ///
    /// Returns `false` if the raster has no accelerated blur,
    /// the software box blur is used in that case.
    fn native_blur(&self, _image: &mut Image, _radius: u32) -> Result<bool, EffectError> {
        Ok(false)
    }
}

/// CPU implementation of [Raster].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoftwareRaster {
    filter: FilterType,
}

impl SoftwareRaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter used by [Raster::scale_image].
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }
}

fn check_target(target: &Image) -> Result<(), EffectError> {
    if target.format().is_indexed() {
        return Err(PixelBufferError::unsupported(target.format()).into());
    }
    Ok(())
}

impl Raster for SoftwareRaster {
    fn draw_image(
        &self,
        target: &mut Image,
        source: &Image,
        at: Point,
        mode: CompositeMode,
    ) -> Result<(), EffectError> {
        check_target(target)?;
        let dst_area = Rectangle::new(at.x, at.y, source.width() as i32, source.height() as i32)
            .intersect(&target.bounds());
        let blend = mode == CompositeMode::SourceOver && source.format().has_alpha();
        for y in dst_area.top..dst_area.bottom() {
            for x in dst_area.left..dst_area.right() {
                let mut rgba = source.read_pixel((x - at.x) as u32, (y - at.y) as u32);
                if blend {
                    rgba = source_over(rgba, target.read_pixel(x as u32, y as u32));
                }
                target.write_pixel(x as u32, y as u32, rgba);
            }
        }
        Ok(())
    }

    fn fill_rectangle(
        &self,
        target: &mut Image,
        rect: Rectangle,
        color: Color,
    ) -> Result<(), EffectError> {
        check_target(target)?;
        let rect = rect.normalized().intersect(&target.bounds());
        let rgba = color.to_bytes();
        for y in rect.top..rect.bottom() {
            for x in rect.left..rect.right() {
                let (x, y) = (x as u32, y as u32);
                let blended = source_over(rgba, target.read_pixel(x, y));
                target.write_pixel(x, y, blended);
            }
        }
        Ok(())
    }

    fn scale_image(&self, source: &Image, width: u32, height: u32) -> Result<Image, EffectError> {
        if width == 0 || height == 0 {
            return Err(EffectError::InvalidParameter(
                "size of scaled image must be greater than zero",
            ));
        }
        if source.size().is_empty() {
            return Ok(Image::create_empty(width, height, source.clone_format(None), None));
        }
        scale::scale(source, width, height, self.filter)
    }

    fn apply_color_matrix(
        &self,
        source: &Image,
        matrix: &ColorMatrix,
    ) -> Result<Image, EffectError> {
        Ok(matrix.apply(source))
    }

    fn fill_polygon_with_texture(
        &self,
        target: &mut Image,
        polygon: &[Point],
        texture: &Image,
    ) -> Result<(), EffectError> {
        check_target(target)?;
        let width = target.width().min(texture.width()) as i32;
        let height = target.height().min(texture.height()) as i32;
        polygon::for_each_span(polygon, width, height, |y, x_start, x_end| {
            for x in x_start..x_end {
                let (x, y) = (x as u32, y as u32);
                let rgba = source_over(texture.read_pixel(x, y), target.read_pixel(x, y));
                target.write_pixel(x, y, rgba);
            }
        });
        Ok(())
    }

    fn rotate_flip(&self, source: &Image, operation: RotateFlip) -> Result<Image, EffectError> {
        let (w, h) = (source.width(), source.height());
        let (dst_w, dst_h) = match operation {
            RotateFlip::Rotate90 | RotateFlip::Rotate270 => (h, w),
            _ => (w, h),
        };
        let mut dst = Image::new(dst_w, dst_h, source.clone_format(None));
        dst.set_resolution(source.resolution());
        for y in 0..dst_h {
            for x in 0..dst_w {
                let (src_x, src_y) = match operation {
                    RotateFlip::Rotate90 => (y, h - 1 - x),
                    RotateFlip::Rotate180 => (w - 1 - x, h - 1 - y),
                    RotateFlip::Rotate270 => (w - 1 - y, x),
                    RotateFlip::FlipHorizontal => (w - 1 - x, y),
                    RotateFlip::FlipVertical => (x, h - 1 - y),
                };
                dst.write_pixel(x, y, source.read_pixel(src_x, src_y));
            }
        }
        Ok(dst)
    }
}
