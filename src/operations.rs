//! Whole-image helpers built on top of effects and pixel buffers.
use std::borrow::Cow;

use log::{debug, warn};

use crate::algorithms;
use crate::color::Color;
use crate::fill::{FillOutcome, FloodFiller};
use crate::geometry::{Point, Rectangle};
use crate::image::Image;
use crate::raster::{ColorMatrix, CompositeMode, Raster, RotateFlip};
use crate::EffectError;

/// Parameters of [resize_image].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeOptions {
    width: u32,
    height: u32,
    maintain_aspect_ratio: bool,
    canvas_use_new_size: bool,
    background: Option<Color>,
}

impl ResizeOptions {
    /// Zero `width` or `height` means "compute from the scale of the
    /// other dimension" when the aspect ratio is kept.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            maintain_aspect_ratio: false,
            canvas_use_new_size: false,
            background: None,
        }
    }

    pub fn maintain_aspect_ratio(mut self, value: bool) -> Self {
        self.maintain_aspect_ratio = value;
        self
    }

    /// Keep the requested size of canvas and center the scaled image on it.
    /// Has effect only if the aspect ratio is kept.
    pub fn canvas_use_new_size(mut self, value: bool) -> Self {
        self.canvas_use_new_size = value;
        self
    }

    /// Background of canvas around the scaled image.
    pub fn background(mut self, color: Option<Color>) -> Self {
        self.background = color;
        self
    }
}

/// Scales the image according to `options`.
///
/// Returns the new image and the position of the scaled image on its
/// canvas. The position is not zero only if the canvas keeps the
/// requested size.
pub fn resize_image(
    image: &Image,
    raster: &dyn Raster,
    options: &ResizeOptions,
) -> Result<(Image, Point), EffectError> {
    if image.size().is_empty() {
        return Err(EffectError::InvalidParameter("can't resize an empty image"));
    }
    let (src_w, src_h) = (image.width() as f32, image.height() as f32);
    let (mut new_w, mut new_h) = (options.width, options.height);
    let mut percent_w = new_w as f32 / src_w;
    let mut percent_h = new_h as f32 / src_h;
    let center_x = |percent: f32| ((new_w as f32 - src_w * percent) / 2.).round_ties_even() as i32;
    let center_y = |percent: f32| ((new_h as f32 - src_h * percent) / 2.).round_ties_even() as i32;

    let mut dest = Point::ZERO;
    if options.maintain_aspect_ratio {
        let keep_height = if percent_w == 1. {
            true
        } else if percent_h == 1. {
            false
        } else {
            percent_h != 0. && percent_h < percent_w
        };
        if keep_height {
            percent_w = percent_h;
            if options.canvas_use_new_size {
                dest.x = center_x(percent_w).max(0);
            }
        } else {
            percent_h = percent_w;
            if options.canvas_use_new_size {
                dest.y = center_y(percent_h).max(0);
            }
        }
    }

    let dest_w = (src_w * percent_w) as u32;
    let dest_h = (src_h * percent_h) as u32;
    if dest_w == 0 || dest_h == 0 {
        return Err(EffectError::InvalidParameter(
            "size of resized image must be greater than zero",
        ));
    }
    if new_w == 0 {
        new_w = dest_w;
    }
    if new_h == 0 {
        new_h = dest_h;
    }
    let scaled = raster.scale_image(image, dest_w, dest_h)?;
    let (canvas_w, canvas_h) = if options.maintain_aspect_ratio && options.canvas_use_new_size {
        (new_w, new_h)
    } else {
        (dest_w, dest_h)
    };
    if (canvas_w, canvas_h) == (dest_w, dest_h) && dest == Point::ZERO && options.background.is_none()
    {
        return Ok((scaled, dest));
    }

    let mut canvas =
        Image::create_empty(canvas_w, canvas_h, image.clone_format(None), options.background);
    canvas.set_resolution(image.resolution());
    raster.draw_image(&mut canvas, &scaled, dest, CompositeMode::SourceOver)?;
    Ok((canvas, dest))
}

/// Adds margins around the image. Negative margins cut the image.
pub fn resize_canvas(
    image: &Image,
    raster: &dyn Raster,
    background: Option<Color>,
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
) -> Result<Image, EffectError> {
    let width = image.width() as i64 + left as i64 + right as i64;
    let height = image.height() as i64 + top as i64 + bottom as i64;
    if width <= 0 || height <= 0 || width > u32::MAX as i64 || height > u32::MAX as i64 {
        return Err(EffectError::InvalidParameter(
            "margins of canvas give an empty image",
        ));
    }
    let mut canvas = Image::create_empty(
        width as u32,
        height as u32,
        image.clone_format(None),
        background,
    );
    canvas.set_resolution(image.resolution());
    raster.draw_image(&mut canvas, image, Point::new(left, top), CompositeMode::SourceOver)?;
    Ok(canvas)
}

pub fn rotate_flip(
    image: &Image,
    raster: &dyn Raster,
    operation: RotateFlip,
) -> Result<Image, EffectError> {
    raster.rotate_flip(image, operation)
}

/// Grayscale copy of the image darkened by 30%.
pub fn create_grayscale_dark(image: &Image, raster: &dyn Raster) -> Result<Image, EffectError> {
    raster.apply_color_matrix(image, &ColorMatrix::grayscale_dark())
}

/// Finds a uniform border of the image.
///
/// The search starts from every corner of the image, the largest
/// found rectangle wins. Returns an empty rectangle if the image has
/// no uniform border.
pub fn find_auto_crop_rectangle(image: &Image, tolerance: u8) -> Rectangle {
    if image.size().is_empty() {
        return Rectangle::empty();
    }
    let (right, bottom) = (image.width() as i32 - 1, image.height() as i32 - 1);
    let corners = [
        Point::new(0, 0),
        Point::new(0, bottom),
        Point::new(right, 0),
        Point::new(right, bottom),
    ];
    let mut res = Rectangle::empty();
    for corner in corners {
        let rect = algorithms::find_auto_crop_rectangle(image, corner, tolerance);
        if rect.area() > res.area() {
            res = rect;
        }
    }
    debug!("auto crop rectangle of {}x{} image: {:?}", image.width(), image.height(), res);
    res
}

/// Crops uniform border of the image.
///
/// The original image is returned if there is nothing to crop.
pub fn auto_crop(image: &Image, tolerance: u8) -> Result<Cow<'_, Image>, EffectError> {
    let rect = find_auto_crop_rectangle(image, tolerance);
    if rect.is_empty() {
        return Ok(Cow::Borrowed(image));
    }
    Ok(Cow::Owned(image.crop(rect)?))
}

/// Flood fills the region around `location` with `fill_color`
/// using the default tolerance.
///
/// The original image is returned if `location` is out of the image.
pub fn fill_color(image: &Image, location: Point, fill_color: Color) -> Cow<'_, Image> {
    let filler = FloodFiller::default().with_fill_color(fill_color);
    match filler.flood_fill(image, location) {
        FillOutcome::Filled { image, .. } => Cow::Owned(image),
        FillOutcome::NotApplicable => {
            warn!(
                "can't fill color at {:?}, the point is out of {}x{} image",
                location,
                image.width(),
                image.height()
            );
            Cow::Borrowed(image)
        }
    }
}
