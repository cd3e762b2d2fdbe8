//! Scaling of images with the `fast_image_resize` convolution.
use fast_image_resize::images::{Image as ResizeImage, ImageRef};
use fast_image_resize::{PixelType, ResizeAlg, ResizeOptions, Resizer};

use crate::image::Image;
use crate::EffectError;

/// Filter used by [SoftwareRaster](super::SoftwareRaster) to scale images.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum FilterType {
    /// Every source pixel contributes to one destination pixel with
    /// identical weight. Upscaling with it looks like nearest-neighbour.
    Box,
    /// Linear interpolation between neighbour pixels.
    Bilinear,
    /// Same cost as `Bilinear`, sharper when downscaling.
    Hamming,
    /// Catmull-Rom bicubic filter. Keeps edges of text and UI elements
    /// on screenshots sharp.
    #[default]
    CatmullRom,
    /// Mitchell–Netravali bicubic filter, softer than `CatmullRom`.
    Mitchell,
    /// Lanczos filter with a window of three lobes.
    Lanczos3,
}

impl From<FilterType> for fast_image_resize::FilterType {
    fn from(filter_type: FilterType) -> Self {
        match filter_type {
            FilterType::Box => Self::Box,
            FilterType::Bilinear => Self::Bilinear,
            FilterType::Hamming => Self::Hamming,
            FilterType::CatmullRom => Self::CatmullRom,
            FilterType::Mitchell => Self::Mitchell,
            FilterType::Lanczos3 => Self::Lanczos3,
        }
    }
}

/// Packs pixels of the image into tightly laid out `[R, G, B, A]` rows.
///
/// Images without alpha channel get opaque alpha, so multiplying
/// by alpha inside of resizer doesn't change their colors.
fn packed_rgba(image: &Image) -> Vec<u8> {
    let has_alpha = image.format().has_alpha();
    let mut buffer = Vec::with_capacity(image.width() as usize * image.height() as usize * 4);
    for y in 0..image.height() {
        for x in 0..image.width() {
            let mut rgba = image.read_pixel(x, y);
            if !has_alpha {
                rgba[3] = 255;
            }
            buffer.extend_from_slice(&rgba);
        }
    }
    buffer
}

/// Scales the source image into a new image with the same pixel format.
///
/// Colors of images with alpha channel are multiplied by alpha during
/// convolution, so fully transparent pixels don't bleed into neighbours.
pub(crate) fn scale(
    src: &Image,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<Image, EffectError> {
    let src_buffer = packed_rgba(src);
    let src_view = ImageRef::new(src.width(), src.height(), &src_buffer, PixelType::U8x4)
        .map_err(|err| {
            log::debug!("can't wrap pixels of source image: {}", err);
            EffectError::ScaleFailed
        })?;
    let mut dst_view = ResizeImage::new(width, height, PixelType::U8x4);

    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(filter.into()));
    Resizer::new()
        .resize(&src_view, &mut dst_view, &options)
        .map_err(|err| {
            log::debug!("can't scale image to {}x{}: {}", width, height, err);
            EffectError::ScaleFailed
        })?;

    let has_alpha = src.format().has_alpha();
    let mut dst = Image::new(width, height, src.clone_format(None));
    dst.set_resolution(src.resolution());
    let pixels = dst_view.buffer().chunks_exact(4);
    let coords = (0..height).flat_map(|y| (0..width).map(move |x| (x, y)));
    for ((x, y), pixel) in coords.zip(pixels) {
        let mut rgba = [pixel[0], pixel[1], pixel[2], pixel[3]];
        if !has_alpha {
            rgba[3] = 255;
        }
        dst.write_pixel(x, y, rgba);
    }
    Ok(dst)
}
