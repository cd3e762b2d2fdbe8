use image::{ColorType, DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

use crate::image::Image;
use crate::pixels::PixelFormat;
use crate::PixelBufferError;

fn color_type_name(color_type: ColorType) -> &'static str {
    match color_type {
        ColorType::L16 => "L16",
        ColorType::La16 => "La16",
        ColorType::Rgb16 => "Rgb16",
        ColorType::Rgba16 => "Rgba16",
        ColorType::Rgb32F => "Rgb32F",
        ColorType::Rgba32F => "Rgba32F",
        _ => "unknown",
    }
}

/// Images with 8-bit channels are supported. Grayscale images are
/// expanded into [PixelFormat::Rgb24] or [PixelFormat::Argb32].
impl TryFrom<&DynamicImage> for Image {
    type Error = PixelBufferError;

    fn try_from(src: &DynamicImage) -> Result<Self, Self::Error> {
        let (width, height) = (src.width(), src.height());
        let res = match src {
            DynamicImage::ImageRgb8(img) => {
                let mut res = Image::new(width, height, PixelFormat::Rgb24);
                for (x, y, p) in img.enumerate_pixels() {
                    res.write_pixel(x, y, [p[0], p[1], p[2], 255]);
                }
                res
            }
            DynamicImage::ImageRgba8(img) => {
                let mut res = Image::new(width, height, PixelFormat::Argb32);
                for (x, y, p) in img.enumerate_pixels() {
                    res.write_pixel(x, y, p.0);
                }
                res
            }
            DynamicImage::ImageLuma8(img) => {
                let mut res = Image::new(width, height, PixelFormat::Rgb24);
                for (x, y, p) in img.enumerate_pixels() {
                    res.write_pixel(x, y, [p[0], p[0], p[0], 255]);
                }
                res
            }
            DynamicImage::ImageLumaA8(img) => {
                let mut res = Image::new(width, height, PixelFormat::Argb32);
                for (x, y, p) in img.enumerate_pixels() {
                    res.write_pixel(x, y, [p[0], p[0], p[0], p[1]]);
                }
                res
            }
            other => {
                return Err(PixelBufferError::UnsupportedPixelFormat(color_type_name(
                    other.color(),
                )))
            }
        };
        Ok(res)
    }
}

impl From<&Image> for RgbaImage {
    fn from(src: &Image) -> Self {
        RgbaImage::from_fn(src.width(), src.height(), |x, y| Rgba(src.read_pixel(x, y)))
    }
}

/// Images with alpha channel are converted into `ImageRgba8`,
/// all others into `ImageRgb8`.
impl From<&Image> for DynamicImage {
    fn from(src: &Image) -> Self {
        if src.format().has_alpha() {
            return DynamicImage::ImageRgba8(src.into());
        }
        let img = RgbImage::from_fn(src.width(), src.height(), |x, y| {
            let [r, g, b, _] = src.read_pixel(x, y);
            Rgb([r, g, b])
        });
        DynamicImage::ImageRgb8(img)
    }
}
