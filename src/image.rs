use crate::color::Color;
use crate::geometry::{Rectangle, Size};
use crate::pixels::{Argb32, PixelFormat, PixelLayout, Rgb24, Rgb32};
use crate::{ImageBufferError, RegionError};

/// Resolution of image in dots per inch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub x: f32,
    pub y: f32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self { x: 96., y: 96. }
    }
}

/// Owned raster image.
///
/// Rows of pixels are stored one after another, every row is padded
/// to a multiple of 4 bytes (see [PixelFormat::stride]).
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    format: PixelFormat,
    stride: usize,
    buffer: Vec<u8>,
    palette: Vec<Color>,
    resolution: Resolution,
}

impl Image {
    /// Create an image with given dimensions and pixel format
    /// filled by zero bytes.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        let stride = format.stride(width);
        Self {
            width,
            height,
            format,
            stride,
            buffer: vec![0; stride * height as usize],
            palette: Vec::new(),
            resolution: Resolution::default(),
        }
    }

    /// Create an indexed image, all pixels of which refer to
    /// the first color of the palette.
    pub fn new_indexed(
        width: u32,
        height: u32,
        palette: Vec<Color>,
    ) -> Result<Self, ImageBufferError> {
        Self::new(width, height, PixelFormat::Indexed8).with_palette(palette)
    }

    /// Create an image from vector with pixels data.
    ///
    /// Rows in the buffer must be padded to [PixelFormat::stride].
    pub fn from_vec_u8(
        width: u32,
        height: u32,
        buffer: Vec<u8>,
        format: PixelFormat,
    ) -> Result<Self, ImageBufferError> {
        let stride = format.stride(width);
        let size = stride * height as usize;
        if buffer.len() < size {
            return Err(ImageBufferError::InvalidBufferSize);
        }
        let mut buffer = buffer;
        buffer.truncate(size);
        Ok(Self {
            width,
            height,
            format,
            stride,
            buffer,
            palette: Vec::new(),
            resolution: Resolution::default(),
        })
    }

    pub fn with_palette(mut self, palette: Vec<Color>) -> Result<Self, ImageBufferError> {
        if palette.len() > 256 {
            return Err(ImageBufferError::PaletteTooLarge);
        }
        self.palette = palette;
        Ok(self)
    }

    /// Create an image cleared with `background`.
    ///
    /// Empty or fully transparent background means "transparent" for
    /// formats with alpha channel and "white" for other formats.
    /// Indexed images are not cleared.
    pub fn create_empty(
        width: u32,
        height: u32,
        format: PixelFormat,
        background: Option<Color>,
    ) -> Self {
        let mut image = Self::new(width, height, format);
        let background = background.filter(|c| c.is_visible());
        match (background, format.has_alpha()) {
            (_, _) if format.is_indexed() => (),
            (None, true) => (),
            (None, false) => image.fill(Color::WHITE),
            (Some(color), _) => image.fill(color),
        }
        image
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub fn bounds(&self) -> Rectangle {
        Rectangle::from_size(self.size())
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[inline]
    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.resolution = resolution;
    }

    /// Buffer with image pixels data.
    #[inline]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Mutable buffer with image pixels data.
    #[inline]
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.buffer
    }

    /// Returns `[R, G, B, A]` of pixel. Caller must check bounds.
    pub(crate) fn read_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = y as usize * self.stride + x as usize * self.format.bytes_per_pixel();
        let bytes = &self.buffer[offset..];
        match self.format {
            PixelFormat::Indexed8 => self
                .palette
                .get(bytes[0] as usize)
                .copied()
                .unwrap_or_default()
                .to_bytes(),
            PixelFormat::Rgb24 => Rgb24::read(bytes),
            PixelFormat::Rgb32 => Rgb32::read(bytes),
            PixelFormat::Argb32 => Argb32::read(bytes),
        }
    }

    /// Writes `[R, G, B, A]` into pixel of direct-color image.
    /// Caller must check bounds. Does nothing for indexed images.
    pub(crate) fn write_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let offset = y as usize * self.stride + x as usize * self.format.bytes_per_pixel();
        let bytes = &mut self.buffer[offset..];
        match self.format {
            PixelFormat::Indexed8 => (),
            PixelFormat::Rgb24 => Rgb24::write(bytes, rgba),
            PixelFormat::Rgb32 => Rgb32::write(bytes, rgba),
            PixelFormat::Argb32 => Argb32::write(bytes, rgba),
        }
    }

    /// Color of pixel or `None` if the point is out of image.
    pub fn color_at(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Color::from_bytes(self.read_pixel(x, y)))
    }

    /// Fill all pixels of direct-color image by given color.
    pub fn fill(&mut self, color: Color) {
        if self.format.is_indexed() || self.stride == 0 {
            return;
        }
        let bpp = self.format.bytes_per_pixel();
        let row_size = self.width as usize * bpp;
        let rgba = color.to_bytes();
        for row in self.buffer.chunks_exact_mut(self.stride) {
            for pixel in row[..row_size].chunks_exact_mut(bpp) {
                match self.format {
                    PixelFormat::Rgb24 => Rgb24::write(pixel, rgba),
                    PixelFormat::Rgb32 => Rgb32::write(pixel, rgba),
                    _ => Argb32::write(pixel, rgba),
                }
            }
        }
    }

    /// Pixel format of clones of this image.
    ///
    /// The requested format is used if it is supported, else the format of
    /// this image. Indexed images are cloned into [PixelFormat::Rgb24].
    pub fn clone_format(&self, requested: Option<PixelFormat>) -> PixelFormat {
        match requested {
            Some(format) if format.is_supported_target() => format,
            _ if self.format.is_supported_target() => self.format,
            _ => PixelFormat::Rgb24,
        }
    }

    /// Creates a copy of the image area.
    ///
    /// Translucent pixels are composited over white when the target format
    /// has no alpha channel.
    pub fn clone_area(
        &self,
        area: Option<Rectangle>,
        format: Option<PixelFormat>,
    ) -> Result<Image, RegionError> {
        let area = area.unwrap_or_else(|| self.bounds());
        if area.is_empty() {
            return Err(RegionError::EmptyArea);
        }
        if !self.bounds().contains_rect(&area) {
            return Err(RegionError::OutOfImageBoundaries);
        }
        Ok(self.copy_area(area, self.clone_format(format)))
    }

    /// Creates a copy of the image area in the same pixel format
    /// (see [Image::clone_format] for indexed images).
    pub fn crop(&self, area: Rectangle) -> Result<Image, RegionError> {
        self.clone_area(Some(area), None)
    }

    /// Creates a copy of the whole image in other pixel format.
    pub fn convert(&self, format: PixelFormat) -> Image {
        self.copy_area(self.bounds(), self.clone_format(Some(format)))
    }

    fn copy_area(&self, area: Rectangle, format: PixelFormat) -> Image {
        let size = area.size();
        let mut dst = Image::new(size.width, size.height, format);
        dst.resolution = self.resolution;
        let (left, top) = (area.left as u32, area.top as u32);

        if format == self.format {
            let bpp = format.bytes_per_pixel();
            let row_size = size.width as usize * bpp;
            for y in 0..size.height as usize {
                let src_offset = (top as usize + y) * self.stride + left as usize * bpp;
                let dst_offset = y * dst.stride;
                dst.buffer[dst_offset..dst_offset + row_size]
                    .copy_from_slice(&self.buffer[src_offset..src_offset + row_size]);
            }
            return dst;
        }

        let flatten = !format.has_alpha();
        for y in 0..size.height {
            for x in 0..size.width {
                let mut rgba = self.read_pixel(left + x, top + y);
                if flatten {
                    rgba = blend_with_background(rgba, Color::WHITE);
                }
                dst.write_pixel(x, y, rgba);
            }
        }
        dst
    }
}

/// Composites translucent pixel over opaque background color.
#[inline]
pub(crate) fn blend_with_background(rgba: [u8; 4], background: Color) -> [u8; 4] {
    let a = rgba[3] as u32;
    if a == 255 {
        return rgba;
    }
    let bg = background.to_bytes();
    let mut res = [255u8; 4];
    for i in 0..3 {
        res[i] = ((rgba[i] as u32 * a + bg[i] as u32 * (255 - a)) / 255) as u8;
    }
    res
}
