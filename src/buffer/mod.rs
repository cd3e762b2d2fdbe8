//! Format-aware access to pixels of an [Image].
use std::collections::HashMap;
use std::mem;

use crate::alpha::source_over;
use crate::color::Color;
use crate::geometry::{Point, Rectangle, Size};
use crate::image::{blend_with_background, Image, Resolution};
use crate::pixels::{PixelFormat, PixelLayout};
use crate::{PixelBufferError, RegionError};

pub use layout::LayoutView;
pub use views::{ClipView, OffsetView, PixelAccess};

mod layout;
mod views;

#[derive(Debug)]
enum ImageHandle<'a> {
    Borrowed(&'a mut Image),
    Owned(Image),
}

impl ImageHandle<'_> {
    #[inline]
    fn get(&self) -> &Image {
        match self {
            Self::Borrowed(image) => image,
            Self::Owned(image) => image,
        }
    }

    #[inline]
    fn get_mut(&mut self) -> &mut Image {
        match self {
            Self::Borrowed(image) => image,
            Self::Owned(image) => image,
        }
    }
}

/// View over pixels of an image area.
///
/// Coordinates accepted by accessors are local to the area. Use
/// [OffsetView] to address pixels in coordinates of the source image and
/// [ClipView] to drop writes outside of the clip rectangle.
///
/// The buffer either borrows a caller-owned image or owns a clone of
/// the image area (see [PixelBuffer::clone_of]). Owned image is released
/// with the buffer unless it is detached by
/// [PixelBuffer::unlock_and_return_image].
#[derive(Debug)]
pub struct PixelBuffer<'a> {
    image: ImageHandle<'a>,
    area: Rectangle,
    left: i32,
    top: i32,
    clip: Rectangle,
    invert_clip: bool,
    locked: bool,
    palette_cache: Option<HashMap<Color, u8>>,
    background_blend_color: Color,
}

impl<'a> PixelBuffer<'a> {
    /// Create a locked buffer over the area of a caller-owned image.
    ///
    /// The area defaults to the whole image and is always intersected
    /// with the image bounds.
    pub fn new(image: &'a mut Image, area: Option<Rectangle>) -> Self {
        let bounds = image.bounds();
        let area = area.map_or(bounds, |a| a.intersect(&bounds));
        Self::with_handle(ImageHandle::Borrowed(image), area, Point::ZERO)
    }

    /// Create a locked buffer that owns a copy of the image area.
    ///
    /// `left` and `top` of the buffer are set to the origin of the area,
    /// so [OffsetView] keeps addressing pixels in coordinates of the
    /// source image.
    pub fn clone_of(
        image: &Image,
        area: Option<Rectangle>,
        format: Option<PixelFormat>,
    ) -> Result<PixelBuffer<'static>, RegionError> {
        let bounds = image.bounds();
        let area = area.map_or(bounds, |a| a.intersect(&bounds));
        let clone = image.clone_area(Some(area), format)?;
        let local_area = clone.bounds();
        Ok(PixelBuffer::with_handle(
            ImageHandle::Owned(clone),
            local_area,
            area.location(),
        ))
    }

    fn with_handle(image: ImageHandle<'a>, area: Rectangle, location: Point) -> Self {
        Self {
            image,
            area,
            left: location.x,
            top: location.y,
            clip: Rectangle::with_size(area.width, area.height),
            invert_clip: false,
            locked: true,
            palette_cache: None,
            background_blend_color: Color::WHITE,
        }
    }

    #[inline]
    pub fn lock(&mut self) {
        self.locked = true;
    }

    #[inline]
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns `true` if the buffer owns its image.
    #[inline]
    pub fn owns_image(&self) -> bool {
        matches!(self.image, ImageHandle::Owned(_))
    }

    /// Unlocks the buffer and returns the owned image instead of
    /// releasing it. Returns `None` for buffers over borrowed images.
    pub fn unlock_and_return_image(mut self) -> Option<Image> {
        self.unlock();
        let empty = ImageHandle::Owned(Image::new(0, 0, PixelFormat::Rgb24));
        match mem::replace(&mut self.image, empty) {
            ImageHandle::Owned(image) => Some(image),
            ImageHandle::Borrowed(_) => None,
        }
    }

    #[inline]
    pub fn image(&self) -> &Image {
        self.image.get()
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.image().format()
    }

    #[inline]
    pub fn has_alpha_channel(&self) -> bool {
        self.format().has_alpha()
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.image().stride()
    }

    #[inline]
    pub fn area(&self) -> Rectangle {
        self.area
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.area.size()
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.left
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.top
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.left + self.area.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.top + self.area.height
    }

    pub fn set_location(&mut self, left: i32, top: i32) {
        self.left = left;
        self.top = top;
    }

    /// Clip rectangle in area-local coordinates.
    #[inline]
    pub fn clip(&self) -> Rectangle {
        self.clip
    }

    #[inline]
    pub fn invert_clip(&self) -> bool {
        self.invert_clip
    }

    pub fn set_clip(&mut self, clip: Rectangle, invert: bool) {
        self.clip = clip;
        self.invert_clip = invert;
    }

    #[inline]
    pub fn background_blend_color(&self) -> Color {
        self.background_blend_color
    }

    pub fn set_background_blend_color(&mut self, color: Color) {
        self.background_blend_color = color;
    }

    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.image.get_mut().set_resolution(resolution);
    }

    /// View translating coordinates of the source image by
    /// subtracting `left` and `top` of the buffer.
    pub fn offset_view(&mut self) -> OffsetView<&mut Self> {
        let (left, top) = (self.left, self.top);
        OffsetView::new(self, left, top)
    }

    /// View dropping writes according to the clip rectangle of the buffer.
    pub fn clip_view(&mut self) -> ClipView<&mut Self> {
        let (clip, invert) = (self.clip, self.invert_clip);
        ClipView::new(self, clip, invert)
    }

    /// Typed view over pixels for monomorphic inner loops.
    ///
    /// Returns `None` if `L` doesn't match the pixel format of the buffer.
    pub fn layout_view<L: PixelLayout>(&mut self) -> Option<LayoutView<'_, L>> {
        debug_assert!(self.locked, "pixel buffer is not locked");
        let area = self.area;
        let image = self.image.get_mut();
        if image.format() != L::FORMAT {
            return None;
        }
        let stride = image.stride();
        Some(LayoutView::new(image.buffer_mut(), stride, area))
    }

    #[inline]
    fn byte_offset(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.locked, "pixel buffer is not locked");
        debug_assert!(self.contains(x, y), "({x}, {y}) is out of buffer area");
        let bpp = self.format().bytes_per_pixel();
        (self.area.top + y) as usize * self.stride() + (self.area.left + x) as usize * bpp
    }

    /// Index of palette color of a pixel in an indexed buffer.
    pub fn get_color_index_at(&self, x: i32, y: i32) -> Result<u8, PixelBufferError> {
        if !self.format().is_indexed() {
            return Err(PixelBufferError::unsupported(self.format()));
        }
        Ok(self.image().buffer()[self.byte_offset(x, y)])
    }

    pub fn set_color_index_at(
        &mut self,
        x: i32,
        y: i32,
        index: u8,
    ) -> Result<(), PixelBufferError> {
        if !self.format().is_indexed() {
            return Err(PixelBufferError::unsupported(self.format()));
        }
        let offset = self.byte_offset(x, y);
        self.image.get_mut().buffer_mut()[offset] = index;
        Ok(())
    }

    fn palette_index(&mut self, color: Color) -> Result<u8, PixelBufferError> {
        let image = self.image.get();
        let cache = self.palette_cache.get_or_insert_with(|| {
            let mut cache = HashMap::with_capacity(image.palette().len());
            for (i, &c) in image.palette().iter().enumerate() {
                cache.entry(c).or_insert(i as u8);
            }
            cache
        });
        cache
            .get(&color)
            .copied()
            .ok_or(PixelBufferError::ColorNotInPalette(color))
    }

    /// Color of pixel composited over [PixelBuffer::background_blend_color].
    pub fn get_blended_color_at(&self, x: i32, y: i32) -> Color {
        let rgba = self.get_color_bytes(x, y);
        Color::from_bytes(blend_with_background(rgba, self.background_blend_color))
    }

    /// Draws the buffer area into `target` at `destination`,
    /// compositing translucent pixels over the target.
    pub fn draw_to(
        &self,
        target: &mut Image,
        destination: Point,
    ) -> Result<(), PixelBufferError> {
        if target.format().is_indexed() {
            return Err(PixelBufferError::unsupported(target.format()));
        }
        let dst_area = Rectangle::new(
            destination.x,
            destination.y,
            self.area.width,
            self.area.height,
        )
        .intersect(&target.bounds());
        let has_alpha = self.has_alpha_channel();
        for y in dst_area.top..dst_area.bottom() {
            for x in dst_area.left..dst_area.right() {
                let mut rgba = self.get_color_bytes(x - destination.x, y - destination.y);
                if has_alpha {
                    rgba = source_over(rgba, target.read_pixel(x as u32, y as u32));
                }
                target.write_pixel(x as u32, y as u32, rgba);
            }
        }
        Ok(())
    }
}

impl Drop for PixelBuffer<'_> {
    fn drop(&mut self) {
        self.unlock();
    }
}

impl PixelAccess for PixelBuffer<'_> {
    #[inline]
    fn width(&self) -> u32 {
        self.area.width as u32
    }

    #[inline]
    fn height(&self) -> u32 {
        self.area.height as u32
    }

    #[inline]
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.area.width && y < self.area.height
    }

    fn get_color_bytes(&self, x: i32, y: i32) -> [u8; 4] {
        let image = self.image();
        image.read_pixel((self.area.left + x) as u32, (self.area.top + y) as u32)
    }

    fn set_color_bytes(&mut self, x: i32, y: i32, rgba: [u8; 4]) -> Result<(), PixelBufferError> {
        if self.format().is_indexed() {
            let index = self.palette_index(Color::from_bytes(rgba))?;
            return self.set_color_index_at(x, y, index);
        }
        debug_assert!(self.contains(x, y), "({x}, {y}) is out of buffer area");
        let (left, top) = (self.area.left, self.area.top);
        self.image
            .get_mut()
            .write_pixel((left + x) as u32, (top + y) as u32, rgba);
        Ok(())
    }
}

/// Pixels of the whole image in image coordinates.
///
/// Colors written into indexed images are looked up in the palette
/// without caching, use [PixelBuffer] for bulk writes.
impl PixelAccess for Image {
    #[inline]
    fn width(&self) -> u32 {
        Image::width(self)
    }

    #[inline]
    fn height(&self) -> u32 {
        Image::height(self)
    }

    #[inline]
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < Image::width(self) && (y as u32) < Image::height(self)
    }

    fn get_color_bytes(&self, x: i32, y: i32) -> [u8; 4] {
        debug_assert!(PixelAccess::contains(self, x, y), "({x}, {y}) is out of image");
        self.read_pixel(x as u32, y as u32)
    }

    fn set_color_bytes(&mut self, x: i32, y: i32, rgba: [u8; 4]) -> Result<(), PixelBufferError> {
        debug_assert!(PixelAccess::contains(self, x, y), "({x}, {y}) is out of image");
        if self.format().is_indexed() {
            let color = Color::from_bytes(rgba);
            let index = self
                .palette()
                .iter()
                .position(|&c| c == color)
                .ok_or(PixelBufferError::ColorNotInPalette(color))?;
            let offset = y as usize * self.stride() + x as usize;
            self.buffer_mut()[offset] = index as u8;
            return Ok(());
        }
        self.write_pixel(x as u32, y as u32, rgba);
        Ok(())
    }
}
