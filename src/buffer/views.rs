use crate::color::Color;
use crate::geometry::Rectangle;
use crate::PixelBufferError;

/// Access to pixels by coordinates.
///
/// Reading or writing a pixel outside of [PixelAccess::contains]
/// is a logic error and panics in debug builds.
pub trait PixelAccess {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn contains(&self, x: i32, y: i32) -> bool;

    /// Returns pixel bytes in `[R, G, B, A]` order.
    /// Alpha is 255 for formats without alpha channel.
    fn get_color_bytes(&self, x: i32, y: i32) -> [u8; 4];

    fn set_color_bytes(&mut self, x: i32, y: i32, rgba: [u8; 4]) -> Result<(), PixelBufferError>;

    #[inline]
    fn get_color_at(&self, x: i32, y: i32) -> Color {
        Color::from_bytes(self.get_color_bytes(x, y))
    }

    #[inline]
    fn set_color_at(&mut self, x: i32, y: i32, color: Color) -> Result<(), PixelBufferError> {
        self.set_color_bytes(x, y, color.to_bytes())
    }
}

impl<T: PixelAccess + ?Sized> PixelAccess for &mut T {
    #[inline]
    fn width(&self) -> u32 {
        (**self).width()
    }

    #[inline]
    fn height(&self) -> u32 {
        (**self).height()
    }

    #[inline]
    fn contains(&self, x: i32, y: i32) -> bool {
        (**self).contains(x, y)
    }

    #[inline]
    fn get_color_bytes(&self, x: i32, y: i32) -> [u8; 4] {
        (**self).get_color_bytes(x, y)
    }

    #[inline]
    fn set_color_bytes(&mut self, x: i32, y: i32, rgba: [u8; 4]) -> Result<(), PixelBufferError> {
        (**self).set_color_bytes(x, y, rgba)
    }
}

/// Translates coordinates by subtracting `(left, top)` before
/// delegating to the inner view.
#[derive(Debug)]
pub struct OffsetView<B> {
    inner: B,
    left: i32,
    top: i32,
}

impl<B: PixelAccess> OffsetView<B> {
    pub fn new(inner: B, left: i32, top: i32) -> Self {
        Self { inner, left, top }
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: PixelAccess> PixelAccess for OffsetView<B> {
    fn width(&self) -> u32 {
        self.inner.width()
    }

    fn height(&self) -> u32 {
        self.inner.height()
    }

    #[inline]
    fn contains(&self, x: i32, y: i32) -> bool {
        self.inner.contains(x - self.left, y - self.top)
    }

    #[inline]
    fn get_color_bytes(&self, x: i32, y: i32) -> [u8; 4] {
        self.inner.get_color_bytes(x - self.left, y - self.top)
    }

    #[inline]
    fn set_color_bytes(&mut self, x: i32, y: i32, rgba: [u8; 4]) -> Result<(), PixelBufferError> {
        self.inner.set_color_bytes(x - self.left, y - self.top, rgba)
    }
}

/// Silently drops writes outside of the clip rectangle
/// (or inside of it if the clip is inverted). Reads are not affected.
#[derive(Debug)]
pub struct ClipView<B> {
    inner: B,
    clip: Rectangle,
    invert: bool,
}

impl<B: PixelAccess> ClipView<B> {
    pub fn new(inner: B, clip: Rectangle, invert: bool) -> Self {
        Self {
            inner,
            clip,
            invert,
        }
    }

    pub fn into_inner(self) -> B {
        self.inner
    }

    #[inline]
    fn is_writable(&self, x: i32, y: i32) -> bool {
        self.clip.contains(x, y) != self.invert
    }
}

impl<B: PixelAccess> PixelAccess for ClipView<B> {
    fn width(&self) -> u32 {
        self.inner.width()
    }

    fn height(&self) -> u32 {
        self.inner.height()
    }

    #[inline]
    fn contains(&self, x: i32, y: i32) -> bool {
        self.inner.contains(x, y) && self.is_writable(x, y)
    }

    #[inline]
    fn get_color_bytes(&self, x: i32, y: i32) -> [u8; 4] {
        self.inner.get_color_bytes(x, y)
    }

    #[inline]
    fn set_color_bytes(&mut self, x: i32, y: i32, rgba: [u8; 4]) -> Result<(), PixelBufferError> {
        if self.is_writable(x, y) {
            self.inner.set_color_bytes(x, y, rgba)?;
        }
        Ok(())
    }
}
