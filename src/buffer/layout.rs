use std::marker::PhantomData;

use crate::geometry::Rectangle;
use crate::pixels::PixelLayout;

/// Pixels of a buffer area with statically known layout.
#[derive(Debug)]
pub struct LayoutView<'b, L> {
    buffer: &'b mut [u8],
    stride: usize,
    area: Rectangle,
    _layout: PhantomData<L>,
}

impl<'b, L: PixelLayout> LayoutView<'b, L> {
    pub(crate) fn new(buffer: &'b mut [u8], stride: usize, area: Rectangle) -> Self {
        Self {
            buffer,
            stride,
            area,
            _layout: PhantomData,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.area.width as usize
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.area.height as usize
    }

    #[inline(always)]
    fn offset(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width() && y < self.height());
        (self.area.top as usize + y) * self.stride + (self.area.left as usize + x) * L::SIZE
    }

    /// Returns `[R, G, B, A]` of pixel in area-local coordinates.
    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> [u8; 4] {
        let offset = self.offset(x, y);
        L::read(&self.buffer[offset..offset + L::SIZE])
    }

    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let offset = self.offset(x, y);
        L::write(&mut self.buffer[offset..offset + L::SIZE], rgba);
    }
}
