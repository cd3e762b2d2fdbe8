use std::collections::VecDeque;

use crate::color::Color;
use crate::geometry::Point;
use crate::image::Image;
use crate::pixels::PixelFormat;

const BPP: usize = 4;

/// Horizontal run of filled pixels on row `y` that waits for
/// probing of rows above and below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloodFillRange {
    pub start_x: usize,
    pub end_x: usize,
    pub y: usize,
}

#[derive(Debug)]
pub enum FillOutcome {
    /// The filled copy of the image in [PixelFormat::Argb32] format.
    Filled {
        image: Image,
        /// Count of pixels that were filled.
        checked_pixels: usize,
    },
    /// The seed point is out of the image, nothing was filled.
    NotApplicable,
}

/// Tolerance-bounded scanline flood fill.
///
/// ```
/// use shotfx::{Color, FillOutcome, FloodFiller, Image, PixelFormat, Point};
///
/// let image = Image::create_empty(8, 8, PixelFormat::Rgb24, None);
/// let filler = FloodFiller::default()
///     .with_fill_color(Color::BLACK)
///     .with_tolerance([0; 3]);
/// match filler.flood_fill(&image, Point::new(3, 3)) {
///     FillOutcome::Filled { checked_pixels, .. } => assert_eq!(checked_pixels, 64),
///     FillOutcome::NotApplicable => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloodFiller {
    fill_color: Color,
    tolerance: [u8; 3],
    fill_diagonally: bool,
}

impl Default for FloodFiller {
    fn default() -> Self {
        Self {
            fill_color: Color::WHITE,
            tolerance: [5; 3],
            fill_diagonally: false,
        }
    }
}

impl FloodFiller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color blended into filled pixels. Translucent colors are blended
    /// with existing pixels instead of replacing them.
    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    /// Maximal allowed deviation of R, G and B channels from
    /// the color of the seed pixel.
    pub fn with_tolerance(mut self, tolerance: [u8; 3]) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Enables 8-connected filling.
    pub fn with_fill_diagonally(mut self, value: bool) -> Self {
        self.fill_diagonally = value;
        self
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn tolerance(&self) -> [u8; 3] {
        self.tolerance
    }

    pub fn fill_diagonally(&self) -> bool {
        self.fill_diagonally
    }

    /// Fills the region of pixels similar to the pixel at `seed`.
    pub fn flood_fill(&self, image: &Image, seed: Point) -> FillOutcome {
        if seed.x < 0
            || seed.y < 0
            || seed.x >= image.width() as i32
            || seed.y >= image.height() as i32
        {
            return FillOutcome::NotApplicable;
        }
        let mut state = FillState::new(self, image.convert(PixelFormat::Argb32), seed);
        state.run(seed.x as usize, seed.y as usize);
        FillOutcome::Filled {
            checked_pixels: state.checked_count,
            image: state.image,
        }
    }
}

struct FillState<'f> {
    filler: &'f FloodFiller,
    image: Image,
    width: usize,
    height: usize,
    stride: usize,
    start_color: [u8; 3],
    checked: Vec<bool>,
    checked_count: usize,
    queue: VecDeque<FloodFillRange>,
}

impl<'f> FillState<'f> {
    fn new(filler: &'f FloodFiller, image: Image, seed: Point) -> Self {
        let width = image.width() as usize;
        let height = image.height() as usize;
        let stride = image.stride();
        let seed_index = seed.y as usize * stride + seed.x as usize * BPP;
        let pixel = &image.buffer()[seed_index..seed_index + 3];
        let start_color = [pixel[0], pixel[1], pixel[2]];
        Self {
            filler,
            image,
            width,
            height,
            stride,
            start_color,
            checked: vec![false; width * height],
            checked_count: 0,
            queue: VecDeque::with_capacity((width + height) / 2 * 5),
        }
    }

    fn run(&mut self, x: usize, y: usize) {
        self.linear_fill(x, y);

        while let Some(range) = self.queue.pop_front() {
            let (start_x, end_x) = if self.filler.fill_diagonally {
                (
                    range.start_x.saturating_sub(1),
                    (range.end_x + 1).min(self.width - 1),
                )
            } else {
                (range.start_x, range.end_x)
            };
            for x in start_x..=end_x {
                if range.y > 0 && self.can_fill(x, range.y - 1) {
                    self.linear_fill(x, range.y - 1);
                }
                if range.y + 1 < self.height && self.can_fill(x, range.y + 1) {
                    self.linear_fill(x, range.y + 1);
                }
            }
        }
    }

    /// Fills to the left and to the right from the given point and
    /// enqueues the filled range.
    fn linear_fill(&mut self, x: usize, y: usize) {
        self.fill_pixel(x, y);

        let mut start_x = x;
        while start_x > 0 && self.can_fill(start_x - 1, y) {
            start_x -= 1;
            self.fill_pixel(start_x, y);
        }

        let mut end_x = x;
        while end_x + 1 < self.width && self.can_fill(end_x + 1, y) {
            end_x += 1;
            self.fill_pixel(end_x, y);
        }

        self.queue.push_back(FloodFillRange {
            start_x,
            end_x,
            y,
        });
    }

    #[inline]
    fn can_fill(&self, x: usize, y: usize) -> bool {
        if self.checked[y * self.width + x] {
            return false;
        }
        let index = y * self.stride + x * BPP;
        let pixel = &self.image.buffer()[index..index + 3];
        pixel
            .iter()
            .zip(self.start_color)
            .zip(self.filler.tolerance)
            .all(|((&c, s), t)| c.abs_diff(s) <= t)
    }

    #[inline]
    fn fill_pixel(&mut self, x: usize, y: usize) {
        let index = y * self.stride + x * BPP;
        let fill = self.filler.fill_color.to_bytes();
        let pixel = &mut self.image.buffer_mut()[index..index + BPP];
        let fg_alpha = fill[3] as f32 / 255.;
        let bg_alpha = pixel[3] as f32 / 255.;
        for i in 0..3 {
            let blended =
                fill[i] as f32 * fg_alpha + pixel[i] as f32 * bg_alpha * (1. - fg_alpha);
            pixel[i] = blended.round().clamp(0., 255.) as u8;
        }
        let alpha = (1. - (1. - fg_alpha) * (1. - bg_alpha)) * 255.;
        pixel[3] = alpha.round().clamp(0., 255.) as u8;

        self.checked[y * self.width + x] = true;
        self.checked_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translucent_fill_is_blended() {
        let image = Image::create_empty(2, 1, PixelFormat::Argb32, Some(Color::BLACK));
        let filler = FloodFiller::new().with_fill_color(Color::from_argb(128, 255, 255, 255));
        let FillOutcome::Filled { image, .. } = filler.flood_fill(&image, Point::new(0, 0)) else {
            panic!("seed is inside the image");
        };
        // 255 * 128/255 + 0 = 128, alpha stays opaque
        assert_eq!(image.color_at(0, 0), Some(Color::from_argb(255, 128, 128, 128)));
        assert_eq!(image.color_at(1, 0), Some(Color::from_argb(255, 128, 128, 128)));
    }

    #[test]
    fn leftmost_column_is_reachable() {
        let image = Image::create_empty(5, 1, PixelFormat::Rgb24, None);
        let filler = FloodFiller::new().with_fill_color(Color::BLACK);
        let FillOutcome::Filled {
            image,
            checked_pixels,
        } = filler.flood_fill(&image, Point::new(4, 0))
        else {
            panic!("seed is inside the image");
        };
        assert_eq!(checked_pixels, 5);
        assert_eq!(image.color_at(0, 0), Some(Color::BLACK));
    }
}
