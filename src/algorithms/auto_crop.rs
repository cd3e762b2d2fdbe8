use crate::buffer::PixelAccess;
use crate::geometry::{Point, Rectangle};

/// Finds the bounding box of pixels that differ from the color at `seed`.
///
/// With non-zero `tolerance` a pixel differs if the mean absolute
/// difference of its RGB channels is greater than `tolerance`.
/// With zero tolerance any difference counts, alpha included.
///
/// Returns an empty rectangle if there is nothing to crop: the seed is
/// out of the buffer, no pixel differs, or the box covers the whole buffer.
pub fn find_auto_crop_rectangle(
    buffer: &impl PixelAccess,
    seed: Point,
    tolerance: u8,
) -> Rectangle {
    if !buffer.contains(seed.x, seed.y) {
        return Rectangle::empty();
    }
    let reference = buffer.get_color_at(seed.x, seed.y);
    let (width, height) = (buffer.width() as i32, buffer.height() as i32);

    let mut min = Point::new(i32::MAX, i32::MAX);
    let mut max = Point::new(i32::MIN, i32::MIN);
    for y in 0..height {
        for x in 0..width {
            let color = buffer.get_color_at(x, y);
            let differs = if tolerance > 0 {
                color.rgb_distance(&reference) > tolerance as u32
            } else {
                color != reference
            };
            if differs {
                min.x = min.x.min(x);
                min.y = min.y.min(y);
                max.x = max.x.max(x);
                max.y = max.y.max(y);
            }
        }
    }

    if max.x < min.x || (min == Point::ZERO && max == Point::new(width - 1, height - 1)) {
        return Rectangle::empty();
    }
    Rectangle::new(min.x, min.y, max.x - min.x + 1, max.y - min.y + 1)
}
