use crate::buffer::PixelAccess;
use crate::color::Color;
use crate::PixelBufferError;

/// Replaces every square block of `pixel_size` pixels by the average
/// color of the block.
///
/// The grid of blocks is shifted by half of block size, so blocks
/// on the edges are cut.
pub fn mix_colors(buffer: &mut impl PixelAccess, pixel_size: u32) -> Result<(), PixelBufferError> {
    if pixel_size <= 1 {
        return Ok(());
    }
    let size = pixel_size as i32;
    let half = size / 2;
    let (width, height) = (buffer.width() as i32, buffer.height() as i32);

    let mut block = Vec::with_capacity((size * size) as usize);
    for block_y in (-half..height).step_by(size as usize) {
        for block_x in (-half..width).step_by(size as usize) {
            block.clear();
            for y in block_y..block_y + size {
                for x in block_x..block_x + size {
                    if buffer.contains(x, y) {
                        block.push(buffer.get_color_at(x, y));
                    }
                }
            }
            let Some(mixed) = Color::mix(block.iter().copied()) else {
                continue;
            };
            for y in block_y..block_y + size {
                for x in block_x..block_x + size {
                    if buffer.contains(x, y) {
                        buffer.set_color_at(x, y, mixed)?;
                    }
                }
            }
        }
    }
    Ok(())
}
