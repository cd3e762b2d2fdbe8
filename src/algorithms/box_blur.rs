use crate::buffer::{LayoutView, PixelBuffer};
use crate::pixels::{Argb32, PixelFormat, PixelLayout, Rgb24, Rgb32};
use crate::PixelBufferError;

/// Blurs pixels of the buffer by running the box filter twice
/// in both directions, that gives a good approximation of gaussian blur.
///
/// Even `range` is increased by one. Range less than or equal to 1
/// leaves pixels untouched.
pub fn apply_box_blur(buffer: &mut PixelBuffer, range: u32) -> Result<(), PixelBufferError> {
    let Some(range) = window_size(range) else {
        return Ok(());
    };
    match buffer.format() {
        PixelFormat::Rgb24 => blur_rounds::<Rgb24, false>(buffer, range),
        PixelFormat::Rgb32 => blur_rounds::<Rgb32, false>(buffer, range),
        PixelFormat::Argb32 => blur_rounds::<Argb32, true>(buffer, range),
        format @ PixelFormat::Indexed8 => Err(PixelBufferError::unsupported(format)),
    }
}

fn blur_rounds<L: PixelLayout, const ALPHA: bool>(
    buffer: &mut PixelBuffer,
    range: usize,
) -> Result<(), PixelBufferError> {
    let mut view = typed_view::<L>(buffer)?;
    for _ in 0..2 {
        horizontal_pass::<L, ALPHA>(&mut view, range);
        vertical_pass::<L, ALPHA>(&mut view, range);
    }
    Ok(())
}

/// One horizontal pass of box filter over a buffer without alpha channel.
///
/// `range` is handled the same way as by [apply_box_blur].
pub fn box_blur_horizontal(buffer: &mut PixelBuffer, range: u32) -> Result<(), PixelBufferError> {
    run_pass(buffer, range, false, horizontal_pass::<Rgb24, false>, horizontal_pass::<Rgb32, false>)
}

/// One vertical pass of box filter over a buffer without alpha channel.
pub fn box_blur_vertical(buffer: &mut PixelBuffer, range: u32) -> Result<(), PixelBufferError> {
    run_pass(buffer, range, false, vertical_pass::<Rgb24, false>, vertical_pass::<Rgb32, false>)
}

/// One horizontal pass of box filter over a buffer with alpha channel.
pub fn box_blur_horizontal_alpha(
    buffer: &mut PixelBuffer,
    range: u32,
) -> Result<(), PixelBufferError> {
    check_alpha(buffer, true)?;
    let Some(range) = window_size(range) else {
        return Ok(());
    };
    let mut view = typed_view::<Argb32>(buffer)?;
    horizontal_pass::<Argb32, true>(&mut view, range);
    Ok(())
}

/// One vertical pass of box filter over a buffer with alpha channel.
pub fn box_blur_vertical_alpha(
    buffer: &mut PixelBuffer,
    range: u32,
) -> Result<(), PixelBufferError> {
    check_alpha(buffer, true)?;
    let Some(range) = window_size(range) else {
        return Ok(());
    };
    let mut view = typed_view::<Argb32>(buffer)?;
    vertical_pass::<Argb32, true>(&mut view, range);
    Ok(())
}

/// Odd size of the sliding window, `None` if blurring does nothing.
fn window_size(range: u32) -> Option<usize> {
    let range = range | 1;
    (range > 1).then_some(range as usize)
}

type Pass<L> = fn(&mut LayoutView<L>, usize);

fn run_pass(
    buffer: &mut PixelBuffer,
    range: u32,
    alpha: bool,
    rgb24: Pass<Rgb24>,
    rgb32: Pass<Rgb32>,
) -> Result<(), PixelBufferError> {
    check_alpha(buffer, alpha)?;
    let Some(range) = window_size(range) else {
        return Ok(());
    };
    match buffer.format() {
        PixelFormat::Rgb24 => rgb24(&mut typed_view::<Rgb24>(buffer)?, range),
        PixelFormat::Rgb32 => rgb32(&mut typed_view::<Rgb32>(buffer)?, range),
        format => return Err(PixelBufferError::unsupported(format)),
    }
    Ok(())
}

fn check_alpha(buffer: &PixelBuffer, alpha: bool) -> Result<(), PixelBufferError> {
    let format = buffer.format();
    if format.is_indexed() {
        return Err(PixelBufferError::unsupported(format));
    }
    match (alpha, format.has_alpha()) {
        (true, false) => Err(PixelBufferError::AlgorithmMisuse(
            "alpha pass of box blur requires a buffer with alpha channel",
        )),
        (false, true) => Err(PixelBufferError::AlgorithmMisuse(
            "box blur pass without alpha can't be used on a buffer with alpha channel",
        )),
        _ => Ok(()),
    }
}

fn typed_view<'b, L: PixelLayout>(
    buffer: &'b mut PixelBuffer,
) -> Result<LayoutView<'b, L>, PixelBufferError> {
    let format = buffer.format();
    buffer
        .layout_view::<L>()
        .ok_or(PixelBufferError::unsupported(format))
}

fn horizontal_pass<L: PixelLayout, const ALPHA: bool>(view: &mut LayoutView<L>, range: usize) {
    let (width, height) = (view.width(), view.height());
    let mut new_colors = vec![[0u8; 4]; width];
    for y in 0..height {
        blur_line::<ALPHA>(width, range / 2, |x| view.get(x, y), &mut new_colors);
        for (x, &rgba) in new_colors.iter().enumerate() {
            view.set(x, y, rgba);
        }
    }
}

fn vertical_pass<L: PixelLayout, const ALPHA: bool>(view: &mut LayoutView<L>, range: usize) {
    let (width, height) = (view.width(), view.height());
    let mut new_colors = vec![[0u8; 4]; height];
    for x in 0..width {
        blur_line::<ALPHA>(height, range / 2, |y| view.get(x, y), &mut new_colors);
        for (y, &rgba) in new_colors.iter().enumerate() {
            view.set(x, y, rgba);
        }
    }
}

/// Sliding window mean over `len` pixels returned by `read`.
///
/// The window is shrunk near the edges of the line, so `hits`
/// counts only pixels that are inside the line.
#[inline(always)]
fn blur_line<const ALPHA: bool>(
    len: usize,
    half: usize,
    read: impl Fn(usize) -> [u8; 4],
    new_colors: &mut [[u8; 4]],
) {
    let mut sums = [0u32; 4];
    let mut hits = 0u32;
    let len = len as isize;
    let half = half as isize;
    for pos in -half..len {
        let old_pos = pos - half - 1;
        if old_pos >= 0 {
            let rgba = read(old_pos as usize);
            for (s, c) in sums.iter_mut().zip(rgba) {
                *s -= c as u32;
            }
            hits -= 1;
        }

        let new_pos = pos + half;
        if new_pos < len {
            let rgba = read(new_pos as usize);
            for (s, c) in sums.iter_mut().zip(rgba) {
                *s += c as u32;
            }
            hits += 1;
        }

        if pos >= 0 {
            let a = if ALPHA { (sums[3] / hits) as u8 } else { 255 };
            new_colors[pos as usize] = [
                (sums[0] / hits) as u8,
                (sums[1] / hits) as u8,
                (sums[2] / hits) as u8,
                a,
            ];
        }
    }
}
