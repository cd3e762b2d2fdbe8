use shotfx::algorithms::{
    apply_box_blur, box_blur_horizontal, box_blur_horizontal_alpha, box_blur_vertical,
    box_blur_vertical_alpha,
};
use shotfx::{Color, Image, PixelAccess, PixelBuffer, PixelBufferError, PixelFormat, Rectangle};
use testing::{fill_rect, gradient_image, image_checksum, save_result};


fn blurred(image: &Image, range: u32) -> Image {
    let mut res = image.clone();
    let mut buffer = PixelBuffer::new(&mut res, None);
    apply_box_blur(&mut buffer, range).unwrap();
    drop(buffer);
    res
}

/// Left half is black, right half is white.
fn split_image(width: u32, height: u32, format: PixelFormat) -> Image {
    let mut image = Image::create_empty(width, height, format, Some(Color::WHITE));
    let half = Rectangle::new(0, 0, width as i32 / 2, height as i32);
    fill_rect(&mut image, half, Color::BLACK);
    image
}

#[test]
fn small_range_does_nothing() {
    let image = gradient_image(20, 15, PixelFormat::Rgb24);
    assert_eq!(blurred(&image, 0), image);
    assert_eq!(blurred(&image, 1), image);
}

#[test]
fn uniform_image_is_not_changed() {
    for format in [PixelFormat::Rgb24, PixelFormat::Rgb32, PixelFormat::Argb32] {
        let image = Image::create_empty(17, 9, format, Some(Color::from_rgb(90, 160, 30)));
        assert_eq!(blurred(&image, 7), image, "{:?}", format);
    }
}

#[test]
fn even_range_is_increased() {
    let image = gradient_image(30, 20, PixelFormat::Rgb24);
    assert_eq!(blurred(&image, 4), blurred(&image, 5));
}

#[test]
fn blur_softens_edge() {
    let image = split_image(20, 10, PixelFormat::Rgb24);
    let res = blurred(&image, 5);
    save_result(&res, "blur_softens_edge");

    let left = res.color_at(9, 5).unwrap();
    let right = res.color_at(10, 5).unwrap();
    assert!(left.r > 0 && left.r < 128, "{}", left);
    assert!(right.r > 128 && right.r < 255, "{}", right);
    assert_eq!(res.color_at(0, 5), Some(Color::BLACK));
    assert_eq!(res.color_at(19, 5), Some(Color::WHITE));
}

#[test]
fn alpha_and_opaque_blur_give_same_colors() {
    let rgb = gradient_image(25, 25, PixelFormat::Rgb24);
    let argb = gradient_image(25, 25, PixelFormat::Argb32);
    let rgb = blurred(&rgb, 9);
    let argb = blurred(&argb, 9);
    assert_eq!(image_checksum(&rgb), image_checksum(&argb));
    for y in 0..25 {
        for x in 0..25 {
            assert_eq!(rgb.color_at(x, y), argb.color_at(x, y));
        }
    }
}

#[test]
fn transparent_pixels_spread_alpha() {
    let mut image = Image::create_empty(9, 1, PixelFormat::Argb32, None);
    fill_rect(&mut image, Rectangle::new(4, 0, 1, 1), Color::BLACK);
    let res = blurred(&image, 3);
    let alpha: Vec<u8> = (0..9).map(|x| res.color_at(x, 0).unwrap().a).collect();
    assert!(alpha[4] > 0 && alpha[4] < 255);
    assert!(alpha[3] > 0);
    assert_eq!(alpha[0], 0);
    assert_eq!(alpha[8], 0);
}

#[test]
fn blur_is_limited_by_buffer_area() {
    let mut image = split_image(20, 10, PixelFormat::Rgb32);
    let area = Rectangle::new(5, 0, 10, 10);
    {
        let mut buffer = PixelBuffer::new(&mut image, Some(area));
        apply_box_blur(&mut buffer, 5).unwrap();
    }
    for y in 0..10 {
        for x in 0..5 {
            assert_eq!(image.color_at(x, y), Some(Color::BLACK));
            assert_eq!(image.color_at(x + 15, y), Some(Color::WHITE));
        }
    }
    let c = image.color_at(9, 5).unwrap();
    assert!(c.r > 0 && c.r < 255);
}

#[test]
fn single_passes() {
    // Colors vary only along X axis.
    let image = split_image(12, 8, PixelFormat::Rgb24);

    let mut res = image.clone();
    {
        let mut buffer = PixelBuffer::new(&mut res, None);
        box_blur_vertical(&mut buffer, 5).unwrap();
    }
    assert_eq!(res, image);

    {
        let mut buffer = PixelBuffer::new(&mut res, None);
        box_blur_horizontal(&mut buffer, 5).unwrap();
        assert_ne!(buffer.get_color_at(5, 0), Color::BLACK);
    }

    let mut res = image.convert(PixelFormat::Argb32);
    let mut buffer = PixelBuffer::new(&mut res, None);
    box_blur_vertical_alpha(&mut buffer, 5).unwrap();
    box_blur_horizontal_alpha(&mut buffer, 5).unwrap();
    assert_ne!(buffer.get_color_at(5, 0), Color::BLACK);
}

#[test]
fn single_passes_normalize_range() {
    let image = split_image(12, 8, PixelFormat::Rgb24);
    let pass = |image: &Image, range: u32, horizontal: bool| {
        let mut res = image.clone();
        let mut buffer = PixelBuffer::new(&mut res, None);
        if horizontal {
            box_blur_horizontal(&mut buffer, range).unwrap();
        } else {
            box_blur_vertical_alpha(&mut buffer, range).unwrap();
        }
        drop(buffer);
        res
    };

    for range in [0, 1] {
        assert_eq!(pass(&image, range, true), image);
    }
    assert_eq!(pass(&image, 4, true), pass(&image, 5, true));
    assert_ne!(pass(&image, 4, true), image);

    let image = gradient_image(12, 8, PixelFormat::Argb32);
    assert_eq!(pass(&image, 1, false), image);
    assert_eq!(pass(&image, 6, false), pass(&image, 7, false));
}

#[test]
fn misuse_of_passes() {
    let mut argb = Image::create_empty(4, 4, PixelFormat::Argb32, None);
    let mut buffer = PixelBuffer::new(&mut argb, None);
    assert!(matches!(
        box_blur_horizontal(&mut buffer, 3),
        Err(PixelBufferError::AlgorithmMisuse(_))
    ));
    assert!(matches!(
        box_blur_vertical(&mut buffer, 3),
        Err(PixelBufferError::AlgorithmMisuse(_))
    ));
    drop(buffer);

    let mut rgb = Image::create_empty(4, 4, PixelFormat::Rgb24, None);
    let mut buffer = PixelBuffer::new(&mut rgb, None);
    assert!(matches!(
        box_blur_horizontal_alpha(&mut buffer, 3),
        Err(PixelBufferError::AlgorithmMisuse(_))
    ));
    assert!(matches!(
        box_blur_vertical_alpha(&mut buffer, 3),
        Err(PixelBufferError::AlgorithmMisuse(_))
    ));
}

#[test]
fn indexed_buffer_is_unsupported() {
    let mut image = Image::new_indexed(4, 4, vec![Color::WHITE]).unwrap();
    let mut buffer = PixelBuffer::new(&mut image, None);
    assert_eq!(
        apply_box_blur(&mut buffer, 3),
        Err(PixelBufferError::UnsupportedPixelFormat("Indexed8"))
    );
    assert!(matches!(
        box_blur_horizontal(&mut buffer, 3),
        Err(PixelBufferError::UnsupportedPixelFormat(_))
    ));
}
