use shotfx::effects::{
    BlurEffect, BorderEffect, DropShadowEffect, Effect, FlipEffect, GrayscaleEffect,
    InvertEffect, PixelateEffect, ResizeCanvasEffect, ResizeEffect, RotateEffect, SharpenEffect,
    TornEdgeEffect,
};
use shotfx::operations::{self, ResizeOptions};
use shotfx::raster::RotateFlip;
use shotfx::{Color, EffectError, Image, PixelFormat, Point, Rectangle, SoftwareRaster};
use testing::{assert_uniform, fill_rect, gradient_image, save_result};


const RED: Color = Color::from_rgb(255, 0, 0);

fn raster() -> SoftwareRaster {
    SoftwareRaster::new()
}

/// Gray levels of pixels of the first row.
fn row_levels(image: &Image) -> Vec<u8> {
    (0..image.width())
        .map(|x| image.color_at(x, 0).unwrap().r)
        .collect()
}

fn gray_row(levels: &[u8]) -> Image {
    let mut image = Image::create_empty(levels.len() as u32, 1, PixelFormat::Rgb24, None);
    for (x, &l) in levels.iter().enumerate() {
        fill_rect(&mut image, Rectangle::new(x as i32, 0, 1, 1), Color::from_rgb(l, l, l));
    }
    image
}

#[test]
fn border_effect() {
    let image = Image::create_empty(20, 10, PixelFormat::Rgb24, Some(Color::WHITE));
    let output = BorderEffect::new(3, RED).apply(&image, &raster()).unwrap();
    save_result(&output.image, "border_effect");

    assert_eq!(output.offset, Point::new(3, 3));
    let res = &output.image;
    assert_eq!((res.width(), res.height()), (26, 16));
    assert_eq!(res.format(), PixelFormat::Rgb24);
    assert_uniform(res, Rectangle::new(0, 0, 26, 3), RED);
    assert_uniform(res, Rectangle::new(0, 13, 26, 3), RED);
    assert_uniform(res, Rectangle::new(0, 3, 3, 10), RED);
    assert_uniform(res, Rectangle::new(23, 3, 3, 10), RED);
    assert_uniform(res, Rectangle::new(3, 3, 20, 10), Color::WHITE);
}

#[test]
fn border_keeps_transparency() {
    let image = Image::create_empty(4, 4, PixelFormat::Argb32, None);
    let output = BorderEffect::default().apply(&image, &raster()).unwrap();
    let res = &output.image;
    assert_eq!(res.format(), PixelFormat::Argb32);
    assert_eq!(res.color_at(0, 0), Some(Color::BLACK));
    assert_eq!(res.color_at(3, 3).map(|c| c.a), Some(0));
}

#[test]
fn drop_shadow_effect() {
    let image = Image::create_empty(20, 10, PixelFormat::Rgb24, Some(Color::WHITE));
    let effect = DropShadowEffect::new(7);
    assert_eq!(effect.margin(), 13);
    let output = effect.apply(&image, &raster()).unwrap();
    save_result(&output.image, "drop_shadow_effect");

    assert_eq!(output.offset, Point::new(13, 13));
    let res = &output.image;
    assert_eq!((res.width(), res.height()), (46, 36));
    assert_eq!(res.format(), PixelFormat::Argb32);
    assert_uniform(res, Rectangle::new(13, 13, 20, 10), Color::WHITE);
    assert_eq!(res.color_at(0, 0).map(|c| c.a), Some(0));

    // Shadow is visible near the right-bottom corner of the image.
    let shadow = res.color_at(34, 24).unwrap();
    assert_eq!((shadow.r, shadow.g, shadow.b), (0, 0, 0));
    assert!(shadow.a > 0 && shadow.a <= 153, "{}", shadow);
}

#[test]
fn canvas_growth_out_of_range() {
    let image = Image::create_empty(4, 4, PixelFormat::Rgb24, None);
    for width in [i32::MAX as u32, i32::MAX as u32 / 2, u32::MAX] {
        let res = BorderEffect::new(width, RED).apply(&image, &raster());
        assert!(
            matches!(res, Err(EffectError::InvalidParameter(_))),
            "border {}",
            width
        );
    }
    for size in [1 << 29, 1 << 30, u32::MAX] {
        let res = DropShadowEffect::new(size).apply(&image, &raster());
        assert!(
            matches!(res, Err(EffectError::InvalidParameter(_))),
            "shadow {}",
            size
        );
    }
    for offset in [Point::new(i32::MAX, 0), Point::new(0, i32::MIN)] {
        let res = DropShadowEffect::new(3)
            .with_shadow_offset(offset)
            .apply(&image, &raster());
        assert!(matches!(res, Err(EffectError::InvalidParameter(_))));
    }
}

#[test]
fn drop_shadow_parameters() {
    let image = Image::create_empty(5, 5, PixelFormat::Rgb24, None);
    // Even size is rounded up to odd.
    assert_eq!(DropShadowEffect::new(6).margin(), 13);
    let res = DropShadowEffect::new(7)
        .with_darkness(1.5)
        .apply(&image, &raster());
    assert!(matches!(res, Err(EffectError::InvalidParameter(_))));

    let output = DropShadowEffect::new(3)
        .with_shadow_offset(Point::ZERO)
        .apply(&image, &raster())
        .unwrap();
    assert_eq!(output.offset, Point::new(5, 5));
    assert_eq!(output.image.width(), 15);
}

#[test]
fn blur_effect() {
    let image = gradient_image(30, 30, PixelFormat::Rgb24);
    let output = BlurEffect::new(5).apply(&image, &raster()).unwrap();
    assert_eq!(output.offset, Point::ZERO);
    assert_eq!(output.image.size(), image.size());
    assert_ne!(output.image, image);

    let untouched = BlurEffect::new(1).apply(&image, &raster()).unwrap();
    assert_eq!(untouched.image, image);
}

#[test]
fn blur_of_indexed_image() {
    let image = Image::new_indexed(6, 6, vec![RED]).unwrap();
    let output = BlurEffect::default().apply(&image, &raster()).unwrap();
    assert_eq!(output.image.format(), PixelFormat::Rgb24);
    assert_uniform(&output.image, output.image.bounds(), RED);
}

#[test]
fn color_adjustments() {
    let image = Image::create_empty(3, 3, PixelFormat::Argb32, Some(RED));
    let gray = GrayscaleEffect::new().apply(&image, &raster()).unwrap().image;
    assert_uniform(&gray, gray.bounds(), Color::from_rgb(77, 77, 77));

    let dark = GrayscaleEffect::dark().apply(&image, &raster()).unwrap().image;
    // Darkening removes the whole gray level of red.
    let c = dark.color_at(1, 1).unwrap();
    assert!(c.r <= 1, "{}", c);
    assert_eq!(dark, operations::create_grayscale_dark(&image, &raster()).unwrap());

    let color = Color::from_argb(80, 0, 100, 255);
    let translucent = Image::create_empty(2, 2, PixelFormat::Argb32, Some(color));
    let inverted = InvertEffect.apply(&translucent, &raster()).unwrap().image;
    assert_eq!(inverted.color_at(0, 0), Some(Color::from_argb(80, 255, 155, 0)));
}

#[test]
fn pixelate_effect() {
    let image = gradient_image(12, 12, PixelFormat::Rgb24);
    let res = PixelateEffect::new(4).apply(&image, &raster()).unwrap().image;
    save_result(&res, "pixelate_effect");

    // Blocks are shifted by half of size: [-2, 2), [2, 6), ...
    assert_uniform(&res, Rectangle::new(2, 2, 4, 4), res.color_at(2, 2).unwrap());
    assert_uniform(&res, Rectangle::new(0, 0, 2, 2), res.color_at(0, 0).unwrap());
    assert_ne!(res.color_at(1, 1), res.color_at(2, 2));

    let res = PixelateEffect::new(1).apply(&image, &raster()).unwrap().image;
    assert_eq!(res, image);

    // Size of block is limited by size of image.
    let small = gradient_image(4, 3, PixelFormat::Rgb24);
    let res = PixelateEffect::new(100).apply(&small, &raster()).unwrap().image;
    assert_eq!(res.size(), small.size());
}

#[test]
fn sharpen_reads_unmodified_source() {
    let image = gray_row(&[100, 200, 200, 50]);
    let res = SharpenEffect::new(0.5).apply(&image, &raster()).unwrap().image;
    // 200 + 0.5 * (200 - 100) = 250, next pixel compares with 200, not 250.
    assert_eq!(row_levels(&res), [100, 250, 200, 0]);

    let res = SharpenEffect::new(2.).apply(&image, &raster()).unwrap().image;
    assert_eq!(row_levels(&res), [100, 255, 200, 0]);

    let res = SharpenEffect::new(f32::NAN).apply(&image, &raster());
    assert!(matches!(res, Err(EffectError::InvalidParameter(_))));
}

#[test]
fn sharpen_is_not_cumulative_along_diagonal() {
    let mut image = Image::create_empty(3, 3, PixelFormat::Rgb24, Some(Color::BLACK));
    for (i, level) in [100, 200, 200].into_iter().enumerate() {
        let gray = Color::from_rgb(level, level, level);
        fill_rect(&mut image, Rectangle::new(i as i32, i as i32, 1, 1), gray);
    }
    let res = SharpenEffect::new(0.5).apply(&image, &raster()).unwrap().image;
    assert_eq!(res.color_at(1, 1).unwrap().r, 250);
    // The sharpened neighbour would give 200 + 0.5 * (200 - 250) = 175.
    assert_eq!(res.color_at(2, 2).unwrap().r, 200);
}

#[test]
fn rotate_effect() {
    let image = gray_row(&[10, 20, 30]);
    let res = RotateEffect::new(90).apply(&image, &raster()).unwrap();
    assert_eq!(res.offset, Point::ZERO);
    assert_eq!((res.image.width(), res.image.height()), (1, 3));
    assert_eq!(res.image.color_at(0, 0), Some(Color::from_rgb(10, 10, 10)));

    let res = RotateEffect::new(-90).apply(&image, &raster()).unwrap();
    assert_eq!(res.image.color_at(0, 0), Some(Color::from_rgb(30, 30, 30)));
    let res = RotateEffect::new(270).apply(&image, &raster()).unwrap();
    assert_eq!(res.image.color_at(0, 0), Some(Color::from_rgb(30, 30, 30)));

    for angle in [45, 180, 0, 360] {
        assert_eq!(
            RotateEffect::new(angle).apply(&image, &raster()).unwrap_err(),
            EffectError::UnsupportedAngle(angle)
        );
    }
}

#[test]
fn flip_effect() {
    let image = gray_row(&[10, 20, 30]);
    let res = FlipEffect::horizontal().apply(&image, &raster()).unwrap().image;
    assert_eq!(row_levels(&res), [30, 20, 10]);
    let res = FlipEffect::vertical().apply(&image, &raster()).unwrap().image;
    assert_eq!(row_levels(&res), [10, 20, 30]);

    let res = operations::rotate_flip(&image, &raster(), RotateFlip::Rotate180).unwrap();
    assert_eq!(row_levels(&res), [30, 20, 10]);
}

#[test]
fn resize_effect() {
    let image = Image::create_empty(20, 10, PixelFormat::Rgb24, Some(Color::BLACK));
    let res = ResizeEffect::new(40, 30, false).apply(&image, &raster()).unwrap();
    assert_eq!(res.offset, Point::ZERO);
    assert_eq!((res.image.width(), res.image.height()), (40, 30));
    assert_uniform(&res.image, res.image.bounds(), Color::BLACK);

    let res = ResizeEffect::new(40, 0, true).apply(&image, &raster()).unwrap();
    assert_eq!((res.image.width(), res.image.height()), (40, 20));

    let res = ResizeEffect::new(0, 30, false).apply(&image, &raster());
    assert!(matches!(res, Err(EffectError::InvalidParameter(_))));

    let empty = Image::new(0, 0, PixelFormat::Rgb24);
    let res = ResizeEffect::new(10, 10, false).apply(&empty, &raster());
    assert!(matches!(res, Err(EffectError::InvalidParameter(_))));
}

#[test]
fn resize_into_canvas_of_new_size() {
    let image = Image::create_empty(20, 10, PixelFormat::Rgb24, Some(Color::BLACK));
    let options = ResizeOptions::new(40, 40)
        .maintain_aspect_ratio(true)
        .canvas_use_new_size(true);
    let (res, position) = operations::resize_image(&image, &raster(), &options).unwrap();
    assert_eq!(position, Point::new(0, 10));
    assert_eq!((res.width(), res.height()), (40, 40));
    assert_uniform(&res, Rectangle::new(0, 0, 40, 10), Color::WHITE);
    assert_uniform(&res, Rectangle::new(0, 10, 40, 20), Color::BLACK);
    assert_uniform(&res, Rectangle::new(0, 30, 40, 10), Color::WHITE);

    let options = options.background(Some(RED));
    let (res, _) = operations::resize_image(&image, &raster(), &options).unwrap();
    assert_eq!(res.color_at(0, 0), Some(RED));
}

#[test]
fn resize_canvas_effect() {
    let image = gradient_image(10, 10, PixelFormat::Rgb24);
    let output = ResizeCanvasEffect::new(2, 3, 4, 5)
        .with_background(Some(RED))
        .apply(&image, &raster())
        .unwrap();
    assert_eq!(output.offset, Point::new(2, 4));
    assert_eq!((output.image.width(), output.image.height()), (15, 19));
    assert_eq!(output.image.color_at(0, 0), Some(RED));
    assert_eq!(output.image.color_at(2, 4), image.color_at(0, 0));

    let output = ResizeCanvasEffect::new(-2, 0, -2, 0)
        .apply(&image, &raster())
        .unwrap();
    assert_eq!(output.offset, Point::new(-2, -2));
    assert_eq!((output.image.width(), output.image.height()), (8, 8));
    assert_eq!(output.image.color_at(0, 0), image.color_at(2, 2));

    let res = ResizeCanvasEffect::new(-5, -5, 0, 0).apply(&image, &raster());
    assert!(matches!(res, Err(EffectError::InvalidParameter(_))));
}

#[test]
fn torn_edge_effect() {
    let image = Image::create_empty(100, 80, PixelFormat::Rgb24, Some(Color::WHITE));
    let effect = TornEdgeEffect::new().with_seed(Some(42)).with_shadow(None);
    let first = effect.apply(&image, &raster()).unwrap();
    let second = effect.apply(&image, &raster()).unwrap();
    save_result(&first.image, "torn_edge_effect");

    assert_eq!(first, second);
    assert_eq!(first.offset, Point::ZERO);
    assert_eq!(first.image.size(), image.size());
    assert_eq!(first.image.format(), PixelFormat::Argb32);
    assert_eq!(first.image.color_at(0, 0).map(|c| c.a), Some(0));
    assert_eq!(first.image.color_at(50, 40), Some(Color::WHITE));

    // 5 teeth on horizontal edges and 4 teeth on vertical ones.
    let outline = effect.outline(100, 80).unwrap();
    assert_eq!(outline.len(), 2 * (5 + 4) + 1);
    assert_eq!(outline, effect.outline(100, 80).unwrap());
    // Depth of teeth on the top edge is in range 1..12.
    for p in &outline[..6] {
        assert!(p.y >= 1 && p.y < 12, "{:?}", p);
    }
}

#[test]
fn torn_edge_with_shadow() {
    let image = Image::create_empty(60, 60, PixelFormat::Rgb24, Some(Color::WHITE));
    let output = TornEdgeEffect::default()
        .with_seed(Some(7))
        .apply(&image, &raster())
        .unwrap();
    assert_eq!(output.offset, Point::new(13, 13));
    assert_eq!(output.image.width(), 60 + 26);

    let res = TornEdgeEffect::new()
        .with_tooth_ranges(0, 20)
        .apply(&image, &raster());
    assert!(matches!(res, Err(EffectError::InvalidParameter(_))));
}
