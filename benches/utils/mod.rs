#![allow(dead_code)]
use criterion::measurement::WallTime;
use criterion::{Bencher, BenchmarkGroup, BenchmarkId, Criterion};
use shotfx::{Color, Image, PixelFormat, Rectangle};

pub type BenchGroup<'a> = BenchmarkGroup<'a, WallTime>;

pub fn run_bench<F>(bench_fn: F, name: &str)
where
    F: FnOnce(&mut BenchGroup),
{
    let mut criterion = Criterion::default().configure_from_args();
    let mut group = criterion.benchmark_group(name);
    bench_fn(&mut group);
    group.finish();
    criterion.final_summary();
}

pub fn bench<S1, S2, F>(
    group: &mut BenchGroup,
    sample_size: usize,
    func_name: S1,
    parameter: S2,
    mut f: F,
) where
    S1: Into<String>,
    S2: Into<String>,
    F: FnMut(&mut Bencher),
{
    let parameter = parameter.into();
    group.sample_size(sample_size);
    group.bench_with_input(
        BenchmarkId::new(func_name.into(), &parameter),
        &parameter,
        |bencher, _| f(bencher),
    );
}

/// Screenshot-like image: white background with a grid of colored
/// rectangles.
pub fn get_src_image(width: u32, height: u32, format: PixelFormat) -> Image {
    let mut image = Image::create_empty(width, height, format, Some(Color::WHITE));
    let mut source = Image::create_empty(64, 24, PixelFormat::Rgb24, Some(Color::WHITE));
    let block = Rectangle::new(4, 4, 56, 16);
    let colors = [
        Color::from_rgb(220, 40, 40),
        Color::from_rgb(40, 160, 60),
        Color::from_rgb(30, 60, 200),
    ];
    let mut index = 0;
    for y in (0..height).step_by(24) {
        for x in (0..width).step_by(64) {
            source.fill(Color::WHITE);
            let mut buffer = shotfx::PixelBuffer::new(&mut source, Some(block));
            fill_buffer(&mut buffer, colors[index % colors.len()]);
            drop(buffer);
            index += 1;
            let pixels = shotfx::PixelBuffer::clone_of(&source, None, None).unwrap();
            pixels
                .draw_to(&mut image, shotfx::Point::new(x as i32, y as i32))
                .unwrap();
        }
    }
    image
}

fn fill_buffer(buffer: &mut shotfx::PixelBuffer, color: Color) {
    use shotfx::PixelAccess;

    for y in 0..buffer.height() as i32 {
        for x in 0..buffer.width() as i32 {
            buffer.set_color_at(x, y, color).unwrap();
        }
    }
}
