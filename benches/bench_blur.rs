use shotfx::algorithms::apply_box_blur;
use shotfx::{PixelBuffer, PixelFormat};

mod utils;

fn box_blur(bench_group: &mut utils::BenchGroup, format: PixelFormat) {
    let sample_size = 50;
    let src_image = utils::get_src_image(1920, 1080, format);
    for range in [3u32, 9, 25] {
        utils::bench(
            bench_group,
            sample_size,
            format!("Box blur {format:?}"),
            format!("range {range}"),
            |bencher| {
                let mut image = src_image.clone();
                bencher.iter(|| {
                    let mut buffer = PixelBuffer::new(&mut image, None);
                    apply_box_blur(&mut buffer, range).unwrap();
                })
            },
        );
    }
}

pub fn bench_blur(bench_group: &mut utils::BenchGroup) {
    for format in [PixelFormat::Rgb24, PixelFormat::Rgb32, PixelFormat::Argb32] {
        box_blur(bench_group, format);
    }
}

fn main() {
    utils::run_bench(bench_blur, "Bench Blur");
}
