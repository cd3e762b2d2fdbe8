use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use image::{DynamicImage, ImageReader};
use log::{debug, info};
use shotfx::effects::Effect;
use shotfx::{operations, EffectPipeline, Image, SoftwareRaster};

use crate::structs::{EffectSpec, FilterType};

mod structs;

#[derive(Parser)]
#[clap(version, about, long_about = None)]
#[clap(disable_help_flag = true)]
struct Cli {
    #[clap(long, action = clap::ArgAction::HelpLong)]
    help: Option<bool>,

    /// Path to source image file
    #[clap(value_parser)]
    source_path: PathBuf,

    /// Path to result image file
    #[clap(value_parser)]
    destination_path: Option<PathBuf>,

    /// Effect to apply: blur=R, border=W[:COLOR], shadow=SIZE[:DARKNESS],
    /// grayscale, grayscale-dark, invert, pixelate=N, sharpen=DEPTH,
    /// resize=WxH[:keep], canvas=L,R,T,B[:COLOR], rotate=ANGLE, flip=h|v,
    /// torn[=SEED]. May be repeated, effects are applied in given order.
    #[clap(short, long = "effect", value_parser)]
    effects: Vec<EffectSpec>,

    /// Remove borders of uniform color before applying effects
    #[clap(short, long, value_name = "TOLERANCE")]
    auto_crop: Option<u8>,

    /// Filter used to scale images
    #[clap(short, long, value_enum, default_value_t = FilterType::CatmullRom)]
    filter: FilterType,

    /// Overwrite destination file
    #[clap(short, long, action)]
    overwrite: bool,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();
    process(&cli)
}

fn process(cli: &Cli) -> Result<()> {
    let src_image = ImageReader::open(&cli.source_path)
        .with_context(|| format!("Failed to read source file {:?}", cli.source_path))?
        .decode()
        .context("Failed to decode source image")?;
    let src_image = Image::try_from(&src_image).context("Unsupported source image")?;
    info!(
        "Source image size is {}x{}",
        src_image.width(),
        src_image.height()
    );

    let src_image = match cli.auto_crop {
        Some(tolerance) => {
            let cropped = operations::auto_crop(&src_image, tolerance)
                .context("Failed to crop source image")?;
            debug!(
                "Auto-cropped image size is {}x{}",
                cropped.width(),
                cropped.height()
            );
            cropped.into_owned()
        }
        None => src_image,
    };

    let effects: Vec<Box<dyn Effect>> = cli.effects.iter().map(EffectSpec::to_effect).collect();
    let raster = SoftwareRaster::new().with_filter(cli.filter.into());
    let pipeline = EffectPipeline::with_raster(raster).with_log_target("effector");
    let output = pipeline
        .apply_chain(&src_image, &effects)
        .context("Failed to apply effects")?;
    info!(
        "Result image size is {}x{}, offset {},{}",
        output.image.width(),
        output.image.height(),
        output.offset.x,
        output.offset.y,
    );

    save_result(cli, &output.image)
}

fn save_result(cli: &Cli, image: &Image) -> Result<()> {
    let result_path = if let Some(path) = cli.destination_path.clone() {
        path
    } else {
        let ext = cli
            .source_path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("png");
        PathBuf::from(format!("./result.{}", ext))
    };
    if !cli.overwrite && result_path.exists() {
        return Err(anyhow!(
            "Destination path {:?} already exists. Use --overwrite to replace it.",
            result_path
        ));
    }
    DynamicImage::from(image)
        .save(&result_path)
        .with_context(|| format!("Failed to save result into {:?}", result_path))?;
    info!("Result saved into {:?}", result_path);
    Ok(())
}
