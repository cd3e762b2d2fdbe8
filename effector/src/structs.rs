use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use shotfx::effects::{
    BlurEffect, BorderEffect, DropShadowEffect, Effect, FlipEffect, GrayscaleEffect,
    InvertEffect, PixelateEffect, ResizeCanvasEffect, ResizeEffect, RotateEffect, SharpenEffect,
    TornEdgeEffect,
};
use shotfx::raster;
use shotfx::Color;

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum FilterType {
    /// Every source pixel contributes to one destination pixel with
    /// identical weight.
    Box,
    /// Linear interpolation between neighbour pixels.
    Bilinear,
    Hamming,
    /// Catmull-Rom bicubic filter, keeps edges of text sharp.
    CatmullRom,
    /// Mitchell–Netravali bicubic filter, softer than Catmull-Rom.
    Mitchell,
    /// Lanczos filter with a window of three lobes.
    Lanczos3,
}

impl From<FilterType> for raster::FilterType {
    fn from(filter_type: FilterType) -> Self {
        match filter_type {
            FilterType::Box => raster::FilterType::Box,
            FilterType::Bilinear => raster::FilterType::Bilinear,
            FilterType::Hamming => raster::FilterType::Hamming,
            FilterType::CatmullRom => raster::FilterType::CatmullRom,
            FilterType::Mitchell => raster::FilterType::Mitchell,
            FilterType::Lanczos3 => raster::FilterType::Lanczos3,
        }
    }
}

/// Effect given in command line as `name[=params]`.
#[derive(Clone, Debug, PartialEq)]
pub enum EffectSpec {
    Blur(u32),
    Border(u32, Color),
    Shadow(u32, f32),
    Grayscale { dark: bool },
    Invert,
    Pixelate(u32),
    Sharpen(f32),
    Resize(u32, u32, bool),
    Canvas([i32; 4], Option<Color>),
    Rotate(i32),
    Flip { horizontal: bool },
    Torn(Option<u64>),
}

fn parse_number<T: FromStr>(value: &str, name: &str) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid {} {:?}", name, value))
}

fn parse_color(value: &str) -> anyhow::Result<Color> {
    value
        .parse()
        .with_context(|| format!("Invalid color {:?}", value))
}

impl FromStr for EffectSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, params) = match s.split_once('=') {
            Some((name, params)) => (name, Some(params)),
            None => (s, None),
        };
        // "value[:extra]"
        let (value, extra) = match params {
            Some(p) => match p.split_once(':') {
                Some((v, e)) => (Some(v), Some(e)),
                None => (Some(p), None),
            },
            None => (None, None),
        };
        let required = || value.ok_or_else(|| anyhow!("Effect {:?} requires a value", name));

        let spec = match name {
            "blur" => Self::Blur(parse_number(required()?, "radius")?),
            "border" => {
                let color = extra.map(parse_color).transpose()?;
                Self::Border(
                    parse_number(required()?, "width")?,
                    color.unwrap_or(Color::BLACK),
                )
            }
            "shadow" => {
                let darkness = extra
                    .map(|d| parse_number(d, "darkness"))
                    .transpose()?
                    .unwrap_or(0.6);
                Self::Shadow(parse_number(required()?, "size")?, darkness)
            }
            "grayscale" => Self::Grayscale { dark: false },
            "grayscale-dark" => Self::Grayscale { dark: true },
            "invert" => Self::Invert,
            "pixelate" => Self::Pixelate(parse_number(required()?, "pixel size")?),
            "sharpen" => Self::Sharpen(parse_number(required()?, "depth")?),
            "resize" => {
                let size = required()?;
                let (width, height) = size
                    .split_once('x')
                    .ok_or_else(|| anyhow!("Size must be given as WIDTHxHEIGHT"))?;
                let keep_aspect = match extra {
                    None => false,
                    Some("keep") => true,
                    Some(other) => bail!("Unknown resize option {:?}", other),
                };
                Self::Resize(
                    parse_number(width, "width")?,
                    parse_number(height, "height")?,
                    keep_aspect,
                )
            }
            "canvas" => {
                let mut margins = [0i32; 4];
                let values: Vec<&str> = required()?.split(',').collect();
                if values.len() != 4 {
                    bail!("Canvas margins must be given as LEFT,RIGHT,TOP,BOTTOM");
                }
                for (margin, value) in margins.iter_mut().zip(values) {
                    *margin = parse_number(value, "margin")?;
                }
                Self::Canvas(margins, extra.map(parse_color).transpose()?)
            }
            "rotate" => Self::Rotate(parse_number(required()?, "angle")?),
            "flip" => match required()? {
                "h" | "horizontal" => Self::Flip { horizontal: true },
                "v" | "vertical" => Self::Flip { horizontal: false },
                other => bail!("Unknown flip direction {:?}", other),
            },
            "torn" => Self::Torn(value.map(|v| parse_number(v, "seed")).transpose()?),
            other => bail!("Unknown effect {:?}", other),
        };
        Ok(spec)
    }
}

impl EffectSpec {
    pub fn to_effect(&self) -> Box<dyn Effect> {
        match *self {
            Self::Blur(radius) => Box::new(BlurEffect::new(radius)),
            Self::Border(width, color) => Box::new(BorderEffect::new(width, color)),
            Self::Shadow(size, darkness) => {
                Box::new(DropShadowEffect::new(size).with_darkness(darkness))
            }
            Self::Grayscale { dark: false } => Box::new(GrayscaleEffect::new()),
            Self::Grayscale { dark: true } => Box::new(GrayscaleEffect::dark()),
            Self::Invert => Box::new(InvertEffect),
            Self::Pixelate(size) => Box::new(PixelateEffect::new(size)),
            Self::Sharpen(depth) => Box::new(SharpenEffect::new(depth)),
            Self::Resize(width, height, keep) => Box::new(ResizeEffect::new(width, height, keep)),
            Self::Canvas([left, right, top, bottom], background) => Box::new(
                ResizeCanvasEffect::new(left, right, top, bottom).with_background(background),
            ),
            Self::Rotate(angle) => Box::new(RotateEffect::new(angle)),
            Self::Flip { horizontal: true } => Box::new(FlipEffect::horizontal()),
            Self::Flip { horizontal: false } => Box::new(FlipEffect::vertical()),
            Self::Torn(seed) => Box::new(TornEdgeEffect::new().with_seed(seed)),
        }
    }
}
