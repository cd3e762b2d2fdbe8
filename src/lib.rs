#![doc = include_str!("../README.md")]
//!
//! ## Feature flags
#![doc = document_features::document_features!()]

pub use buffer::{ClipView, LayoutView, OffsetView, PixelAccess, PixelBuffer};
pub use color::Color;
pub use errors::*;
pub use fill::{FillOutcome, FloodFillRange, FloodFiller};
pub use geometry::{Point, Rect, Rectangle, RectangleF, Size};
pub use crate::image::{Image, Resolution};
pub use pipeline::{ChainOutput, EffectPipeline};
pub use pixels::PixelFormat;
pub use raster::{Raster, SoftwareRaster};

mod alpha;
pub mod algorithms;
mod buffer;
mod color;
pub mod effects;
mod errors;
mod fill;
mod geometry;
mod image;
#[cfg(feature = "image")]
mod image_crate;
pub mod operations;
mod pipeline;
pub mod pixels;
pub mod raster;
