use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{DropShadowEffect, Effect, EffectOutput};
use crate::geometry::Point;
use crate::image::Image;
use crate::pixels::PixelFormat;
use crate::raster::Raster;
use crate::EffectError;

/// Cuts edges of the image by a random saw-tooth line,
/// optionally with a shadow under the result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TornEdgeEffect {
    tooth_height: u32,
    horizontal_tooth_range: u32,
    vertical_tooth_range: u32,
    shadow: Option<DropShadowEffect>,
    seed: Option<u64>,
}

impl Default for TornEdgeEffect {
    fn default() -> Self {
        Self {
            tooth_height: 12,
            horizontal_tooth_range: 20,
            vertical_tooth_range: 20,
            shadow: Some(DropShadowEffect::default()),
            seed: None,
        }
    }
}

impl TornEdgeEffect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximal depth of teeth.
    pub fn with_tooth_height(mut self, height: u32) -> Self {
        self.tooth_height = height;
        self
    }

    /// Width of teeth on the top and bottom edges and
    /// height of teeth on the left and right edges.
    pub fn with_tooth_ranges(mut self, horizontal: u32, vertical: u32) -> Self {
        self.horizontal_tooth_range = horizontal;
        self.vertical_tooth_range = vertical;
        self
    }

    /// Shadow drawn under the torn image, `None` disables it.
    pub fn with_shadow(mut self, shadow: Option<DropShadowEffect>) -> Self {
        self.shadow = shadow;
        self
    }

    /// Seed of random generator. Equal seeds give equal edges.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn tooth_height(&self) -> u32 {
        self.tooth_height
    }

    pub fn tooth_ranges(&self) -> (u32, u32) {
        (self.horizontal_tooth_range, self.vertical_tooth_range)
    }

    pub fn shadow(&self) -> Option<&DropShadowEffect> {
        self.shadow.as_ref()
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Closed outline of the torn image.
    pub fn outline(&self, width: u32, height: u32) -> Result<Vec<Point>, EffectError> {
        match self.seed {
            Some(seed) => self.outline_with_rng(width, height, &mut StdRng::seed_from_u64(seed)),
            None => self.outline_with_rng(width, height, &mut rand::rng()),
        }
    }

    /// Walks along the top, right, bottom and left edges, one tooth per
    /// range, with random depth of every tooth.
    pub fn outline_with_rng<R: Rng>(
        &self,
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Result<Vec<Point>, EffectError> {
        if self.horizontal_tooth_range == 0 || self.vertical_tooth_range == 0 {
            return Err(EffectError::InvalidParameter(
                "ranges of teeth must be greater than zero",
            ));
        }
        let h_range = self.horizontal_tooth_range as i32;
        let v_range = self.vertical_tooth_range as i32;
        let max_depth = self.tooth_height.max(2) as i32;
        let (w, h) = (width as i32, height as i32);
        let h_regions = w / h_range;
        let v_regions = h / v_range;

        let mut depth = || rng.random_range(1..max_depth);
        let mut points = Vec::with_capacity(2 * (h_regions + v_regions) as usize + 1);
        let mut last = Point::new(h_range, depth());
        points.push(last);
        for _ in 0..h_regions {
            last = Point::new(last.x + h_range, depth());
            points.push(last);
        }
        for _ in 0..v_regions {
            last = Point::new(w - depth(), last.y + v_range);
            points.push(last);
        }
        for _ in 0..h_regions {
            last = Point::new(last.x - h_range, h - depth());
            points.push(last);
        }
        for _ in 0..v_regions {
            last = Point::new(depth(), last.y - v_range);
            points.push(last);
        }
        Ok(points)
    }
}

impl Effect for TornEdgeEffect {
    fn name(&self) -> &'static str {
        "torn_edge"
    }

    fn supports_partial_region(&self) -> bool {
        false
    }

    fn apply(&self, image: &Image, raster: &dyn Raster) -> Result<EffectOutput, EffectError> {
        let outline = self.outline(image.width(), image.height())?;
        let texture = image.convert(PixelFormat::Argb32);
        let mut torn =
            Image::create_empty(image.width(), image.height(), PixelFormat::Argb32, None);
        torn.set_resolution(image.resolution());
        raster.fill_polygon_with_texture(&mut torn, &outline, &texture)?;

        match &self.shadow {
            Some(shadow) => shadow.apply(&torn, raster),
            None => Ok(EffectOutput::in_place(torn)),
        }
    }
}
