use super::{Effect, EffectOutput};
use crate::image::Image;
use crate::raster::{Raster, RotateFlip};
use crate::EffectError;

/// Rotation by a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotateEffect {
    angle: i32,
}

impl RotateEffect {
    /// Supported angles are `90`, `-90` and `270`.
    pub fn new(angle: i32) -> Self {
        Self { angle }
    }

    pub fn angle(&self) -> i32 {
        self.angle
    }
}

impl Effect for RotateEffect {
    fn name(&self) -> &'static str {
        "rotate"
    }

    fn supports_partial_region(&self) -> bool {
        true
    }

    fn apply(&self, image: &Image, raster: &dyn Raster) -> Result<EffectOutput, EffectError> {
        let operation = match self.angle {
            90 => RotateFlip::Rotate90,
            -90 | 270 => RotateFlip::Rotate270,
            angle => return Err(EffectError::UnsupportedAngle(angle)),
        };
        let res = raster.rotate_flip(image, operation)?;
        Ok(EffectOutput::in_place(res))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipDirection {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipEffect {
    direction: FlipDirection,
}

impl FlipEffect {
    pub fn new(direction: FlipDirection) -> Self {
        Self { direction }
    }

    pub fn horizontal() -> Self {
        Self::new(FlipDirection::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new(FlipDirection::Vertical)
    }

    pub fn direction(&self) -> FlipDirection {
        self.direction
    }
}

impl Effect for FlipEffect {
    fn name(&self) -> &'static str {
        "flip"
    }

    fn supports_partial_region(&self) -> bool {
        true
    }

    fn apply(&self, image: &Image, raster: &dyn Raster) -> Result<EffectOutput, EffectError> {
        let operation = match self.direction {
            FlipDirection::Horizontal => RotateFlip::FlipHorizontal,
            FlipDirection::Vertical => RotateFlip::FlipVertical,
        };
        let res = raster.rotate_flip(image, operation)?;
        Ok(EffectOutput::in_place(res))
    }
}
