use super::{Effect, EffectOutput};
use crate::image::Image;
use crate::raster::{ColorMatrix, Raster};
use crate::EffectError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrayscaleEffect {
    dark: bool,
}

impl GrayscaleEffect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grayscale with colors darkened by 30%, used to dim
    /// the background behind a highlighted selection.
    pub fn dark() -> Self {
        Self { dark: true }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }
}

impl Effect for GrayscaleEffect {
    fn name(&self) -> &'static str {
        if self.dark {
            "grayscale_dark"
        } else {
            "grayscale"
        }
    }

    fn supports_partial_region(&self) -> bool {
        true
    }

    fn apply(&self, image: &Image, raster: &dyn Raster) -> Result<EffectOutput, EffectError> {
        let matrix = if self.dark {
            ColorMatrix::grayscale_dark()
        } else {
            ColorMatrix::grayscale()
        };
        let res = raster.apply_color_matrix(image, &matrix)?;
        Ok(EffectOutput::in_place(res))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvertEffect;

impl Effect for InvertEffect {
    fn name(&self) -> &'static str {
        "invert"
    }

    fn supports_partial_region(&self) -> bool {
        true
    }

    fn apply(&self, image: &Image, raster: &dyn Raster) -> Result<EffectOutput, EffectError> {
        let res = raster.apply_color_matrix(image, &ColorMatrix::invert())?;
        Ok(EffectOutput::in_place(res))
    }
}
