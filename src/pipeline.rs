use std::borrow::Cow;

use log::{debug, error};

use crate::effects::{Effect, EffectOutput};
use crate::geometry::{Point, Rectangle};
use crate::image::Image;
use crate::raster::{CompositeMode, Raster, SoftwareRaster};
use crate::{ChainError, EffectError};

/// Result of applying a chain of effects.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainOutput<'i> {
    /// Borrowed source image if no effect was applied.
    pub image: Cow<'i, Image>,
    /// Sum of offsets of all applied effects.
    pub offset: Point,
}

impl ChainOutput<'_> {
    pub fn into_owned(self) -> Image {
        self.image.into_owned()
    }

    /// Returns `true` if the output is the source image.
    pub fn is_original(&self) -> bool {
        matches!(self.image, Cow::Borrowed(_))
    }
}

/// Applies effects to images with a [Raster].
///
/// ```
/// use shotfx::effects::{BorderEffect, DropShadowEffect, Effect};
/// use shotfx::{Color, EffectPipeline, Image, PixelFormat, Point};
///
/// let image = Image::create_empty(40, 30, PixelFormat::Rgb24, Some(Color::WHITE));
/// let effects: Vec<Box<dyn Effect>> = vec![
///     Box::new(BorderEffect::new(5, Color::BLACK)),
///     Box::new(DropShadowEffect::new(7)),
/// ];
/// let output = EffectPipeline::new().apply_chain(&image, &effects).unwrap();
/// assert_eq!(output.offset, Point::new(18, 18));
/// assert_eq!(output.image.width(), 40 + 2 * 18);
/// ```
#[derive(Debug, Clone)]
pub struct EffectPipeline<R: Raster = SoftwareRaster> {
    raster: R,
    log_target: &'static str,
}

impl Default for EffectPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectPipeline {
    pub fn new() -> Self {
        Self::with_raster(SoftwareRaster::default())
    }
}

impl<R: Raster> EffectPipeline<R> {
    pub fn with_raster(raster: R) -> Self {
        Self {
            raster,
            log_target: module_path!(),
        }
    }

    /// Target of log records written by the pipeline.
    pub fn with_log_target(mut self, target: &'static str) -> Self {
        self.log_target = target;
        self
    }

    pub fn raster(&self) -> &R {
        &self.raster
    }

    pub fn log_target(&self) -> &'static str {
        self.log_target
    }

    /// Applies one effect.
    pub fn apply(&self, image: &Image, effect: &dyn Effect) -> Result<EffectOutput, ChainError> {
        self.apply_logged(image, effect, 0)
    }

    fn apply_logged(
        &self,
        image: &Image,
        effect: &dyn Effect,
        index: usize,
    ) -> Result<EffectOutput, ChainError> {
        match effect.apply(image, &self.raster) {
            Ok(output) => {
                debug!(
                    target: self.log_target,
                    "applied effect #{} ({}) to {}x{} image, offset {:?}",
                    index,
                    effect.name(),
                    image.width(),
                    image.height(),
                    output.offset,
                );
                Ok(output)
            }
            Err(source) => {
                let err = ChainError {
                    index,
                    effect: effect.name(),
                    width: image.width(),
                    height: image.height(),
                    source,
                };
                error!(target: self.log_target, "{}", err);
                Err(err)
            }
        }
    }

    /// Applies effects one after another and sums their offsets.
    ///
    /// Intermediate images are dropped as soon as the next effect is
    /// applied. If any effect fails, the whole chain fails and nothing
    /// of the partial result is returned.
    pub fn apply_chain<'i>(
        &self,
        image: &'i Image,
        effects: &[Box<dyn Effect>],
    ) -> Result<ChainOutput<'i>, ChainError> {
        let mut current: Cow<'i, Image> = Cow::Borrowed(image);
        let mut offset = Point::ZERO;
        for (index, effect) in effects.iter().enumerate() {
            let output = self.apply_logged(&current, effect.as_ref(), index)?;
            offset += output.offset;
            current = Cow::Owned(output.image);
        }
        Ok(ChainOutput {
            image: current,
            offset,
        })
    }

    /// Same as [EffectPipeline::apply_chain] but returns the source image
    /// with zero offset if any effect fails. The failure is logged.
    pub fn apply_chain_or_original<'i>(
        &self,
        image: &'i Image,
        effects: &[Box<dyn Effect>],
    ) -> ChainOutput<'i> {
        self.apply_chain(image, effects)
            .unwrap_or_else(|_| ChainOutput {
                image: Cow::Borrowed(image),
                offset: Point::ZERO,
            })
    }

    /// Applies an effect to a region of image and draws the result back
    /// into a copy of the image at the same position.
    ///
    /// Only effects that support partial regions may be used.
    pub fn apply_to_region(
        &self,
        image: &Image,
        effect: &dyn Effect,
        region: Rectangle,
    ) -> Result<Image, ChainError> {
        let fail = |source: EffectError| {
            let err = ChainError {
                index: 0,
                effect: effect.name(),
                width: image.width(),
                height: image.height(),
                source,
            };
            error!(target: self.log_target, "{}", err);
            err
        };
        if !effect.supports_partial_region() {
            return Err(fail(EffectError::InvalidParameter(
                "effect can't be applied to a part of image",
            )));
        }
        let region = region.normalized().intersect(&image.bounds());
        let part = image.clone_area(Some(region), None).map_err(|e| fail(e.into()))?;
        let output = self.apply_logged(&part, effect, 0)?;

        let mut res = image.convert(image.clone_format(None));
        self.raster
            .draw_image(
                &mut res,
                &output.image,
                region.location() - output.offset,
                CompositeMode::SourceCopy,
            )
            .map_err(fail)?;
        Ok(res)
    }
}
