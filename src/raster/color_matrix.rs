use crate::image::Image;

/// 5x5 matrix applied to row vectors `[R, G, B, A, 1]` of normalized
/// colors. The last row holds translations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(pub [[f32; 5]; 5]);

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl ColorMatrix {
    pub const fn identity() -> Self {
        Self([
            [1., 0., 0., 0., 0.],
            [0., 1., 0., 0., 0.],
            [0., 0., 1., 0., 0.],
            [0., 0., 0., 1., 0.],
            [0., 0., 0., 0., 1.],
        ])
    }

    /// Luminance with weights 0.3, 0.59 and 0.11.
    pub const fn grayscale() -> Self {
        Self([
            [0.3, 0.3, 0.3, 0., 0.],
            [0.59, 0.59, 0.59, 0., 0.],
            [0.11, 0.11, 0.11, 0., 0.],
            [0., 0., 0., 1., 0.],
            [0., 0., 0., 0., 1.],
        ])
    }

    /// Grayscale darkened by 30%.
    pub const fn grayscale_dark() -> Self {
        let mut m = Self::grayscale();
        m.0[4] = [-0.3, -0.3, -0.3, 0., 1.];
        m
    }

    pub const fn invert() -> Self {
        Self([
            [-1., 0., 0., 0., 0.],
            [0., -1., 0., 0., 0.],
            [0., 0., -1., 0., 0.],
            [0., 0., 0., 1., 0.],
            [1., 1., 1., 0., 1.],
        ])
    }

    /// Black color with alpha of the source multiplied by `darkness`.
    /// Used as a mask for shadows.
    pub fn shadow_mask(darkness: f32) -> Self {
        Self([
            [0., 0., 0., 0., 0.],
            [0., 0., 0., 0., 0.],
            [0., 0., 0., 0., 0.],
            [0., 0., 0., darkness, 0.],
            [0., 0., 0., 0., 1.],
        ])
    }

    /// Applies the matrix to `[R, G, B, A]` pixel.
    pub fn transform(&self, rgba: [u8; 4]) -> [u8; 4] {
        let input = [
            rgba[0] as f32 / 255.,
            rgba[1] as f32 / 255.,
            rgba[2] as f32 / 255.,
            rgba[3] as f32 / 255.,
            1.,
        ];
        let mut res = [0u8; 4];
        for (j, out) in res.iter_mut().enumerate() {
            let v: f32 = input.iter().zip(&self.0).map(|(i, row)| i * row[j]).sum();
            *out = (v * 255.).round().clamp(0., 255.) as u8;
        }
        res
    }

    /// Returns a copy of the image with every pixel transformed.
    ///
    /// The result has the format of the source image
    /// (see [Image::clone_format]).
    pub fn apply(&self, src: &Image) -> Image {
        let mut dst = src.convert(src.clone_format(None));
        for y in 0..dst.height() {
            for x in 0..dst.width() {
                let rgba = self.transform(dst.read_pixel(x, y));
                dst.write_pixel(x, y, rgba);
            }
        }
        dst
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invert_pixel() {
        let m = ColorMatrix::invert();
        assert_eq!(m.transform([0, 100, 255, 77]), [255, 155, 0, 77]);
    }

    #[test]
    fn grayscale_pixel() {
        let m = ColorMatrix::grayscale();
        assert_eq!(m.transform([100, 100, 100, 255]), [100, 100, 100, 255]);
        assert_eq!(m.transform([255, 0, 0, 255]), [77, 77, 77, 255]);
        // 100 - 0.3 * 255 = 23.5
        let dark = ColorMatrix::grayscale_dark().transform([100, 100, 100, 255]);
        assert!(dark[0] == 23 || dark[0] == 24, "{:?}", dark);
        assert_eq!(dark[3], 255);
    }

    #[test]
    fn shadow_mask_pixel() {
        let m = ColorMatrix::shadow_mask(0.6);
        assert_eq!(m.transform([10, 200, 30, 255]), [0, 0, 0, 153]);
        assert_eq!(m.transform([10, 200, 30, 0]), [0, 0, 0, 0]);
    }
}
