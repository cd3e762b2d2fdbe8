//! Algorithms working on top of [PixelBuffer](crate::PixelBuffer).
pub use auto_crop::find_auto_crop_rectangle;
pub use box_blur::{
    apply_box_blur, box_blur_horizontal, box_blur_horizontal_alpha, box_blur_vertical,
    box_blur_vertical_alpha,
};
pub use pixelate::mix_colors;

mod auto_crop;
mod box_blur;
mod pixelate;
