//! Scanline flood fill.
pub use flood_filler::{FillOutcome, FloodFillRange, FloodFiller};

mod flood_filler;
