pub mod pixel_grid;
pub mod random;

pub use pixel_grid::PixelGrid;
pub use random::{RandomSource, SequenceRandom, StdRandom};
