use crate::common::{PixelGrid, RandomSource};
use crate::error::RecognitionError;
use crate::pipeline::domain::{FoodPrediction, ImageStatistics};

/// Everything a recognition tier may look at.
#[derive(Debug, Clone, Copy)]
pub struct RecognitionInput<'a> {
    pub grid: &'a PixelGrid,
    pub stats: &'a ImageStatistics,
}

impl<'a> RecognitionInput<'a> {
    pub fn new(grid: &'a PixelGrid, stats: &'a ImageStatistics) -> Self {
        Self { grid, stats }
    }
}

/// One rung of the recognition ladder. A tier either answers or reports a
/// structured failure so the next rung can be tried.
pub trait RecognitionTier: Send + Sync {
    fn recognize(
        &self,
        input: &RecognitionInput<'_>,
        rng: &mut dyn RandomSource,
    ) -> Result<FoodPrediction, RecognitionError>;

    fn name(&self) -> &'static str;

    /// True when the tier answers from a loaded model rather than a heuristic.
    fn is_model_backed(&self) -> bool {
        false
    }
}
