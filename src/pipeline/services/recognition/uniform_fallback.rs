use super::tier::{RecognitionInput, RecognitionTier};
use crate::common::random::choose_index;
use crate::common::RandomSource;
use crate::error::RecognitionError;
use crate::pipeline::domain::FoodPrediction;
use crate::pipeline::services::nutrition::NutritionTable;
use std::sync::Arc;

pub const UNIFORM_FALLBACK_CONFIDENCE: f32 = 0.75;

/// Last rung: any key of the nutrition table, chosen uniformly.
#[derive(Debug, Clone)]
pub struct UniformFallback {
    table: Arc<NutritionTable>,
}

impl UniformFallback {
    /// The table must not be empty; the recognition model builder checks this.
    pub fn new(table: Arc<NutritionTable>) -> Self {
        Self { table }
    }

    pub fn pick(&self, rng: &mut dyn RandomSource) -> FoodPrediction {
        let food = choose_index(rng, self.table.len())
            .and_then(|idx| self.table.key_at(idx))
            .unwrap_or("unknown");
        FoodPrediction::uniform(food, UNIFORM_FALLBACK_CONFIDENCE)
    }
}

impl RecognitionTier for UniformFallback {
    fn recognize(
        &self,
        _input: &RecognitionInput<'_>,
        rng: &mut dyn RandomSource,
    ) -> Result<FoodPrediction, RecognitionError> {
        Ok(self.pick(rng))
    }

    fn name(&self) -> &'static str {
        "UniformFallback"
    }
}
