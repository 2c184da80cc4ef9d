use crate::common::RandomSource;
use crate::pipeline::domain::{NutritionEstimate, NutritionRecord};

const MAX_VARIANCE: f64 = 0.2;

/// Confidence-scaled jitter applied to reference nutrition values. Lower
/// confidence gives a wider spread; at confidence 1 values pass through.
#[derive(Debug, Clone, Default)]
pub struct VarianceEstimator;

impl VarianceEstimator {
    pub fn new() -> Self {
        Self
    }

    pub fn variance_for(confidence: f32) -> f64 {
        MAX_VARIANCE * (1.0 - f64::from(confidence.clamp(0.0, 1.0)))
    }

    pub fn estimate(
        &self,
        name: impl Into<String>,
        record: &NutritionRecord,
        confidence: f32,
        rng: &mut dyn RandomSource,
    ) -> NutritionEstimate {
        let variance = Self::variance_for(confidence);
        // One fresh draw per field, in field order.
        let mut jitter = |value: f64| (value * (1.0 + variance * (rng.next_uniform() - 0.5))).max(0.0);

        let calories = jitter(record.calories).round() as u32;
        let protein = round_one_decimal(jitter(record.protein));
        let carbs = round_one_decimal(jitter(record.carbs));
        let fat = round_one_decimal(jitter(record.fat));

        NutritionEstimate {
            name: name.into(),
            calories,
            protein,
            carbs,
            fat,
            confidence,
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{SequenceRandom, StdRandom};

    const BURGER: NutritionRecord = NutritionRecord::new(540.0, 25.0, 40.0, 31.0);

    #[test]
    fn test_full_confidence_passes_values_through() {
        let mut rng = StdRandom::seeded(7);
        let estimate = VarianceEstimator::new().estimate("Burger", &BURGER, 1.0, &mut rng);
        assert_eq!(estimate.calories, 540);
        assert_eq!(estimate.protein, 25.0);
        assert_eq!(estimate.carbs, 40.0);
        assert_eq!(estimate.fat, 31.0);
        assert_eq!(estimate.confidence, 1.0);
    }

    #[test]
    fn test_jitter_uses_one_draw_per_field() {
        // confidence 0.5 → variance 0.1; factors 0.95, 1.0, 1.04, 0.99
        let mut rng = SequenceRandom::new(vec![0.0, 0.5, 0.9, 0.4]);
        let estimate = VarianceEstimator::new().estimate("Burger", &BURGER, 0.5, &mut rng);
        assert_eq!(estimate.calories, 513);
        assert_eq!(estimate.protein, 25.0);
        assert_eq!(estimate.carbs, 41.6);
        assert_eq!(estimate.fat, 30.7);
        assert_eq!(estimate.name, "Burger");
    }

    #[test]
    fn test_values_never_negative() {
        let mut rng = StdRandom::seeded(3);
        let estimator = VarianceEstimator::new();
        for step in 0..=20 {
            let confidence = step as f32 / 20.0;
            let estimate = estimator.estimate("x", &BURGER, confidence, &mut rng);
            assert!(estimate.protein >= 0.0 && estimate.carbs >= 0.0 && estimate.fat >= 0.0);
            // jitter is bounded by ±variance/2
            let spread = VarianceEstimator::variance_for(confidence) / 2.0;
            let bound = 540.0 * spread + 0.5;
            assert!((f64::from(estimate.calories) - 540.0).abs() <= bound);
        }
    }

    #[test]
    fn test_converges_as_confidence_approaches_one() {
        let estimator = VarianceEstimator::new();
        let mut low = SequenceRandom::constant(0.0);
        let mut high = SequenceRandom::constant(0.0);
        let far = estimator.estimate("x", &BURGER, 0.5, &mut low);
        let near = estimator.estimate("x", &BURGER, 0.99, &mut high);
        assert!((f64::from(near.calories) - 540.0).abs() < (f64::from(far.calories) - 540.0).abs());
        assert_eq!(VarianceEstimator::variance_for(1.0), 0.0);
    }
}
