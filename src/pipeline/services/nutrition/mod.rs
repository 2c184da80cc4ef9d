pub mod nutrition_matcher;
pub mod nutrition_table;
pub mod variance_estimator;

pub use nutrition_matcher::{normalize_label, NutritionMatch, NutritionMatcher};
pub use nutrition_table::{NutritionTable, DEFAULT_NUTRITION};
pub use variance_estimator::VarianceEstimator;
