pub mod display_name;
pub mod food_analysis;
pub mod food_prediction;
pub mod image_statistics;
pub mod model_info;
pub mod nutrition;
pub mod scene_verdict;

pub use display_name::{display_name, LABEL_SEPARATORS};
pub use food_analysis::{AnalysisMethod, AnalysisOutcome, FoodAnalysis};
pub use food_prediction::{FoodPrediction, LabelScore, RecognitionSource};
pub use image_statistics::ImageStatistics;
pub use model_info::{ModelInfo, ModelStatus};
pub use nutrition::{NutritionEstimate, NutritionRecord};
pub use scene_verdict::{SceneCategory, SceneVerdict};
