pub mod non_food_messages;
pub mod scene_classifier;
pub mod statistics_analyzer;

pub use non_food_messages::non_food_message;
pub use scene_classifier::{SceneClassifier, SceneRule, DEFAULT_SCENE_RULES};
pub use statistics_analyzer::ImageStatisticsAnalyzer;
