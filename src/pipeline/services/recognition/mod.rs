pub mod color_heuristic_tier;
pub mod model_registry;
pub mod neural_tier;
pub mod recognition_model;
pub mod tier;
pub mod uniform_fallback;

pub use color_heuristic_tier::{ColorHeuristicTier, ColorProfile};
pub use model_registry::ModelRegistry;
pub use neural_tier::{FoodClassifier, LinearFoodClassifier, NeuralTier};
pub use recognition_model::{FoodRecognitionModel, FoodRecognitionModelBuilder};
pub use tier::{RecognitionInput, RecognitionTier};
pub use uniform_fallback::UniformFallback;
