use super::color_heuristic_tier::ColorHeuristicTier;
use super::neural_tier::{FoodClassifier, LinearFoodClassifier, NeuralTier, DEFAULT_FOOD_THRESHOLD};
use super::tier::{RecognitionInput, RecognitionTier};
use super::uniform_fallback::UniformFallback;
use crate::common::{PixelGrid, RandomSource};
use crate::config::Configuration;
use crate::error::AppError;
use crate::pipeline::domain::{FoodPrediction, ImageStatistics, ModelInfo, ModelStatus};
use crate::pipeline::services::nutrition::NutritionTable;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_MODEL_NAME: &str = "nateraw/food";

/// Layered food recogniser. Tiers are tried in order; the first one that
/// answers wins and a structured failure moves on to the next. The uniform
/// fallback closes the ladder and cannot fail.
pub struct FoodRecognitionModel {
    model_name: String,
    model_loaded: bool,
    tiers: Vec<Box<dyn RecognitionTier>>,
    fallback: UniformFallback,
    table: Arc<NutritionTable>,
}

impl FoodRecognitionModel {
    pub fn builder() -> FoodRecognitionModelBuilder {
        FoodRecognitionModelBuilder::default()
    }

    /// Build from configuration. Unreadable or malformed weights put the
    /// model in fallback mode instead of failing.
    pub fn from_configuration(configuration: &Configuration) -> Result<Self, AppError> {
        let classifier = configuration
            .model_weights_path
            .as_deref()
            .and_then(|path| match LinearFoodClassifier::load(Path::new(path)) {
                Ok(classifier) => Some(Arc::new(classifier) as Arc<dyn FoodClassifier>),
                Err(e) => {
                    warn!("Failed to load model weights, using fallback mode: {}", e);
                    None
                }
            });

        let mut builder = Self::builder()
            .model_name(configuration.model_name.clone())
            .neural_food_threshold(configuration.neural_food_threshold);
        if let Some(classifier) = classifier {
            builder = builder.classifier(classifier);
        }
        builder.build()
    }

    pub fn predict(
        &self,
        grid: &PixelGrid,
        stats: &ImageStatistics,
        rng: &mut dyn RandomSource,
    ) -> FoodPrediction {
        let input = RecognitionInput::new(grid, stats);
        for tier in &self.tiers {
            match tier.recognize(&input, rng) {
                Ok(prediction) => {
                    debug!(
                        "{} predicted {} ({:.2})",
                        tier.name(),
                        prediction.food_name,
                        prediction.confidence
                    );
                    return prediction;
                }
                Err(e) => warn!("{} fell through: {}", tier.name(), e),
            }
        }
        self.fallback.pick(rng)
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            model_name: self.model_name.clone(),
            model_loaded: self.model_loaded,
            nutrition_table_size: self.table.len(),
            status: if self.model_loaded {
                ModelStatus::Ready
            } else {
                ModelStatus::FallbackMode
            },
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn is_loaded(&self) -> bool {
        self.model_loaded
    }

    pub fn nutrition_table(&self) -> Arc<NutritionTable> {
        self.table.clone()
    }
}

pub struct FoodRecognitionModelBuilder {
    model_name: String,
    classifier: Option<Arc<dyn FoodClassifier>>,
    neural_food_threshold: f32,
    table: Option<Arc<NutritionTable>>,
    tiers: Option<Vec<Box<dyn RecognitionTier>>>,
}

impl Default for FoodRecognitionModelBuilder {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL_NAME.to_string(),
            classifier: None,
            neural_food_threshold: DEFAULT_FOOD_THRESHOLD,
            table: None,
            tiers: None,
        }
    }
}

impl FoodRecognitionModelBuilder {
    pub fn model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = name.into();
        self
    }

    pub fn classifier(mut self, classifier: Arc<dyn FoodClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn neural_food_threshold(mut self, threshold: f32) -> Self {
        self.neural_food_threshold = threshold;
        self
    }

    pub fn nutrition_table(mut self, table: Arc<NutritionTable>) -> Self {
        self.table = Some(table);
        self
    }

    /// Replace the neural and colour tiers. The uniform fallback is always
    /// appended.
    pub fn with_tiers(mut self, tiers: Vec<Box<dyn RecognitionTier>>) -> Self {
        self.tiers = Some(tiers);
        self
    }

    pub fn build(self) -> Result<FoodRecognitionModel, AppError> {
        let table = self
            .table
            .unwrap_or_else(|| Arc::new(NutritionTable::reference()));
        if table.is_empty() {
            return Err(AppError::Config(
                "Nutrition table must not be empty".to_string(),
            ));
        }

        let tiers = match self.tiers {
            Some(tiers) => tiers,
            None => vec![
                Box::new(
                    NeuralTier::new(self.classifier)
                        .with_food_threshold(self.neural_food_threshold),
                ) as Box<dyn RecognitionTier>,
                Box::new(ColorHeuristicTier::new()),
            ],
        };

        let model_loaded = tiers.iter().any(|tier| tier.is_model_backed());

        info!(
            "Food recognition model '{}' ready: loaded={}, tiers={:?}, foods={}",
            self.model_name,
            model_loaded,
            tiers.iter().map(|t| t.name()).collect::<Vec<_>>(),
            table.len()
        );

        Ok(FoodRecognitionModel {
            model_name: self.model_name,
            model_loaded,
            tiers,
            fallback: UniformFallback::new(table.clone()),
            table,
        })
    }
}
