use super::display_name::display_name;
use super::food_prediction::{FoodPrediction, LabelScore};
use super::nutrition::NutritionEstimate;
use super::scene_verdict::SceneVerdict;
use serde::Serialize;

pub const FOOD_PORTION: &str = "1 serving";
pub const NO_PORTION: &str = "N/A";
pub const UNKNOWN_OBJECT_NAME: &str = "Unknown Object";
pub const UNKNOWN_OBJECT_MESSAGE: &str =
    "The model could not recognize this image as food. Please take a clearer photo of your meal! 🤖";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnalysisMethod {
    #[serde(rename = "heuristic")]
    Heuristic,
    #[serde(rename = "model")]
    Model,
    #[serde(rename = "model+heuristic")]
    ModelAndHeuristic,
}

/// The single terminal state a pipeline run ends in.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    NonFood {
        verdict: SceneVerdict,
        message: &'static str,
    },
    LowConfidence {
        prediction: FoodPrediction,
    },
    Food {
        prediction: FoodPrediction,
        estimate: NutritionEstimate,
    },
}

impl AnalysisOutcome {
    pub fn is_food(&self) -> bool {
        matches!(self, AnalysisOutcome::Food { .. })
    }
}

/// Structured result returned for every decoded image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodAnalysis {
    pub name: String,
    pub calories: u32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub confidence: f32,
    pub portions: String,
    pub description: String,
    pub is_food: bool,
    pub category: String,
    pub analysis_method: AnalysisMethod,
    pub debug_info: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_predictions: Option<Vec<LabelScore>>,
}

impl FoodAnalysis {
    fn empty(name: String, confidence: f32, description: String) -> Self {
        Self {
            name,
            calories: 0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            confidence,
            portions: NO_PORTION.to_string(),
            description,
            is_food: false,
            category: "Non-Food".to_string(),
            analysis_method: AnalysisMethod::Heuristic,
            debug_info: String::new(),
            top_predictions: None,
        }
    }
}

impl From<AnalysisOutcome> for FoodAnalysis {
    fn from(outcome: AnalysisOutcome) -> Self {
        match outcome {
            AnalysisOutcome::NonFood { verdict, message } => Self {
                debug_info: verdict.reason.to_string(),
                ..Self::empty(
                    display_name(verdict.category.as_str()),
                    verdict.confidence,
                    message.to_string(),
                )
            },
            AnalysisOutcome::LowConfidence { prediction } => Self {
                analysis_method: AnalysisMethod::Model,
                debug_info: format!("Model confidence too low: {}", prediction.confidence),
                top_predictions: prediction.top_predictions,
                ..Self::empty(
                    UNKNOWN_OBJECT_NAME.to_string(),
                    prediction.confidence,
                    UNKNOWN_OBJECT_MESSAGE.to_string(),
                )
            },
            AnalysisOutcome::Food {
                prediction,
                estimate,
            } => Self {
                description: format!(
                    "Recognized with {:.0}% confidence",
                    f64::from(estimate.confidence) * 100.0
                ),
                name: estimate.name,
                calories: estimate.calories,
                protein: estimate.protein,
                carbs: estimate.carbs,
                fat: estimate.fat,
                confidence: estimate.confidence,
                portions: FOOD_PORTION.to_string(),
                is_food: true,
                category: "Food".to_string(),
                analysis_method: AnalysisMethod::ModelAndHeuristic,
                debug_info: format!("Detected as: {}", prediction.food_name),
                top_predictions: prediction.top_predictions,
            },
        }
    }
}
