use serde::Serialize;

/// Which rung of the recognition ladder produced a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionSource {
    Neural,
    ColorHeuristic,
    UniformFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelScore {
    pub label: String,
    pub confidence: f32,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodPrediction {
    pub food_name: String,
    pub confidence: f32,
    pub is_food: bool,
    /// Ordered by descending confidence. Only the neural tier fills this in.
    pub top_predictions: Option<Vec<LabelScore>>,
    pub source: RecognitionSource,
}

impl FoodPrediction {
    pub fn heuristic(food_name: impl Into<String>, confidence: f32) -> Self {
        Self {
            food_name: food_name.into(),
            confidence,
            is_food: true,
            top_predictions: None,
            source: RecognitionSource::ColorHeuristic,
        }
    }

    pub fn uniform(food_name: impl Into<String>, confidence: f32) -> Self {
        Self {
            source: RecognitionSource::UniformFallback,
            ..Self::heuristic(food_name, confidence)
        }
    }
}
