use super::tier::{RecognitionInput, RecognitionTier};
use crate::common::{PixelGrid, RandomSource};
use crate::error::RecognitionError;
use crate::pipeline::domain::{FoodPrediction, LabelScore, RecognitionSource};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

pub const DEFAULT_FOOD_THRESHOLD: f32 = 0.2;
const TOP_K: usize = 3;

/// Pretrained image classifier producing a probability per label.
pub trait FoodClassifier: Send + Sync {
    fn model_name(&self) -> &str;
    fn labels(&self) -> &[String];
    fn predict(&self, grid: &PixelGrid) -> Result<Vec<f32>, RecognitionError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LinearWeights {
    model_name: String,
    labels: Vec<String>,
    // One row of FEATURE_COUNT weights per label
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
}

/// Single dense layer + softmax over per-channel colour moments.
#[derive(Debug, Clone)]
pub struct LinearFoodClassifier {
    weights: LinearWeights,
}

impl LinearFoodClassifier {
    pub const FEATURE_COUNT: usize = 6;

    pub fn new(
        model_name: impl Into<String>,
        labels: Vec<String>,
        weights: Vec<Vec<f32>>,
        bias: Vec<f32>,
    ) -> Result<Self, RecognitionError> {
        Self::validated(LinearWeights {
            model_name: model_name.into(),
            labels,
            weights,
            bias,
        })
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, RecognitionError> {
        let weights = serde_json::from_slice::<LinearWeights>(bytes)
            .map_err(|e| RecognitionError::Unavailable(format!("invalid weights file: {}", e)))?;
        Self::validated(weights)
    }

    pub fn load(path: &Path) -> Result<Self, RecognitionError> {
        let bytes = std::fs::read(path).map_err(|e| {
            RecognitionError::Unavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        let classifier = Self::from_json_slice(&bytes)?;
        info!(
            "Loaded food classifier '{}' with {} labels",
            classifier.weights.model_name,
            classifier.weights.labels.len()
        );
        Ok(classifier)
    }

    fn validated(weights: LinearWeights) -> Result<Self, RecognitionError> {
        let n = weights.labels.len();
        if n == 0 {
            return Err(RecognitionError::Unavailable("classifier has no labels".to_string()));
        }
        if weights.weights.len() != n || weights.bias.len() != n {
            return Err(RecognitionError::Unavailable(format!(
                "shape mismatch: {} labels, {} weight rows, {} biases",
                n,
                weights.weights.len(),
                weights.bias.len()
            )));
        }
        if let Some(row) = weights.weights.iter().find(|r| r.len() != Self::FEATURE_COUNT) {
            return Err(RecognitionError::Unavailable(format!(
                "weight row has {} entries, expected {}",
                row.len(),
                Self::FEATURE_COUNT
            )));
        }
        Ok(Self { weights })
    }

    /// Mean and standard deviation of each channel, scaled to [0, 1].
    fn features(grid: &PixelGrid) -> [f32; 6] {
        let mut sum = [0f64; 3];
        let mut sum_sq = [0f64; 3];
        for px in grid.rgb().pixels() {
            for (c, value) in px.0.iter().enumerate() {
                let v = f64::from(*value) / 255.0;
                sum[c] += v;
                sum_sq[c] += v * v;
            }
        }
        let n = grid.pixel_count() as f64;
        let mut features = [0f32; 6];
        for c in 0..3 {
            let mean = sum[c] / n;
            features[c] = mean as f32;
            features[c + 3] = (sum_sq[c] / n - mean * mean).max(0.0).sqrt() as f32;
        }
        features
    }
}

fn softmax(logits: &[f32]) -> Vec<f32> {
    // Numerically stable softmax over logits
    if logits.is_empty() {
        return vec![];
    }
    let max_logit = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0f32;
    let mut exps = Vec::with_capacity(logits.len());
    for &l in logits {
        let e = (l - max_logit).exp();
        sum += e;
        exps.push(e);
    }
    if sum <= 0.0 || !sum.is_finite() {
        // fallback to uniform
        let n = logits.len() as f32;
        return vec![1.0 / n; logits.len()];
    }
    exps.into_iter().map(|e| e / sum).collect()
}

impl FoodClassifier for LinearFoodClassifier {
    fn model_name(&self) -> &str {
        &self.weights.model_name
    }

    fn labels(&self) -> &[String] {
        &self.weights.labels
    }

    fn predict(&self, grid: &PixelGrid) -> Result<Vec<f32>, RecognitionError> {
        let features = Self::features(grid);
        let logits: Vec<f32> = self
            .weights
            .weights
            .iter()
            .zip(&self.weights.bias)
            .map(|(row, bias)| row.iter().zip(&features).map(|(w, x)| w * x).sum::<f32>() + bias)
            .collect();
        Ok(softmax(&logits))
    }
}

/// Tier 1: neural inference, top-3 labels.
pub struct NeuralTier {
    classifier: Option<Arc<dyn FoodClassifier>>,
    food_threshold: f32,
}

impl NeuralTier {
    pub fn new(classifier: Option<Arc<dyn FoodClassifier>>) -> Self {
        Self {
            classifier,
            food_threshold: DEFAULT_FOOD_THRESHOLD,
        }
    }

    pub fn with_food_threshold(mut self, threshold: f32) -> Self {
        self.food_threshold = threshold;
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.classifier.is_some()
    }
}

impl RecognitionTier for NeuralTier {
    fn recognize(
        &self,
        input: &RecognitionInput<'_>,
        _rng: &mut dyn RandomSource,
    ) -> Result<FoodPrediction, RecognitionError> {
        let classifier = self
            .classifier
            .as_ref()
            .ok_or_else(|| RecognitionError::Unavailable("model not loaded".to_string()))?;

        // Any tier-1 error counts as the model being unavailable.
        let probabilities = classifier.predict(input.grid).map_err(|e| match e {
            RecognitionError::Failure(msg) => RecognitionError::Unavailable(msg),
            unavailable => unavailable,
        })?;

        let labels = classifier.labels();
        if probabilities.len() != labels.len() {
            return Err(RecognitionError::Unavailable(format!(
                "classifier returned {} scores for {} labels",
                probabilities.len(),
                labels.len()
            )));
        }

        if let Some((idx, score)) = probabilities
            .iter()
            .enumerate()
            .find(|(_, p)| !(p.is_finite() && (0.0..=1.0).contains(*p)))
        {
            return Err(RecognitionError::Unavailable(format!(
                "classifier returned invalid score {} for '{}'",
                score, labels[idx]
            )));
        }

        let mut ranked: Vec<usize> = (0..probabilities.len()).collect();
        // Stable sort: equal probabilities keep vocabulary order.
        ranked.sort_by(|&a, &b| probabilities[b].total_cmp(&probabilities[a]));

        let top: Vec<LabelScore> = ranked
            .into_iter()
            .take(TOP_K)
            .map(|idx| LabelScore::new(labels[idx].clone(), probabilities[idx]))
            .collect();

        let best = top
            .first()
            .cloned()
            .ok_or_else(|| RecognitionError::Unavailable("empty label distribution".to_string()))?;

        debug!(
            "Neural prediction: {} ({:.1}%), top {}: {:?}",
            best.label,
            best.confidence * 100.0,
            top.len(),
            top.iter().map(|s| s.label.as_str()).collect::<Vec<_>>()
        );

        Ok(FoodPrediction {
            food_name: best.label,
            confidence: best.confidence,
            is_food: best.confidence > self.food_threshold,
            top_predictions: Some(top),
            source: RecognitionSource::Neural,
        })
    }

    fn name(&self) -> &'static str {
        "NeuralTier"
    }

    fn is_model_backed(&self) -> bool {
        self.is_loaded()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::common::SequenceRandom;
    use crate::pipeline::domain::ImageStatistics;
    use image::{ImageBuffer, Rgb};

    /// Returns a fixed distribution regardless of the image.
    pub(crate) struct FixedClassifier {
        pub labels: Vec<String>,
        pub probabilities: Result<Vec<f32>, RecognitionError>,
    }

    impl FixedClassifier {
        pub(crate) fn new(pairs: &[(&str, f32)]) -> Self {
            Self {
                labels: pairs.iter().map(|(l, _)| l.to_string()).collect(),
                probabilities: Ok(pairs.iter().map(|(_, p)| *p).collect()),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                labels: vec!["pizza".to_string()],
                probabilities: Err(RecognitionError::Failure("device lost".to_string())),
            }
        }
    }

    impl FoodClassifier for FixedClassifier {
        fn model_name(&self) -> &str {
            "fixed"
        }

        fn labels(&self) -> &[String] {
            &self.labels
        }

        fn predict(&self, _grid: &PixelGrid) -> Result<Vec<f32>, RecognitionError> {
            self.probabilities.clone()
        }
    }

    fn grid() -> PixelGrid {
        PixelGrid::new(ImageBuffer::from_pixel(8, 8, Rgb([120, 90, 60]))).unwrap()
    }

    fn stats() -> ImageStatistics {
        ImageStatistics {
            brightness: 95.0,
            contrast: 0.0,
            edge_density: 0.0,
            avg_red: 120.0,
            avg_green: 90.0,
            avg_blue: 60.0,
        }
    }

    #[test]
    fn test_top_three_in_descending_order() {
        let tier = NeuralTier::new(Some(Arc::new(FixedClassifier::new(&[
            ("sushi", 0.1),
            ("ramen", 0.5),
            ("pizza", 0.05),
            ("cheeseburger", 0.35),
        ]))));
        let (grid, stats) = (grid(), stats());
        let prediction = tier
            .recognize(&RecognitionInput::new(&grid, &stats), &mut SequenceRandom::constant(0.0))
            .unwrap();
        assert_eq!(prediction.food_name, "ramen");
        assert_eq!(prediction.confidence, 0.5);
        assert!(prediction.is_food);
        assert_eq!(prediction.source, RecognitionSource::Neural);
        let labels: Vec<String> = prediction
            .top_predictions
            .unwrap()
            .into_iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(labels, vec!["ramen", "cheeseburger", "sushi"]);
    }

    #[test]
    fn test_low_top_confidence_is_not_food() {
        let tier = NeuralTier::new(Some(Arc::new(FixedClassifier::new(&[
            ("sushi", 0.15),
            ("ramen", 0.15),
            ("pizza", 0.7),
        ]))))
        .with_food_threshold(0.8);
        let (grid, stats) = (grid(), stats());
        let prediction = tier
            .recognize(&RecognitionInput::new(&grid, &stats), &mut SequenceRandom::constant(0.0))
            .unwrap();
        assert!(!prediction.is_food);
    }

    #[test]
    fn test_missing_model_is_unavailable() {
        let tier = NeuralTier::new(None);
        let (grid, stats) = (grid(), stats());
        let result = tier.recognize(&RecognitionInput::new(&grid, &stats), &mut SequenceRandom::constant(0.0));
        assert!(matches!(result, Err(RecognitionError::Unavailable(_))));
        assert!(!tier.is_loaded());
    }

    #[test]
    fn test_classifier_error_is_unavailable() {
        let tier = NeuralTier::new(Some(Arc::new(FixedClassifier::failing())));
        let (grid, stats) = (grid(), stats());
        let result = tier.recognize(&RecognitionInput::new(&grid, &stats), &mut SequenceRandom::constant(0.0));
        assert_eq!(
            result,
            Err(RecognitionError::Unavailable("device lost".to_string()))
        );
    }

    #[test]
    fn test_out_of_range_scores_are_unavailable() {
        let (grid, stats) = (grid(), stats());
        for bad in [f32::NAN, f32::INFINITY, -0.1, 1.5] {
            let tier = NeuralTier::new(Some(Arc::new(FixedClassifier::new(&[
                ("pizza", bad),
                ("sushi", 0.9),
            ]))));
            let result =
                tier.recognize(&RecognitionInput::new(&grid, &stats), &mut SequenceRandom::constant(0.0));
            assert!(matches!(result, Err(RecognitionError::Unavailable(_))));
        }
    }

    #[test]
    fn test_linear_classifier_from_json() {
        let json = br#"{
            "model_name": "tiny-linear",
            "labels": ["green_salad", "tomato_soup"],
            "weights": [[0, 4, 0, 0, 0, 0], [4, 0, 0, 0, 0, 0]],
            "bias": [0, 0]
        }"#;
        let classifier = LinearFoodClassifier::from_json_slice(json).unwrap();
        assert_eq!(classifier.model_name(), "tiny-linear");

        let red = PixelGrid::new(ImageBuffer::from_pixel(4, 4, Rgb([255, 0, 0]))).unwrap();
        let probabilities = classifier.predict(&red).unwrap();
        assert_eq!(probabilities.len(), 2);
        assert!(probabilities[1] > probabilities[0]);
        assert!((probabilities.iter().sum::<f32>() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_linear_classifier_shape_validation() {
        let result = LinearFoodClassifier::new(
            "bad",
            vec!["a".to_string(), "b".to_string()],
            vec![vec![0.0; 6]],
            vec![0.0, 0.0],
        );
        assert!(matches!(result, Err(RecognitionError::Unavailable(_))));

        let result = LinearFoodClassifier::new("bad", vec!["a".to_string()], vec![vec![0.0; 5]], vec![0.0]);
        assert!(result.is_err());
        assert!(LinearFoodClassifier::from_json_slice(b"{").is_err());
    }

    #[test]
    fn test_softmax_is_stable() {
        let probabilities = softmax(&[1000.0, 1000.0]);
        assert_eq!(probabilities, vec![0.5, 0.5]);
        assert!(softmax(&[]).is_empty());
    }
}
