use crate::common::{PixelGrid, RandomSource, StdRandom};
use crate::config::Configuration;
use crate::pipeline::context::{AnalysisContext, StageMetrics};
use crate::pipeline::domain::{AnalysisOutcome, FoodAnalysis};
use crate::pipeline::services::image::{non_food_message, ImageStatisticsAnalyzer, SceneClassifier};
use crate::pipeline::services::nutrition::{NutritionMatcher, VarianceEstimator};
use crate::pipeline::services::recognition::FoodRecognitionModel;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_LOW_CONFIDENCE_THRESHOLD: f32 = 0.4;

/// Runs one image through statistics, the scene filter, recognition and
/// nutrition resolution. Synchronous; every run ends in exactly one
/// `AnalysisOutcome`.
pub struct FoodAnalysisPipeline {
    model: Arc<FoodRecognitionModel>,
    analyzer: ImageStatisticsAnalyzer,
    scene_classifier: SceneClassifier,
    matcher: NutritionMatcher,
    estimator: VarianceEstimator,
    low_confidence_threshold: f32,
}

impl FoodAnalysisPipeline {
    pub fn new(model: Arc<FoodRecognitionModel>) -> Self {
        let matcher = NutritionMatcher::new(model.nutrition_table());
        Self {
            model,
            analyzer: ImageStatisticsAnalyzer::new(),
            scene_classifier: SceneClassifier::new(),
            matcher,
            estimator: VarianceEstimator::new(),
            low_confidence_threshold: DEFAULT_LOW_CONFIDENCE_THRESHOLD,
        }
    }

    pub fn from_configuration(
        model: Arc<FoodRecognitionModel>,
        configuration: &Configuration,
    ) -> Self {
        Self::new(model)
            .with_statistics_analyzer(ImageStatisticsAnalyzer::new().with_edge_thresholds(
                configuration.edge_low_threshold,
                configuration.edge_high_threshold,
            ))
            .with_low_confidence_threshold(configuration.low_confidence_threshold)
    }

    pub fn with_statistics_analyzer(mut self, analyzer: ImageStatisticsAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn with_scene_classifier(mut self, classifier: SceneClassifier) -> Self {
        self.scene_classifier = classifier;
        self
    }

    pub fn with_low_confidence_threshold(mut self, threshold: f32) -> Self {
        self.low_confidence_threshold = threshold;
        self
    }

    pub fn model(&self) -> &FoodRecognitionModel {
        &self.model
    }

    /// Analyze with a generator seeded from OS entropy.
    pub fn analyze(&self, grid: PixelGrid) -> FoodAnalysis {
        self.analyze_with_rng(grid, &mut StdRandom::from_entropy())
    }

    pub fn analyze_with_rng(&self, grid: PixelGrid, rng: &mut dyn RandomSource) -> FoodAnalysis {
        let (outcome, _) = self.run(grid, rng);
        FoodAnalysis::from(outcome)
    }

    pub fn run(&self, grid: PixelGrid, rng: &mut dyn RandomSource) -> (AnalysisOutcome, StageMetrics) {
        let context = AnalysisContext::new(grid);

        let stats = self.analyzer.analyze(context.grid());
        let context = context.into_stats_computed(stats);

        let verdict = self.scene_classifier.classify(context.stats());
        let context = context.into_scene_checked(verdict);

        let done = if !context.verdict().is_food {
            let message = non_food_message(context.verdict().category.as_str());
            context.into_non_food(message)
        } else {
            let prediction = self.model.predict(context.grid(), context.stats(), rng);
            let context = context.into_model_invoked(prediction);

            let prediction = context.prediction();
            if !prediction.is_food || prediction.confidence < self.low_confidence_threshold {
                debug!(
                    "Low confidence prediction {} ({:.2}), threshold {:.2}",
                    prediction.food_name, prediction.confidence, self.low_confidence_threshold
                );
                context.into_low_confidence()
            } else {
                let matched = self.matcher.match_label(&prediction.food_name);
                let estimate = self.estimator.estimate(
                    matched.display_name,
                    &matched.record,
                    prediction.confidence,
                    rng,
                );
                context.into_nutrition_resolved(estimate).into_food()
            }
        };

        debug!("Pipeline finished in state {}: {}", done.state_name(), done.metrics());
        done.into_outcome()
    }
}
