use crate::common::PixelGrid;
use crate::pipeline::context::metrics::StageMetrics;
use crate::pipeline::context::state::{
    DoneState, IngestedState, ModelInvokedState, NutritionResolvedState, ProcessingState,
    SceneCheckedState, StatsComputedState,
};
use crate::pipeline::domain::{
    AnalysisOutcome, FoodPrediction, ImageStatistics, NutritionEstimate, SceneVerdict,
};
use std::time::{Duration, Instant};

// AnalysisContext with compile-time state tracking. Each transition consumes
// the previous state, so a run can never go back to an earlier stage.
pub struct AnalysisContext<S> {
    grid: PixelGrid,
    metrics: StageMetrics,
    processing_start: Instant,
    stage_start: Instant,
    state: S,
}

impl<S: ProcessingState> AnalysisContext<S> {
    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn metrics(&self) -> &StageMetrics {
        &self.metrics
    }

    pub fn elapsed(&self) -> Duration {
        self.processing_start.elapsed()
    }

    pub fn state_name(&self) -> &'static str {
        S::state_name()
    }

    fn transition<T>(self, state: T) -> AnalysisContext<T> {
        AnalysisContext {
            grid: self.grid,
            metrics: self.metrics,
            processing_start: self.processing_start,
            stage_start: Instant::now(),
            state,
        }
    }

    fn stage_elapsed(&self) -> Duration {
        self.stage_start.elapsed()
    }

    fn into_done(mut self, outcome: AnalysisOutcome) -> AnalysisContext<DoneState> {
        let total = self.elapsed();
        self.metrics.record_total_duration(total);
        self.transition(DoneState { outcome })
    }
}

impl AnalysisContext<IngestedState> {
    pub fn new(grid: PixelGrid) -> Self {
        let now = Instant::now();
        Self {
            grid,
            metrics: StageMetrics::new(),
            processing_start: now,
            stage_start: now,
            state: IngestedState,
        }
    }

    pub fn into_stats_computed(
        mut self,
        stats: ImageStatistics,
    ) -> AnalysisContext<StatsComputedState> {
        let elapsed = self.stage_elapsed();
        self.metrics.record_statistics_duration(elapsed);
        self.transition(StatsComputedState { stats })
    }
}

impl AnalysisContext<StatsComputedState> {
    pub fn stats(&self) -> &ImageStatistics {
        &self.state.stats
    }

    pub fn into_scene_checked(
        mut self,
        verdict: SceneVerdict,
    ) -> AnalysisContext<SceneCheckedState> {
        let elapsed = self.stage_elapsed();
        self.metrics.record_scene_check_duration(elapsed);
        let stats = self.state.stats;
        self.transition(SceneCheckedState { stats, verdict })
    }
}

impl AnalysisContext<SceneCheckedState> {
    pub fn stats(&self) -> &ImageStatistics {
        &self.state.stats
    }

    pub fn verdict(&self) -> &SceneVerdict {
        &self.state.verdict
    }

    /// Terminal: the scene filter rejected the image.
    pub fn into_non_food(self, message: &'static str) -> AnalysisContext<DoneState> {
        let verdict = self.state.verdict.clone();
        self.into_done(AnalysisOutcome::NonFood { verdict, message })
    }

    pub fn into_model_invoked(
        mut self,
        prediction: FoodPrediction,
    ) -> AnalysisContext<ModelInvokedState> {
        let elapsed = self.stage_elapsed();
        self.metrics.record_recognition_duration(elapsed);
        let stats = self.state.stats;
        self.transition(ModelInvokedState { stats, prediction })
    }
}

impl AnalysisContext<ModelInvokedState> {
    pub fn stats(&self) -> &ImageStatistics {
        &self.state.stats
    }

    pub fn prediction(&self) -> &FoodPrediction {
        &self.state.prediction
    }

    /// Terminal: the prediction is not food or not confident enough.
    pub fn into_low_confidence(self) -> AnalysisContext<DoneState> {
        let prediction = self.state.prediction.clone();
        self.into_done(AnalysisOutcome::LowConfidence { prediction })
    }

    pub fn into_nutrition_resolved(
        mut self,
        estimate: NutritionEstimate,
    ) -> AnalysisContext<NutritionResolvedState> {
        let elapsed = self.stage_elapsed();
        self.metrics.record_nutrition_duration(elapsed);
        let prediction = self.state.prediction.clone();
        self.transition(NutritionResolvedState {
            prediction,
            estimate,
        })
    }
}

impl AnalysisContext<NutritionResolvedState> {
    pub fn estimate(&self) -> &NutritionEstimate {
        &self.state.estimate
    }

    pub fn into_food(self) -> AnalysisContext<DoneState> {
        let prediction = self.state.prediction.clone();
        let estimate = self.state.estimate.clone();
        self.into_done(AnalysisOutcome::Food {
            prediction,
            estimate,
        })
    }
}

impl AnalysisContext<DoneState> {
    pub fn outcome(&self) -> &AnalysisOutcome {
        &self.state.outcome
    }

    pub fn into_outcome(self) -> (AnalysisOutcome, StageMetrics) {
        (self.state.outcome, self.metrics)
    }
}
