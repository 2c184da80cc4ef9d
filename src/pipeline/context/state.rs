use crate::pipeline::domain::{
    AnalysisOutcome, FoodPrediction, ImageStatistics, NutritionEstimate, SceneVerdict,
};

// Markers to track the state of the analysis pipeline
pub struct IngestedState;

pub struct StatsComputedState {
    pub(super) stats: ImageStatistics,
}

pub struct SceneCheckedState {
    pub(super) stats: ImageStatistics,
    pub(super) verdict: SceneVerdict,
}

pub struct ModelInvokedState {
    pub(super) stats: ImageStatistics,
    pub(super) prediction: FoodPrediction,
}

pub struct NutritionResolvedState {
    pub(super) prediction: FoodPrediction,
    pub(super) estimate: NutritionEstimate,
}

pub struct DoneState {
    pub(super) outcome: AnalysisOutcome,
}

pub trait ProcessingState: 'static {
    fn state_name() -> &'static str;
}

impl ProcessingState for IngestedState {
    fn state_name() -> &'static str {
        "Ingested"
    }
}

impl ProcessingState for StatsComputedState {
    fn state_name() -> &'static str {
        "StatsComputed"
    }
}

impl ProcessingState for SceneCheckedState {
    fn state_name() -> &'static str {
        "SceneChecked"
    }
}

impl ProcessingState for ModelInvokedState {
    fn state_name() -> &'static str {
        "ModelInvoked"
    }
}

impl ProcessingState for NutritionResolvedState {
    fn state_name() -> &'static str {
        "NutritionResolved"
    }
}

impl ProcessingState for DoneState {
    fn state_name() -> &'static str {
        "Done"
    }
}
