pub mod context;
pub mod domain;
pub mod orchestration;
pub mod services;

pub use domain::{AnalysisOutcome, FoodAnalysis, ModelInfo};
pub use orchestration::{AnalysisRequest, AnalysisService, AnalysisServiceBuilder, FoodAnalysisPipeline};
