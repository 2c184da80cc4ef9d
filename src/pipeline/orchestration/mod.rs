pub mod processing_pipeline;
pub mod service;

pub use processing_pipeline::FoodAnalysisPipeline;
pub use service::{AnalysisRequest, AnalysisService, AnalysisServiceBuilder};
