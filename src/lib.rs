pub mod common;
pub mod config;
pub mod error;
pub mod intake;
pub mod pipeline;

pub use common::PixelGrid;
pub use config::Configuration;
pub use error::{AppError, ImageDecodeError, RecognitionError};
pub use intake::ImagePayload;
pub use pipeline::services::recognition::{FoodRecognitionModel, ModelRegistry};
pub use pipeline::{AnalysisRequest, AnalysisService, AnalysisServiceBuilder, FoodAnalysis, FoodAnalysisPipeline, ModelInfo};
