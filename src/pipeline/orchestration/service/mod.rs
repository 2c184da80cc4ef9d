pub mod analysis_service;

pub use analysis_service::{
    into_app_error, AnalysisRequest, AnalysisService, AnalysisServiceBuilder, BoxError,
};
