use crate::error::AppError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::Level;

const ENV_PREFIX: &str = "CALORIE_VISION";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub model_name: String,
    pub model_weights_path: Option<String>,
    pub edge_low_threshold: f32,
    pub edge_high_threshold: f32,
    pub neural_food_threshold: f32,
    pub low_confidence_threshold: f32,
    pub random_seed: Option<u64>,
    pub analysis_timeout_ms: Option<u64>,
    pub log_level: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            model_name: "nateraw/food".to_string(),
            model_weights_path: None,
            edge_low_threshold: 50.0,
            edge_high_threshold: 150.0,
            neural_food_threshold: 0.2,
            low_confidence_threshold: 0.4,
            random_seed: None,
            analysis_timeout_ms: None,
            log_level: "info".to_string(),
        }
    }
}

impl Configuration {
    /// Layer an optional TOML file and `CALORIE_VISION_*` environment
    /// variables over the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let configuration: Self = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| AppError::Config(e.to_string()))?;

        configuration.validate().map_err(AppError::Config)?;
        Ok(configuration)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.edge_low_threshold > 0.0
            && self.edge_low_threshold <= self.edge_high_threshold
            && self.edge_high_threshold.is_finite())
        {
            return Err("Edge thresholds must satisfy 0 < low <= high".to_string());
        }

        if !(0.0..=1.0).contains(&self.neural_food_threshold) {
            return Err("Neural food threshold must be between 0.0 and 1.0".to_string());
        }

        if !(0.0..=1.0).contains(&self.low_confidence_threshold) {
            return Err("Low confidence threshold must be between 0.0 and 1.0".to_string());
        }

        if self.analysis_timeout_ms == Some(0) {
            return Err("Analysis timeout must be greater than 0".to_string());
        }

        self.log_level
            .parse::<Level>()
            .map_err(|_| format!("Unknown log level '{}'", self.log_level))?;

        Ok(())
    }

    pub fn max_log_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }

    pub fn analysis_timeout(&self) -> Option<Duration> {
        self.analysis_timeout_ms.map(Duration::from_millis)
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }
}
