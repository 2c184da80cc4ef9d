use super::recognition_model::FoodRecognitionModel;
use crate::config::Configuration;
use crate::error::AppError;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::info;

type ModelLoader = dyn Fn() -> Result<FoodRecognitionModel, AppError> + Send + Sync;

/// Process-wide holder of the recognition model. The loader runs at most
/// once, even when the first calls race. A failed load is not cached, so a
/// later call may retry.
pub struct ModelRegistry {
    model: OnceLock<Arc<FoodRecognitionModel>>,
    init_guard: Mutex<()>,
    loader: Box<ModelLoader>,
}

impl ModelRegistry {
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Result<FoodRecognitionModel, AppError> + Send + Sync + 'static,
    {
        Self {
            model: OnceLock::new(),
            init_guard: Mutex::new(()),
            loader: Box::new(loader),
        }
    }

    pub fn from_configuration(configuration: Arc<Configuration>) -> Self {
        Self::new(move || FoodRecognitionModel::from_configuration(&configuration))
    }

    /// Wrap an already built model.
    pub fn preloaded(model: FoodRecognitionModel) -> Self {
        let registry = Self::new(|| {
            Err(AppError::Service(
                "preloaded registry has no loader".to_string(),
            ))
        });
        registry.model.get_or_init(|| Arc::new(model));
        registry
    }

    pub fn get(&self) -> Result<Arc<FoodRecognitionModel>, AppError> {
        if let Some(model) = self.model.get() {
            return Ok(model.clone());
        }

        let _guard = self
            .init_guard
            .lock()
            .map_err(|_| AppError::Service("model initialisation lock poisoned".to_string()))?;

        // Another caller may have finished while we waited.
        if let Some(model) = self.model.get() {
            return Ok(model.clone());
        }

        let model = Arc::new((self.loader)()?);
        info!("Recognition model initialised: {}", model.model_name());
        Ok(self.model.get_or_init(|| model).clone())
    }

    pub fn is_initialized(&self) -> bool {
        self.model.get().is_some()
    }
}
