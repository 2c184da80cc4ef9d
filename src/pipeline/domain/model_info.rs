use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelStatus {
    Ready,
    FallbackMode,
}

/// Read-only snapshot of the recognition model for health/introspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub model_name: String,
    pub model_loaded: bool,
    pub nutrition_table_size: usize,
    pub status: ModelStatus,
}
