use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneCategory {
    Waterfall,
    Landscape,
    Sky,
    Ocean,
    DarkScene,
    Selfie,
    Person,
    Animal,
    Food,
}

impl SceneCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneCategory::Waterfall => "waterfall",
            SceneCategory::Landscape => "landscape",
            SceneCategory::Sky => "sky",
            SceneCategory::Ocean => "ocean",
            SceneCategory::DarkScene => "dark_scene",
            SceneCategory::Selfie => "selfie",
            SceneCategory::Person => "person",
            SceneCategory::Animal => "animal",
            SceneCategory::Food => "food",
        }
    }
}

impl fmt::Display for SceneCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the heuristic scene filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneVerdict {
    pub is_food: bool,
    pub category: SceneCategory,
    pub confidence: f32,
    pub reason: &'static str,
}

impl SceneVerdict {
    pub fn non_food(category: SceneCategory, confidence: f32, reason: &'static str) -> Self {
        Self {
            is_food: false,
            category,
            confidence,
            reason,
        }
    }

    pub fn food(confidence: f32, reason: &'static str) -> Self {
        Self {
            is_food: true,
            category: SceneCategory::Food,
            confidence,
            reason,
        }
    }
}
