use crate::pipeline::domain::{ImageStatistics, SceneCategory, SceneVerdict};
use tracing::debug;

const FOOD_CONFIDENCE: f32 = 0.70;
const FOOD_REASON: &str = "Passed non-food filters, likely contains food";

/// One entry of the ordered non-food filter.
#[derive(Clone, Copy)]
pub struct SceneRule {
    pub category: SceneCategory,
    pub confidence: f32,
    pub reason: &'static str,
    pub matches: fn(&ImageStatistics) -> bool,
}

impl std::fmt::Debug for SceneRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneRule")
            .field("category", &self.category)
            .field("confidence", &self.confidence)
            .finish()
    }
}

fn is_waterfall(s: &ImageStatistics) -> bool {
    s.blue_dominance() > 20.0 && s.brightness > 100.0 && s.edge_density > 0.08 && s.contrast > 40.0
}

fn is_landscape(s: &ImageStatistics) -> bool {
    s.green_dominance() > 15.0 && s.brightness > 120.0 && s.contrast < 60.0
}

fn is_sky(s: &ImageStatistics) -> bool {
    s.blue_dominance() > 30.0 && s.brightness > 140.0
}

fn is_ocean(s: &ImageStatistics) -> bool {
    s.blue_dominance() > 25.0
        && s.brightness > 80.0
        && s.brightness < 140.0
        && s.edge_density < 0.05
}

fn is_dark(s: &ImageStatistics) -> bool {
    s.brightness < 50.0
}

/// Evaluation order matters: the first matching rule wins.
pub const DEFAULT_SCENE_RULES: [SceneRule; 5] = [
    SceneRule {
        category: SceneCategory::Waterfall,
        confidence: 0.95,
        reason: "Strong waterfall indicators: blue dominance + high contrast + edges",
        matches: is_waterfall,
    },
    SceneRule {
        category: SceneCategory::Landscape,
        confidence: 0.90,
        reason: "Detected natural landscape with green dominance",
        matches: is_landscape,
    },
    SceneRule {
        category: SceneCategory::Sky,
        confidence: 0.88,
        reason: "Detected sky scene with high blue and brightness",
        matches: is_sky,
    },
    SceneRule {
        category: SceneCategory::Ocean,
        confidence: 0.85,
        reason: "Detected water/ocean scene",
        matches: is_ocean,
    },
    SceneRule {
        category: SceneCategory::DarkScene,
        confidence: 0.80,
        reason: "Image too dark to identify food",
        matches: is_dark,
    },
];

/// Rule-based "is this even food?" filter over global image statistics.
#[derive(Debug, Clone)]
pub struct SceneClassifier {
    rules: Vec<SceneRule>,
}

impl SceneClassifier {
    pub fn new() -> Self {
        Self {
            rules: DEFAULT_SCENE_RULES.to_vec(),
        }
    }

    /// Append a rule after the built-in ones.
    pub fn with_rule(mut self, rule: SceneRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[SceneRule] {
        &self.rules
    }

    pub fn classify(&self, stats: &ImageStatistics) -> SceneVerdict {
        let verdict = self
            .rules
            .iter()
            .find(|rule| (rule.matches)(stats))
            .map(|rule| SceneVerdict::non_food(rule.category, rule.confidence, rule.reason))
            .unwrap_or_else(|| SceneVerdict::food(FOOD_CONFIDENCE, FOOD_REASON));

        debug!(
            "Scene verdict: {} (food={}, confidence {:.2}) - {}",
            verdict.category, verdict.is_food, verdict.confidence, verdict.reason
        );
        verdict
    }
}

impl Default for SceneClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(brightness: f64, contrast: f64, edge_density: f64, rgb: (f64, f64, f64)) -> ImageStatistics {
        ImageStatistics {
            brightness,
            contrast,
            edge_density,
            avg_red: rgb.0,
            avg_green: rgb.1,
            avg_blue: rgb.2,
        }
    }

    #[test]
    fn test_waterfall() {
        let verdict = SceneClassifier::new().classify(&stats(150.0, 50.0, 0.1, (100.0, 110.0, 150.0)));
        assert_eq!(verdict.category, SceneCategory::Waterfall);
        assert_eq!(verdict.confidence, 0.95);
        assert!(!verdict.is_food);
    }

    #[test]
    fn test_landscape() {
        let verdict = SceneClassifier::new().classify(&stats(130.0, 30.0, 0.02, (100.0, 160.0, 110.0)));
        assert_eq!(verdict.category, SceneCategory::Landscape);
        assert_eq!(verdict.confidence, 0.90);
    }

    #[test]
    fn test_sky_wins_regardless_of_contrast_and_edges() {
        let classifier = SceneClassifier::new();
        // blue dominance 40, brightness 150; waterfall blocked by low contrast or edges
        for (contrast, edges) in [(0.0, 0.0), (10.0, 0.5), (90.0, 0.01), (39.0, 0.2)] {
            let verdict = classifier.classify(&stats(150.0, contrast, edges, (100.0, 110.0, 150.0)));
            assert_eq!(verdict.category, SceneCategory::Sky);
            assert_eq!(verdict.confidence, 0.88);
        }
    }

    #[test]
    fn test_waterfall_precedes_sky() {
        let verdict = SceneClassifier::new().classify(&stats(150.0, 41.0, 0.09, (100.0, 110.0, 150.0)));
        assert_eq!(verdict.category, SceneCategory::Waterfall);
    }

    #[test]
    fn test_ocean() {
        let verdict = SceneClassifier::new().classify(&stats(100.0, 20.0, 0.01, (60.0, 80.0, 140.0)));
        assert_eq!(verdict.category, SceneCategory::Ocean);
        assert_eq!(verdict.confidence, 0.85);
    }

    #[test]
    fn test_dark_scene() {
        let verdict = SceneClassifier::new().classify(&stats(30.0, 0.0, 0.0, (30.0, 30.0, 30.0)));
        assert_eq!(verdict.category, SceneCategory::DarkScene);
        assert_eq!(verdict.confidence, 0.80);
        assert!(!verdict.is_food);
    }

    #[test]
    fn test_bright_neutral_image_is_food() {
        let verdict = SceneClassifier::new().classify(&stats(200.0, 0.0, 0.0, (200.0, 200.0, 200.0)));
        assert!(verdict.is_food);
        assert_eq!(verdict.category, SceneCategory::Food);
        assert_eq!(verdict.confidence, 0.70);
    }

    #[test]
    fn test_custom_rule_runs_after_builtins() {
        fn always(_: &ImageStatistics) -> bool {
            true
        }
        let classifier = SceneClassifier::new().with_rule(SceneRule {
            category: SceneCategory::Animal,
            confidence: 0.5,
            reason: "catch-all",
            matches: always,
        });
        assert_eq!(classifier.rules().len(), 6);
        let dark = classifier.classify(&stats(20.0, 0.0, 0.0, (20.0, 20.0, 20.0)));
        assert_eq!(dark.category, SceneCategory::DarkScene);
        let other = classifier.classify(&stats(200.0, 0.0, 0.0, (200.0, 200.0, 200.0)));
        assert_eq!(other.category, SceneCategory::Animal);
    }
}
