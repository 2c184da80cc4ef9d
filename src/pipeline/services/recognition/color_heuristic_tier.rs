use super::tier::{RecognitionInput, RecognitionTier};
use crate::common::random::choose;
use crate::common::RandomSource;
use crate::error::RecognitionError;
use crate::pipeline::domain::{FoodPrediction, ImageStatistics};
use tracing::debug;

/// Channel means plus their plain average, as seen by the colour rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorProfile {
    pub avg_red: f64,
    pub avg_green: f64,
    pub avg_blue: f64,
    pub brightness: f64,
}

impl ColorProfile {
    pub fn from_statistics(stats: &ImageStatistics) -> Result<Self, RecognitionError> {
        let (r, g, b) = (stats.avg_red, stats.avg_green, stats.avg_blue);
        if !(r.is_finite() && g.is_finite() && b.is_finite()) {
            return Err(RecognitionError::Failure(format!(
                "non-finite channel averages ({}, {}, {})",
                r, g, b
            )));
        }
        Ok(Self {
            avg_red: r,
            avg_green: g,
            avg_blue: b,
            brightness: (r + g + b) / 3.0,
        })
    }

    pub fn green_dominance(&self) -> f64 {
        self.avg_green - self.avg_red.max(self.avg_blue)
    }

    pub fn red_dominance(&self) -> f64 {
        self.avg_red - self.avg_green.max(self.avg_blue)
    }
}

/// One colour band → candidate foods.
#[derive(Clone, Copy)]
struct ColorRule {
    matches: fn(&ColorProfile) -> bool,
    candidates: fn(&ColorProfile) -> &'static [&'static str],
    confidence: f32,
}

fn green_band(p: &ColorProfile) -> bool {
    p.green_dominance() > 20.0
}

fn green_foods(p: &ColorProfile) -> &'static [&'static str] {
    if p.brightness > 100.0 {
        &["salad"]
    } else {
        &["vegetable"]
    }
}

fn red_band(p: &ColorProfile) -> bool {
    p.red_dominance() > 15.0 && p.brightness > 120.0
}

fn red_foods(p: &ColorProfile) -> &'static [&'static str] {
    if p.brightness > 150.0 {
        &["fruit"]
    } else {
        &["meat"]
    }
}

fn yellow_band(p: &ColorProfile) -> bool {
    p.avg_red > 150.0 && p.avg_green > 100.0 && p.avg_blue < 100.0
}

fn yellow_foods(_: &ColorProfile) -> &'static [&'static str] {
    &["pasta", "bread", "chicken"]
}

fn dark_band(p: &ColorProfile) -> bool {
    p.brightness < 80.0
}

fn dark_foods(_: &ColorProfile) -> &'static [&'static str] {
    &["meat", "soup"]
}

fn any_band(_: &ColorProfile) -> bool {
    true
}

fn common_foods(_: &ColorProfile) -> &'static [&'static str] {
    &["chicken", "rice", "pasta", "sandwich"]
}

// First match wins; the last rule always matches.
const COLOR_RULES: [ColorRule; 5] = [
    ColorRule {
        matches: green_band,
        candidates: green_foods,
        confidence: 0.80,
    },
    ColorRule {
        matches: red_band,
        candidates: red_foods,
        confidence: 0.75,
    },
    ColorRule {
        matches: yellow_band,
        candidates: yellow_foods,
        confidence: 0.70,
    },
    ColorRule {
        matches: dark_band,
        candidates: dark_foods,
        confidence: 0.65,
    },
    ColorRule {
        matches: any_band,
        candidates: common_foods,
        confidence: 0.60,
    },
];

/// Tier 2: guess a food from the dominant colour band.
#[derive(Debug, Clone, Default)]
pub struct ColorHeuristicTier;

impl ColorHeuristicTier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(
        &self,
        profile: &ColorProfile,
        rng: &mut dyn RandomSource,
    ) -> Result<FoodPrediction, RecognitionError> {
        let rule = COLOR_RULES
            .iter()
            .find(|rule| (rule.matches)(profile))
            .ok_or_else(|| RecognitionError::Failure("no colour rule matched".to_string()))?;

        let candidates = (rule.candidates)(profile);
        // A single candidate is taken without consuming a draw.
        let food = match candidates {
            [only] => *only,
            _ => *choose(rng, candidates)
                .ok_or_else(|| RecognitionError::Failure("empty candidate list".to_string()))?,
        };

        debug!(
            "Colour fallback: {} (R:{:.0}, G:{:.0}, B:{:.0})",
            food, profile.avg_red, profile.avg_green, profile.avg_blue
        );
        Ok(FoodPrediction::heuristic(food, rule.confidence))
    }
}

impl RecognitionTier for ColorHeuristicTier {
    fn recognize(
        &self,
        input: &RecognitionInput<'_>,
        rng: &mut dyn RandomSource,
    ) -> Result<FoodPrediction, RecognitionError> {
        let profile = ColorProfile::from_statistics(input.stats)?;
        self.classify(&profile, rng)
    }

    fn name(&self) -> &'static str {
        "ColorHeuristicTier"
    }
}
