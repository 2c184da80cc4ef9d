use super::nutrition_table::{NutritionTable, DEFAULT_NUTRITION};
use crate::pipeline::domain::{display_name, NutritionRecord, LABEL_SEPARATORS};
use std::sync::Arc;
use tracing::debug;

/// Result of resolving a raw classifier label against the reference table.
#[derive(Debug, Clone, PartialEq)]
pub struct NutritionMatch {
    /// Canonical key, `None` when the defaults were used.
    pub key: Option<String>,
    pub display_name: String,
    pub record: NutritionRecord,
    pub score: f64,
}

/// Lower-case and turn separators into spaces.
pub fn normalize_label(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if LABEL_SEPARATORS.contains(&c) { ' ' } else { c })
        .collect()
}

/// Substring-containment lookup scored by relative key length.
#[derive(Debug, Clone)]
pub struct NutritionMatcher {
    table: Arc<NutritionTable>,
}

impl NutritionMatcher {
    pub fn new(table: Arc<NutritionTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &NutritionTable {
        &self.table
    }

    pub fn match_label(&self, label: &str) -> NutritionMatch {
        let normalized = normalize_label(label);
        let label_len = normalized.chars().count();

        let mut best: Option<(&str, &NutritionRecord, f64)> = None;
        if label_len > 0 {
            for (key, record) in self.table.iter() {
                if !(normalized.contains(key) || key.contains(normalized.as_str())) {
                    continue;
                }
                let score = key.chars().count() as f64 / label_len as f64;
                // Strictly greater: the earliest entry in table order keeps a tie.
                let better = match best {
                    Some((_, _, best_score)) => score > best_score,
                    None => true,
                };
                if better {
                    best = Some((key, record, score));
                }
            }
        }

        let matched = match best {
            Some((key, record, score)) => NutritionMatch {
                key: Some(key.to_string()),
                display_name: display_name(key),
                record: *record,
                score,
            },
            None => NutritionMatch {
                key: None,
                display_name: display_name(&normalized),
                record: DEFAULT_NUTRITION,
                score: 0.0,
            },
        };

        debug!(
            "Nutrition match for '{}': {:?} (score {:.2})",
            label, matched.key, matched.score
        );
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> NutritionMatcher {
        NutritionMatcher::new(Arc::new(NutritionTable::reference()))
    }

    #[test]
    fn test_cheeseburger_matches_burger() {
        // "burger" and "cheese" both score 0.5; burger comes first in the table
        let matched = matcher().match_label("cheeseburger");
        assert_eq!(matched.key.as_deref(), Some("burger"));
        assert_eq!(matched.record, NutritionRecord::new(540.0, 25.0, 40.0, 31.0));
        assert_eq!(matched.display_name, "Burger");
        assert_eq!(matched.score, 0.5);
    }

    #[test]
    fn test_canonical_key_matches_itself() {
        let m = matcher();
        for key in ["pizza", "hot dog", "french fries", "croissant"] {
            let matched = m.match_label(key);
            assert_eq!(matched.key.as_deref(), Some(key));
            assert_eq!(matched.record, *m.table().get(key).unwrap());
        }
    }

    #[test]
    fn test_separators_and_case_normalised() {
        let matched = matcher().match_label("French_Fries");
        assert_eq!(matched.key.as_deref(), Some("french fries"));
        assert_eq!(matched.display_name, "French Fries");

        let matched = matcher().match_label("hot-dog");
        assert_eq!(matched.key.as_deref(), Some("hot dog"));
    }

    #[test]
    fn test_longer_key_preferred() {
        // both "egg" and "eggs" are contained; "eggs" scores higher
        let matched = matcher().match_label("scrambled_eggs");
        assert_eq!(matched.key.as_deref(), Some("eggs"));
    }

    #[test]
    fn test_label_contained_in_key() {
        // "hot" is a substring of "hot dog" and "hotdog"; the longer key scores higher
        let matched = matcher().match_label("hot");
        assert_eq!(matched.key.as_deref(), Some("hot dog"));
    }

    #[test]
    fn test_unknown_label_uses_defaults() {
        let matched = matcher().match_label("beef_carpaccio_xyz");
        // "beef" is contained, so this one does match
        assert_eq!(matched.key.as_deref(), Some("beef"));

        let matched = matcher().match_label("takoyaki");
        assert!(matched.key.is_none());
        assert_eq!(matched.record, DEFAULT_NUTRITION);
        assert_eq!(matched.display_name, "Takoyaki");
    }

    #[test]
    fn test_empty_label_never_matches() {
        let matched = matcher().match_label("  ");
        assert!(matched.key.is_none());
        assert_eq!(matched.record, DEFAULT_NUTRITION);
        assert_eq!(matched.display_name, "");
    }
}
