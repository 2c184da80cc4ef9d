use crate::pipeline::domain::NutritionRecord;
use indexmap::IndexMap;

/// Used when a label matches no reference entry.
pub const DEFAULT_NUTRITION: NutritionRecord = NutritionRecord::new(200.0, 10.0, 25.0, 8.0);

// Insertion order is significant: it breaks ties in the matcher.
const REFERENCE_FOODS: &[(&str, NutritionRecord)] = &[
    ("pizza", NutritionRecord::new(266.0, 11.0, 33.0, 10.0)),
    ("burger", NutritionRecord::new(540.0, 25.0, 40.0, 31.0)),
    ("hamburger", NutritionRecord::new(540.0, 25.0, 40.0, 31.0)),
    ("salad", NutritionRecord::new(33.0, 3.0, 6.0, 0.3)),
    ("pasta", NutritionRecord::new(220.0, 8.0, 44.0, 1.1)),
    ("spaghetti", NutritionRecord::new(220.0, 8.0, 44.0, 1.1)),
    ("chicken", NutritionRecord::new(239.0, 27.0, 0.0, 14.0)),
    ("rice", NutritionRecord::new(130.0, 2.7, 28.0, 0.3)),
    ("bread", NutritionRecord::new(265.0, 9.0, 49.0, 3.2)),
    ("egg", NutritionRecord::new(155.0, 13.0, 1.1, 11.0)),
    ("eggs", NutritionRecord::new(155.0, 13.0, 1.1, 11.0)),
    ("fish", NutritionRecord::new(206.0, 22.0, 0.0, 12.0)),
    ("soup", NutritionRecord::new(86.0, 6.0, 8.0, 3.0)),
    ("sandwich", NutritionRecord::new(300.0, 15.0, 30.0, 15.0)),
    ("fruit", NutritionRecord::new(52.0, 0.3, 14.0, 0.2)),
    ("apple", NutritionRecord::new(52.0, 0.3, 14.0, 0.2)),
    ("banana", NutritionRecord::new(89.0, 1.1, 23.0, 0.3)),
    ("orange", NutritionRecord::new(47.0, 0.9, 12.0, 0.1)),
    ("strawberry", NutritionRecord::new(32.0, 0.7, 8.0, 0.3)),
    ("vegetable", NutritionRecord::new(25.0, 1.0, 5.0, 0.1)),
    ("vegetables", NutritionRecord::new(25.0, 1.0, 5.0, 0.1)),
    ("meat", NutritionRecord::new(250.0, 26.0, 0.0, 15.0)),
    ("beef", NutritionRecord::new(250.0, 26.0, 0.0, 15.0)),
    ("pork", NutritionRecord::new(242.0, 27.0, 0.0, 14.0)),
    ("cheese", NutritionRecord::new(113.0, 7.0, 1.0, 9.0)),
    ("yogurt", NutritionRecord::new(59.0, 10.0, 3.6, 0.4)),
    ("cake", NutritionRecord::new(257.0, 3.0, 46.0, 7.0)),
    ("cookie", NutritionRecord::new(502.0, 5.9, 64.0, 25.0)),
    ("cookies", NutritionRecord::new(502.0, 5.9, 64.0, 25.0)),
    ("ice cream", NutritionRecord::new(207.0, 3.5, 24.0, 11.0)),
    ("coffee", NutritionRecord::new(2.0, 0.3, 0.0, 0.0)),
    ("tea", NutritionRecord::new(1.0, 0.0, 0.3, 0.0)),
    ("water", NutritionRecord::new(0.0, 0.0, 0.0, 0.0)),
    ("fries", NutritionRecord::new(312.0, 3.4, 41.0, 15.0)),
    ("french fries", NutritionRecord::new(312.0, 3.4, 41.0, 15.0)),
    ("hot dog", NutritionRecord::new(290.0, 10.0, 24.0, 18.0)),
    ("hotdog", NutritionRecord::new(290.0, 10.0, 24.0, 18.0)),
    ("taco", NutritionRecord::new(226.0, 9.0, 21.0, 13.0)),
    ("burrito", NutritionRecord::new(206.0, 8.0, 26.0, 8.0)),
    ("sushi", NutritionRecord::new(143.0, 6.0, 21.0, 4.0)),
    ("steak", NutritionRecord::new(271.0, 25.0, 0.0, 19.0)),
    ("bacon", NutritionRecord::new(541.0, 37.0, 1.4, 42.0)),
    ("pancake", NutritionRecord::new(227.0, 6.0, 28.0, 10.0)),
    ("pancakes", NutritionRecord::new(227.0, 6.0, 28.0, 10.0)),
    ("waffle", NutritionRecord::new(291.0, 7.0, 33.0, 15.0)),
    ("waffles", NutritionRecord::new(291.0, 7.0, 33.0, 15.0)),
    ("donut", NutritionRecord::new(452.0, 5.0, 51.0, 25.0)),
    ("doughnut", NutritionRecord::new(452.0, 5.0, 51.0, 25.0)),
    ("muffin", NutritionRecord::new(377.0, 6.0, 51.0, 17.0)),
    ("croissant", NutritionRecord::new(406.0, 8.0, 46.0, 21.0)),
    ("french toast", NutritionRecord::new(229.0, 7.7, 25.0, 11.0)),
];

/// Canonical food name → macro-nutrients, read-only once built.
#[derive(Debug, Clone)]
pub struct NutritionTable {
    entries: IndexMap<String, NutritionRecord>,
}

impl NutritionTable {
    pub fn reference() -> Self {
        Self::from_entries(
            REFERENCE_FOODS
                .iter()
                .map(|(name, record)| (name.to_string(), *record)),
        )
    }

    /// Later duplicates overwrite the record but keep the first position.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, NutritionRecord)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&NutritionRecord> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NutritionRecord)> {
        self.entries.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.entries.get_index(index).map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NutritionTable {
    fn default() -> Self {
        Self::reference()
    }
}
