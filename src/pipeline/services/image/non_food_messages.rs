const NON_FOOD_MESSAGES: &[(&str, &str)] = &[
    (
        "waterfall",
        "What a beautiful waterfall, but sadly it has no calories! 💧 Try taking a photo of your food.",
    ),
    (
        "landscape",
        "Amazing view! But we don't eat landscapes 😄 Take a photo of what's on your plate.",
    ),
    (
        "sky",
        "The sky looks great but it won't fill you up! ☁️ Try taking a photo of your food.",
    ),
    (
        "ocean",
        "The sea is lovely but not edible! 🌊 Take a photo of your meal.",
    ),
    (
        "dark_scene",
        "This photo is too dark! 🌙 Take a picture of your food somewhere brighter.",
    ),
    (
        "selfie",
        "You look great! But you're not food 😊 Show us your plate.",
    ),
    (
        "person",
        "People are not on the menu! 😅 Try taking a photo of your food.",
    ),
    (
        "animal",
        "Very cute, but not food! 🐱 Show us what's on your plate.",
    ),
];

const GENERIC_NON_FOOD_MESSAGE: &str =
    "This doesn't look like food. Please take a photo of your meal! 📸";

/// User-facing message for a non-food category, with a generic fallback.
pub fn non_food_message(category: &str) -> &'static str {
    NON_FOOD_MESSAGES
        .iter()
        .find(|(key, _)| *key == category)
        .map(|(_, message)| *message)
        .unwrap_or(GENERIC_NON_FOOD_MESSAGE)
}
