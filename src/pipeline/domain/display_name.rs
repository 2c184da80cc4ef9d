/// Characters treated as word separators in labels and category keys.
pub const LABEL_SEPARATORS: [char; 2] = ['_', '-'];

/// Render a key or label for display: separators become spaces and each
/// word is capitalised.
pub fn display_name(name: &str) -> String {
    name.split(|c: char| c.is_whitespace() || LABEL_SEPARATORS.contains(&c))
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
