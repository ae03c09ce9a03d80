/// `"Abdominal_Ultrasound"` -> `"Abdominal Ultrasound"`,
/// `"acute pancreatitis"` -> `"Acute Pancreatitis"`.
pub fn display_name(raw: &str) -> String {
    raw.replace('_', " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Every word lowercased except its first letter.
pub fn title_case(raw: &str) -> String {
    raw.split(' ')
        .map(|word| capitalize(&word.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
