/// Display label for an upstream category name: every hyphen becomes a
/// space and each word is capitalized (`"women's-clothing"` →
/// `"Women's Clothing"`).
pub fn category_label(name: &str) -> String {
    name.replace('-', " ")
        .split(' ')
        .map(capitalize)
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
