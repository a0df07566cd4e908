//! Locale-aware title comparison.
//!
//! Titles are compared in three passes, the way a typical Latin-script
//! collation does it:
//!
//! 1. primary: accent-folded, case-folded characters, with whitespace and
//!    punctuation ordered before symbols, digits and letters;
//! 2. secondary: accents (`e` before `é`);
//! 3. tertiary: case, lowercase before uppercase.

use std::cmp::Ordering;

use deunicode::deunicode_char;

/// Compare two titles for display ordering.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(&tertiary_key(b)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Space,
    Punctuation,
    Symbol,
    Digit,
    Letter,
}

fn classify(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Space
    } else if c.is_ascii_punctuation() {
        if matches!(c, '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~') {
            CharClass::Symbol
        } else {
            CharClass::Punctuation
        }
    } else if c.is_numeric() {
        CharClass::Digit
    } else if c.is_alphabetic() {
        CharClass::Letter
    } else {
        CharClass::Symbol
    }
}

/// Fold a character to its unaccented lowercase ASCII spelling where one
/// exists. Characters without a transliteration are kept as-is.
fn fold(c: char) -> String {
    match deunicode_char(c) {
        Some(ascii) if !ascii.is_empty() && c.is_alphanumeric() => ascii.to_lowercase(),
        _ => c.to_lowercase().collect(),
    }
}

fn primary_key(s: &str) -> Vec<(CharClass, char)> {
    s.chars()
        .flat_map(|c| {
            let folded = fold(c);
            folded
                .chars()
                .map(|f| (classify(f), f))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Accent weights: a folded character sorts before its accented forms.
fn secondary_key(s: &str) -> Vec<(bool, String)> {
    s.chars()
        .map(|c| {
            let lower: String = c.to_lowercase().collect();
            let accented = fold(c) != lower;
            (accented, lower)
        })
        .collect()
}

/// Case weights: lowercase sorts before uppercase.
fn tertiary_key(s: &str) -> Vec<bool> {
    s.chars().map(char::is_uppercase).collect()
}
