use crate::domain::similarity::normalize::normalize;
use std::collections::BTreeSet;

/// Words that carry no identity on a menu.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "with", "and", "or", "of", "in", "on", "at", "to", "for",
];

/// Distinct significant tokens of `text`: longer than two characters and not
/// a stop word.
pub fn keywords(text: &str) -> BTreeSet<String> {
    normalize(text)
        .split_whitespace()
        .filter(|t| t.chars().count() > 2 && !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

fn related(x: &str, y: &str) -> bool {
    x.contains(y) || y.contains(x)
}

/// Share of keywords two names have in common, in `[0, 1]`.
///
/// Two tokens match when either is a substring of the other ("latte" and
/// "lattes"). The match count is taken from whichever side has fewer matched
/// tokens, so the score is symmetric and never exceeds 1.
pub fn keyword_overlap(a: &str, b: &str) -> f64 {
    let tokens_a = keywords(a);
    let tokens_b = keywords(b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let matched_a = tokens_a
        .iter()
        .filter(|ta| tokens_b.iter().any(|tb| related(ta, tb)))
        .count();
    let matched_b = tokens_b
        .iter()
        .filter(|tb| tokens_a.iter().any(|ta| related(ta, tb)))
        .count();

    let matches = matched_a.min(matched_b);
    matches as f64 / tokens_a.len().max(tokens_b.len()) as f64
}
