/// Canonical form of an item name: lower-case ASCII letters, digits and
/// single spaces, trimmed.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation_and_case() {
        assert_eq!(normalize("Café Latté (Large)!"), "caf latt large");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  Iced\t\tLatte \n 16oz "), "iced latte 16oz");
    }

    #[test]
    fn test_empty_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("Flat White -- Oat Milk");
        assert_eq!(normalize(&once), once);
    }
}
