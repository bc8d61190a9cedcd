mod common;

use common::entry;
use pricelens::domain::similarity::{edit_distance, keyword_overlap, normalize, similarity, PairScorer};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_normalize_strips_punctuation_and_accents() {
    assert_eq!(normalize("  Café   LATTE!! 12oz "), "caf latte 12oz");
    assert_eq!(normalize("Caramel Macchiato (Iced)"), "caramel macchiato iced");
    assert_eq!(normalize("!!!"), "");
}

#[test]
fn test_edit_distance_classic() {
    assert_eq!(edit_distance("kitten", "sitting"), 3);
    assert_eq!(edit_distance("", "abc"), 3);
    assert!(approx(similarity("kitten", "sitting"), 1.0 - 3.0 / 7.0));
}

#[test]
fn test_similarity_bounds_and_identity() {
    let names = ["latte", "iced latte", "", "flat white", "cappuccino"];
    for a in names {
        assert!(approx(similarity(a, a), 1.0));
        for b in names {
            let s = similarity(a, b);
            assert!((0.0..=1.0).contains(&s));
            assert!(approx(s, similarity(b, a)));
        }
    }
}

#[test]
fn test_keyword_overlap_word_order_independent() {
    assert!(approx(keyword_overlap("Iced Caramel Macchiato", "Caramel Macchiato (Iced)"), 1.0));
    assert!(approx(keyword_overlap("Latte", "Lattes"), 1.0));
    assert!(approx(keyword_overlap("The Latte of the Day", "Latte"), 0.5));
}

#[test]
fn test_keyword_overlap_needs_significant_words() {
    assert_eq!(keyword_overlap("a la", "la"), 0.0);
    assert_eq!(keyword_overlap("", "Latte"), 0.0);
    assert!(approx(keyword_overlap("Tea", "Tea"), 1.0));
}

#[test]
fn test_pair_score_blend() {
    let scorer = PairScorer::default();
    let result = scorer.score(&entry("o1", "Cappuccino", 4.0), &entry("c1", "Capuccino", 4.2));
    assert!(approx(result.name_similarity, 0.9));
    assert_eq!(result.keyword_similarity, 0.0);
    assert!(approx(result.combined_score, 0.54));
    assert!(result.is_match);
    assert_eq!(result.our_entry_id, "o1");
    assert_eq!(result.competitor_entry_id, "c1");
}

#[test]
fn test_threshold_is_strict() {
    let scorer = PairScorer::default();
    let result = scorer.score(&entry("o1", "Latte", 4.0), &entry("c1", "Iced Latte", 4.5));
    assert!(approx(result.combined_score, 0.5));
    assert!(!result.is_match);

    let lenient = PairScorer {
        threshold: 0.4,
        ..PairScorer::default()
    };
    assert!(lenient.score(&entry("o1", "Latte", 4.0), &entry("c1", "Iced Latte", 4.5)).is_match);
}
