use crate::domain::entities::menu_entry::MenuEntry;
use crate::domain::ports::matching_strategy::MatchingStrategy;
use crate::domain::similarity::PairScorer;
use crate::domain::values::match_result::MatchResult;

/// Maximum-cardinality bipartite matching over the pairs that clear the
/// match threshold.
///
/// Uses augmenting paths (Kuhn's algorithm). Each competitor item tries our
/// items in descending score order, so where several assignments reach the
/// same count the higher-scoring counterparts are preferred. Only assigned
/// pairs are reported.
pub struct OneToOneMatching;

struct Edge {
    ours: usize,
    result: MatchResult,
}

fn augment(theirs: usize, edges: &[Vec<Edge>], owner: &mut [Option<usize>], seen: &mut [bool]) -> bool {
    for edge in &edges[theirs] {
        if seen[edge.ours] {
            continue;
        }
        seen[edge.ours] = true;
        let free = match owner[edge.ours] {
            None => true,
            Some(other) => augment(other, edges, owner, seen),
        };
        if free {
            owner[edge.ours] = Some(theirs);
            return true;
        }
    }
    false
}

impl MatchingStrategy for OneToOneMatching {
    fn name(&self) -> &'static str {
        "one_to_one"
    }

    fn pair(&self, ours: &[MenuEntry], theirs: &[MenuEntry], scorer: &PairScorer) -> Vec<MatchResult> {
        let edges: Vec<Vec<Edge>> = theirs
            .iter()
            .map(|their_entry| {
                let mut row: Vec<Edge> = ours
                    .iter()
                    .enumerate()
                    .map(|(i, our_entry)| Edge {
                        ours: i,
                        result: scorer.score(our_entry, their_entry),
                    })
                    .filter(|e| e.result.is_match)
                    .collect();
                row.sort_by(|a, b| {
                    b.result
                        .combined_score
                        .partial_cmp(&a.result.combined_score)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then_with(|| a.ours.cmp(&b.ours))
                });
                row
            })
            .collect();

        let mut owner: Vec<Option<usize>> = vec![None; ours.len()];
        for t in 0..theirs.len() {
            let mut seen = vec![false; ours.len()];
            augment(t, &edges, &mut owner, &mut seen);
        }

        let mut assigned: Vec<(usize, MatchResult)> = owner
            .iter()
            .enumerate()
            .filter_map(|(o, t)| {
                let t = (*t)?;
                edges[t]
                    .iter()
                    .find(|e| e.ours == o)
                    .map(|e| (t, e.result.clone()))
            })
            .collect();
        assigned.sort_by_key(|(t, _)| *t);
        assigned.into_iter().map(|(_, r)| r).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str) -> MenuEntry {
        MenuEntry::priced(id, name, 4.0).unwrap()
    }

    #[test]
    fn test_shared_counterpart_counts_once() {
        let ours = vec![entry("o1", "Cold Brew")];
        let theirs = vec![entry("c1", "Cold Brew"), entry("c2", "Cold Brews")];
        let results = OneToOneMatching.pair(&ours, &theirs, &PairScorer::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].competitor_entry_id, "c1");
    }

    #[test]
    fn test_augmenting_path_reassigns() {
        // c1 prefers o1 but can also take o2; c2 can only take o1.
        let ours = vec![entry("o1", "Vanilla Latte"), entry("o2", "Vanilla Latte Large")];
        let theirs = vec![entry("c1", "Vanilla Latte"), entry("c2", "Vanila Latte")];
        let scorer = PairScorer {
            threshold: 0.66,
            ..PairScorer::default()
        };
        let results = OneToOneMatching.pair(&ours, &theirs, &scorer);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].competitor_entry_id, "c1");
        assert_eq!(results[0].our_entry_id, "o2");
        assert_eq!(results[1].competitor_entry_id, "c2");
        assert_eq!(results[1].our_entry_id, "o1");
    }

    #[test]
    fn test_no_edges_no_results() {
        let ours = vec![entry("o1", "Bagel")];
        let theirs = vec![entry("c1", "Smoothie")];
        assert!(OneToOneMatching.pair(&ours, &theirs, &PairScorer::default()).is_empty());
    }
}
