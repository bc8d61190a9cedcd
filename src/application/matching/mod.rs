//! Item matching between our menu and a competitor's.

pub mod greedy;
pub mod one_to_one;

use crate::domain::entities::menu_entry::MenuEntry;
use crate::domain::ports::matching_strategy::MatchingStrategy;
use crate::domain::similarity::PairScorer;
use crate::domain::values::match_result::{MatchMode, MatchResult};
use greedy::GreedyMatching;
use one_to_one::OneToOneMatching;

/// Pick the highest-scoring item of ours (`candidates`) for the competitor
/// item `entry`. Earlier candidates win ties.
///
/// Candidates without a name are skipped. Returns `None` when nothing is left
/// to compare against; the result may still be a non-match.
pub fn best_match(entry: &MenuEntry, candidates: &[MenuEntry], scorer: &PairScorer) -> Option<MatchResult> {
    let mut best: Option<MatchResult> = None;
    for candidate in candidates {
        if candidate.name.trim().is_empty() {
            continue;
        }
        let result = scorer.score(candidate, entry);
        let better = match &best {
            Some(b) => result.combined_score > b.combined_score,
            None => true,
        };
        if better {
            best = Some(result);
        }
    }
    best
}

pub fn strategy_for(mode: MatchMode) -> Box<dyn MatchingStrategy> {
    match mode {
        MatchMode::Greedy => Box::new(GreedyMatching),
        MatchMode::OneToOne => Box::new(OneToOneMatching),
    }
}

/// Pairs two menus with a configurable strategy.
pub struct ItemMatcher {
    scorer: PairScorer,
    strategy: Box<dyn MatchingStrategy>,
}

impl Default for ItemMatcher {
    fn default() -> Self {
        Self::new(PairScorer::default(), MatchMode::Greedy)
    }
}

impl ItemMatcher {
    pub fn new(scorer: PairScorer, mode: MatchMode) -> Self {
        Self {
            scorer,
            strategy: strategy_for(mode),
        }
    }

    pub fn with_strategy(scorer: PairScorer, strategy: Box<dyn MatchingStrategy>) -> Self {
        Self { scorer, strategy }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn scorer(&self) -> &PairScorer {
        &self.scorer
    }

    pub fn best_match(&self, entry: &MenuEntry, candidates: &[MenuEntry]) -> Option<MatchResult> {
        best_match(entry, candidates, &self.scorer)
    }

    /// Pairings reported by the strategy after dropping malformed entries.
    pub fn match_results(&self, ours: &[MenuEntry], theirs: &[MenuEntry]) -> Vec<MatchResult> {
        let ours: Vec<MenuEntry> = ours
            .iter()
            .filter(|e| {
                let keep = !e.name.trim().is_empty();
                if !keep {
                    tracing::debug!(entry_id = %e.id, "skipping our entry without a name");
                }
                keep
            })
            .cloned()
            .collect();
        let theirs: Vec<MenuEntry> = considered_entries(theirs);
        if ours.is_empty() || theirs.is_empty() {
            return Vec::new();
        }
        self.strategy.pair(&ours, &theirs, &self.scorer)
    }

    pub fn match_count(&self, ours: &[MenuEntry], theirs: &[MenuEntry]) -> usize {
        self.match_results(ours, theirs).iter().filter(|r| r.is_match).count()
    }
}

/// Competitor entries that take part in matching: named and priced.
pub fn considered_entries(theirs: &[MenuEntry]) -> Vec<MenuEntry> {
    theirs
        .iter()
        .filter(|e| {
            let keep = e.is_matchable();
            if !keep {
                tracing::debug!(entry_id = %e.id, "skipping competitor entry without name or price");
            }
            keep
        })
        .cloned()
        .collect()
}
