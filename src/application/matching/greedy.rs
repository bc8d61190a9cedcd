use super::best_match;
use crate::domain::entities::menu_entry::MenuEntry;
use crate::domain::ports::matching_strategy::MatchingStrategy;
use crate::domain::similarity::PairScorer;
use crate::domain::values::match_result::MatchResult;

/// Every competitor item independently takes its best item of ours.
///
/// Two competitor items can both claim the same item of ours, and both count.
pub struct GreedyMatching;

impl MatchingStrategy for GreedyMatching {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn pair(&self, ours: &[MenuEntry], theirs: &[MenuEntry], scorer: &PairScorer) -> Vec<MatchResult> {
        theirs
            .iter()
            .filter_map(|entry| best_match(entry, ours, scorer))
            .collect()
    }
}
