use crate::domain::entities::menu_entry::MenuEntry;
use crate::domain::similarity::{keyword_overlap, normalize, similarity};
use crate::domain::values::match_result::MatchResult;
use serde::{Deserialize, Serialize};

/// Blends name and keyword similarity into one pair score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairScorer {
    pub name_weight: f64,
    pub keyword_weight: f64,
    /// A pair is a match when its combined score is strictly above this.
    pub threshold: f64,
}

impl Default for PairScorer {
    fn default() -> Self {
        Self {
            name_weight: 0.6,
            keyword_weight: 0.4,
            threshold: 0.5,
        }
    }
}

impl PairScorer {
    pub fn score(&self, ours: &MenuEntry, theirs: &MenuEntry) -> MatchResult {
        let name_similarity = similarity(&normalize(&ours.name), &normalize(&theirs.name));
        let keyword_similarity = keyword_overlap(&ours.name, &theirs.name);
        let combined_score = (self.name_weight * name_similarity
            + self.keyword_weight * keyword_similarity)
            .clamp(0.0, 1.0);
        MatchResult {
            our_entry_id: ours.id.clone(),
            competitor_entry_id: theirs.id.clone(),
            name_similarity,
            keyword_similarity,
            combined_score,
            is_match: combined_score > self.threshold,
        }
    }
}
