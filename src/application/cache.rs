use crate::domain::values::competitor_similarity::CompetitorSimilarity;
use std::collections::HashMap;
use std::sync::Mutex;

/// Identifies one scoring of one competitor against one version of our menu.
///
/// Matching and weight configuration are not part of the key. A cache is
/// only valid for the engine configuration that filled it; never share one
/// between engines configured differently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub catalog_version: u64,
    pub competitor_id: String,
    pub competitor_version: u64,
}

/// Caller-owned memo of per-competitor scores.
///
/// Ranking functions never cache on their own; whoever wants reuse across
/// requests holds one of these and passes it in. Each `PriceLens` owns its
/// own, so entries always come from that engine's fixed configuration.
/// Degenerate competitors are memoized as `None`.
#[derive(Debug, Default)]
pub struct SimilarityCache {
    entries: Mutex<HashMap<CacheKey, Option<CompetitorSimilarity>>>,
}

impl SimilarityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outer `None` is a miss; `Some(None)` is a memoized exclusion.
    pub fn get(&self, key: &CacheKey) -> Option<Option<CompetitorSimilarity>> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    pub fn insert(&self, key: CacheKey, value: Option<CompetitorSimilarity>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}
