//! Matching strategy port for pairing competitor menu items with ours.
//!
//! Defines the [`MatchingStrategy`] trait. A strategy receives both menus
//! (already filtered to matchable entries) and a [`PairScorer`], and decides
//! which pairings to report.
//!
//! # Overview
//!
//! - Greedy best-match: every competitor item takes its best counterpart,
//!   counterparts may be shared.
//! - One-to-one: each of our items backs at most one competitor item.
//!
//! Strategies must be deterministic: the same inputs always produce the
//! same pairings in the same order.

use crate::domain::entities::menu_entry::MenuEntry;
use crate::domain::similarity::PairScorer;
use crate::domain::values::match_result::MatchResult;

/// Trait for pairing strategies.
///
/// # Example
///
/// ```ignore
/// struct ExactNames;
///
/// impl MatchingStrategy for ExactNames {
///     fn name(&self) -> &'static str { "exact_names" }
///
///     fn pair(&self, ours: &[MenuEntry], theirs: &[MenuEntry], scorer: &PairScorer) -> Vec<MatchResult> {
///         // Score, choose, return
///         vec![]
///     }
/// }
/// ```
pub trait MatchingStrategy: Send + Sync {
    /// Unique name for this strategy.
    fn name(&self) -> &'static str;

    /// Return one result per competitor item that received a counterpart.
    ///
    /// Results may include non-matches (`is_match == false`) for display;
    /// callers count only `is_match` results.
    fn pair(&self, ours: &[MenuEntry], theirs: &[MenuEntry], scorer: &PairScorer) -> Vec<MatchResult>;
}
