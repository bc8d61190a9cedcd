use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Score of one (competitor item, our item) pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub our_entry_id: String,
    pub competitor_entry_id: String,
    pub name_similarity: f64,
    pub keyword_similarity: f64,
    pub combined_score: f64,
    pub is_match: bool,
}

/// How competitor items are paired with ours when counting matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Each competitor item independently takes its best counterpart; a
    /// counterpart can be reused.
    #[default]
    Greedy,
    /// Each of our items backs at most one competitor item.
    OneToOne,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Greedy => write!(f, "greedy"),
            MatchMode::OneToOne => write!(f, "one_to_one"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "greedy" => Ok(MatchMode::Greedy),
            "one_to_one" | "bipartite" => Ok(MatchMode::OneToOne),
            _ => Err(format!("Unknown match mode: {s}")),
        }
    }
}
