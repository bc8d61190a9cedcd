//! Pure text-similarity primitives used to pair menu items.

pub mod keyword;
pub mod levenshtein;
pub mod normalize;
pub mod pair;

pub use keyword::keyword_overlap;
pub use levenshtein::{edit_distance, similarity};
pub use normalize::normalize;
pub use pair::PairScorer;
