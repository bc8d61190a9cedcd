pub mod competitor_similarity;
pub mod confidence;
pub mod elasticity;
pub mod extraction;
pub mod match_result;
