//! Ranking pipelines.
//!
//! Both pipelines share the same back half: descending stable sort,
//! first-seen-per-category deduplication, truncation. They differ in how
//! records are scored: facade materials go through the predictor
//! collaborator, glazing through the deterministic composite scorer.

mod facade;
mod glass;

pub use facade::rank_materials;
pub use glass::recommend_glass;
