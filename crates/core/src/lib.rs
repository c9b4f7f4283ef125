//! Facade and glazing recommendation engine.
//!
//! Turns a tabular catalog of building-envelope materials plus a customer's
//! hard constraints into a small, deduplicated, ranked shortlist with
//! pass/fail indicators. Per-material performance figures come from a
//! [`predictor::Predictor`] collaborator; everything after prediction
//! (filter, sort, dedup, truncate, indicators) is deterministic.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod filter;
pub mod indicators;
pub mod pipeline;
pub mod predictor;
pub mod scoring;
pub mod selection;

pub use catalog::{load_glass, load_materials, NumericMode};
pub use config::{EngineConfig, PredictionConfig};
pub use domain::glass::{GlassRecord, ScoredGlass};
pub use domain::material::{MaterialId, MaterialRecord};
pub use domain::recommendation::{Indicator, PredictionResult, RankedMaterial, Recommendation};
pub use domain::request::CustomerRequest;
pub use errors::{CatalogError, PredictionError, RankError};
pub use pipeline::{rank_materials, recommend_glass};
pub use predictor::{FeatureVector, LinearPredictor, Predictor};
pub use scoring::{GlassScorer, GlassWeights, DEFAULT_WEIGHTS};
