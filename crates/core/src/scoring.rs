//! Composite scoring for glazing records.

use serde::{Deserialize, Serialize};

use crate::domain::glass::{GlassRecord, ScoredGlass};

/// Weights for the six glass sub-scores. Must sum to 1.0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlassWeights {
    pub thermal: f64,
    pub solar: f64,
    pub clarity: f64,
    pub durability: f64,
    pub acoustic: f64,
    pub cost: f64,
}

/// Default weighting of the glass sub-scores.
pub const DEFAULT_WEIGHTS: GlassWeights = GlassWeights {
    thermal: 0.25,
    solar: 0.20,
    clarity: 0.20,
    durability: 0.15,
    acoustic: 0.10,
    cost: 0.10,
};

impl GlassWeights {
    pub fn sum(&self) -> f64 {
        self.thermal + self.solar + self.clarity + self.durability + self.acoustic + self.cost
    }
}

impl Default for GlassWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

/// Computes per-record sub-scores and the weighted composite for glazing.
#[derive(Clone, Debug)]
pub struct GlassScorer {
    weights: GlassWeights,
}

impl GlassScorer {
    pub fn new() -> Self {
        Self { weights: GlassWeights::default() }
    }

    pub fn with_weights(weights: GlassWeights) -> Self {
        Self { weights }
    }

    /// Highest cost across the catalog; the normalization denominator for
    /// `cost_score`.
    pub fn max_cost(catalog: &[GlassRecord]) -> f64 {
        catalog.iter().map(|record| record.cost_per_sqm).fold(0.0, f64::max)
    }

    /// Score one record against the catalog-wide maximum cost.
    ///
    /// Pure function of the record and `max_cost`; sub-scores are
    /// intentionally left unclamped, so a large U-value or cost produces a
    /// negative contribution instead of saturating at zero.
    pub fn score(&self, record: &GlassRecord, max_cost: f64) -> ScoredGlass {
        let thermal_score = 100.0 - record.u_value * 20.0;
        let solar_score = 100.0 - record.shgc * 100.0;
        let clarity_score = record.vlt;
        let durability_score = record.durability_years * 5.0;
        let acoustic_score = record.acoustic_rw * 5.0;
        // A catalog where every cost is zero has no usable denominator;
        // treat cost as maximally favorable instead of dividing by zero.
        let cost_score = if max_cost > 0.0 {
            100.0 - record.cost_per_sqm / max_cost * 100.0
        } else {
            100.0
        };

        let final_score = self.weights.thermal * thermal_score
            + self.weights.solar * solar_score
            + self.weights.clarity * clarity_score
            + self.weights.durability * durability_score
            + self.weights.acoustic * acoustic_score
            + self.weights.cost * cost_score;

        ScoredGlass {
            record: record.clone(),
            thermal_score,
            solar_score,
            clarity_score,
            durability_score,
            acoustic_score,
            cost_score,
            final_score,
        }
    }

    /// Score every record in catalog order.
    pub fn score_catalog(&self, catalog: &[GlassRecord]) -> Vec<ScoredGlass> {
        let max_cost = Self::max_cost(catalog);
        catalog.iter().map(|record| self.score(record, max_cost)).collect()
    }
}

impl Default for GlassScorer {
    fn default() -> Self {
        Self::new()
    }
}
