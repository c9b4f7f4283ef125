use serde::{Deserialize, Serialize};

use crate::domain::material::MaterialId;

/// Per-record output of the three predictor calls. Ephemeral: exists only
/// within one ranking pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub material_id: MaterialId,
    pub material_type: String,
    /// Suitability in [0, 1]; the ranking key.
    pub score: f64,
    /// Predicted assembly U-value (W/m²K).
    pub thermal: f64,
    /// Predicted installed cost per square metre.
    pub cost: f64,
}

/// Binary pass/fail classification attached to a shortlisted record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Green,
    Red,
}

/// Shortlist entry: a prediction augmented with indicator flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedMaterial {
    #[serde(flatten)]
    pub prediction: PredictionResult,
    pub thermal_indicator: Indicator,
    pub cost_indicator: Indicator,
}

/// Final output of the facade ranking pipeline. The shortlist is ordered
/// by descending suitability with pairwise-distinct material types; the
/// summary scalars describe its first entry, rounded to 2 decimal places.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub shortlist: Vec<RankedMaterial>,
    pub suitability_score: f64,
    pub thermal_perf: f64,
    pub cost_est: f64,
    pub budget_warning: bool,
}
