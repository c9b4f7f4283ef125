use serde::{Deserialize, Serialize};

/// Immutable catalog entry for a glazing product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlassRecord {
    pub glass_type: String,
    pub u_value: f64,
    pub shgc: f64,
    pub vlt: f64,
    pub acoustic_rw: f64,
    pub thickness_mm: f64,
    pub fire_rating: String,
    pub durability_years: f64,
    pub cost_per_sqm: f64,
    pub maintenance_freq_per_year: f64,
    pub solar_control_coating: String,
    pub impact_resistance: String,
    pub environmental_suitability: String,
    #[serde(default)]
    pub recommended_climate: Option<String>,
}

/// Working copy of a glass record with request-scoped computed scores.
///
/// Sub-scores exist only for the duration of one ranking request; the
/// underlying catalog record is never mutated. Values outside [0, 100] are
/// allowed and propagate into `final_score`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoredGlass {
    #[serde(flatten)]
    pub record: GlassRecord,
    pub thermal_score: f64,
    pub solar_score: f64,
    pub clarity_score: f64,
    pub durability_score: f64,
    pub acoustic_score: f64,
    pub cost_score: f64,
    pub final_score: f64,
}
