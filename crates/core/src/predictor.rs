//! Predictor collaborator seam.
//!
//! The facade pipeline treats suitability, thermal and cost prediction as
//! three opaque pure functions of a merged customer+material feature
//! vector. [`LinearPredictor`] is a deterministic in-process model so the
//! engine runs and tests without an external scoring service; all outputs
//! are reproducible for identical input.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::material::MaterialRecord;
use crate::domain::request::CustomerRequest;
use crate::errors::PredictionError;

/// Merged customer + material features for one prediction call.
///
/// Categorical values are lowercased at construction; missing numeric
/// context contributes 0.0. Field names follow the catalog/request schema.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureVector {
    pub material_id: String,

    // Customer context.
    pub floor_count: f64,
    pub facade_area_sqm: f64,
    pub max_cost_per_sqm: f64,
    pub required_u_value: f64,
    pub required_shgc: f64,
    pub required_vlt: f64,
    pub avg_temp_c: f64,
    pub avg_humidity_pct: f64,
    pub avg_rainfall_mm: f64,
    pub location: String,
    pub building_type: String,
    pub orientation: String,
    pub budget_level: String,
    pub climate_zone: String,
    pub wind_load_level: String,
    pub solar_exposure: String,
    pub thermal_insulation_required: String,
    pub acoustic_requirement: String,
    pub fire_rating_requirement: String,
    pub aesthetic_preference: String,

    // Material attributes.
    pub material_type: String,
    pub material_subtype: String,
    pub fire_rating: String,
    pub cost_per_sqm: f64,
    pub installation_cost_per_sqm: f64,
    pub material_u_value: f64,
    pub material_shgc: f64,
    pub material_vlt_percent: f64,
    pub durability_years: f64,
    pub maintenance_freq_per_year: f64,
    pub acoustic_rating_rw: f64,
    pub water_absorption_pct: f64,
    pub material_density_kgm3: f64,
    pub surface_reflectivity_pct: f64,
    pub material_lifespan_years: f64,
}

fn lowercased(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("").trim().to_ascii_lowercase()
}

impl FeatureVector {
    /// Merge one request's context with one material's static attributes.
    pub fn merge(request: &CustomerRequest, material: &MaterialRecord) -> Self {
        Self {
            material_id: material.material_id.0.clone(),
            floor_count: request.floor_count.unwrap_or(0.0),
            facade_area_sqm: request.facade_area_sqm.unwrap_or(0.0),
            max_cost_per_sqm: request.max_cost_per_sqm.unwrap_or(0.0),
            required_u_value: request.required_u_value.unwrap_or(0.0),
            required_shgc: request.required_shgc.unwrap_or(0.0),
            required_vlt: request.required_vlt.unwrap_or(0.0),
            avg_temp_c: request.avg_temp_c.unwrap_or(0.0),
            avg_humidity_pct: request.avg_humidity_pct.unwrap_or(0.0),
            avg_rainfall_mm: request.avg_rainfall_mm.unwrap_or(0.0),
            location: lowercased(&request.location),
            building_type: lowercased(&request.building_type),
            orientation: lowercased(&request.orientation),
            budget_level: lowercased(&request.budget_level),
            climate_zone: lowercased(&request.climate_zone),
            wind_load_level: lowercased(&request.wind_load_level),
            solar_exposure: lowercased(&request.solar_exposure),
            thermal_insulation_required: lowercased(&request.thermal_insulation_required),
            acoustic_requirement: lowercased(&request.acoustic_requirement),
            fire_rating_requirement: lowercased(&request.fire_rating_requirement),
            aesthetic_preference: lowercased(&request.aesthetic_preference),
            material_type: material.material_type.trim().to_ascii_lowercase(),
            material_subtype: material.material_subtype.trim().to_ascii_lowercase(),
            fire_rating: material.fire_rating.trim().to_ascii_lowercase(),
            cost_per_sqm: material.cost_per_sqm,
            installation_cost_per_sqm: material.installation_cost_per_sqm,
            material_u_value: material.material_u_value,
            material_shgc: material.material_shgc,
            material_vlt_percent: material.material_vlt_percent,
            durability_years: material.durability_years,
            maintenance_freq_per_year: material.maintenance_freq_per_year,
            acoustic_rating_rw: material.acoustic_rating_rw,
            water_absorption_pct: material.water_absorption_pct,
            material_density_kgm3: material.material_density_kgm3,
            surface_reflectivity_pct: material.surface_reflectivity_pct,
            material_lifespan_years: material.material_lifespan_years,
        }
    }

    /// Installed cost per square metre before any project scaling.
    pub fn installed_cost(&self) -> f64 {
        self.cost_per_sqm + self.installation_cost_per_sqm
    }

    /// Whether the material suits the climate described by the request.
    ///
    /// Hot climates want low solar gain or a reflective surface; cold
    /// climates want a low U-value.
    pub fn climate_fit(&self) -> bool {
        let hot = self.avg_temp_c >= 28.0
            || self.climate_zone.contains("hot")
            || self.climate_zone.contains("tropical")
            || self.climate_zone.contains("arid");
        let cold = self.avg_temp_c != 0.0 && self.avg_temp_c <= 5.0
            || self.climate_zone.contains("cold")
            || self.climate_zone.contains("alpine");

        if hot {
            self.material_shgc <= 0.4 || self.surface_reflectivity_pct >= 50.0
        } else if cold {
            self.material_u_value <= 1.2
        } else {
            false
        }
    }

    /// Whether the customer asked for acoustic performance.
    pub fn wants_acoustic(&self) -> bool {
        self.acoustic_requirement == "yes"
    }

    /// Whether the material meets the requested fire rating class.
    ///
    /// An absent requirement fits everything; a class like "a" fits its
    /// graded variants ("a1", "a2").
    pub fn fire_fit(&self) -> bool {
        self.fire_rating_requirement.is_empty()
            || self.fire_rating.starts_with(&self.fire_rating_requirement)
    }

    /// Whether the material matches the stated aesthetic preference, by
    /// category or subtype substring ("brick" matches a Brick/Engineered
    /// record).
    pub fn aesthetic_fit(&self) -> bool {
        !self.aesthetic_preference.is_empty()
            && (self.material_type.contains(&self.aesthetic_preference)
                || self.material_subtype.contains(&self.aesthetic_preference))
    }

    /// Normalized numeric features in a fixed order, roughly [0, 1]:
    /// - bias: 1.0
    /// - u_value / 5 (heavy assemblies reach ~1.0)
    /// - shgc as-is (already a fraction)
    /// - vlt_percent / 100
    /// - durability_years / 50
    /// - acoustic_rating_rw / 60, capped at 1.0
    /// - installed cost / 600, capped at 1.5
    /// - maintenance_freq_per_year / 12, capped at 1.0
    /// - surface_reflectivity_pct / 100
    /// - material_lifespan_years / 100, capped at 1.0
    /// - climate_fit: 1.0 or 0.0
    /// - acoustic fit: Rw / 60 (capped at 1.0) when acoustics were asked
    ///   for, else 0.0
    /// - fire_fit: 1.0 or 0.0
    /// - aesthetic_fit: 1.0 or 0.0
    pub fn to_normalized_vector(&self) -> Vec<f64> {
        vec![
            1.0,
            self.material_u_value / 5.0,
            self.material_shgc,
            self.material_vlt_percent / 100.0,
            self.durability_years / 50.0,
            (self.acoustic_rating_rw / 60.0).min(1.0),
            (self.installed_cost() / 600.0).min(1.5),
            (self.maintenance_freq_per_year / 12.0).min(1.0),
            self.surface_reflectivity_pct / 100.0,
            (self.material_lifespan_years / 100.0).min(1.0),
            if self.climate_fit() { 1.0 } else { 0.0 },
            if self.wants_acoustic() { (self.acoustic_rating_rw / 60.0).min(1.0) } else { 0.0 },
            if self.fire_fit() { 1.0 } else { 0.0 },
            if self.aesthetic_fit() { 1.0 } else { 0.0 },
        ]
    }
}

/// Three independently trained regression functions over the merged
/// feature vector. Implementations must be pure: deterministic for
/// identical input, no hidden mutable state, reentrant across requests.
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Suitability in [0, 1]; the facade ranking key.
    async fn predict_suitability(&self, features: &FeatureVector) -> Result<f64, PredictionError>;
    /// Predicted whole-assembly U-value (W/m²K).
    async fn predict_thermal(&self, features: &FeatureVector) -> Result<f64, PredictionError>;
    /// Predicted installed cost per square metre.
    async fn predict_cost(&self, features: &FeatureVector) -> Result<f64, PredictionError>;
}

/// Deterministic fixed-weight model over the normalized feature vector.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearPredictor;

impl LinearPredictor {
    /// Logistic-regression coefficients for suitability, aligned with
    /// [`FeatureVector::to_normalized_vector`] order.
    const SUITABILITY_WEIGHTS: [f64; 14] =
        [0.6, -1.8, -0.6, 0.3, 1.5, 0.6, -1.7, -0.8, 0.2, 1.2, 0.9, 0.5, 0.4, 0.7];

    pub fn new() -> Self {
        Self
    }

    fn suitability(&self, features: &FeatureVector) -> f64 {
        let inputs = features.to_normalized_vector();
        let z: f64 =
            Self::SUITABILITY_WEIGHTS.iter().zip(&inputs).map(|(weight, x)| weight * x).sum();
        1.0 / (1.0 + (-z).exp())
    }

    fn thermal(&self, features: &FeatureVector) -> f64 {
        let exposure = match features.solar_exposure.as_str() {
            "high" => 1.06,
            "low" => 0.96,
            _ => 1.0,
        };
        let insulated = if features.thermal_insulation_required == "yes" { 0.97 } else { 1.0 };
        features.material_u_value * exposure * insulated
    }

    fn cost(&self, features: &FeatureVector) -> f64 {
        // Scale economies on large envelopes, heavier fixings in wind.
        let area_factor = if features.facade_area_sqm >= 5_000.0 {
            0.93
        } else if features.facade_area_sqm >= 1_000.0 {
            0.97
        } else {
            1.0
        };
        let wind_factor = if features.wind_load_level == "high" { 1.04 } else { 1.0 };
        features.installed_cost() * area_factor * wind_factor
    }
}

#[async_trait]
impl Predictor for LinearPredictor {
    async fn predict_suitability(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        Ok(self.suitability(features))
    }

    async fn predict_thermal(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        Ok(self.thermal(features))
    }

    async fn predict_cost(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        Ok(self.cost(features))
    }
}
