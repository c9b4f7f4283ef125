use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub String);

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable catalog entry for an opaque facade material.
///
/// Field names mirror the catalog column schema and must stay stable for
/// downstream consumers. The engine never mutates these records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub material_id: MaterialId,
    pub material_type: String,
    pub material_subtype: String,
    pub cost_per_sqm: f64,
    pub installation_cost_per_sqm: f64,
    pub material_u_value: f64,
    pub material_shgc: f64,
    pub material_vlt_percent: f64,
    pub fire_rating: String,
    pub durability_years: f64,
    pub maintenance_freq_per_year: f64,
    pub acoustic_rating_rw: f64,
    pub water_absorption_pct: f64,
    pub material_density_kgm3: f64,
    pub surface_reflectivity_pct: f64,
    pub material_lifespan_years: f64,
}
