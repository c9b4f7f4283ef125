use serde::{Deserialize, Serialize};

use crate::errors::RankError;

/// Customer constraints and project context for one recommendation request.
///
/// Constructed once per request and read-only thereafter. Every field is
/// optional: an absent constraint imposes no filtering, an absent context
/// field contributes a neutral value to the predictor feature vector.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerRequest {
    // Hard constraints.
    pub max_cost_per_sqm: Option<f64>,
    pub required_u_value: Option<f64>,
    pub required_shgc: Option<f64>,
    pub required_vlt: Option<f64>,
    pub acoustic_requirement: Option<String>,

    // Project context forwarded to the predictor.
    pub location: Option<String>,
    pub building_type: Option<String>,
    pub orientation: Option<String>,
    pub budget_level: Option<String>,
    pub floor_count: Option<f64>,
    pub facade_area_sqm: Option<f64>,
    pub avg_temp_c: Option<f64>,
    pub avg_humidity_pct: Option<f64>,
    pub avg_rainfall_mm: Option<f64>,
    pub climate_zone: Option<String>,
    pub wind_load_level: Option<String>,
    pub solar_exposure: Option<String>,
    pub fire_rating_requirement: Option<String>,
    pub thermal_insulation_required: Option<String>,
    pub aesthetic_preference: Option<String>,
}

impl CustomerRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_cost(mut self, value: f64) -> Self {
        self.max_cost_per_sqm = Some(value);
        self
    }

    pub fn with_required_u_value(mut self, value: f64) -> Self {
        self.required_u_value = Some(value);
        self
    }

    pub fn with_required_shgc(mut self, value: f64) -> Self {
        self.required_shgc = Some(value);
        self
    }

    pub fn with_required_vlt(mut self, value: f64) -> Self {
        self.required_vlt = Some(value);
        self
    }

    pub fn with_acoustic_requirement(mut self, value: impl Into<String>) -> Self {
        self.acoustic_requirement = Some(value.into());
        self
    }

    /// Whether the customer asked for acoustic performance. Only the
    /// literal answer "yes" counts, case-insensitively.
    pub fn wants_acoustic(&self) -> bool {
        self.acoustic_requirement
            .as_deref()
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("yes"))
    }

    /// Set a numeric constraint from raw text, e.g. a CLI `key=value`
    /// override. Unparsable input is a typed error rather than a silent
    /// zero; lenient callers may catch it and treat the key as absent.
    pub fn set_numeric_constraint(&mut self, field: &str, raw: &str) -> Result<(), RankError> {
        let parsed: f64 = raw.trim().parse().map_err(|_| RankError::InvalidConstraint {
            field: field.to_owned(),
            value: raw.to_owned(),
        })?;

        let slot = match field {
            "max_cost_per_sqm" => &mut self.max_cost_per_sqm,
            "required_u_value" => &mut self.required_u_value,
            "required_shgc" => &mut self.required_shgc,
            "required_vlt" => &mut self.required_vlt,
            _ => {
                return Err(RankError::InvalidConstraint {
                    field: field.to_owned(),
                    value: raw.to_owned(),
                })
            }
        };
        *slot = Some(parsed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::CustomerRequest;
    use crate::errors::RankError;

    #[test]
    fn absent_acoustic_requirement_is_not_wanted() {
        assert!(!CustomerRequest::new().wants_acoustic());
    }

    #[test]
    fn acoustic_requirement_matches_yes_case_insensitively() {
        assert!(CustomerRequest::new().with_acoustic_requirement("YES").wants_acoustic());
        assert!(CustomerRequest::new().with_acoustic_requirement(" yes ").wants_acoustic());
        assert!(!CustomerRequest::new().with_acoustic_requirement("no").wants_acoustic());
        assert!(!CustomerRequest::new().with_acoustic_requirement("maybe").wants_acoustic());
    }

    #[test]
    fn numeric_constraint_parses_into_the_named_slot() {
        let mut request = CustomerRequest::new();
        request.set_numeric_constraint("max_cost_per_sqm", "150.5").expect("valid number");
        assert_eq!(request.max_cost_per_sqm, Some(150.5));
    }

    #[test]
    fn unparsable_constraint_is_a_typed_error() {
        let mut request = CustomerRequest::new();
        let error = request
            .set_numeric_constraint("required_u_value", "cheap")
            .expect_err("not a number");
        assert!(matches!(error, RankError::InvalidConstraint { ref field, .. } if field == "required_u_value"));
        assert_eq!(request.required_u_value, None, "failed parse must not set the constraint");
    }

    #[test]
    fn unknown_constraint_key_is_rejected() {
        let mut request = CustomerRequest::new();
        let error = request.set_numeric_constraint("min_sparkle", "1.0").expect_err("unknown key");
        assert!(matches!(error, RankError::InvalidConstraint { .. }));
    }
}
