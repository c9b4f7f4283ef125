//! Pass/fail indicator derivation and shortlist summary.

use crate::domain::recommendation::{Indicator, PredictionResult, RankedMaterial, Recommendation};
use crate::errors::RankError;

/// Predicted assembly U-value at or below this reads as adequate thermal
/// performance. The boundary is inclusive.
pub const THERMAL_PASS_LIMIT: f64 = 0.5;

/// Fraction of the cost ceiling under which a prediction reads as
/// comfortably within budget.
pub const COST_COMFORT_RATIO: f64 = 0.8;

pub fn thermal_indicator(thermal: f64) -> Indicator {
    if thermal <= THERMAL_PASS_LIMIT {
        Indicator::Green
    } else {
        Indicator::Red
    }
}

pub fn cost_indicator(cost: f64, max_cost_per_sqm: f64) -> Indicator {
    if cost <= COST_COMFORT_RATIO * max_cost_per_sqm {
        Indicator::Green
    } else {
        Indicator::Red
    }
}

/// Attach indicators to a non-empty shortlist and derive its summary.
///
/// `shortlist` must already be sorted descending by suitability; the
/// summary scalars come from its first entry, rounded to 2 decimal places.
/// `max_cost_per_sqm` is 0 when the customer set no ceiling. An empty
/// shortlist is the explicit no-eligible-material condition, never an
/// index panic.
pub fn build_recommendation(
    shortlist: Vec<PredictionResult>,
    max_cost_per_sqm: f64,
) -> Result<Recommendation, RankError> {
    let first = shortlist.first().ok_or(RankError::NoEligibleMaterial)?;

    let suitability_score = round2(first.score);
    let thermal_perf = round2(first.thermal);
    let cost_est = round2(first.cost);
    let budget_warning = shortlist.iter().any(|prediction| prediction.cost > max_cost_per_sqm);

    let shortlist = shortlist
        .into_iter()
        .map(|prediction| RankedMaterial {
            thermal_indicator: thermal_indicator(prediction.thermal),
            cost_indicator: cost_indicator(prediction.cost, max_cost_per_sqm),
            prediction,
        })
        .collect();

    Ok(Recommendation { shortlist, suitability_score, thermal_perf, cost_est, budget_warning })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::{build_recommendation, cost_indicator, thermal_indicator};
    use crate::domain::material::MaterialId;
    use crate::domain::recommendation::{Indicator, PredictionResult};
    use crate::errors::RankError;

    fn prediction(id: &str, score: f64, thermal: f64, cost: f64) -> PredictionResult {
        PredictionResult {
            material_id: MaterialId(id.to_owned()),
            material_type: id.to_owned(),
            score,
            thermal,
            cost,
        }
    }

    #[test]
    fn thermal_boundary_is_inclusive() {
        assert_eq!(thermal_indicator(0.5), Indicator::Green);
        assert_eq!(thermal_indicator(0.500001), Indicator::Red);
    }

    #[test]
    fn cost_indicator_uses_eighty_percent_of_budget() {
        assert_eq!(cost_indicator(80.0, 100.0), Indicator::Green);
        assert_eq!(cost_indicator(80.01, 100.0), Indicator::Red);
    }

    #[test]
    fn absent_budget_reads_as_zero_ceiling() {
        assert_eq!(cost_indicator(1.0, 0.0), Indicator::Red);
        assert_eq!(cost_indicator(0.0, 0.0), Indicator::Green);
    }

    #[test]
    fn summary_comes_from_the_first_entry_rounded() {
        let shortlist = vec![
            prediction("brick", 0.91234, 0.456, 150.006),
            prediction("timber", 0.75, 0.8, 90.0),
        ];
        let recommendation = build_recommendation(shortlist, 200.0).expect("non-empty shortlist");

        assert_eq!(recommendation.suitability_score, 0.91);
        assert_eq!(recommendation.thermal_perf, 0.46);
        assert_eq!(recommendation.cost_est, 150.01);
        assert!(!recommendation.budget_warning);
    }

    #[test]
    fn budget_warning_fires_when_any_entry_exceeds_the_ceiling() {
        let shortlist =
            vec![prediction("brick", 0.9, 0.4, 120.0), prediction("stone", 0.7, 0.4, 260.0)];
        let recommendation = build_recommendation(shortlist, 200.0).expect("non-empty shortlist");

        assert!(recommendation.budget_warning);
        assert_eq!(recommendation.shortlist[0].cost_indicator, Indicator::Green);
        assert_eq!(recommendation.shortlist[1].cost_indicator, Indicator::Red);
    }

    #[test]
    fn empty_shortlist_is_the_no_eligible_material_condition() {
        let error = build_recommendation(Vec::new(), 100.0).expect_err("empty shortlist");
        assert_eq!(error, RankError::NoEligibleMaterial);
    }

    #[test]
    fn indicators_survive_serialization_as_snake_case() {
        let shortlist = vec![prediction("brick", 0.9, 0.4, 120.0)];
        let recommendation = build_recommendation(shortlist, 200.0).expect("non-empty shortlist");
        let json = serde_json::to_value(&recommendation).expect("serializable");

        assert_eq!(json["shortlist"][0]["thermal_indicator"], "green");
        assert_eq!(json["shortlist"][0]["cost_indicator"], "green");
        assert_eq!(json["shortlist"][0]["material_type"], "brick");
    }
}
