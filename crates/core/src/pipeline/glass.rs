use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::glass::{GlassRecord, ScoredGlass};
use crate::domain::request::CustomerRequest;
use crate::filter;
use crate::scoring::GlassScorer;
use crate::selection::{sort_descending, top_distinct};

/// Rank the glazing catalog for one customer request.
///
/// Score everything against the catalog-wide maximum cost, drop records
/// violating an active constraint, sort descending by composite score,
/// then keep the best record per glass_type up to the configured count.
/// An over-constrained request yields an empty list, never an error.
pub fn recommend_glass(
    catalog: &[GlassRecord],
    request: &CustomerRequest,
    config: &EngineConfig,
) -> Vec<ScoredGlass> {
    let scorer = GlassScorer::with_weights(config.glass_weights);
    let scored = scorer.score_catalog(catalog);
    let mut eligible = filter::apply_constraints(scored, request, config.acoustic_rw_floor);

    debug!(eligible = eligible.len(), catalog = catalog.len(), "glass constraints applied");

    sort_descending(&mut eligible, |candidate| candidate.final_score);
    top_distinct(eligible, config.top_n_glass, |candidate| &candidate.record.glass_type)
}

#[cfg(test)]
mod tests {
    use super::recommend_glass;
    use crate::config::EngineConfig;
    use crate::domain::glass::GlassRecord;
    use crate::domain::request::CustomerRequest;

    fn glass(glass_type: &str, u_value: f64, cost: f64) -> GlassRecord {
        GlassRecord {
            glass_type: glass_type.to_owned(),
            u_value,
            shgc: 0.35,
            vlt: 65.0,
            acoustic_rw: 34.0,
            thickness_mm: 24.0,
            fire_rating: "B".to_owned(),
            durability_years: 20.0,
            cost_per_sqm: cost,
            maintenance_freq_per_year: 2.0,
            solar_control_coating: "low-e".to_owned(),
            impact_resistance: "medium".to_owned(),
            environmental_suitability: "temperate".to_owned(),
            recommended_climate: None,
        }
    }

    #[test]
    fn ranks_distinct_glass_types_by_composite_score() {
        let catalog = vec![
            glass("single", 5.2, 60.0),
            glass("double", 1.6, 150.0),
            glass("triple", 0.8, 320.0),
            glass("double", 1.4, 190.0),
        ];

        let ranked = recommend_glass(&catalog, &CustomerRequest::new(), &EngineConfig::default());

        assert_eq!(ranked.len(), 3);
        let types: std::collections::HashSet<_> =
            ranked.iter().map(|g| g.record.glass_type.as_str()).collect();
        assert_eq!(types.len(), ranked.len(), "glass types must be pairwise distinct");
        for pair in ranked.windows(2) {
            assert!(pair[0].final_score >= pair[1].final_score);
        }
    }

    #[test]
    fn duplicate_glass_type_resolves_to_its_best_scorer() {
        // Same type twice; the lower U-value unit scores higher and must
        // be the surviving representative.
        let catalog = vec![glass("double", 1.6, 150.0), glass("double", 1.1, 150.0)];

        let ranked = recommend_glass(&catalog, &CustomerRequest::new(), &EngineConfig::default());

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].record.u_value, 1.1);
    }

    #[test]
    fn over_constrained_request_returns_empty_not_error() {
        // Budget 100, catalog costs all in [120, 200].
        let catalog = vec![
            glass("single", 5.2, 120.0),
            glass("double", 1.6, 150.0),
            glass("triple", 0.8, 200.0),
        ];
        let request = CustomerRequest::new().with_max_cost(100.0);

        let ranked = recommend_glass(&catalog, &request, &EngineConfig::default());
        assert!(ranked.is_empty());
    }

    #[test]
    fn truncates_to_configured_top_n() {
        let catalog: Vec<_> =
            (0..8).map(|i| glass(&format!("type_{i}"), 1.0 + i as f64 * 0.2, 150.0)).collect();
        let config = EngineConfig { top_n_glass: 4, ..EngineConfig::default() };

        let ranked = recommend_glass(&catalog, &CustomerRequest::new(), &config);
        assert_eq!(ranked.len(), 4);
    }

    #[test]
    fn running_twice_gives_identical_results() {
        let catalog = vec![glass("double", 1.6, 150.0), glass("triple", 0.8, 320.0)];
        let request = CustomerRequest::new().with_required_u_value(2.0);
        let config = EngineConfig::default();

        assert_eq!(
            recommend_glass(&catalog, &request, &config),
            recommend_glass(&catalog, &request, &config)
        );
    }
}
