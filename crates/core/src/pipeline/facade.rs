use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::domain::material::MaterialRecord;
use crate::domain::recommendation::{PredictionResult, Recommendation};
use crate::domain::request::CustomerRequest;
use crate::errors::{PredictionError, RankError};
use crate::indicators;
use crate::predictor::{FeatureVector, Predictor};
use crate::selection::{sort_descending, top_distinct};

/// Rank the opaque-material catalog for one customer request.
///
/// Every record gets three predictor calls over its merged feature vector.
/// Predictions for different records are independent, so they run under a
/// bounded number of permits with a per-prediction deadline; a failed or
/// timed-out prediction drops only that record (fail-soft). Completed
/// results are merged back in catalog order before the strictly sequential
/// sort, dedup (material_type, case-insensitive) and truncate stages, so
/// tie-breaking never depends on task completion order.
pub async fn rank_materials<P>(
    catalog: &[MaterialRecord],
    request: &CustomerRequest,
    predictor: Arc<P>,
    config: &EngineConfig,
) -> Result<Recommendation, RankError>
where
    P: Predictor + 'static,
{
    let semaphore = Arc::new(Semaphore::new(config.prediction.max_concurrency.max(1)));
    let deadline = Duration::from_millis(config.prediction.timeout_ms);
    let mut tasks: JoinSet<(usize, Result<PredictionResult, PredictionError>)> = JoinSet::new();

    for (index, material) in catalog.iter().enumerate() {
        let features = FeatureVector::merge(request, material);
        let material_type = material.material_type.clone();
        let predictor = Arc::clone(&predictor);
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    return (
                        index,
                        Err(PredictionError::Failed {
                            material_id: features.material_id.clone(),
                            reason: "prediction scheduler closed".to_owned(),
                        }),
                    )
                }
            };
            (index, predict_record(predictor.as_ref(), &features, material_type, deadline).await)
        });
    }

    let mut indexed: Vec<(usize, PredictionResult)> = Vec::with_capacity(catalog.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, Ok(prediction))) => indexed.push((index, prediction)),
            Ok((index, Err(error))) => {
                warn!(record = index, %error, "dropping material after failed prediction");
            }
            Err(join_error) => {
                warn!(%join_error, "prediction task aborted");
            }
        }
    }

    // Restore catalog order so the descending sort breaks ties by
    // catalog position.
    indexed.sort_by_key(|(index, _)| *index);
    let mut predictions: Vec<PredictionResult> =
        indexed.into_iter().map(|(_, prediction)| prediction).collect();

    debug!(scored = predictions.len(), catalog = catalog.len(), "facade predictions complete");

    sort_descending(&mut predictions, |prediction| prediction.score);
    let shortlist =
        top_distinct(predictions, config.top_n_materials, |prediction| &prediction.material_type);

    indicators::build_recommendation(shortlist, request.max_cost_per_sqm.unwrap_or(0.0))
}

async fn predict_record<P>(
    predictor: &P,
    features: &FeatureVector,
    material_type: String,
    deadline: Duration,
) -> Result<PredictionResult, PredictionError>
where
    P: Predictor + ?Sized,
{
    // Each of the three calls gets the full deadline; a slow suitability
    // call must not eat into the thermal or cost budget.
    let score = with_deadline(deadline, features, predictor.predict_suitability(features)).await?;
    let thermal = with_deadline(deadline, features, predictor.predict_thermal(features)).await?;
    let cost = with_deadline(deadline, features, predictor.predict_cost(features)).await?;

    Ok(PredictionResult {
        material_id: crate::domain::material::MaterialId(features.material_id.clone()),
        material_type,
        score,
        thermal,
        cost,
    })
}

async fn with_deadline<F>(
    deadline: Duration,
    features: &FeatureVector,
    call: F,
) -> Result<f64, PredictionError>
where
    F: std::future::Future<Output = Result<f64, PredictionError>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(PredictionError::TimedOut { material_id: features.material_id.clone() }),
    }
}
