//! JSON prediction API

use axum::{extract::State, Json};

use placement_core::logic::features::RawRecord;
use placement_core::logic::model::{ModelMetadata, PredictionResult};

use crate::{AppResult, AppState};

/// Predict from an already-built raw record.
///
/// Keys the loaded schema does not know are ignored and listed in
/// `ignored_keys`; missing keys take the default fill.
pub async fn predict(
    State(state): State<AppState>,
    Json(record): Json<RawRecord>,
) -> AppResult<Json<PredictionResult>> {
    let result = state.ctx.predict(&record)?;

    tracing::debug!(
        "API prediction {:.2} LPA ({} us, {} ignored keys)",
        result.package_lpa,
        result.inference_time_us,
        result.ignored_keys.len()
    );

    Ok(Json(result))
}

/// Schema and run identity of the loaded artifact pair
pub async fn schema(State(state): State<AppState>) -> Json<ModelMetadata> {
    Json(state.ctx.metadata())
}
