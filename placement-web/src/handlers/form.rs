//! HTML form handlers

use std::collections::HashMap;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Form,
};
use validator::Validate;

use placement_core::logic::assessment;
use placement_core::logic::roadmap::RoadmapRequest;

use crate::models::{PredictForm, PredictionView};
use crate::{AppResult, AppState};

/// Skills offered come from the loaded artifact pair
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    Ok(Html(state.views.render_form(state.ctx.skills())?))
}

/// Score the assessment, predict the package and render the roadmap.
/// Errors are rendered as an HTML page rather than JSON.
pub async fn submit(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    match handle_submit(&state, fields) {
        Ok(html) => html.into_response(),
        Err(err) => {
            let (status, message) = err.status_and_message();
            match state.views.render_error(&message) {
                Ok(page) => (status, Html(page)).into_response(),
                Err(_) => (status, message).into_response(),
            }
        }
    }
}

fn handle_submit(state: &AppState, fields: HashMap<String, String>) -> AppResult<Html<String>> {
    let form = PredictForm::from_fields(fields)?;
    form.validate()?;

    let score = form.score();
    let record = form.to_record(state.ctx.skills());
    let prediction = state.ctx.predict(&record)?;

    let mcq_total = assessment::total_questions() as u32;
    let roadmap = state.roadmap.generate(&RoadmapRequest {
        stream: form.stream.clone(),
        mcq_score: score.total(),
        mcq_total,
        strengths: form.strengths.clone(),
        expected_package_lpa: prediction.package_lpa,
        target_package_lpa: form.target_package_lpa,
        months_left: form.months_left,
    })?;

    tracing::info!(
        "Prediction {:.2} LPA (mcq {}/{}, tier {}, roadmap via {})",
        prediction.package_lpa,
        score.total(),
        mcq_total,
        form.college_tier,
        state.roadmap.name()
    );

    let view = PredictionView {
        package_lpa: prediction.package_lpa,
        score,
        mcq_total,
        ignored_strengths: prediction.ignored_keys,
        roadmap,
    };

    Ok(Html(state.views.render_result(&form, &view)?))
}
