//! Survey completion (client scope)

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::DomainError;
use crate::infrastructure::auth::ClientAccess;
use crate::infrastructure::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CompleteSurveyRequest {
    pub asset_number: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/survey/complete",
    request_body = CompleteSurveyRequest,
    responses(
        (status = 201, description = "Survey recorded"),
        (status = 400, description = "Malformed body"),
        (status = 404, description = "Asset not found or deleted"),
        (status = 409, description = "Already surveyed today")
    )
)]
pub async fn complete_survey(
    _: ClientAccess,
    State(state): State<AppState>,
    payload: Result<Json<CompleteSurveyRequest>, JsonRejection>,
) -> Result<Response, DomainError> {
    let Json(payload) = payload?;
    let survey = state
        .survey_repo
        .complete(&payload.asset_number, chrono::Utc::now())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Survey completed",
            "survey_id": survey.id
        })),
    )
        .into_response())
}
