//! Client-scope asset handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{DomainError, RegisterAssetInput};
use crate::infrastructure::auth::ClientAccess;
use crate::infrastructure::AppState;

/// Request DTO for reassigning the user of an asset
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReassignUserRequest {
    pub new_employee_number: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/pc/register",
    request_body = RegisterAssetInput,
    responses(
        (status = 201, description = "Asset registered"),
        (status = 200, description = "Soft-deleted asset revived"),
        (status = 400, description = "Malformed body"),
        (status = 409, description = "Asset number already registered")
    )
)]
pub async fn register_asset(
    _: ClientAccess,
    State(state): State<AppState>,
    payload: Result<Json<RegisterAssetInput>, JsonRejection>,
) -> Result<Response, DomainError> {
    let Json(payload) = payload?;
    let registration = state
        .asset_repo
        .register(payload, chrono::Utc::now())
        .await?;

    let (status, message) = if registration.revived {
        (StatusCode::OK, "Asset re-registered (restored)")
    } else {
        (StatusCode::CREATED, "Asset registered")
    };

    Ok((
        status,
        Json(json!({
            "success": true,
            "message": message,
            "pc_id": registration.id,
            "asset_number": registration.asset_number,
            "revived": registration.revived
        })),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/pc/{asset_number}",
    params(("asset_number" = String, Path, description = "Asset number")),
    responses(
        (status = 200, description = "Asset found", body = crate::domain::Asset),
        (status = 404, description = "Asset not found or deleted")
    )
)]
pub async fn get_asset(
    _: ClientAccess,
    State(state): State<AppState>,
    Path(asset_number): Path<String>,
) -> Result<Response, DomainError> {
    match state.asset_repo.find_active(&asset_number).await? {
        Some(asset) => Ok((StatusCode::OK, Json(asset)).into_response()),
        None => Err(DomainError::asset_not_found()),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/pc/{asset_number}/user",
    params(("asset_number" = String, Path, description = "Asset number")),
    request_body = ReassignUserRequest,
    responses(
        (status = 200, description = "User changed"),
        (status = 400, description = "Malformed body"),
        (status = 404, description = "Asset not found or deleted")
    )
)]
pub async fn reassign_user(
    _: ClientAccess,
    State(state): State<AppState>,
    Path(asset_number): Path<String>,
    payload: Result<Json<ReassignUserRequest>, JsonRejection>,
) -> Result<Response, DomainError> {
    let Json(payload) = payload?;
    let change = state
        .asset_repo
        .reassign_user(&asset_number, payload.new_employee_number, chrono::Utc::now())
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "User changed",
        "old_employee_number": change.old_employee_number,
        "new_employee_number": change.new_employee_number
    }))
    .into_response())
}
