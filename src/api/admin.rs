//! Admin-scope handlers: maintenance, reports and backup

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::report::{parse_report_date, survey_day};
use crate::domain::{AssetListing, DomainError, SurveyStatus, UpdateAssetInput};
use crate::infrastructure::auth::AdminAccess;
use crate::infrastructure::AppState;

/// Request DTO for the admin update. Empty strings count as absent.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAssetInfoRequest {
    pub new_asset_number: Option<String>,
    pub pc_management_number: Option<String>,
    pub location_name: Option<String>,
    pub employee_number: Option<String>,
}

impl From<UpdateAssetInfoRequest> for UpdateAssetInput {
    fn from(req: UpdateAssetInfoRequest) -> Self {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        UpdateAssetInput {
            new_asset_number: present(req.new_asset_number),
            pc_management_number: present(req.pc_management_number),
            location_name: present(req.location_name),
            employee_number: present(req.employee_number),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SurveyStatusQuery {
    /// `YYYY-MM-DD`, defaults to today (UTC)
    pub survey_date: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SurveyHistoryQuery {
    /// First day, inclusive, `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// Last day, inclusive, `YYYY-MM-DD`
    pub end_date: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/pcs",
    responses((status = 200, description = "Active assets", body = [AssetListing]))
)]
pub async fn list_assets(
    _: AdminAccess,
    State(state): State<AppState>,
) -> Result<Json<Vec<AssetListing>>, DomainError> {
    let today = survey_day(Utc::now());
    let assets = state.asset_repo.list_active(today).await?;
    Ok(Json(assets))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/survey-status",
    params(SurveyStatusQuery),
    responses(
        (status = 200, description = "Completion figures", body = SurveyStatus),
        (status = 400, description = "Invalid date")
    )
)]
pub async fn survey_status(
    _: AdminAccess,
    State(state): State<AppState>,
    Query(query): Query<SurveyStatusQuery>,
) -> Result<Json<SurveyStatus>, DomainError> {
    let day = match query.survey_date.as_deref() {
        Some(raw) if !raw.trim().is_empty() => parse_report_date("survey_date", raw)?,
        _ => survey_day(Utc::now()),
    };

    let status = state.survey_repo.status(day).await?;
    Ok(Json(status))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/survey-history",
    params(SurveyHistoryQuery),
    responses(
        (status = 200, description = "Surveys in range, newest first", body = [crate::domain::SurveyHistoryEntry]),
        (status = 400, description = "Invalid date")
    )
)]
pub async fn survey_history(
    _: AdminAccess,
    State(state): State<AppState>,
    Query(query): Query<SurveyHistoryQuery>,
) -> Result<Response, DomainError> {
    let start = parse_report_date("start_date", required("start_date", &query.start_date)?)?;
    let end = parse_report_date("end_date", required("end_date", &query.end_date)?)?;

    let history = state.survey_repo.history(start, end).await?;
    Ok(Json(json!({
        "success": true,
        "data": history
    }))
    .into_response())
}

fn required<'a>(name: &str, value: &'a Option<String>) -> Result<&'a str, DomainError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| DomainError::InvalidArgument(format!("{} is required", name)))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/pc/{asset_number}/info",
    params(("asset_number" = String, Path, description = "Current asset number")),
    request_body = UpdateAssetInfoRequest,
    responses(
        (status = 200, description = "Asset updated"),
        (status = 400, description = "Malformed body"),
        (status = 404, description = "Asset not found or deleted"),
        (status = 409, description = "New asset number already exists")
    )
)]
pub async fn update_asset_info(
    _: AdminAccess,
    State(state): State<AppState>,
    Path(asset_number): Path<String>,
    payload: Result<Json<UpdateAssetInfoRequest>, JsonRejection>,
) -> Result<Response, DomainError> {
    let Json(payload) = payload?;
    let asset = state
        .asset_repo
        .update_info(&asset_number, payload.into(), Utc::now())
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Asset updated",
        "asset": asset
    }))
    .into_response())
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/pc/{asset_number}",
    params(("asset_number" = String, Path, description = "Asset number")),
    responses(
        (status = 200, description = "Asset deleted"),
        (status = 404, description = "Asset not found or already deleted")
    )
)]
pub async fn delete_asset(
    _: AdminAccess,
    State(state): State<AppState>,
    Path(asset_number): Path<String>,
) -> Result<Response, DomainError> {
    state
        .asset_repo
        .soft_delete(&asset_number, Utc::now())
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Asset deleted"
    }))
    .into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/backup",
    responses((status = 200, description = "Full data snapshot", body = crate::domain::BackupSnapshot))
)]
pub async fn backup(
    _: AdminAccess,
    State(state): State<AppState>,
) -> Result<Response, DomainError> {
    let now = Utc::now();
    let snapshot = state.backup_repo.snapshot(now).await?;

    let disposition = format!(
        "attachment; filename=\"asset_backup_{}.json\"",
        now.format("%Y-%m-%d")
    );
    let mut response = (StatusCode::OK, Json(snapshot)).into_response();
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        response
            .headers_mut()
            .insert(header::CONTENT_DISPOSITION, value);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_treats_empty_strings_as_absent() {
        let req = UpdateAssetInfoRequest {
            new_asset_number: Some("".to_string()),
            pc_management_number: Some("  ".to_string()),
            location_name: Some("Seoul HQ".to_string()),
            employee_number: None,
        };
        let input: UpdateAssetInput = req.into();
        assert_eq!(input.new_asset_number, None);
        assert_eq!(input.pc_management_number, None);
        assert_eq!(input.location_name.as_deref(), Some("Seoul HQ"));
        assert_eq!(input.employee_number, None);
    }

    #[test]
    fn test_required_history_bound() {
        assert_eq!(required("start_date", &Some("2025-01-01".to_string())).unwrap(), "2025-01-01");
        assert!(matches!(
            required("end_date", &None),
            Err(DomainError::InvalidArgument(msg)) if msg == "end_date is required"
        ));
        assert!(matches!(
            required("end_date", &Some(" ".to_string())),
            Err(DomainError::InvalidArgument(_))
        ));
    }
}
