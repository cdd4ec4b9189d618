use asset_registry::api;
use asset_registry::config::AuthConfig;
use asset_registry::db;
use asset_registry::domain::DeletedAssetPolicy;
use asset_registry::infrastructure::AppState;
use asset_registry::server;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

const CLIENT: &str = "client-token";
const ADMIN: &str = "admin-token";

// Helper to create a test app over an in-memory database
async fn setup_test_app() -> Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let state = AppState::new(
        db,
        DeletedAssetPolicy::Revive,
        AuthConfig::new(&[CLIENT], &[ADMIN]),
    );
    api::api_router(state)
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register(app: &Router, asset_number: &str, employee_number: &str) -> Response {
    send(
        app,
        "POST",
        "/api/v1/pc/register",
        Some(CLIENT),
        Some(json!({
            "asset_number": asset_number,
            "pc_management_number": "PC-001",
            "location_name": "Seoul Branch",
            "employee_number": employee_number
        })),
    )
    .await
}

#[tokio::test]
async fn test_root_needs_no_token() {
    let app = setup_test_app().await;
    let response = send(&app, "GET", "/", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "running");
}

#[tokio::test]
async fn test_missing_or_malformed_header_is_401() {
    let app = setup_test_app().await;

    let response = send(&app, "GET", "/api/v1/pc/A1", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);

    let req = Request::builder()
        .uri("/api/v1/admin/pcs")
        .header(header::AUTHORIZATION, ADMIN)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_scope_token_is_403() {
    let app = setup_test_app().await;

    let response = send(&app, "GET", "/api/v1/admin/pcs", Some(CLIENT), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(&app, "GET", "/api/v1/pc/A1", Some(ADMIN), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(&app, "GET", "/api/v1/admin/backup", Some("guess"), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_and_get_asset() {
    let app = setup_test_app().await;

    let response = register(&app, "A1", "E100").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["asset_number"], "A1");
    assert_eq!(body["revived"], false);
    assert!(body["pc_id"].as_i64().is_some());

    let response = register(&app, "A1", "E100").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(&app, "GET", "/api/v1/pc/A1", Some(CLIENT), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["employee_number"], "E100");
    assert_eq!(body["location_name"], "Seoul Branch");

    let response = send(&app, "GET", "/api/v1/pc/NOPE", Some(CLIENT), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_survey_status_end_to_end() {
    let app = setup_test_app().await;
    register(&app, "A1", "E100").await;

    let response = send(
        &app,
        "POST",
        "/api/v1/survey/complete",
        Some(CLIENT),
        Some(json!({ "asset_number": "A1" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(
        &app,
        "POST",
        "/api/v1/survey/complete",
        Some(CLIENT),
        Some(json!({ "asset_number": "A1" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(&app, "GET", "/api/v1/admin/survey-status", Some(ADMIN), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["completed"], 1);
    assert_eq!(body["remaining"], 0);
    assert_eq!(body["completion_rate"], 100.0);

    let response = send(&app, "GET", "/api/v1/admin/pcs", Some(ADMIN), None).await;
    let body = body_json(response).await;
    assert_eq!(body[0]["asset_number"], "A1");
    assert_eq!(body[0]["surveyed_today"], true);
}

#[tokio::test]
async fn test_survey_status_for_other_date_and_bad_date() {
    let app = setup_test_app().await;

    let response = send(
        &app,
        "GET",
        "/api/v1/admin/survey-status?survey_date=2024-01-15",
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["survey_date"], "2024-01-15");
    assert_eq!(body["total"], 0);
    assert_eq!(body["completion_rate"], 0.0);

    let response = send(
        &app,
        "GET",
        "/api/v1/admin/survey-status?survey_date=15.01.2024",
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reassign_user_end_to_end() {
    let app = setup_test_app().await;
    register(&app, "A1", "E100").await;

    let response = send(
        &app,
        "PUT",
        "/api/v1/pc/A1/user",
        Some(CLIENT),
        Some(json!({ "new_employee_number": "E200" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["old_employee_number"], "E100");
    assert_eq!(body["new_employee_number"], "E200");

    let response = send(&app, "GET", "/api/v1/pc/A1", Some(CLIENT), None).await;
    let body = body_json(response).await;
    assert_eq!(body["employee_number"], "E200");

    let response = send(&app, "GET", "/api/v1/admin/backup", Some(ADMIN), None).await;
    let body = body_json(response).await;
    let changes = body["user_changes"].as_array().unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0]["old_employee_number"], "E100");
    assert_eq!(changes[0]["new_employee_number"], "E200");

    let response = send(
        &app,
        "PUT",
        "/api/v1/pc/NOPE/user",
        Some(CLIENT),
        Some(json!({ "new_employee_number": "E200" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_rename_then_history() {
    let app = setup_test_app().await;
    register(&app, "A1", "E100").await;
    register(&app, "B7", "E300").await;
    send(
        &app,
        "POST",
        "/api/v1/survey/complete",
        Some(CLIENT),
        Some(json!({ "asset_number": "A1" })),
    )
    .await;

    let response = send(
        &app,
        "PUT",
        "/api/v1/admin/pc/A1/info",
        Some(ADMIN),
        Some(json!({ "new_asset_number": "B7", "location_name": "" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(
        &app,
        "PUT",
        "/api/v1/admin/pc/A1/info",
        Some(ADMIN),
        Some(json!({ "new_asset_number": "A2", "location_name": "" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["asset"]["asset_number"], "A2");
    assert_eq!(body["asset"]["location_name"], "Seoul Branch");

    let response = send(&app, "GET", "/api/v1/pc/A1", Some(CLIENT), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let uri = format!(
        "/api/v1/admin/survey-history?start_date={}&end_date={}",
        today, today
    );
    let response = send(&app, "GET", &uri, Some(ADMIN), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["asset_number"], "A2");
    assert_eq!(data[0]["pc_management_number"], "PC-001");
}

#[tokio::test]
async fn test_history_rejects_bad_dates() {
    let app = setup_test_app().await;
    let response = send(
        &app,
        "GET",
        "/api/v1/admin/survey-history?start_date=2025-13-01&end_date=2025-12-31",
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_delete_hides_asset_but_keeps_history() {
    let app = setup_test_app().await;
    register(&app, "A1", "E100").await;
    send(
        &app,
        "POST",
        "/api/v1/survey/complete",
        Some(CLIENT),
        Some(json!({ "asset_number": "A1" })),
    )
    .await;

    let response = send(&app, "DELETE", "/api/v1/admin/pc/A1", Some(ADMIN), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "DELETE", "/api/v1/admin/pc/A1", Some(ADMIN), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "GET", "/api/v1/admin/pcs", Some(ADMIN), None).await;
    let body = body_json(response).await;
    assert!(body.as_array().unwrap().is_empty());

    let response = send(&app, "GET", "/api/v1/admin/backup", Some(ADMIN), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"asset_backup_"));
    let body = body_json(response).await;
    assert!(body["backup_date"].is_string());
    assert!(body["assets"].as_array().unwrap().is_empty());
    assert_eq!(body["surveys"].as_array().unwrap().len(), 1);

    // Revival through registration
    let response = register(&app, "A1", "E900").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["revived"], true);
}

#[tokio::test]
async fn test_full_router_serves_docs() {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let state = AppState::new(
        db,
        DeletedAssetPolicy::Revive,
        AuthConfig::new(&[CLIENT], &[ADMIN]),
    );
    let app = server::build_router(state, &[]);

    let response = send(&app, "GET", "/api-docs/openapi.json", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/api/v1/pc/register"].is_object());

    let response = send(&app, "GET", "/api/v1/admin/pcs", Some(ADMIN), None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_history_without_both_dates_is_json_400() {
    let app = setup_test_app().await;
    let response = send(
        &app,
        "GET",
        "/api/v1/admin/survey-history?start_date=2025-01-01",
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "end_date is required");
}

#[tokio::test]
async fn test_malformed_body_is_json_400() {
    let app = setup_test_app().await;

    let response = send(
        &app,
        "POST",
        "/api/v1/pc/register",
        Some(CLIENT),
        Some(json!({ "asset_number": "A1" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("pc_management_number"));

    let response = send(
        &app,
        "POST",
        "/api/v1/survey/complete",
        Some(CLIENT),
        Some(json!({ "asset": 7 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], false);

    // Nothing was stored
    let response = send(&app, "GET", "/api/v1/pc/A1", Some(CLIENT), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unparseable_cors_origins_fall_back_to_any() {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let state = AppState::new(
        db,
        DeletedAssetPolicy::Revive,
        AuthConfig::new(&[CLIENT], &[ADMIN]),
    );
    let app = server::build_router(state, &["bad\norigin".to_string()]);

    let req = Request::builder()
        .uri("/")
        .header(header::ORIGIN, "http://intranet.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
