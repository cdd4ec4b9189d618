use axum::Json;
use serde_json::{json, Value};

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running")
    )
)]
pub async fn root() -> Json<Value> {
    Json(json!({
        "service": "asset-registry",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}
