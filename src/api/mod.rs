pub mod admin;
pub mod assets;
pub mod error;
pub mod health;
pub mod survey;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Liveness
        .route("/", get(health::root))
        // Client
        .route("/api/v1/pc/register", post(assets::register_asset))
        .route("/api/v1/pc/:asset_number", get(assets::get_asset))
        .route("/api/v1/pc/:asset_number/user", put(assets::reassign_user))
        .route("/api/v1/survey/complete", post(survey::complete_survey))
        // Admin
        .route("/api/v1/admin/pcs", get(admin::list_assets))
        .route("/api/v1/admin/survey-status", get(admin::survey_status))
        .route("/api/v1/admin/survey-history", get(admin::survey_history))
        .route(
            "/api/v1/admin/pc/:asset_number/info",
            put(admin::update_asset_info),
        )
        .route("/api/v1/admin/pc/:asset_number", delete(admin::delete_asset))
        .route("/api/v1/admin/backup", get(admin::backup))
        .with_state(state)
}
