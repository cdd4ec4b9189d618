// Server module - Assembles the HTTP application and runs it

use axum::http::HeaderValue;
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::api_docs::ApiDoc;
use crate::infrastructure::config::Config;
use crate::infrastructure::{db, AppState};

/// Build the full application: API routes, Swagger UI, CORS and request tracing
pub fn build_router(state: AppState, cors_allowed_origins: &[String]) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/api/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api::api_router(state))
        .layer(cors_layer(cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    let mut allowed = Vec::new();
    for origin in origins {
        match origin.parse::<HeaderValue>() {
            Ok(v) => allowed.push(v),
            Err(e) => tracing::error!("Failed to parse CORS origin '{}': {}", origin, e),
        }
    }

    if allowed.is_empty() {
        if !origins.is_empty() {
            tracing::warn!("No usable CORS origin in CORS_ALLOWED_ORIGINS, allowing any origin");
        }
        return cors.allow_origin(Any);
    }
    cors.allow_origin(allowed)
}

/// Connect to the store, then serve until the process stops
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let db = db::init_db(&config.database_url).await?;

    if config.deleted_asset_policy == crate::domain::DeletedAssetPolicy::Reject {
        tracing::info!("Registration of deleted asset numbers is disabled");
    }

    let state = AppState::new(db, config.deleted_asset_policy, config.auth);
    let app = build_router(state, &config.cors_allowed_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Asset registry listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
