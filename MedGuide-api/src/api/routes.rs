use axum::{http::header, http::Method, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::api::handlers::{drugs, glossary, health};
use crate::api::AppState;
use crate::openapi::openapi_json;

/// Create the application router
pub fn create_app(state: AppState) -> Router {
    debug!("Creating application router");

    // Static segments are matched before the `:id` parameter
    let drug_routes = Router::new()
        .route("/search", get(drugs::search_drugs))
        .route("/suggestions", get(drugs::drug_suggestions))
        .route("/:id", get(drugs::get_drug))
        .route("/:id/sections", get(drugs::get_drug_sections));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = Router::new()
        .route("/health", get(health::health_check))
        .route("/api/glossary", get(glossary::get_glossary))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api/drugs", drug_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    debug!("Routes configured");
    app
}
