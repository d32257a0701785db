use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    db::PerfumeStore,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::RecommendationService,
};

pub mod dashboard;
pub mod perfumes;
pub mod recommendations;

/// Shared state handed to every handler
pub struct AppState {
    pub recommendations: RecommendationService,
}

impl AppState {
    pub fn new(store: Arc<dyn PerfumeStore>) -> Self {
        Self {
            recommendations: RecommendationService::new(store),
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/perfumes",
            get(perfumes::list_perfumes).post(perfumes::add_perfume),
        )
        .route(
            "/recommendations",
            get(recommendations::list_history).post(recommendations::recommend),
        )
        .route("/recommendations/:id", get(recommendations::get_recommendation))
        .route("/dashboard", get(dashboard::dashboard))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
