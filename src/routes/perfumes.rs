use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    middleware::{AuthenticatedUser, JsonBody},
    models::{NewPerfume, Perfume},
    routes::AppState,
};

/// Lists the caller's collection in the order it was entered
pub async fn list_perfumes(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> AppResult<Json<Vec<Perfume>>> {
    let perfumes = state.recommendations.collection(user).await?;
    Ok(Json(perfumes))
}

/// Adds one perfume to the caller's collection
pub async fn add_perfume(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user): AuthenticatedUser,
    JsonBody(request): JsonBody<NewPerfume>,
) -> AppResult<(StatusCode, Json<Perfume>)> {
    let perfume = state.recommendations.add_perfume(user, request).await?;
    Ok((StatusCode::CREATED, Json(perfume)))
}
