use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{error::AppResult, middleware::AuthenticatedUser, models::Dashboard, routes::AppState};

/// Collection and history in one payload
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> AppResult<Json<Dashboard>> {
    let dashboard = state.recommendations.dashboard(user).await?;
    Ok(Json(dashboard))
}
