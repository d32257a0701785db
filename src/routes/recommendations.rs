use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::{
    error::AppResult,
    middleware::{AuthenticatedUser, JsonBody, RequestId},
    models::{RecommendationHistory, RecommendationView, Situation},
    routes::AppState,
};

/// Handler for the recommendation endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    AuthenticatedUser(user): AuthenticatedUser,
    JsonBody(situation): JsonBody<Situation>,
) -> AppResult<(StatusCode, Json<RecommendationView>)> {
    tracing::info!(
        request_id = %request_id,
        user_id = %user,
        mood = %situation.mood,
        occasion = %situation.occasion,
        time_of_day = %situation.time_of_day,
        weather = %situation.weather,
        "Processing recommendation request"
    );

    // Scores the collection and appends the pick to history
    let view = state.recommendations.recommend(user, situation).await?;

    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_recommendation(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<RecommendationView>> {
    let view = state.recommendations.recommendation(user, id).await?;
    Ok(Json(view))
}

/// Past recommendations, newest first
pub async fn list_history(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> AppResult<Json<Vec<RecommendationHistory>>> {
    let history = state.recommendations.history(user).await?;
    Ok(Json(history))
}
