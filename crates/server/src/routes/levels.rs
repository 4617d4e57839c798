use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use levels::{AuthorLevel, AuthorLevelPatch, NewAuthorLevel};

use crate::{
    auth::RequireAuth,
    error::{ApiError, ApiResult},
    state::AppState,
};

pub async fn list_levels_handler(State(state): State<Arc<AppState>>) -> Json<Vec<AuthorLevel>> {
    Json(state.levels.list().await)
}

pub async fn get_level_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<AuthorLevel>> {
    Ok(Json(state.levels.get(&id).await?))
}

pub async fn create_level_handler(
    State(state): State<Arc<AppState>>,
    RequireAuth(_token): RequireAuth,
    payload: Result<Json<NewAuthorLevel>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AuthorLevel>)> {
    let Json(new) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let created = state.levels.create(new).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_level_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    RequireAuth(_token): RequireAuth,
    payload: Result<Json<AuthorLevelPatch>, JsonRejection>,
) -> ApiResult<Json<AuthorLevel>> {
    let Json(patch) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(Json(state.levels.update(&id, patch).await?))
}

pub async fn delete_level_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    RequireAuth(_token): RequireAuth,
) -> ApiResult<StatusCode> {
    state.levels.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
