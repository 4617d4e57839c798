use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use rankings::RankingKind;

use crate::{auth::MaybeAuth, error::ApiResult, error::ApiError, state::AppState};

/// Tells the dashboard whether it is looking at live or synthetic data.
pub const RANKING_SOURCE_HEADER: &str = "x-ranking-source";

pub async fn ranking_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    MaybeAuth(token): MaybeAuth,
) -> ApiResult<Response> {
    let kind: RankingKind = kind
        .parse()
        .map_err(|e: rankings::UnknownKind| ApiError::NotFound(e.to_string()))?;

    let ranking = state
        .rankings
        .ranking(kind, token.as_ref().map(|token| token.as_str()))
        .await?;

    Ok((
        [(RANKING_SOURCE_HEADER, ranking.provenance.as_str())],
        Json(ranking.records),
    )
        .into_response())
}
