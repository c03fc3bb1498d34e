use std::sync::Arc;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use life_core::Grid;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{ApiError, AppState, MAX_FILL, MIN_FILL};

/// Body accepted by `/setstate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetStateRequest {
    /// Requested seeding density in percent.
    pub fill: i32,
}

/// Body returned by `/reset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetResponse {
    /// Density the session was reseeded with.
    pub fill: i32,
}

pub(crate) fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/nextstate", get(next_state).post(next_state))
        .route("/setstate", post(set_state))
        .route("/reset", get(reset).post(reset))
}

async fn next_state(State(state): State<Arc<AppState>>) -> Json<Grid> {
    let mut session = state.session().await;
    Json(session.advance())
}

async fn set_state(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetStateRequest>,
) -> Result<Json<Grid>, ApiError> {
    let fill = request.fill;
    if !(MIN_FILL..=MAX_FILL).contains(&fill) {
        return Err(ApiError::FillOutOfRange(fill));
    }

    let mut session = state.session().await;
    state.fill_config().store(fill).await?;
    session.reseed(fill);
    info!(fill, "fill updated");

    Ok(Json(session.advance()))
}

async fn reset(State(state): State<Arc<AppState>>) -> Result<Json<ResetResponse>, ApiError> {
    let mut session = state.session().await;
    let fill = match state.fill_config().load().await? {
        Some(fill) => fill,
        None => session.fill(),
    };
    session.reseed(fill);

    Ok(Json(ResetResponse { fill }))
}
