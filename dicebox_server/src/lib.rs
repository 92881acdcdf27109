//! HTTP surface for the dice simulator.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/random` | One draw from `[min, max]` (defaults 1..6) |
//! | GET | `/roll/:count` | Roll `count` dice, persist the batch, return the tally |
//! | GET | `/stats` | Per-face totals across all stored batches |

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

use dicebox_core::{roll_many, roll_one, DEFAULT_MAX, DEFAULT_MIN};
use dicebox_shared::{ErrorResponse, RandomResponse, RollResponse, StatsResponse};
use dicebox_store::RollStore;

#[derive(Clone)]
pub struct AppState {
    pub store: RollStore,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/random", get(route_random))
        .route("/roll/:count", get(route_roll))
        .route("/stats", get(route_stats))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

type RouteError = (StatusCode, Json<ErrorResponse>);

fn internal_error(err: anyhow::Error) -> RouteError {
    error!("store operation failed: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "internal server error".into(),
        }),
    )
}

// Params are parsed leniently: a missing or malformed value silently falls
// back to the default rather than producing a 400.
async fn route_random(Query(params): Query<HashMap<String, String>>) -> Json<RandomResponse> {
    let min = params
        .get("min")
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MIN);
    let max = params
        .get("max")
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX);
    Json(RandomResponse {
        number: roll_one(min, max),
    })
}

async fn route_roll(
    State(state): State<AppState>,
    Path(count): Path<i64>,
) -> Result<Json<RollResponse>, RouteError> {
    let batch = roll_many(count).map_err(|err| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
    })?;
    state.store.append(&batch).await.map_err(internal_error)?;
    Ok(Json(RollResponse::from_tally(
        batch.faces.as_array(),
        batch.faces.most_frequent(),
    )))
}

async fn route_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, RouteError> {
    let totals = state.store.totals().await.map_err(internal_error)?;
    Ok(Json(StatsResponse::from_tally(totals.as_array())))
}
