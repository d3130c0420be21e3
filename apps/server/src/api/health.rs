use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use anyhow::Context;
use axum::{extract::State, routing::get, Router};

async fn healthz() -> &'static str {
    "ok"
}

/// Ready once the database answers a round-trip.
async fn readyz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    let pool = state.pool.clone();
    tokio::task::spawn_blocking(move || attendance_storage_sqlite::ping(&pool))
        .await
        .context("Readiness probe panicked")??;
    Ok("ok")
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
