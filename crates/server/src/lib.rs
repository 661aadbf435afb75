//! The auxiliary HTTP surface: a health check, per-resource status,
//! and the tag-based resource listing the original exposed as
//! `FindAllSecGroupsWithTag`.

use adapters::ResourceDescriber;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;
use store::ResultStore;

pub struct AppState {
    pub store: Arc<ResultStore>,
    pub describer: Arc<dyn ResourceDescriber>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/status/:resource_id", get(status))
        .route("/findAll", get(find_all))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn status(
    State(state): State<Arc<AppState>>,
    Path(resource_id): Path<String>,
) -> Result<Json<Vec<common::CheckResult>>, (StatusCode, String)> {
    state
        .store
        .get_resource_check_results(&resource_id)
        .await
        .map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

#[derive(Debug, Deserialize)]
struct FindAllQuery {
    account: String,
    key: String,
    value: String,
}

async fn find_all(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FindAllQuery>,
) -> Result<Json<Vec<resource::Resource>>, (StatusCode, String)> {
    state
        .describer
        .find_all_with_tag(&query.account, &query.key, &query.value)
        .await
        .map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// Default bind port when the bootstrap binary doesn't override it.
pub const DEFAULT_PORT: u16 = 8080;
