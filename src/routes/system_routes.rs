use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::config::AppConfig;
use crate::errors::ItemError;
use crate::state::items::ItemStore;

/// State shared by the `/system` routes.
#[derive(Clone)]
pub struct SystemState {
    pub config: AppConfig,
    pub store: ItemStore,
}

#[derive(Debug, Serialize)]
pub struct VersionInfo {
    pub name: &'static str,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct StoreStats {
    pub items: usize,
}

pub fn routes(config: AppConfig, store: ItemStore) -> Router {
    Router::new()
        .route("/alive", get(is_alive))
        .route("/version", get(version))
        .route("/stats", get(stats))
        .with_state(SystemState { config, store })
}

/// GET /system/alive
async fn is_alive() -> &'static str {
    "OK"
}

/// GET /system/version
async fn version(State(state): State<SystemState>) -> Json<VersionInfo> {
    Json(VersionInfo {
        name: env!("CARGO_PKG_NAME"),
        version: state.config.server_version,
    })
}

/// GET /system/stats
async fn stats(State(state): State<SystemState>) -> Result<Json<StoreStats>, ItemError> {
    let items = state.store.len()?;
    Ok(Json(StoreStats { items }))
}
