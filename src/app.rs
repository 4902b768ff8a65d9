use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::AppConfig;
use crate::routes::{item_routes, system_routes};
use crate::state::items::ItemStore;

/// Build the complete Axum application:
/// - /items         (list + create)
/// - /items/{key}   (fetch by key)
/// - /system        (alive, version, stats)
pub fn build_app(store: ItemStore, cfg: AppConfig) -> Router {
    Router::new()
        .merge(item_routes::routes(store.clone()))
        .nest("/system", system_routes::routes(cfg, store))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
