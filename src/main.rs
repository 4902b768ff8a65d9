/*****************************************************************************************
 *
 *  ItemStore – In-Memory Item Service over HTTP/JSON
 *  -------------------------------------------------
 *
 *  No persistence: items live until the process exits.
 *
 *****************************************************************************************/

use std::process::ExitCode;

use axum::serve;
use tokio::net::TcpListener;
use tracing_subscriber::FmtSubscriber;

use itemstore::{build_app, AppConfig, ItemStore};

#[tokio::main]
async fn main() -> ExitCode {
    //
    // ────────────────────────────────────────────────────────
    //  Load configuration (config.json next to the binary, or defaults)
    // ────────────────────────────────────────────────────────
    //
    let (cfg, cfg_path) = match AppConfig::discover(&AppConfig::search_dirs()) {
        Ok(found) => found,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    //
    // ────────────────────────────────────────────────────────
    //  Configure logging
    // ────────────────────────────────────────────────────────
    //
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cfg.level_filter())
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
        return ExitCode::FAILURE;
    }

    tracing::info!("Starting ItemStore…");
    match &cfg_path {
        Some(path) => tracing::info!("Loaded {}", path.display()),
        None => tracing::info!("No config.json found, using defaults"),
    }
    tracing::info!("Configuration: {:?}", cfg);

    //
    // ────────────────────────────────────────────────────────
    //  Build Axum app over a fresh store
    // ────────────────────────────────────────────────────────
    //
    let app = build_app(ItemStore::new(), cfg.clone());

    //
    // ────────────────────────────────────────────────────────
    //  Bind server and start listening
    // ────────────────────────────────────────────────────────
    //
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Listening on http://{}", addr);

    if let Err(e) = serve(listener, app)
        .with_graceful_shutdown(shutdown())
        .await
    {
        tracing::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

//
// ─────────────────────────────────────────────────────────────
//  Graceful shutdown handler
// ─────────────────────────────────────────────────────────────
//
async fn shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::warn!("CTRL+C received, draining in-flight requests");
}
