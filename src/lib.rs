//! ItemStore: a minimal in-memory item service over HTTP/JSON.
//!
//! Items are created with `POST /items`, listed with `GET /items` and
//! fetched with `GET /items/{key}`. Nothing is persisted.

pub mod app;
pub mod config;
pub mod errors;
pub mod routes;
pub mod services;
pub mod state;

pub use app::build_app;
pub use config::AppConfig;
pub use errors::{ConfigError, ItemError};
pub use state::items::{Item, ItemStore};
