use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors raised while serving `/items` requests.
///
/// Every variant maps to exactly one HTTP status; bodies are plain text.
#[derive(Error, Debug)]
pub enum ItemError {
    #[error("Key not found")]
    NotFound,

    #[error("item store lock poisoned")]
    LockPoisoned,

    #[error("need content-type 'application/json', but got '{0}'")]
    UnsupportedMediaType(String),

    #[error("{0}")]
    InvalidBody(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Serialization(String),
}

impl ItemError {
    pub fn status(&self) -> StatusCode {
        match self {
            ItemError::NotFound => StatusCode::NOT_FOUND,
            ItemError::LockPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
            ItemError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ItemError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ItemError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ItemError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for ItemError {
    fn from(err: serde_json::Error) -> Self {
        ItemError::Serialization(err.to_string())
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let status = self.status();

        // 404 carries no body.
        if let ItemError::NotFound = self {
            return status.into_response();
        }

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected ({}): {}", status.as_u16(), self);
        }

        (status, self.to_string()).into_response()
    }
}

/// Startup configuration failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
