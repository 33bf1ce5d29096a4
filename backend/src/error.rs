use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use tracker_shared::Collection;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No {collection} record with id {id}")]
    NotFound { collection: Collection, id: Uuid },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match self {
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            StoreError::Redis(_) | StoreError::Serde(_) | StoreError::Io(_) => {
                error!("Request failed: {self}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
