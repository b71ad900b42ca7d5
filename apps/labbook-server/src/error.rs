//! Request-level error taxonomy.
//!
//! All of these terminate the request; none is retried internally. The
//! transport mapping is deliberately coarse: a plain-text message with a
//! generic failure status, so callers cannot branch on error kind (a
//! known design gap, kept as-is pending a structured error code).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use labbook_storage::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Envelope doesn't match the schema, or its timestamp is outside
    /// the freshness window. Rejected before any side effect.
    #[error("Invalid request: {0}")]
    MalformedEnvelope(String),

    /// The claimed identity's token did not verify, or the admin
    /// identifier failed the allow-list/prefix checks.
    #[error("{0}")]
    IdentityVerificationFailed(String),

    #[error("{0}")]
    NotFound(String),

    /// A claimed foreign key does not match the authoritative owner
    /// (e.g. wrong workspace for a project).
    #[error("{0}")]
    Integrity(String),

    #[error("{0}")]
    PermissionDenied(String),

    /// Target name already exists (rename/add/duplicate).
    #[error("{0}")]
    Conflict(String),

    /// A stored document failed structural validation. Data-corruption
    /// signal; logged and surfaced, never auto-repaired.
    #[error("Invalid document in database: {0}")]
    InvalidShape(String),

    #[error("Storage error: {0}")]
    Store(String),
}

impl ApiError {
    /// Stable label for metrics, not exposed on the wire.
    pub fn label(&self) -> &'static str {
        match self {
            ApiError::MalformedEnvelope(_) => "malformed_envelope",
            ApiError::IdentityVerificationFailed(_) => "identity_verification_failed",
            ApiError::NotFound(_) => "not_found",
            ApiError::Integrity(_) => "integrity",
            ApiError::PermissionDenied(_) => "permission_denied",
            ApiError::Conflict(_) => "conflict",
            ApiError::InvalidShape(_) => "invalid_shape",
            ApiError::Store(_) => "store",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => ApiError::NotFound("Not found".into()),
            StoreError::AlreadyExists => ApiError::Conflict("Already exists".into()),
            StoreError::InvalidShape(s) => ApiError::InvalidShape(s),
            StoreError::Backend(s) => ApiError::Store(s),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MalformedEnvelope(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let ApiError::InvalidShape(detail) = &self {
            tracing::warn!(%detail, "invalid stored document");
        }
        (status, format!("Error: {self}")).into_response()
    }
}
