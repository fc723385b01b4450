use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use config_engine::ConfigError;
use error_common::{Classify, ErrorKind};
use object_gateway::GatewayError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Always `false`
    #[schema(example = false)]
    pub success: bool,
    /// Human-readable message, safe to show to a caller
    #[schema(example = "Image not available for camera: main")]
    pub error: String,
    /// Error taxonomy kind
    #[schema(example = "NotFound")]
    pub error_kind: String,
    /// Stable machine-readable code
    #[schema(example = "STORE_2001")]
    pub error_code: String,
    /// Unique error ID, also present in the server log
    pub error_id: String,
    /// Timestamp when the error occurred
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// A classified failure on its way out of a handler.
///
/// `message` is what the caller sees; `detail` is only logged.
#[derive(Error, Debug)]
#[error("{kind}: {detail}")]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
    detail: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind,
            detail: message.clone(),
            message,
        }
    }

    /// Wrap any classified error, keeping its full text for the log
    pub fn classified<E: Classify + Display>(err: &E) -> Self {
        Self {
            kind: err.kind(),
            message: err.public_message(),
            detail: err.to_string(),
        }
    }

    /// Replace the caller-facing message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self::classified(&err)
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        Self::classified(&err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();

        // Log the error with correlation ID; caller mistakes are not server faults
        if self.kind.is_caller_error() {
            warn!(
                error_id = %error_id,
                error_kind = %self.kind,
                error_code = self.kind.code(),
                status_code = status_code.as_u16(),
                error = %self.detail,
                "API request rejected"
            );
        } else {
            error!(
                error_id = %error_id,
                error_kind = %self.kind,
                error_code = self.kind.code(),
                status_code = status_code.as_u16(),
                error = %self.detail,
                "API error occurred"
            );
        }

        let error_response = ApiErrorResponse {
            success: false,
            error: self.message,
            error_kind: self.kind.as_str().to_string(),
            error_code: self.kind.code().to_string(),
            error_id,
            timestamp: chrono::Utc::now(),
        };

        (status_code, Json(error_response)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
