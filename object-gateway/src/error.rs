use error_common::{Classify, ErrorKind, IdentifierError};
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Object not found: {bucket}/{key}")]
    ObjectNotFound { bucket: String, key: String },

    #[error("Object store {operation} failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    #[error(transparent)]
    InvalidIdentifier(#[from] IdentifierError),
}

impl GatewayError {
    pub fn transport(operation: &'static str, source: impl Display) -> Self {
        Self::Transport {
            operation,
            message: source.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound { .. })
    }
}

impl Classify for GatewayError {
    fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Configuration(_) => ErrorKind::ConfigurationError,
            GatewayError::ObjectNotFound { .. } => ErrorKind::NotFound,
            GatewayError::Transport { .. } => ErrorKind::TransportError,
            GatewayError::InvalidIdentifier(e) => e.kind(),
        }
    }

    fn public_message(&self) -> String {
        match self {
            // Lists setting names only, never their values
            GatewayError::Configuration(message) => message.clone(),
            GatewayError::ObjectNotFound { .. } => "Object not found".to_string(),
            GatewayError::Transport { .. } => "Object store request failed".to_string(),
            GatewayError::InvalidIdentifier(e) => e.public_message(),
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
