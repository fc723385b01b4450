use error_common::{Classify, ErrorKind, IdentifierError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration '{name}' not found")]
    NotFound { name: String },

    #[error("Malformed encoding: {0}")]
    MalformedEncoding(String),

    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    #[error("Stored configuration '{name}' is corrupt: {reason}")]
    CorruptRecord { name: String, reason: String },

    #[error(transparent)]
    InvalidIdentifier(#[from] IdentifierError),

    #[error("Failed to read configuration '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub fn schema(detail: impl Into<String>) -> Self {
        Self::SchemaViolation(detail.into())
    }
}

impl Classify for ConfigError {
    fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::NotFound { .. } => ErrorKind::NotFound,
            ConfigError::MalformedEncoding(_) => ErrorKind::MalformedEncoding,
            ConfigError::SchemaViolation(_) => ErrorKind::SchemaViolation,
            ConfigError::CorruptRecord { .. } => ErrorKind::CorruptRecord,
            ConfigError::InvalidIdentifier(e) => e.kind(),
            ConfigError::Io { .. } => ErrorKind::TransportError,
        }
    }

    fn public_message(&self) -> String {
        match self {
            // Caller input problems are echoed back; they describe the caller's own payload
            ConfigError::MalformedEncoding(_)
            | ConfigError::SchemaViolation(_)
            | ConfigError::NotFound { .. }
            | ConfigError::InvalidIdentifier(_) => self.to_string(),
            ConfigError::CorruptRecord { .. } => "Stored configuration is invalid".to_string(),
            ConfigError::Io { .. } => "Configuration storage unavailable".to_string(),
        }
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
