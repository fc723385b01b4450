use serde::{Deserialize, Serialize};
use std::fmt;

use crate::codes;

/// Closed taxonomy every workspace error is classified into.
///
/// Variant names are part of the HTTP contract: they are serialized verbatim
/// into the `error_kind` field of error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Missing endpoint, bucket or credentials; fatal at startup
    ConfigurationError,
    /// Expected, recoverable absence of an object or record
    NotFound,
    /// Remote or network failure; safe for the caller to retry
    TransportError,
    /// Caller payload is not valid transport encoding
    MalformedEncoding,
    /// Caller input does not match the closed, allow-listed schema
    SchemaViolation,
    /// Stored data exists but failed validation
    CorruptRecord,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ConfigurationError => "ConfigurationError",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::TransportError => "TransportError",
            ErrorKind::MalformedEncoding => "MalformedEncoding",
            ErrorKind::SchemaViolation => "SchemaViolation",
            ErrorKind::CorruptRecord => "CorruptRecord",
        }
    }

    /// Stable machine-readable code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::ConfigurationError => codes::configuration::MISSING_SETTING,
            ErrorKind::NotFound => codes::storage::NOT_FOUND,
            ErrorKind::TransportError => codes::storage::TRANSPORT_FAILED,
            ErrorKind::MalformedEncoding => codes::decoding::MALFORMED_ENCODING,
            ErrorKind::SchemaViolation => codes::decoding::SCHEMA_VIOLATION,
            ErrorKind::CorruptRecord => codes::records::CORRUPT_RECORD,
        }
    }

    /// HTTP status the kind maps to at the service boundary
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorKind::MalformedEncoding | ErrorKind::SchemaViolation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::ConfigurationError
            | ErrorKind::TransportError
            | ErrorKind::CorruptRecord => 500,
        }
    }

    /// Whether an external caller may reasonably retry the same request
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::TransportError)
    }

    /// Whether the failure was caused by the caller's input
    pub fn is_caller_error(&self) -> bool {
        matches!(self, ErrorKind::MalformedEncoding | ErrorKind::SchemaViolation)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by every error type that can cross the HTTP boundary.
pub trait Classify {
    fn kind(&self) -> ErrorKind;

    /// Message that is safe to hand to a caller.
    ///
    /// Must not contain source error text, file system paths or anything read
    /// from storage. The full `Display` output is for logs only.
    fn public_message(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_matches_taxonomy() {
        assert_eq!(ErrorKind::MalformedEncoding.http_status(), 400);
        assert_eq!(ErrorKind::SchemaViolation.http_status(), 400);
        assert_eq!(ErrorKind::NotFound.http_status(), 404);
        assert_eq!(ErrorKind::TransportError.http_status(), 500);
        assert_eq!(ErrorKind::CorruptRecord.http_status(), 500);
        assert_eq!(ErrorKind::ConfigurationError.http_status(), 500);
    }

    #[test]
    fn test_only_transport_errors_are_retryable() {
        assert!(ErrorKind::TransportError.is_retryable());
        assert!(!ErrorKind::NotFound.is_retryable());
        assert!(!ErrorKind::SchemaViolation.is_retryable());
        assert!(!ErrorKind::CorruptRecord.is_retryable());
    }

    #[test]
    fn test_caller_errors_are_the_400_kinds() {
        for kind in [
            ErrorKind::ConfigurationError,
            ErrorKind::NotFound,
            ErrorKind::TransportError,
            ErrorKind::MalformedEncoding,
            ErrorKind::SchemaViolation,
            ErrorKind::CorruptRecord,
        ] {
            assert_eq!(kind.is_caller_error(), kind.http_status() == 400, "{kind}");
        }
    }

    #[test]
    fn test_kind_serializes_as_variant_name() {
        let json = serde_json::to_string(&ErrorKind::MalformedEncoding).unwrap();
        assert_eq!(json, "\"MalformedEncoding\"");
        assert_eq!(ErrorKind::CorruptRecord.to_string(), "CorruptRecord");
    }

    #[test]
    fn test_codes_are_distinct() {
        let kinds = [
            ErrorKind::ConfigurationError,
            ErrorKind::NotFound,
            ErrorKind::TransportError,
            ErrorKind::MalformedEncoding,
            ErrorKind::SchemaViolation,
            ErrorKind::CorruptRecord,
        ];
        let mut codes: Vec<&str> = kinds.iter().map(ErrorKind::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }
}
