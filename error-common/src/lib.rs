//! Common error handling utilities for the Morepork Station webcam service
//!
//! Every crate in the workspace reports failures through its own `thiserror`
//! enum, and every one of those enums classifies itself into the closed
//! [`ErrorKind`] taxonomy defined here. The HTTP layer only ever looks at the
//! kind, the stable error code and the public message, so internal detail
//! (source errors, file paths, remote responses) never reaches a caller.
//!
//! # Error Categories
//!
//! - **ConfigurationError**: missing endpoint, bucket or credentials (startup-fatal)
//! - **NotFound**: expected absence of an object or record
//! - **TransportError**: network or remote failure talking to the object store
//! - **MalformedEncoding**: caller payload is not valid transport encoding
//! - **SchemaViolation**: caller input does not match the closed schema
//! - **CorruptRecord**: stored data failed validation
//!
//! # Example
//!
//! ```rust
//! use error_common::{sanitize_identifier, Classify, ErrorKind};
//!
//! let err = sanitize_identifier("camera", "../etc").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::SchemaViolation);
//! assert_eq!(sanitize_identifier("camera", "main").unwrap(), "main");
//! ```

pub mod codes;
pub mod sanitization;
pub mod types;

pub use sanitization::*;
pub use types::*;
