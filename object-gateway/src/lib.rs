//! Object store gateway for the Morepork Station webcam service
//!
//! Owns the one connection the service keeps to its S3-compatible bucket and
//! exposes exactly two operations on it: a lightweight reachability probe and
//! a fetch of a single object by key. Keys are never taken from callers
//! verbatim; they are derived from sanitized camera identifiers.
//!
//! The gateway is constructed once at startup and shared read-only between
//! request handlers. Every fetch is a fresh remote call: there is no cache and
//! no automatic retry, so a failure surfaces immediately as
//! [`GatewayError::Transport`] and retry policy stays with the caller.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use object_gateway::{InMemoryObjectBackend, ObjectStoreGateway};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let backend = Arc::new(InMemoryObjectBackend::new());
//! backend.put_object("webcams", "main/current.png", b"\x89PNG".to_vec());
//!
//! let gateway = ObjectStoreGateway::with_backend(backend, "webcams");
//! assert!(gateway.test_connection().await);
//!
//! let image = gateway.fetch_current_image("main").await.unwrap();
//! assert_eq!(image.key.as_str(), "main/current.png");
//! # }
//! ```

pub mod backends;
pub mod config;
pub mod error;
pub mod gateway;
pub mod object;
pub mod storage;

// Re-exports
pub use config::{ConnectionParams, GatewaySettings};
pub use error::{GatewayError, GatewayResult};
pub use gateway::ObjectStoreGateway;
pub use object::{ObjectKey, StoredObject, CURRENT_IMAGE_NAME};
pub use storage::{InMemoryObjectBackend, ObjectBackend};

#[cfg(feature = "s3-backend")]
pub use backends::S3Backend;
