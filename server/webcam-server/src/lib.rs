//! Morepork Station webcam service
//!
//! HTTP façade over the webcam object store and the camera configuration
//! records: `/status`, `/health`, `/get_image` and `/get_config`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod settings;

// Re-export commonly used types
pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use extractors::ApiQuery;
pub use server::{ServerConfig, WebcamServer};

use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(server: WebcamServer) -> Router {
    routes::create_routes()
        .layer(TraceLayer::new_for_http())
        .with_state(server)
}
