pub mod paths;

use axum::{routing::get, Router};

use crate::{
    handlers::{configs, health, images},
    openapi,
    server::WebcamServer,
};

/// Create health and status routes
pub fn health_routes() -> Router<WebcamServer> {
    Router::new()
        .route(paths::health::HEALTH, get(health::health_check))
        .route(paths::health::STATUS, get(health::system_status))
}

/// Create snapshot routes
pub fn image_routes() -> Router<WebcamServer> {
    Router::new().route(paths::images::GET_IMAGE, get(images::get_image))
}

/// Create configuration routes
pub fn config_routes() -> Router<WebcamServer> {
    Router::new().route(paths::configs::GET_CONFIG, get(configs::get_config))
}

/// Create API documentation routes
pub fn docs_routes() -> Router<WebcamServer> {
    Router::new().route(paths::docs::OPENAPI_JSON, get(openapi::openapi_json))
}

/// Create all application routes
pub fn create_routes() -> Router<WebcamServer> {
    Router::new()
        .merge(health_routes())
        .merge(image_routes())
        .merge(config_routes())
        .merge(docs_routes())
}
