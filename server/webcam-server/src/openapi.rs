use axum::Json;
use utoipa::OpenApi;

/// OpenAPI document for the webcam service
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::health::system_status,
        crate::handlers::images::get_image,
        crate::handlers::configs::get_config,
    ),
    components(
        schemas(
            crate::handlers::health::HealthResponse,
            crate::handlers::health::StatusResponse,
            crate::handlers::health::R2Connection,
            crate::handlers::health::ServiceHealth,
            crate::handlers::images::ImageResponse,
            crate::handlers::configs::ConfigResponse,
            crate::handlers::configs::WebcamConfig,
            config_engine::RecordSource,
            crate::error::ApiErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness and service status"),
        (name = "images", description = "Current camera snapshots"),
        (name = "configuration", description = "Webcam configuration records"),
    ),
    info(
        title = "Morepork Station Webcam API",
        description = "Current webcam snapshots from the object store and per-camera configuration records.",
        license(name = "AGPL-3.0-only"),
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
