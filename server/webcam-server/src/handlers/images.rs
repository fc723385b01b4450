use axum::{
    extract::State,
    Json,
};
use error_common::ErrorKind;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiError, ApiErrorResponse, ApiResult};
use crate::extractors::ApiQuery;
use crate::server::WebcamServer;

pub const DEFAULT_CAMERA: &str = "main";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ImageQuery {
    /// Camera identifier; defaults to "main"
    pub camera: Option<String>,
}

/// Latest snapshot of one camera
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImageResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "main")]
    pub camera_id: String,
    /// Retrieval timestamp in RFC3339 format
    pub timestamp: String,
    /// PNG bytes, standard base64
    #[schema(example = "iVBORw0KGgo=")]
    pub image_data: String,
}

/// Fetch `{camera}/current.png` from the object store
#[utoipa::path(
    get,
    path = "/get_image",
    tag = "images",
    params(ImageQuery),
    responses(
        (status = 200, description = "Current snapshot", body = ImageResponse),
        (status = 400, description = "Invalid camera identifier", body = ApiErrorResponse),
        (status = 404, description = "No snapshot for this camera", body = ApiErrorResponse),
        (status = 500, description = "Object store failure", body = ApiErrorResponse)
    )
)]
pub async fn get_image(
    State(server): State<WebcamServer>,
    ApiQuery(query): ApiQuery<ImageQuery>,
) -> ApiResult<Json<ImageResponse>> {
    let camera = query.camera.unwrap_or_else(|| DEFAULT_CAMERA.to_string());

    let image = server
        .gateway
        .fetch_current_image(&camera)
        .await
        .map_err(|e| {
            let err = ApiError::from(e);
            match err.kind() {
                ErrorKind::NotFound => {
                    err.with_message(format!("Image not available for camera: {camera}"))
                }
                ErrorKind::TransportError => err.with_message("Error retrieving image"),
                _ => err,
            }
        })?;

    let camera_id = image.key.camera_id().to_string();
    info!(camera_id = %camera_id, size = image.len(), "Serving current image");

    Ok(Json(ImageResponse {
        success: true,
        camera_id,
        timestamp: chrono::Utc::now().to_rfc3339(),
        image_data: image.to_base64(),
    }))
}
