use axum::{
    extract::State,
    Json,
};
use config_engine::{ConfigRecord, RecordSource};
use error_common::{sanitize_identifier, ErrorKind};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiError, ApiErrorResponse, ApiResult};
use crate::extractors::ApiQuery;
use crate::server::WebcamServer;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConfigQuery {
    /// Webcam whose configuration is requested
    pub webcam_name: Option<String>,
    /// Base64 encoded configuration document; when present it is decoded
    /// instead of reading the stored record
    pub config_data: Option<String>,
}

/// Wire form of a configuration record
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebcamConfig {
    #[schema(example = "cam1")]
    pub name: String,
    #[schema(example = "1280x720")]
    pub resolution: String,
    #[schema(example = 15)]
    pub frame_rate: u32,
    #[schema(example = "roof")]
    pub location: String,
    #[schema(example = true)]
    pub active: bool,
}

impl From<&ConfigRecord> for WebcamConfig {
    fn from(record: &ConfigRecord) -> Self {
        Self {
            name: record.name().to_string(),
            resolution: record.resolution().to_string(),
            frame_rate: record.frame_rate(),
            location: record.location().to_string(),
            active: record.active(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConfigResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "cam1")]
    pub webcam_name: String,
    pub config: WebcamConfig,
    /// One-line rendering of the record
    #[schema(example = "WebcamConfiguration{name='cam1', resolution='1280x720', frameRate=15, location='roof', active=true}")]
    pub details: String,
    pub source: RecordSource,
}

/// Return a webcam configuration, decoded from `config_data` or loaded from
/// the configuration directory
#[utoipa::path(
    get,
    path = "/get_config",
    tag = "configuration",
    params(ConfigQuery),
    responses(
        (status = 200, description = "Configuration record", body = ConfigResponse),
        (status = 400, description = "Invalid name, malformed payload or schema violation", body = ApiErrorResponse),
        (status = 404, description = "No stored configuration for this webcam", body = ApiErrorResponse),
        (status = 500, description = "Stored configuration is invalid or unreadable", body = ApiErrorResponse)
    )
)]
pub async fn get_config(
    State(server): State<WebcamServer>,
    ApiQuery(query): ApiQuery<ConfigQuery>,
) -> ApiResult<Json<ConfigResponse>> {
    let webcam_name = query
        .webcam_name
        .ok_or_else(|| ApiError::new(ErrorKind::SchemaViolation, "webcam_name is required"))?;
    sanitize_identifier("webcam_name", &webcam_name).map_err(|e| ApiError::classified(&e))?;

    let (record, source) = match query.config_data.as_deref().filter(|data| !data.is_empty()) {
        Some(data) => (server.decoder.decode(data)?, RecordSource::Decoded),
        None => {
            let record = server.records.load(&webcam_name).await.map_err(|e| {
                let err = ApiError::from(e);
                if err.kind() == ErrorKind::NotFound {
                    err.with_message(format!("Configuration not found for webcam: {webcam_name}"))
                } else {
                    err
                }
            })?;
            (record, RecordSource::File)
        }
    };

    info!(
        webcam_name = %webcam_name,
        source = source.as_str(),
        "Serving webcam configuration"
    );

    Ok(Json(ConfigResponse {
        success: true,
        config: WebcamConfig::from(&record),
        details: record.to_string(),
        source,
        webcam_name,
    }))
}
