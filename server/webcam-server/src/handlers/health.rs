use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::server::WebcamServer;

/// Liveness response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always "ok" while the process serves requests
    #[schema(example = "ok")]
    pub status: String,
    /// Current timestamp in RFC3339 format
    #[schema(example = "2024-01-15T10:30:00Z")]
    pub timestamp: String,
    /// Service version
    #[schema(example = "1.2.3")]
    pub version: String,
}

/// Outcome of the object store probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum R2Connection {
    Connected,
    Disconnected,
    Error,
}

/// Overall service status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ServiceHealth {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Service status response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// Service name
    #[schema(example = "Morepork Station Webcam Service")]
    pub service: String,
    /// Service version
    #[schema(example = "1.2.3")]
    pub version: String,
    /// Current timestamp in RFC3339 format
    #[schema(example = "2024-01-15T10:30:00Z")]
    pub timestamp: String,
    /// Object store reachability
    pub r2_connection: R2Connection,
    /// Overall status
    pub status: ServiceHealth,
    /// Present when the probe itself could not complete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Liveness check; does not touch the object store
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Process is serving requests", body = HealthResponse)
    )
)]
pub async fn health_check(State(server): State<WebcamServer>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: server.config.version.clone(),
    })
}

/// Service status, including an object store probe
#[utoipa::path(
    get,
    path = "/status",
    tag = "health",
    responses(
        (status = 200, description = "Status report; inspect `status` for health", body = StatusResponse)
    )
)]
pub async fn system_status(State(server): State<WebcamServer>) -> Json<StatusResponse> {
    let probe = tokio::time::timeout(server.config.probe_timeout, server.gateway.test_connection()).await;

    let (r2_connection, status, error) = match probe {
        Ok(true) => (R2Connection::Connected, ServiceHealth::Healthy, None),
        Ok(false) => (R2Connection::Disconnected, ServiceHealth::Degraded, None),
        Err(_) => {
            warn!(
                timeout = ?server.config.probe_timeout,
                "Object store probe did not complete"
            );
            (
                R2Connection::Error,
                ServiceHealth::Unhealthy,
                Some("Object store probe timed out".to_string()),
            )
        }
    };

    debug!(r2_connection = ?r2_connection, status = ?status, "Status computed");

    Json(StatusResponse {
        service: server.config.service_name.clone(),
        version: server.config.version.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        r2_connection,
        status,
        error,
    })
}
