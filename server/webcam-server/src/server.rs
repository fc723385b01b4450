use config_engine::{ConfigDecoder, ConfigStore};
use object_gateway::ObjectStoreGateway;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_SERVICE_NAME: &str = "Morepork Station Webcam Service";
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared state handed to every handler.
///
/// Built once at startup and never mutated; cloning only bumps reference
/// counts.
#[derive(Clone)]
pub struct WebcamServer {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Read-only object store handle
    pub gateway: Arc<ObjectStoreGateway>,
    /// Stored camera configuration records
    pub records: Arc<ConfigStore>,
    /// Decoder for `config_data` payloads
    pub decoder: ConfigDecoder,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Service name reported by `/status`
    pub service_name: String,
    /// Version reported by `/status` and `/health`
    pub version: String,
    /// Upper bound on the `/status` object store probe
    pub probe_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl WebcamServer {
    pub fn new(config: ServerConfig, gateway: ObjectStoreGateway, records: ConfigStore) -> Self {
        Self {
            config: Arc::new(config),
            gateway: Arc::new(gateway),
            records: Arc::new(records),
            decoder: ConfigDecoder::new(),
        }
    }
}
