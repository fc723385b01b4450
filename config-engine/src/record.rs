use crate::error::{ConfigError, ConfigResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use error_common::sanitize_identifier;
use serde::Serialize;
use serde_json::json;
use std::fmt;

/// Version written into every encoded document
pub const SCHEMA_VERSION: u32 = 1;

/// Operating configuration of one webcam.
///
/// Fields are private: a record only exists once every constraint holds, so
/// callers never observe a partially valid value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRecord {
    name: String,
    resolution: String,
    frame_rate: u32,
    location: String,
    active: bool,
}

impl ConfigRecord {
    pub fn new(
        name: impl Into<String>,
        resolution: impl Into<String>,
        frame_rate: u32,
        location: impl Into<String>,
        active: bool,
    ) -> ConfigResult<Self> {
        let name = name.into();
        let resolution = resolution.into();

        sanitize_identifier("name", &name)?;
        if resolution.trim().is_empty() {
            return Err(ConfigError::schema("resolution must not be empty"));
        }
        if frame_rate == 0 {
            return Err(ConfigError::schema("frameRate must be greater than zero"));
        }

        Ok(Self {
            name,
            resolution,
            frame_rate,
            location: location.into(),
            active,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resolution(&self) -> &str {
        &self.resolution
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn active(&self) -> bool {
        self.active
    }

    /// Canonical JSON document, as stored in `{name}.config` files
    pub fn to_document(&self) -> String {
        json!({
            "schemaVersion": SCHEMA_VERSION,
            "name": self.name,
            "resolution": self.resolution,
            "frameRate": self.frame_rate,
            "location": self.location,
            "active": self.active,
        })
        .to_string()
    }

    /// Base64 transport form accepted by [`ConfigDecoder::decode`](crate::ConfigDecoder::decode)
    pub fn encode(&self) -> String {
        STANDARD.encode(self.to_document())
    }
}

impl fmt::Display for ConfigRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WebcamConfiguration{{name='{}', resolution='{}', frameRate={}, location='{}', active={}}}",
            self.name, self.resolution, self.frame_rate, self.location, self.active
        )
    }
}

/// Where a returned record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    /// Decoded from a caller supplied payload
    Decoded,
    /// Loaded from the record directory
    File,
}

impl RecordSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordSource::Decoded => "decoded",
            RecordSource::File => "file",
        }
    }
}
