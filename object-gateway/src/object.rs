use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use error_common::{sanitize_identifier, IdentifierError};
use std::fmt;

/// File name of the latest snapshot under each camera prefix
pub const CURRENT_IMAGE_NAME: &str = "current.png";

/// Key of an object in the webcam bucket.
///
/// Only constructible through derivation from a sanitized camera id, so every
/// key stays inside its `{camera_id}/` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Key of the latest snapshot for a camera: `{camera_id}/current.png`
    pub fn current_image(camera_id: &str) -> Result<Self, IdentifierError> {
        let camera_id = sanitize_identifier("camera", camera_id)?;
        Ok(Self(format!("{camera_id}/{CURRENT_IMAGE_NAME}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The camera id this key was derived from
    pub fn camera_id(&self) -> &str {
        self.0.split('/').next().unwrap_or_default()
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One object retrieved from the store
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bucket: String,
    pub key: ObjectKey,
    pub bytes: Bytes,
}

impl StoredObject {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Transport-safe rendering of the payload (standard base64, padded)
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}
