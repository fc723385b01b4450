use crate::config::GatewaySettings;
use crate::error::GatewayResult;
use crate::object::{ObjectKey, StoredObject};
use crate::storage::ObjectBackend;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Read-only handle on the webcam bucket, shared by all request handlers
#[derive(Clone)]
pub struct ObjectStoreGateway {
    backend: Arc<dyn ObjectBackend>,
    bucket: String,
}

impl fmt::Debug for ObjectStoreGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStoreGateway")
            .field("backend", &self.backend.name())
            .field("bucket", &self.bucket)
            .finish()
    }
}

impl ObjectStoreGateway {
    /// Validate settings and build an S3 client.
    ///
    /// Fails with [`GatewayError::Configuration`](crate::GatewayError::Configuration)
    /// when a required setting is missing. No network call is made here.
    #[cfg(feature = "s3-backend")]
    pub async fn connect(settings: &GatewaySettings) -> GatewayResult<Self> {
        let params = settings.validate()?;
        let backend = crate::backends::S3Backend::connect(&params).await?;
        Ok(Self::with_backend(Arc::new(backend), params.bucket_name))
    }

    pub fn with_backend(backend: Arc<dyn ObjectBackend>, bucket: impl Into<String>) -> Self {
        Self {
            backend,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Probe the bucket. Never fails: any error is logged and reported as
    /// `false`.
    pub async fn test_connection(&self) -> bool {
        match self.backend.head_bucket(&self.bucket).await {
            Ok(()) => {
                debug!(bucket = %self.bucket, backend = self.backend.name(), "Object store reachable");
                true
            }
            Err(e) => {
                warn!(
                    bucket = %self.bucket,
                    backend = self.backend.name(),
                    error = %e,
                    "Object store connection test failed"
                );
                false
            }
        }
    }

    /// Fetch one object from the configured bucket
    pub async fn fetch_object(&self, key: &ObjectKey) -> GatewayResult<StoredObject> {
        debug!(bucket = %self.bucket, key = %key, "Fetching object");

        let bytes = self
            .backend
            .get_object(&self.bucket, key.as_str())
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    info!(bucket = %self.bucket, key = %key, "Object not found");
                } else {
                    warn!(bucket = %self.bucket, key = %key, error = %e, "Object fetch failed");
                }
                e
            })?;

        info!(bucket = %self.bucket, key = %key, size = bytes.len(), "Object fetched");

        Ok(StoredObject {
            bucket: self.bucket.clone(),
            key: key.clone(),
            bytes,
        })
    }

    /// Fetch `{camera_id}/current.png`. The identifier is sanitized before
    /// any key is built, so a rejected id never reaches the store.
    pub async fn fetch_current_image(&self, camera_id: &str) -> GatewayResult<StoredObject> {
        let key = ObjectKey::current_image(camera_id)?;
        self.fetch_object(&key).await
    }
}
