use crate::error::{GatewayError, GatewayResult};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;

/// The two primitives the gateway needs from an S3-compatible client.
///
/// Implementations must map a remote "no such key" answer to
/// [`GatewayError::ObjectNotFound`] and every other failure (including
/// timeouts) to [`GatewayError::Transport`].
#[async_trait]
pub trait ObjectBackend: Send + Sync {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Existence probe on a bucket
    async fn head_bucket(&self, bucket: &str) -> GatewayResult<()>;

    /// Retrieve the full payload of one object
    async fn get_object(&self, bucket: &str, key: &str) -> GatewayResult<Bytes>;
}

/// In-memory backend for tests and local development
#[derive(Debug, Default)]
pub struct InMemoryObjectBackend {
    buckets: RwLock<HashMap<String, HashMap<String, Bytes>>>,
    unreachable: RwLock<bool>,
    probe_delay: RwLock<Option<Duration>>,
    requested_keys: RwLock<Vec<String>>,
}

impl InMemoryObjectBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_bucket(&self, bucket: &str) {
        self.buckets.write().entry(bucket.to_string()).or_default();
    }

    /// Store an object, creating the bucket if needed
    pub fn put_object(&self, bucket: &str, key: &str, data: impl Into<Bytes>) {
        self.buckets
            .write()
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), data.into());
    }

    /// Simulate a network outage: every call fails with a transport error
    pub fn set_unreachable(&self, unreachable: bool) {
        *self.unreachable.write() = unreachable;
    }

    /// Delay every bucket probe, to exercise probe timeouts
    pub fn set_probe_delay(&self, delay: Option<Duration>) {
        *self.probe_delay.write() = delay;
    }

    /// Keys passed to `get_object`, in call order
    pub fn requested_keys(&self) -> Vec<String> {
        self.requested_keys.read().clone()
    }

    fn check_reachable(&self, operation: &'static str) -> GatewayResult<()> {
        if *self.unreachable.read() {
            return Err(GatewayError::transport(operation, "endpoint unreachable"));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectBackend for InMemoryObjectBackend {
    fn name(&self) -> &'static str {
        "in-memory"
    }

    async fn head_bucket(&self, bucket: &str) -> GatewayResult<()> {
        let delay = *self.probe_delay.read();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.check_reachable("head_bucket")?;

        if self.buckets.read().contains_key(bucket) {
            Ok(())
        } else {
            Err(GatewayError::transport("head_bucket", format!("no such bucket: {bucket}")))
        }
    }

    async fn get_object(&self, bucket: &str, key: &str) -> GatewayResult<Bytes> {
        self.requested_keys.write().push(key.to_string());
        self.check_reachable("get_object")?;

        let buckets = self.buckets.read();
        let objects = buckets
            .get(bucket)
            .ok_or_else(|| GatewayError::transport("get_object", format!("no such bucket: {bucket}")))?;

        objects
            .get(key)
            .cloned()
            .ok_or_else(|| GatewayError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_object_distinguishes_missing_key_from_outage() {
        let backend = InMemoryObjectBackend::new();
        backend.put_object("webcams", "main/current.png", b"png".to_vec());

        let data = backend.get_object("webcams", "main/current.png").await.unwrap();
        assert_eq!(&data[..], b"png");

        let missing = backend.get_object("webcams", "gate/current.png").await.unwrap_err();
        assert!(missing.is_not_found());

        backend.set_unreachable(true);
        let outage = backend.get_object("webcams", "main/current.png").await.unwrap_err();
        assert!(matches!(outage, GatewayError::Transport { .. }));

        assert_eq!(
            backend.requested_keys(),
            vec!["main/current.png", "gate/current.png", "main/current.png"]
        );
    }

    #[tokio::test]
    async fn test_missing_bucket_is_transport_not_not_found() {
        let backend = InMemoryObjectBackend::new();
        let err = backend.get_object("absent", "main/current.png").await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport { .. }));
        assert!(backend.head_bucket("absent").await.is_err());

        backend.create_bucket("absent");
        assert!(backend.head_bucket("absent").await.is_ok());
    }
}
