use crate::config::ConnectionParams;
use crate::error::{GatewayError, GatewayResult};
use crate::storage::ObjectBackend;
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use secrecy::ExposeSecret;
use tracing::{debug, info};

const CREDENTIALS_PROVIDER_NAME: &str = "webcam-gateway";

/// S3-compatible backend (Cloudflare R2, MinIO, AWS S3)
pub struct S3Backend {
    client: S3Client,
}

impl S3Backend {
    /// Wrap an already configured client
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    /// Build a client from validated connection parameters.
    ///
    /// Retries are disabled and every operation is bounded by
    /// `request_timeout`, so a dead endpoint fails fast instead of hanging a
    /// request handler.
    pub async fn connect(params: &ConnectionParams) -> GatewayResult<Self> {
        info!(
            endpoint = %params.endpoint_url,
            region = %params.region,
            bucket = %params.bucket_name,
            "Initializing S3 object store client"
        );

        let credentials = aws_sdk_s3::config::Credentials::new(
            params.access_key_id.as_str(),
            params.secret_access_key.expose_secret().as_str(),
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(params.region.clone()))
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(params.request_timeout)
                    .build(),
            )
            .retry_config(RetryConfig::disabled())
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .endpoint_url(&params.endpoint_url)
            .force_path_style(params.force_path_style)
            .build();

        Ok(Self::new(S3Client::from_conf(s3_config)))
    }
}

#[async_trait]
impl ObjectBackend for S3Backend {
    fn name(&self) -> &'static str {
        "s3"
    }

    async fn head_bucket(&self, bucket: &str) -> GatewayResult<()> {
        self.client
            .head_bucket()
            .bucket(bucket)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| GatewayError::transport("head_bucket", DisplayErrorContext(&e)))
    }

    async fn get_object(&self, bucket: &str, key: &str) -> GatewayResult<Bytes> {
        let response = match self.client.get_object().bucket(bucket).key(key).send().await {
            Ok(response) => response,
            Err(err) => {
                // A 404 alone is not enough: a missing bucket also answers 404
                let no_such_key = err
                    .as_service_error()
                    .map(|e| e.is_no_such_key() || e.code() == Some("NoSuchKey"))
                    .unwrap_or(false);

                if no_such_key {
                    debug!(bucket = %bucket, key = %key, "Object does not exist");
                    return Err(GatewayError::ObjectNotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    });
                }
                return Err(GatewayError::transport("get_object", DisplayErrorContext(&err)));
            }
        };

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| GatewayError::transport("get_object", e))?
            .into_bytes();

        Ok(data)
    }
}
