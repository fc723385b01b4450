use crate::error::{GatewayError, GatewayResult};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Raw connection settings as read from the properties file and `R2_*`
/// environment overrides.
///
/// Every field is optional at this stage so that [`GatewaySettings::validate`]
/// can report all missing keys at once instead of failing on the first one.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GatewaySettings {
    pub endpoint_url: Option<String>,
    pub bucket_name: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<SecretString>,
    pub region: String,
    pub request_timeout_secs: u64,
    pub force_path_style: bool,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            bucket_name: None,
            access_key_id: None,
            secret_access_key: None,
            region: DEFAULT_REGION.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            force_path_style: true,
        }
    }
}

/// Validated settings, ready to build a client from
#[derive(Debug)]
pub struct ConnectionParams {
    pub endpoint_url: String,
    pub bucket_name: String,
    pub access_key_id: String,
    pub secret_access_key: SecretString,
    pub region: String,
    pub request_timeout: Duration,
    pub force_path_style: bool,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl GatewaySettings {
    /// Check that every required key is present and non-blank.
    ///
    /// The error names the missing keys; it never echoes a value.
    pub fn validate(&self) -> GatewayResult<ConnectionParams> {
        let endpoint_url = present(self.endpoint_url.as_deref());
        let bucket_name = present(self.bucket_name.as_deref());
        let access_key_id = present(self.access_key_id.as_deref());
        let secret_access_key = present(
            self.secret_access_key
                .as_ref()
                .map(|s| s.expose_secret().as_str()),
        );

        let missing: Vec<&str> = [
            ("endpoint_url", endpoint_url.is_none()),
            ("bucket_name", bucket_name.is_none()),
            ("access_key_id", access_key_id.is_none()),
            ("secret_access_key", secret_access_key.is_none()),
        ]
        .into_iter()
        .filter_map(|(key, absent)| absent.then_some(key))
        .collect();

        match (endpoint_url, bucket_name, access_key_id, secret_access_key) {
            (Some(endpoint_url), Some(bucket_name), Some(access_key_id), Some(secret)) => {
                if !(endpoint_url.starts_with("http://") || endpoint_url.starts_with("https://")) {
                    return Err(GatewayError::Configuration(
                        "endpoint_url must start with http:// or https://".to_string(),
                    ));
                }
                if self.request_timeout_secs == 0 {
                    return Err(GatewayError::Configuration(
                        "request_timeout_secs must be greater than zero".to_string(),
                    ));
                }

                let region = present(Some(self.region.as_str())).unwrap_or(DEFAULT_REGION);

                Ok(ConnectionParams {
                    endpoint_url: endpoint_url.to_string(),
                    bucket_name: bucket_name.to_string(),
                    access_key_id: access_key_id.to_string(),
                    secret_access_key: SecretString::new(secret.to_string()),
                    region: region.to_string(),
                    request_timeout: Duration::from_secs(self.request_timeout_secs),
                    force_path_style: self.force_path_style,
                })
            }
            _ => Err(GatewayError::Configuration(format!(
                "Missing required object store settings: {}",
                missing.join(", ")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use error_common::{Classify, ErrorKind};

    fn complete() -> GatewaySettings {
        GatewaySettings {
            endpoint_url: Some("https://account.r2.cloudflarestorage.com".to_string()),
            bucket_name: Some("webcams".to_string()),
            access_key_id: Some("AKIDEXAMPLE".to_string()),
            secret_access_key: Some(SecretString::new("wJalrXUtnFEMI".to_string())),
            ..GatewaySettings::default()
        }
    }

    #[test]
    fn test_validate_complete_settings() {
        let params = complete().validate().unwrap();
        assert_eq!(params.bucket_name, "webcams");
        assert_eq!(params.region, DEFAULT_REGION);
        assert_eq!(params.request_timeout, Duration::from_secs(5));
        assert!(params.force_path_style);
        assert_eq!(params.secret_access_key.expose_secret(), "wJalrXUtnFEMI");
    }

    #[test]
    fn test_validate_lists_every_missing_key() {
        let settings = GatewaySettings {
            bucket_name: Some("   ".to_string()),
            secret_access_key: None,
            ..complete()
        };

        let err = settings.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigurationError);
        let message = err.to_string();
        assert!(message.contains("bucket_name"));
        assert!(message.contains("secret_access_key"));
        assert!(!message.contains("endpoint_url"));
        assert!(!message.contains("AKIDEXAMPLE"));
    }

    #[test]
    fn test_validate_rejects_endpoint_without_scheme() {
        let settings = GatewaySettings {
            endpoint_url: Some("account.r2.cloudflarestorage.com".to_string()),
            ..complete()
        };
        assert!(matches!(
            settings.validate(),
            Err(GatewayError::Configuration(_))
        ));
    }

    #[test]
    fn test_debug_output_redacts_secret() {
        let rendered = format!("{:?}", complete());
        assert!(!rendered.contains("wJalrXUtnFEMI"));
    }
}
