//! Object store settings: an optional key=value properties file overlaid by
//! `R2_*` environment variables.

use config::{Config, Environment, File, FileFormat};
use object_gateway::GatewaySettings;
use std::collections::HashMap;
use std::path::Path;

pub const ENV_PREFIX: &str = "R2";

/// Load settings from `path` and the process environment
pub fn load_gateway_settings(path: &Path) -> Result<GatewaySettings, config::ConfigError> {
    load_gateway_settings_with_env(path, None)
}

/// Load settings from `path`, taking `R2_*` overrides from `env` instead of
/// the process environment when it is given
pub fn load_gateway_settings_with_env(
    path: &Path,
    env: Option<HashMap<String, String>>,
) -> Result<GatewaySettings, config::ConfigError> {
    let path = path.to_string_lossy();

    Config::builder()
        .add_source(File::new(&path, FileFormat::Ini).required(false))
        // Values stay strings; numeric fields are converted on deserialize
        .add_source(Environment::with_prefix(ENV_PREFIX).source(env))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;

    fn properties(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".properties")
            .tempfile()
            .unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reads_properties_file() {
        let file = properties(
            "endpoint_url=https://account.r2.cloudflarestorage.com\n\
             bucket_name=webcams\n\
             access_key_id=AKIDEXAMPLE\n\
             secret_access_key=wJalrXUtnFEMI\n\
             request_timeout_secs=3\n",
        );

        let settings = load_gateway_settings_with_env(file.path(), Some(HashMap::new())).unwrap();
        let params = settings.validate().unwrap();
        assert_eq!(params.bucket_name, "webcams");
        assert_eq!(params.region, "us-east-1");
        assert_eq!(params.request_timeout.as_secs(), 3);
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = properties("bucket_name=webcams\nendpoint_url=http://localhost:9000\n");
        let env = HashMap::from([
            ("R2_BUCKET_NAME".to_string(), "snapshots".to_string()),
            ("R2_ACCESS_KEY_ID".to_string(), "minio".to_string()),
            ("R2_SECRET_ACCESS_KEY".to_string(), "minio-secret".to_string()),
            ("R2_FORCE_PATH_STYLE".to_string(), "false".to_string()),
        ]);

        let params = load_gateway_settings_with_env(file.path(), Some(env))
            .unwrap()
            .validate()
            .unwrap();
        assert_eq!(params.bucket_name, "snapshots");
        assert_eq!(params.endpoint_url, "http://localhost:9000");
        assert!(!params.force_path_style);
    }

    #[test]
    fn test_numeric_looking_values_are_kept_verbatim() {
        let file = properties("endpoint_url=http://localhost:9000\n");
        let env = HashMap::from([
            ("R2_BUCKET_NAME".to_string(), "007".to_string()),
            ("R2_ACCESS_KEY_ID".to_string(), "00123".to_string()),
            ("R2_SECRET_ACCESS_KEY".to_string(), "1e3".to_string()),
            ("R2_REQUEST_TIMEOUT_SECS".to_string(), "9".to_string()),
        ]);

        let params = load_gateway_settings_with_env(file.path(), Some(env))
            .unwrap()
            .validate()
            .unwrap();
        assert_eq!(params.bucket_name, "007");
        assert_eq!(params.access_key_id, "00123");
        assert_eq!(params.secret_access_key.expose_secret(), "1e3");
        assert_eq!(params.request_timeout.as_secs(), 9);
    }

    #[test]
    fn test_missing_file_yields_configuration_error_on_validate() {
        let dir = tempfile::tempdir().unwrap();
        let settings =
            load_gateway_settings_with_env(&dir.path().join("absent.properties"), Some(HashMap::new()))
                .unwrap();

        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("endpoint_url"));
        assert!(err.to_string().contains("secret_access_key"));
    }
}
