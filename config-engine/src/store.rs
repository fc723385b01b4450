use crate::decoder::ConfigDecoder;
use crate::error::{ConfigError, ConfigResult};
use crate::record::ConfigRecord;
use error_common::sanitize_identifier;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

/// Largest accepted record file, in bytes
pub const MAX_RECORD_FILE_LEN: u64 = 64 * 1024;

/// File extension of stored records
pub const RECORD_EXTENSION: &str = "config";

/// Directory of stored configuration records, one `{name}.config` file per
/// webcam. Read-only.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: PathBuf,
    decoder: ConfigDecoder,
}

impl ConfigStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            decoder: ConfigDecoder::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the record for `name`. The name is sanitized first, so the
    /// result is always a direct child of the store root.
    pub fn record_path(&self, name: &str) -> ConfigResult<PathBuf> {
        let name = sanitize_identifier("webcam_name", name)?;
        Ok(self.root.join(format!("{name}.{RECORD_EXTENSION}")))
    }

    /// Load and validate the record stored under `name`.
    ///
    /// Errors:
    /// - [`ConfigError::InvalidIdentifier`] if `name` could escape the root
    ///   (nothing is read)
    /// - [`ConfigError::NotFound`] if there is no record file
    /// - [`ConfigError::CorruptRecord`] if the file is oversized, fails
    ///   decoding or holds a record with a different name
    /// - [`ConfigError::Io`] for any other read failure
    pub async fn load(&self, name: &str) -> ConfigResult<ConfigRecord> {
        let path = self.record_path(name)?;
        debug!(name = %name, path = %path.display(), "Loading configuration record");

        let io_error = |source: std::io::Error| {
            if source.kind() == IoErrorKind::NotFound {
                ConfigError::NotFound {
                    name: name.to_string(),
                }
            } else {
                ConfigError::Io {
                    name: name.to_string(),
                    source,
                }
            }
        };

        let file = tokio::fs::File::open(&path).await.map_err(io_error)?;
        let mut bytes = Vec::new();
        file.take(MAX_RECORD_FILE_LEN + 1)
            .read_to_end(&mut bytes)
            .await
            .map_err(io_error)?;

        if bytes.len() as u64 > MAX_RECORD_FILE_LEN {
            return Err(self.corrupt(name, format!("file exceeds {MAX_RECORD_FILE_LEN} bytes")));
        }

        let record = self
            .decoder
            .decode_document(&bytes)
            .map_err(|e| self.corrupt(name, e.to_string()))?;

        if record.name() != name {
            return Err(self.corrupt(
                name,
                format!("record is named '{}'", record.name()),
            ));
        }

        Ok(record)
    }

    fn corrupt(&self, name: &str, reason: String) -> ConfigError {
        warn!(name = %name, reason = %reason, "Stored configuration record failed validation");
        ConfigError::CorruptRecord {
            name: name.to_string(),
            reason,
        }
    }
}
