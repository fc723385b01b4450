//! Closed-schema decoding of caller supplied configuration payloads
//!
//! The payload is base64 text wrapping a JSON document with a fixed set of
//! camelCase fields. The document shape is a private struct with
//! `deny_unknown_fields`; nothing in the payload can select a type, trigger
//! I/O or name a file to read.

use crate::error::{ConfigError, ConfigResult};
use crate::record::{ConfigRecord, SCHEMA_VERSION};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use serde_json::error::Category;
use tracing::debug;

/// Largest accepted encoded payload, in bytes of base64 text
pub const MAX_ENCODED_LEN: usize = 16 * 1024;

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RecordDocument {
    #[serde(default)]
    schema_version: Option<u32>,
    name: String,
    resolution: String,
    frame_rate: u32,
    location: String,
    #[serde(default = "default_active")]
    active: bool,
}

/// Decoder for encoded [`ConfigRecord`] payloads
#[derive(Debug, Clone)]
pub struct ConfigDecoder {
    max_encoded_len: usize,
}

impl Default for ConfigDecoder {
    fn default() -> Self {
        Self {
            max_encoded_len: MAX_ENCODED_LEN,
        }
    }
}

impl ConfigDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_encoded_len(mut self, max_encoded_len: usize) -> Self {
        self.max_encoded_len = max_encoded_len;
        self
    }

    /// Decode base64 text into a validated record.
    ///
    /// Errors:
    /// - [`ConfigError::MalformedEncoding`] for bad base64, non UTF-8 bytes or
    ///   text that is not JSON at all
    /// - [`ConfigError::SchemaViolation`] for JSON that does not match the
    ///   record schema, or fields that break a record constraint
    pub fn decode(&self, encoded: &str) -> ConfigResult<ConfigRecord> {
        let encoded = encoded.trim_matches(|c: char| c.is_ascii_whitespace());
        if encoded.len() > self.max_encoded_len {
            return Err(ConfigError::schema(format!(
                "payload exceeds {} bytes",
                self.max_encoded_len
            )));
        }

        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| ConfigError::MalformedEncoding(format!("invalid base64: {e}")))?;

        self.decode_document(&bytes)
    }

    /// Parse and validate the JSON document carried inside the transport
    /// encoding. Also used for record files, which store the document as is.
    pub fn decode_document(&self, bytes: &[u8]) -> ConfigResult<ConfigRecord> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| ConfigError::MalformedEncoding("payload is not UTF-8 text".to_string()))?;

        let document: RecordDocument = serde_json::from_str(text).map_err(|e| match e.classify() {
            Category::Data => ConfigError::SchemaViolation(e.to_string()),
            Category::Syntax | Category::Eof | Category::Io => {
                ConfigError::MalformedEncoding(format!("payload is not a JSON document: {e}"))
            }
        })?;

        if let Some(version) = document.schema_version {
            if version != SCHEMA_VERSION {
                return Err(ConfigError::schema(format!(
                    "unsupported schemaVersion {version}"
                )));
            }
        }

        let record = ConfigRecord::new(
            document.name,
            document.resolution,
            document.frame_rate,
            document.location,
            document.active,
        )?;

        debug!(name = %record.name(), "Decoded configuration record");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use error_common::{Classify, ErrorKind};
    use proptest::prelude::*;

    fn encode_json(json: &str) -> String {
        STANDARD.encode(json)
    }

    fn kind_of(encoded: &str) -> ErrorKind {
        ConfigDecoder::new().decode(encoded).unwrap_err().kind()
    }

    #[test]
    fn test_decodes_versionless_document() {
        let encoded = encode_json(
            r#"{"name":"cam1","resolution":"1280x720","frameRate":15,"location":"roof","active":true}"#,
        );
        let record = ConfigDecoder::new().decode(&encoded).unwrap();
        assert_eq!(record, ConfigRecord::new("cam1", "1280x720", 15, "roof", true).unwrap());
    }

    #[test]
    fn test_accepts_encoder_output() {
        let record = ConfigRecord::new("north-gate", "1920x1080", 30, "Gate 2, \"north\"", false).unwrap();
        assert_eq!(ConfigDecoder::new().decode(&record.encode()).unwrap(), record);
    }

    #[test]
    fn test_active_defaults_to_true() {
        let encoded = encode_json(r#"{"name":"cam1","resolution":"640x480","frameRate":5,"location":""}"#);
        assert!(ConfigDecoder::new().decode(&encoded).unwrap().active());
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let record = ConfigRecord::new("cam1", "1280x720", 15, "roof", true).unwrap();
        let padded = format!("  {}\n", record.encode());
        assert!(ConfigDecoder::new().decode(&padded).is_ok());
    }

    #[test]
    fn test_malformed_encodings() {
        // Not base64
        assert_eq!(kind_of("not base64!!"), ErrorKind::MalformedEncoding);
        // Bad padding
        assert_eq!(kind_of("e30"), ErrorKind::MalformedEncoding);
        // Binary garbage
        assert_eq!(
            kind_of(&STANDARD.encode([0xde_u8, 0xad, 0xbe, 0xef, 0x00, 0xff])),
            ErrorKind::MalformedEncoding
        );
        // Text that is not JSON
        assert_eq!(kind_of(&encode_json("hello world")), ErrorKind::MalformedEncoding);
        // Truncated JSON
        assert_eq!(kind_of(&encode_json(r#"{"name":"cam1""#)), ErrorKind::MalformedEncoding);
    }

    #[test]
    fn test_file_path_field_is_rejected_not_followed() {
        let encoded = encode_json(
            r#"{"name":"cam1","resolution":"1280x720","frameRate":15,"location":"roof","configFilePath":"/etc/passwd"}"#,
        );
        let err = ConfigDecoder::new().decode(&encoded).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaViolation);
        assert!(err.public_message().contains("configFilePath"));
        assert!(!err.public_message().contains("root:"));
    }

    #[test]
    fn test_schema_violations() {
        let cases = [
            // wrong type
            r#"{"name":"cam1","resolution":"1280x720","frameRate":"15","location":"roof"}"#,
            // missing field
            r#"{"name":"cam1","resolution":"1280x720","location":"roof"}"#,
            // duplicate field
            r#"{"name":"cam1","name":"cam2","resolution":"1280x720","frameRate":15,"location":"roof"}"#,
            // negative frame rate
            r#"{"name":"cam1","resolution":"1280x720","frameRate":-1,"location":"roof"}"#,
            // zero frame rate
            r#"{"name":"cam1","resolution":"1280x720","frameRate":0,"location":"roof"}"#,
            // unsupported version
            r#"{"schemaVersion":2,"name":"cam1","resolution":"1280x720","frameRate":15,"location":"roof"}"#,
            // traversal in name
            r#"{"name":"../../etc","resolution":"1280x720","frameRate":15,"location":"roof"}"#,
            // nested object where a string belongs
            r#"{"name":{"name":{"name":"cam1"}},"resolution":"1280x720","frameRate":15,"location":"roof"}"#,
            // non-object top level
            r#"["cam1","1280x720",15,"roof",true]"#,
            "42",
        ];
        for json in cases {
            assert_eq!(kind_of(&encode_json(json)), ErrorKind::SchemaViolation, "{json}");
        }
    }

    #[test]
    fn test_oversized_payload_rejected_before_decoding() {
        let decoder = ConfigDecoder::new().with_max_encoded_len(8);
        let err = decoder.decode("AAAAAAAAAAAA").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaViolation);
    }

    proptest! {
        #[test]
        fn prop_unknown_fields_always_rejected(field in "[a-z][a-zA-Z]{0,12}") {
            prop_assume!(!["name", "resolution", "frameRate", "location", "active", "schemaVersion"]
                .contains(&field.as_str()));
            let json = format!(
                r#"{{"name":"cam1","resolution":"1280x720","frameRate":15,"location":"roof","{field}":"x"}}"#
            );
            prop_assert_eq!(kind_of(&encode_json(&json)), ErrorKind::SchemaViolation);
        }

        #[test]
        fn prop_decode_never_panics(input in ".{0,256}") {
            let _ = ConfigDecoder::new().decode(&input);
        }

        #[test]
        fn prop_valid_records_survive_transport(
            name in "[A-Za-z0-9_-]{1,32}",
            frame_rate in 1u32..=240,
            location in ".{0,40}",
            active in any::<bool>(),
        ) {
            let record = ConfigRecord::new(name, "1280x720", frame_rate, location, active).unwrap();
            prop_assert_eq!(ConfigDecoder::new().decode(&record.encode()).unwrap(), record);
        }
    }
}
