//! Webcam configuration records for the Morepork Station webcam service
//!
//! This crate provides:
//! - [`ConfigRecord`], the validated configuration of one webcam
//! - [`ConfigDecoder`], a closed-schema decoder for caller supplied payloads
//! - [`ConfigStore`], a read-only directory of stored records
//!
//! Both the decoder and the store run documents through the same strict
//! schema. Payloads cannot select types, and no field is ever treated as a
//! path to read.
//!
//! # Example
//!
//! ```rust
//! use config_engine::{ConfigDecoder, ConfigRecord};
//!
//! let record = ConfigRecord::new("cam1", "1280x720", 15, "roof", true).unwrap();
//! let decoded = ConfigDecoder::new().decode(&record.encode()).unwrap();
//!
//! assert_eq!(decoded, record);
//! assert_eq!(decoded.frame_rate(), 15);
//! ```

pub mod decoder;
pub mod error;
pub mod record;
pub mod store;

pub use decoder::{ConfigDecoder, MAX_ENCODED_LEN};
pub use error::{ConfigError, ConfigResult};
pub use record::{ConfigRecord, RecordSource, SCHEMA_VERSION};
pub use store::{ConfigStore, MAX_RECORD_FILE_LEN};
