// Stable error codes reported alongside every error kind

pub mod configuration {
    pub const MISSING_SETTING: &str = "CONFIG_1001";
}

pub mod storage {
    pub const NOT_FOUND: &str = "STORE_2001";
    pub const TRANSPORT_FAILED: &str = "STORE_2002";
}

pub mod decoding {
    pub const MALFORMED_ENCODING: &str = "DECODE_3001";
    pub const SCHEMA_VIOLATION: &str = "DECODE_3002";
}

pub mod records {
    pub const CORRUPT_RECORD: &str = "RECORD_4001";
}
