//! Route path constants
//!
//! utoipa `#[utoipa::path(...)]` attributes need string literals, so the
//! paths in handler annotations must match these constants exactly.

pub mod health {
    pub const HEALTH: &str = "/health";
    pub const STATUS: &str = "/status";
}

pub mod images {
    pub const GET_IMAGE: &str = "/get_image";
}

pub mod configs {
    pub const GET_CONFIG: &str = "/get_config";
}

pub mod docs {
    pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
}
