//! Error types for the tile server.

use thiserror::Error;

/// Result type alias using WmsError.
pub type WmsResult<T> = Result<T, WmsError>;

/// Primary error type for tile requests.
#[derive(Debug, Error)]
pub enum WmsError {
    // === Request Errors ===
    #[error("Malformed request target: {0}")]
    BadEncoding(String),

    #[error("Rejected request path: {0}")]
    BadPath(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid BBOX: {0}")]
    InvalidBbox(String),

    #[error("Render size {width}x{height} outside 1..={max_width}x1..={max_height}")]
    TargetOutOfRange {
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error("Requested format not supported: {0}")]
    UnsupportedFormat(String),

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    RenderError(String),

    // === Infrastructure Errors ===
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl WmsError {
    /// Get the HTTP status code for this error.
    ///
    /// Only structurally invalid requests are 4xx; missing or unparsable
    /// parameters are answered with a 200 and an explanation.
    pub fn http_status_code(&self) -> u16 {
        match self {
            WmsError::BadEncoding(_) | WmsError::BadPath(_) => 400,

            WmsError::MissingParameter(_)
            | WmsError::InvalidBbox(_)
            | WmsError::TargetOutOfRange { .. }
            | WmsError::UnsupportedFormat(_) => 200,

            WmsError::RenderError(_) | WmsError::InternalError(_) => 500,
        }
    }
}
