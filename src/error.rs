//! Error types for the PDF toolbox server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for internal operations
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error types.
///
/// These never reach the client verbatim: the pipeline logs them and
/// collapses them into a [`ToolError`] tagged with the operation name.
#[derive(Error, Debug)]
pub enum Error {
    /// Remote service answered with a non-success status
    #[error("Remote service returned {status} during {stage}")]
    RemoteStatus { stage: &'static str, status: u16 },

    /// Remote service answered with something we could not use
    #[error("Remote service protocol error during {stage}: {reason}")]
    RemoteProtocol { stage: &'static str, reason: String },

    /// Invalid page range expression
    #[error("Invalid page range: {range}")]
    InvalidPageRange { range: String },

    /// Download too large
    #[error("Download too large: {size} bytes (max: {max_size} bytes)")]
    DownloadTooLarge { size: u64, max_size: u64 },

    /// Signing the remote service token failed
    #[error("Token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Malformed remote URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Zip archive could not be read or written
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

/// Error returned by a tool endpoint.
///
/// Every variant maps to a stable message code that the front-end
/// translates; no internal detail is carried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// A request field failed validation
    #[error("validation failed: {code}")]
    Validation { code: &'static str },

    /// iLovePDF keys are not configured
    #[error("missing iLovePDF credentials for {operation}")]
    MissingCredentials { operation: &'static str },

    /// Temp-file I/O, remote task or archive rebuild failed
    #[error("internal failure in {operation}")]
    Internal { operation: &'static str },

    /// The remote service returned bytes of an unexpected shape
    #[error("unrecognized remote output")]
    ServiceUnavailable,
}

impl ToolError {
    pub fn validation(code: &'static str) -> Self {
        ToolError::Validation { code }
    }

    /// Stable message code sent to the client
    pub fn code(&self) -> String {
        match self {
            ToolError::Validation { code } => (*code).to_string(),
            ToolError::MissingCredentials { operation } => {
                format!("missing_ilovepdf_keys|{}", operation)
            }
            ToolError::Internal { operation } => format!("internal_server_erro|{}", operation),
            ToolError::ServiceUnavailable => "service_unavailable".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ToolError::Validation { .. } => StatusCode::BAD_REQUEST,
            ToolError::MissingCredentials { .. } | ToolError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ToolError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// JSON error body: `{"message": "<code>"}`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
}

impl IntoResponse for ToolError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.code(),
        };
        (self.status(), Json(body)).into_response()
    }
}
