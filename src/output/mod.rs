//! Result shaping: classification, repackaging and download responses

mod archive;
mod classify;

pub use archive::{entry_names, rebuild_archive};
pub use classify::{classify, FileKind, Payload, JPEG_SIGNATURES, PDF_SIGNATURE, ZIP_SIGNATURE};

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
};

pub const ZIP_MIME: &str = "application/zip";

/// Build a `200` download response.
pub fn attachment(
    content_type: &str,
    file_name: &str,
    data: Vec<u8>,
) -> std::result::Result<Response, axum::http::Error> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", disposition_name(file_name)),
        )
        .body(Body::from(data))
}

/// Make a name safe inside a quoted `Content-Disposition` parameter.
fn disposition_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c == '"' || c == '\\' || c.is_control() || !c.is_ascii() {
                '_'
            } else {
                c
            }
        })
        .collect()
}
