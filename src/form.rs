//! Multipart form ingestion

use axum::extract::multipart::{Multipart, MultipartError};
use std::collections::HashMap;

/// Field name every tool uploads its documents under
pub const FILE_FIELD: &str = "file";

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// A single uploaded document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Base name of the uploaded file (directory components stripped)
    pub name: String,
    /// MIME type declared by the client
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Files plus text fields of one tool request
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub files: Vec<UploadedFile>,
    pub fields: HashMap<String, String>,
}

impl UploadRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(
        mut self,
        name: impl AsRef<str>,
        content_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        self.files.push(UploadedFile {
            name: base_name(name.as_ref()).to_string(),
            content_type: content_type.into(),
            data: data.into(),
        });
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.entry(name.into()).or_insert_with(|| value.into());
        self
    }

    /// Text value of a field, if the client sent it
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Drain a multipart body.
    ///
    /// Parts named `file_field` become files; everything else is read as
    /// text. Repeated text fields keep their first value. Empty file parts
    /// without a name (a browser form with nothing selected) are skipped.
    pub async fn from_multipart(
        mut multipart: Multipart,
        file_field: &str,
    ) -> std::result::Result<Self, MultipartError> {
        let mut request = Self::new();

        while let Some(field) = multipart.next_field().await? {
            let field_name = field.name().unwrap_or("").to_string();

            if field_name == file_field {
                let name = field.file_name().map(base_name).unwrap_or("").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(FALLBACK_CONTENT_TYPE)
                    .to_string();
                let data = field.bytes().await?;

                if name.is_empty() && data.is_empty() {
                    continue;
                }

                request.files.push(UploadedFile {
                    name,
                    content_type,
                    data: data.to_vec(),
                });
            } else {
                let value = field.text().await?;
                request.fields.entry(field_name).or_insert(value);
            }
        }

        Ok(request)
    }
}

/// Last path component of a client-supplied name.
///
/// Both `/` and `\` count as separators so Windows-style names from
/// browsers and archive entries are flattened the same way.
pub fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .unwrap_or("")
}
