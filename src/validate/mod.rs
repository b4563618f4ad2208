//! Request validation
//!
//! A tool describes its request as a [`Schema`]; [`validate`] walks it in
//! order and stops at the first failing check, so a rejected request
//! always carries exactly one code. Nothing here touches the disk or the
//! network.

mod page_range;
mod schema;

pub use page_range::{parse_page_ranges, PageSpan};
pub use schema::{Check, EncryptionRule, FieldRule, FileRule, Schema};

use crate::error::ToolError;
use crate::form::{UploadRequest, UploadedFile};
use crate::pdf::{probe_encryption, EncryptionState};
use std::collections::HashMap;

/// A request that passed its schema
#[derive(Debug, Clone)]
pub struct ValidatedForm {
    pub files: Vec<UploadedFile>,
    values: HashMap<&'static str, String>,
}

impl ValidatedForm {
    /// Normalized value of a schema field (empty if the schema has no such field)
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// Integer value of a schema field
    pub fn number(&self, name: &str) -> Option<u32> {
        self.value(name).parse().ok()
    }

    /// `"true"`/`"false"` field as a bool
    pub fn flag(&self, name: &str) -> bool {
        self.value(name) == "true"
    }

    /// Base name of the first uploaded file
    pub fn first_file_name(&self) -> &str {
        self.files.first().map(|f| f.name.as_str()).unwrap_or("")
    }
}

/// Check a request against a schema.
pub fn validate(schema: &Schema, request: UploadRequest) -> Result<ValidatedForm, ToolError> {
    check_files(&schema.files, &request.files)?;

    if let Some(rule) = schema.encryption {
        check_encryption(rule, &request.files)?;
    }

    let mut values = HashMap::with_capacity(schema.fields.len());
    for rule in schema.fields {
        let raw = request.field(rule.name);
        match rule.check.apply(raw) {
            Some(value) => {
                values.insert(rule.name, value);
            }
            None => {
                tracing::debug!(field = rule.name, code = rule.code, "field rejected");
                return Err(ToolError::validation(rule.code));
            }
        }
    }

    Ok(ValidatedForm {
        files: request.files,
        values,
    })
}

fn check_files(rule: &FileRule, files: &[UploadedFile]) -> Result<(), ToolError> {
    if files.is_empty() {
        return Err(ToolError::validation(rule.missing));
    }
    if files.len() < rule.min {
        return Err(ToolError::validation(rule.too_few));
    }
    if files.len() > rule.max {
        return Err(ToolError::validation(rule.too_many));
    }
    if let Some(file) = files
        .iter()
        .find(|f| !rule.mime_types.contains(&f.content_type.as_str()))
    {
        tracing::debug!(content_type = %file.content_type, "declared type rejected");
        return Err(ToolError::validation(rule.wrong_type));
    }
    Ok(())
}

fn check_encryption(rule: EncryptionRule, files: &[UploadedFile]) -> Result<(), ToolError> {
    for file in files {
        let state = probe_encryption(&file.data);
        if state == EncryptionState::Undeterminable {
            // Treated as not encrypted; the remote service has the final say.
            tracing::warn!(file = %file.name, "could not determine encryption state");
        }

        match rule {
            EncryptionRule::MustBeUnencrypted { code } if state.is_encrypted() => {
                return Err(ToolError::validation(code));
            }
            EncryptionRule::MustBeEncrypted { code } if !state.is_encrypted() => {
                return Err(ToolError::validation(code));
            }
            _ => {}
        }
    }
    Ok(())
}
