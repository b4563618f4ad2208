//! Encryption state probe backed by qpdf (vendored FFI)

use qpdf::{QPdf, QPdfErrorCode};

/// What the probe could tell about a document's protection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptionState {
    /// The document carries an encryption dictionary
    Encrypted,
    /// The document opened and is not encrypted
    NotEncrypted,
    /// The bytes could not be parsed as a PDF
    Undeterminable,
}

impl EncryptionState {
    /// Collapse to a boolean, treating [`EncryptionState::Undeterminable`] as
    /// not encrypted.
    pub fn is_encrypted(self) -> bool {
        matches!(self, EncryptionState::Encrypted)
    }
}

/// Determine whether raw PDF bytes are password-protected.
///
/// The document is opened without a password. A document protected only
/// by an owner password opens and reports itself encrypted; one that needs
/// a user password fails with `InvalidPassword`, which also means
/// encrypted. Any other failure is reported as undeterminable rather than
/// propagated.
pub fn probe_encryption(data: &[u8]) -> EncryptionState {
    match QPdf::read_from_memory(data) {
        Ok(pdf) => {
            if pdf.is_encrypted() {
                EncryptionState::Encrypted
            } else {
                EncryptionState::NotEncrypted
            }
        }
        Err(e) if matches!(e.error_code(), QPdfErrorCode::InvalidPassword) => {
            EncryptionState::Encrypted
        }
        Err(e) => {
            tracing::debug!(error = %e, "qpdf could not open document");
            EncryptionState::Undeterminable
        }
    }
}
