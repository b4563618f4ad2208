//! PDF inspection
//!
//! No document is ever rewritten locally; the only local PDF work is
//! finding out whether an upload is already password-protected.

mod probe;

pub use probe::{probe_encryption, EncryptionState};
