//! Password protection and its removal
//!
//! Both tools probe the upload first: locking an already encrypted
//! document, or unlocking a plain one, is rejected before any remote call.

use super::{FileName, OutputSpec, ToolSpec, PDF_ONLY};
use crate::output::FileKind;
use crate::remote::RemoteTask;
use crate::validate::{Check, EncryptionRule, FieldRule, FileRule, Schema, ValidatedForm};

const MIN_PASSWORD_CHARS: usize = 2;

pub static LOCK: ToolSpec = ToolSpec {
    route: "/api/lock-pdf",
    operation: "lock_pdf",
    schema: Schema {
        files: FileRule::up_to(
            1,
            PDF_ONLY,
            "required_pdf_to_lock",
            "you_can_process_1_files",
            "only_pdf_is_allowed_to_lock",
        ),
        encryption: Some(EncryptionRule::MustBeUnencrypted {
            code: "pdf_already_encrypted",
        }),
        fields: &[
            FieldRule::new("password", Check::NonEmpty, "required_password_to_lock_pdf"),
            FieldRule::new(
                "password",
                Check::MinChars(MIN_PASSWORD_CHARS),
                "password_min_3_caracteres",
            ),
        ],
    },
    output: OutputSpec {
        kind: FileKind::Pdf,
        single_name: FileName::Fixed("lock.pdf"),
        archive_name: "lock.zip",
    },
    build_task: build_lock_task,
};

pub static UNLOCK: ToolSpec = ToolSpec {
    route: "/api/unlock-pdf",
    operation: "unlock_pdf",
    schema: Schema {
        files: FileRule::up_to(
            1,
            PDF_ONLY,
            "required_pdf_to_unlock",
            "you_can_process_1_files",
            "only_pdf_is_allowed_to_unlock",
        ),
        encryption: Some(EncryptionRule::MustBeEncrypted {
            code: "pdf_already_unlock",
        }),
        fields: &[],
    },
    output: OutputSpec {
        kind: FileKind::Pdf,
        single_name: FileName::Fixed("unlock.pdf"),
        archive_name: "unlock.zip",
    },
    build_task: build_unlock_task,
};

fn build_lock_task(form: &ValidatedForm) -> RemoteTask {
    RemoteTask::new("protect").param("password", form.value("password"))
}

fn build_unlock_task(_form: &ValidatedForm) -> RemoteTask {
    RemoteTask::new("unlock")
}
