use super::{FileName, OutputSpec, ToolSpec, PDF_ONLY};
use crate::output::FileKind;
use crate::remote::RemoteTask;
use crate::validate::{Check, FieldRule, FileRule, Schema, ValidatedForm};

const ANGLES: &[u32] = &[0, 90, 180, 270];

pub static ROTATE: ToolSpec = ToolSpec {
    route: "/api/rotate-pdf",
    operation: "rotate_pdf",
    schema: Schema {
        files: FileRule::up_to(
            1,
            PDF_ONLY,
            "required_files",
            "you_can_process_1_files",
            "only_pdf_is_allowed_to_rotate",
        ),
        encryption: None,
        fields: &[FieldRule::new(
            "rotate",
            Check::NumberIn(ANGLES),
            "invalid_rotate_pdf_type",
        )],
    },
    output: OutputSpec {
        kind: FileKind::Pdf,
        single_name: FileName::Fixed("rotated.pdf"),
        archive_name: "rotated.zip",
    },
    build_task,
};

// The angle travels with each file, not with the task.
fn build_task(form: &ValidatedForm) -> RemoteTask {
    RemoteTask::new("rotate").file_option("rotate", form.number("rotate").unwrap_or(0))
}
