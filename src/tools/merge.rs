use super::{FileName, OutputSpec, ToolSpec, PDF_ONLY};
use crate::output::FileKind;
use crate::remote::RemoteTask;
use crate::validate::{FileRule, Schema, ValidatedForm};

pub static MERGE: ToolSpec = ToolSpec {
    route: "/api/merge-pdf",
    operation: "merge_pdf",
    schema: Schema {
        files: FileRule {
            min: 2,
            max: 2,
            mime_types: PDF_ONLY,
            missing: "required_files",
            too_few: "require_min_2_pdf_to_merge",
            too_many: "you_can_process_2_files",
            wrong_type: "only_pdf_is_allowed_to_merge",
        },
        encryption: None,
        fields: &[],
    },
    output: OutputSpec {
        kind: FileKind::Pdf,
        single_name: FileName::Fixed("merge.pdf"),
        archive_name: "merge.zip",
    },
    build_task,
};

fn build_task(_form: &ValidatedForm) -> RemoteTask {
    RemoteTask::new("merge")
}
