use super::{FileName, OutputSpec, ToolSpec, PDF_ONLY};
use crate::output::FileKind;
use crate::remote::RemoteTask;
use crate::validate::{Check, FieldRule, FileRule, Schema, ValidatedForm};

const LEVELS: &[&str] = &["extreme", "recommended", "low"];

pub static COMPRESS: ToolSpec = ToolSpec {
    route: "/api/compress-pdf",
    operation: "compress_pdf",
    schema: Schema {
        files: FileRule::up_to(
            2,
            PDF_ONLY,
            "field_required",
            "you_can_converted_2_files",
            "field_must_be_pdf_to_compress",
        ),
        encryption: None,
        fields: &[FieldRule::new(
            "compressionLevel",
            Check::OptionalOneOf {
                values: LEVELS,
                default: "recommended",
            },
            "invalid_compression_level",
        )],
    },
    output: OutputSpec {
        kind: FileKind::Pdf,
        single_name: FileName::Prefixed("compressed-"),
        archive_name: "compressed.zip",
    },
    build_task,
};

fn build_task(form: &ValidatedForm) -> RemoteTask {
    RemoteTask::new("compress").param("compression_level", form.value("compressionLevel"))
}
