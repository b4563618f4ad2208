use super::{FileName, OutputSpec, ToolSpec, BOOLEAN, PDF_ONLY};
use crate::output::FileKind;
use crate::remote::RemoteTask;
use crate::validate::{Check, FieldRule, FileRule, Schema, ValidatedForm};

const MODES: &[&str] = &["ranges", "remove_pages"];

pub static SPLIT: ToolSpec = ToolSpec {
    route: "/api/split-pdf",
    operation: "split_pdf",
    schema: Schema {
        files: FileRule::up_to(
            1,
            PDF_ONLY,
            "required_file_to_split",
            "you_can_process_1_files",
            "file_must_be_pdf_to_split",
        ),
        encryption: None,
        fields: &[
            FieldRule::new("split_mode", Check::OneOf(MODES), "invalid_split_mode_type"),
            FieldRule::new("pages_range", Check::PageRanges, "invalid_page_ranges_type"),
            FieldRule::new(
                "merge_after",
                Check::OptionalOneOf {
                    values: BOOLEAN,
                    default: "false",
                },
                "invalid_merge_after_type",
            ),
        ],
    },
    output: OutputSpec {
        kind: FileKind::Pdf,
        single_name: FileName::Fixed("split.pdf"),
        archive_name: "split.zip",
    },
    build_task,
};

fn build_task(form: &ValidatedForm) -> RemoteTask {
    let pages = form.value("pages_range");
    match form.value("split_mode") {
        "remove_pages" => RemoteTask::new("split")
            .param("split_mode", "remove_pages")
            .param("remove_pages", pages),
        _ => RemoteTask::new("split")
            .param("split_mode", "ranges")
            .param("ranges", pages)
            .param("merge_after", form.flag("merge_after")),
    }
}
