//! Page numbering, plus the text-layout catalogue shared with the
//! watermark tool.

use super::{FileName, OutputSpec, ToolSpec, PDF_ONLY};
use crate::output::FileKind;
use crate::remote::RemoteTask;
use crate::validate::{Check, FieldRule, FileRule, Schema, ValidatedForm};

pub(crate) const FONT_FAMILIES: &[&str] = &[
    "Arial",
    "Arial Unicode MS",
    "Verdana",
    "Courier",
    "Times New Roman",
    "Comic Sans MS",
    "WenQuanYi Zen Hei",
    "Lohit Marathi",
];

pub(crate) const FONT_SIZES: &[u32] = &[12, 14, 16, 18, 20];

pub(crate) const HORIZONTAL_POSITIONS: &[&str] = &["left", "center", "right"];

const VERTICAL_POSITIONS: &[&str] = &["bottom", "top"];

const TEXT_TEMPLATES: &[&str] = &["Página {n}", "Página {n} de {p}", "{n}"];

pub(crate) const START_PAGE: FieldRule =
    FieldRule::new("start_page", Check::PositiveInteger, "invalid_starting_number");

pub(crate) const HORIZONTAL_POSITION: FieldRule = FieldRule::new(
    "horizontal_position",
    Check::OneOf(HORIZONTAL_POSITIONS),
    "invalid_horizontal_position",
);

pub(crate) const FONT_FAMILY: FieldRule =
    FieldRule::new("font_family", Check::OneOf(FONT_FAMILIES), "invalid_font_family");

pub(crate) const FONT_SIZE: FieldRule =
    FieldRule::new("font_size", Check::NumberIn(FONT_SIZES), "invalid_font_size");

pub(crate) const FONT_COLOR: FieldRule =
    FieldRule::new("font_color", Check::HexColor, "invalid_font_color");

pub static PAGE_NUMBER: ToolSpec = ToolSpec {
    route: "/api/add-page-number",
    operation: "page_number_pdf",
    schema: Schema {
        files: FileRule::up_to(
            1,
            PDF_ONLY,
            "select_file_to_continue",
            "you_can_process_1_files",
            "only_pdf_accepted",
        ),
        encryption: None,
        fields: &[
            START_PAGE,
            FieldRule::new(
                "vertical_position",
                Check::OneOf(VERTICAL_POSITIONS),
                "invalid_vertical_position",
            ),
            HORIZONTAL_POSITION,
            FieldRule::new("text", Check::OneOf(TEXT_TEMPLATES), "invalid_text"),
            FONT_FAMILY,
            FONT_SIZE,
            FONT_COLOR,
        ],
    },
    output: OutputSpec {
        kind: FileKind::Pdf,
        single_name: FileName::Fixed("page-number.pdf"),
        archive_name: "page-number.zip",
    },
    build_task,
};

fn build_task(form: &ValidatedForm) -> RemoteTask {
    text_layout(RemoteTask::new("pagenumber"), form)
}

/// Position, text and font parameters; the start page becomes an
/// open-ended page range.
pub(crate) fn text_layout(task: RemoteTask, form: &ValidatedForm) -> RemoteTask {
    task.param("vertical_position", form.value("vertical_position"))
        .param("horizontal_position", form.value("horizontal_position"))
        .param("text", form.value("text"))
        .param("font_family", form.value("font_family"))
        .param("font_size", form.number("font_size").unwrap_or(FONT_SIZES[0]))
        .param("font_color", form.value("font_color"))
        .param("pages", format!("{}-end", form.value("start_page")))
}
