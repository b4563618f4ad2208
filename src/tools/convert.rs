//! Format conversions: images to PDF, PDF to JPEG, office documents to PDF

use super::{FileName, OutputSpec, ToolSpec, BOOLEAN, PDF_ONLY};
use crate::output::FileKind;
use crate::remote::RemoteTask;
use crate::validate::{Check, FieldRule, FileRule, Schema, ValidatedForm};

const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png"];

const OFFICE_TYPES: &[&str] = &[
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

const ORIENTATIONS: &[&str] = &["portrait", "landscape"];
const MARGINS: &[&str] = &["default", "small", "large"];
const PDF_TO_JPG_MODES: &[&str] = &["pages", "extract"];

const PAGE_SIZE: &str = "A4";

pub static IMAGES_TO_PDF: ToolSpec = ToolSpec {
    route: "/api/convert-images-to-pdf",
    operation: "convert_images_to_pdf",
    schema: Schema {
        files: FileRule::up_to(
            4,
            IMAGE_TYPES,
            "image_required_to_convert",
            "you_can_process_4_files",
            "only_jpeg_or_png_image_allowed_to_convert",
        ),
        encryption: None,
        fields: &[
            FieldRule::new(
                "mergeAfter",
                Check::OptionalOneOf {
                    values: BOOLEAN,
                    default: "true",
                },
                "invalid_merge_after_type",
            ),
            FieldRule::new(
                "orientation",
                Check::OptionalOneOf {
                    values: ORIENTATIONS,
                    default: "portrait",
                },
                "invalid_orientation_type",
            ),
            FieldRule::new(
                "margin",
                Check::OptionalOneOf {
                    values: MARGINS,
                    default: "default",
                },
                "invalid_margin_type",
            ),
        ],
    },
    output: OutputSpec {
        kind: FileKind::Pdf,
        single_name: FileName::Fixed("image-converted-to-pdf.pdf"),
        archive_name: "images-converted-to-pdf.zip",
    },
    build_task: build_images_task,
};

pub static PDF_TO_JPG: ToolSpec = ToolSpec {
    route: "/api/pdf-to-jpg",
    operation: "pdf_to_jpg",
    schema: Schema {
        files: FileRule::up_to(
            1,
            PDF_ONLY,
            "required_file_to_convert",
            "you_can_process_1_files",
            "only_pdf_is_allowed_to_convert_jpg",
        ),
        encryption: None,
        fields: &[FieldRule::new(
            "mode",
            Check::OneOf(PDF_TO_JPG_MODES),
            "invalid_mode_type_pdf_to_jpg",
        )],
    },
    output: OutputSpec {
        kind: FileKind::Jpeg,
        single_name: FileName::Fixed("pdf-to-jpg.jpg"),
        archive_name: "pdf-to-jpg.zip",
    },
    build_task: build_pdf_to_jpg_task,
};

pub static OFFICE_TO_PDF: ToolSpec = ToolSpec {
    route: "/api/office-to-pdf",
    operation: "office_pdf",
    schema: Schema {
        files: FileRule::up_to(
            1,
            OFFICE_TYPES,
            "required_file_to_convert",
            "you_can_process_1_files",
            "invalid_file_type",
        ),
        encryption: None,
        fields: &[],
    },
    output: OutputSpec {
        kind: FileKind::Pdf,
        single_name: FileName::Fixed("office.pdf"),
        archive_name: "office.zip",
    },
    build_task: build_office_task,
};

/// Margin in points
fn margin_points(margin: &str) -> u32 {
    match margin {
        "small" => 20,
        "large" => 25,
        _ => 0,
    }
}

fn build_images_task(form: &ValidatedForm) -> RemoteTask {
    RemoteTask::new("imagepdf")
        .param("orientation", form.value("orientation"))
        .param("margin", margin_points(form.value("margin")))
        .param("pagesize", PAGE_SIZE)
        .param("merge_after", form.flag("mergeAfter"))
}

fn build_pdf_to_jpg_task(form: &ValidatedForm) -> RemoteTask {
    RemoteTask::new("pdfjpg").param("pdfjpg_mode", form.value("mode"))
}

fn build_office_task(_form: &ValidatedForm) -> RemoteTask {
    RemoteTask::new("officepdf")
}
