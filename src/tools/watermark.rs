use super::page_number::{
    text_layout, FONT_COLOR, FONT_FAMILY, FONT_SIZE, HORIZONTAL_POSITION, START_PAGE,
};
use super::{FileName, OutputSpec, ToolSpec, BOOLEAN, PDF_ONLY};
use crate::output::FileKind;
use crate::remote::RemoteTask;
use crate::validate::{Check, FieldRule, FileRule, Schema, ValidatedForm};

const VERTICAL_POSITIONS: &[&str] = &["bottom", "middle", "top"];
const FONT_STYLES: &[&str] = &["Normal", "Bold", "Italic"];
const TRANSPARENCIES: &[u32] = &[25, 50, 75, 100];
const LAYERS: &[&str] = &["above", "below"];
const MODES: &[&str] = &["text", "image"];

/// The remote default; never sent explicitly.
const DEFAULT_FONT_STYLE: &str = "Normal";

pub static WATERMARK: ToolSpec = ToolSpec {
    route: "/api/watermark",
    operation: "watermark",
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
            FieldRule::new("text", Check::NonEmpty, "invalid_text"),
            FONT_FAMILY,
            FONT_SIZE,
            FONT_COLOR,
            FieldRule::new("font_style", Check::OneOf(FONT_STYLES), "invalid_font_style"),
            FieldRule::new(
                "transparency",
                Check::NumberIn(TRANSPARENCIES),
                "invalid_transparency_type",
            ),
            FieldRule::new("layer", Check::OneOf(LAYERS), "invalid_layer_type"),
            FieldRule::new(
                "mosaic",
                Check::OptionalOneOf {
                    values: BOOLEAN,
                    default: "false",
                },
                "invalid_mosaic_type",
            ),
            FieldRule::new("mode", Check::OneOf(MODES), "invalid_mode_option"),
        ],
    },
    output: OutputSpec {
        kind: FileKind::Pdf,
        single_name: FileName::Fixed("watermark.pdf"),
        archive_name: "watermark.zip",
    },
    build_task,
};

fn build_task(form: &ValidatedForm) -> RemoteTask {
    let mut task = text_layout(RemoteTask::new("watermark"), form);

    let style = form.value("font_style");
    if style != DEFAULT_FONT_STYLE {
        task = task.param("font_style", style);
    }

    task.param("transparency", form.number("transparency").unwrap_or(100))
        .param("layer", form.value("layer"))
        .param("mosaic", form.flag("mosaic"))
        .param("mode", form.value("mode"))
}
