//! End-to-end tests for the tool endpoints
//!
//! The remote service is replaced by a recording fake so these tests cover
//! everything up to and after the remote round trip.

use async_trait::async_trait;
use axum::http::{header, StatusCode};
use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use pdf_toolbox_server::error::{Error, ErrorBody, Result};
use pdf_toolbox_server::output::entry_names;
use pdf_toolbox_server::remote::{ILovePdfCredentials, RemoteTask, TaskService};
use pdf_toolbox_server::scratch::TempArtifact;
use pdf_toolbox_server::server::{router, AppState, ServerConfig};
use pdf_toolbox_server::tools;
use pretty_assertions::assert_eq;
use rstest::rstest;
use qpdf::{EncryptionParams, EncryptionParamsR6, PrintPermission, QPdf};
use serde_json::json;
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const PDF: &str = "application/pdf";

enum Reply {
    Bytes(Vec<u8>),
    Fail,
}

struct Call {
    task: RemoteTask,
    files: Vec<TempArtifact>,
    files_existed: bool,
}

struct FakeTasks {
    reply: Reply,
    calls: Mutex<Vec<Call>>,
}

#[async_trait]
impl TaskService for FakeTasks {
    async fn execute(
        &self,
        _credentials: &ILovePdfCredentials,
        task: &RemoteTask,
        files: &[TempArtifact],
    ) -> Result<Vec<u8>> {
        let files_existed = files.iter().all(|f| f.path.exists());
        self.calls.lock().unwrap().push(Call {
            task: task.clone(),
            files: files.to_vec(),
            files_existed,
        });

        match &self.reply {
            Reply::Bytes(data) => Ok(data.clone()),
            Reply::Fail => Err(Error::RemoteStatus {
                stage: "process",
                status: 500,
            }),
        }
    }
}

struct Harness {
    server: TestServer,
    tasks: Arc<FakeTasks>,
    scratch: TempDir,
}

impl Harness {
    fn new(reply: Reply) -> Self {
        Self::with_credentials(
            reply,
            Some(ILovePdfCredentials::new("project_public_test", "secret_key_test")),
        )
    }

    fn with_credentials(reply: Reply, credentials: Option<ILovePdfCredentials>) -> Self {
        Self::with_config(
            reply,
            ServerConfig {
                credentials,
                ..ServerConfig::default()
            },
        )
    }

    fn with_config(reply: Reply, config: ServerConfig) -> Self {
        let scratch = tempfile::tempdir().unwrap();
        let tasks = Arc::new(FakeTasks {
            reply,
            calls: Mutex::new(Vec::new()),
        });
        let config = ServerConfig {
            scratch_dir: scratch.path().to_path_buf(),
            ..config
        };
        let state = AppState::with_task_service(config, tasks.clone());
        let server = TestServer::new(router(state)).unwrap();

        Self {
            server,
            tasks,
            scratch,
        }
    }

    async fn post(&self, route: &str, form: MultipartForm) -> TestResponse {
        self.server.post(route).multipart(form).await
    }

    fn call_count(&self) -> usize {
        self.tasks.calls.lock().unwrap().len()
    }

    fn scratch_is_empty(&self) -> bool {
        std::fs::read_dir(self.scratch.path()).unwrap().count() == 0
    }
}

fn plain_pdf() -> Vec<u8> {
    QPdf::empty().writer().write_to_memory().unwrap()
}

fn encrypted_pdf() -> Vec<u8> {
    let qpdf = QPdf::read_from_memory(&plain_pdf()).unwrap();
    let mut writer = qpdf.writer();
    writer
        .preserve_encryption(false)
        .encryption_params(EncryptionParams::R6(EncryptionParamsR6 {
            user_password: String::new(),
            owner_password: "owner-secret".to_string(),
            allow_accessibility: true,
            allow_extract: false,
            allow_assemble: false,
            allow_annotate_and_form: false,
            allow_form_filling: false,
            allow_modify_other: false,
            allow_print: PrintPermission::None,
            encrypt_metadata: true,
        }));
    writer.write_to_memory().unwrap()
}

fn zip_of(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(data.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn file_part(name: &str, mime: &str, data: Vec<u8>) -> Part {
    Part::bytes(data).file_name(name.to_string()).mime_type(mime.to_string())
}

fn pdf_part(name: &str) -> Part {
    file_part(name, PDF, b"%PDF-1.4 test".to_vec())
}

fn error_code(response: &TestResponse) -> String {
    response.json::<ErrorBody>().message
}

fn header_value(response: &TestResponse, name: header::HeaderName) -> String {
    response.header(name).to_str().unwrap().to_string()
}

#[tokio::test]
async fn test_zero_files_yields_required_code_for_every_tool() {
    let harness = Harness::new(Reply::Bytes(b"%PDF".to_vec()));

    for tool in tools::ALL {
        let form = MultipartForm::new().add_text("unrelated", "value");
        let response = harness.post(tool.route, form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&response), tool.schema.files.missing, "{}", tool.route);
    }

    assert_eq!(harness.call_count(), 0);
}

#[tokio::test]
async fn test_non_multipart_body_counts_as_no_files() {
    let harness = Harness::new(Reply::Bytes(b"%PDF".to_vec()));

    let response = harness
        .server
        .post("/api/split-pdf")
        .json(&json!({"split_mode": "ranges"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response), "required_file_to_split");
}

#[tokio::test]
async fn test_rotate_rejects_unlisted_angle() {
    let harness = Harness::new(Reply::Bytes(b"%PDF".to_vec()));

    let form = MultipartForm::new()
        .add_part("file", pdf_part("a.pdf"))
        .add_text("rotate", "45");
    let response = harness.post("/api/rotate-pdf", form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response), "invalid_rotate_pdf_type");
    assert_eq!(harness.call_count(), 0);
}

/// Fields that pass every check of the tool behind `route`
fn valid_fields(route: &str) -> Vec<(&'static str, &'static str)> {
    match route {
        "/api/compress-pdf" => vec![("compressionLevel", "low")],
        "/api/split-pdf" => vec![
            ("split_mode", "ranges"),
            ("pages_range", "1-2"),
            ("merge_after", "false"),
        ],
        "/api/add-page-number" => vec![
            ("start_page", "1"),
            ("vertical_position", "bottom"),
            ("horizontal_position", "center"),
            ("text", "{n}"),
            ("font_family", "Arial"),
            ("font_size", "12"),
            ("font_color", "#000000"),
        ],
        "/api/watermark" => vec![
            ("start_page", "1"),
            ("vertical_position", "top"),
            ("horizontal_position", "center"),
            ("text", "DRAFT"),
            ("font_family", "Verdana"),
            ("font_size", "20"),
            ("font_color", "#F00"),
            ("font_style", "Bold"),
            ("transparency", "50"),
            ("layer", "above"),
            ("mosaic", "false"),
            ("mode", "text"),
        ],
        "/api/convert-images-to-pdf" => vec![
            ("mergeAfter", "true"),
            ("orientation", "portrait"),
            ("margin", "default"),
        ],
        "/api/pdf-to-jpg" => vec![("mode", "pages")],
        other => panic!("no field set for {}", other),
    }
}

/// One acceptable upload plus the valid fields, with `field` set to `value`
fn form_with(route: &str, field: &str, value: &str) -> MultipartForm {
    let upload = match route {
        "/api/convert-images-to-pdf" => file_part("scan.png", "image/png", vec![0x89, 0x50]),
        _ => pdf_part("doc.pdf"),
    };
    valid_fields(route)
        .into_iter()
        .fold(MultipartForm::new().add_part("file", upload), |form, (name, valid)| {
            form.add_text(name, if name == field { value } else { valid })
        })
}

#[rstest]
#[case("/api/compress-pdf", "compressionLevel", "medium", "invalid_compression_level")]
#[case("/api/split-pdf", "split_mode", "halves", "invalid_split_mode_type")]
#[case("/api/split-pdf", "pages_range", "5-3", "invalid_page_ranges_type")]
#[case("/api/split-pdf", "merge_after", "yes", "invalid_merge_after_type")]
#[case("/api/add-page-number", "start_page", "0", "invalid_starting_number")]
#[case("/api/add-page-number", "vertical_position", "middle", "invalid_vertical_position")]
#[case("/api/add-page-number", "horizontal_position", "middle", "invalid_horizontal_position")]
#[case("/api/add-page-number", "text", "Page {n}", "invalid_text")]
#[case("/api/add-page-number", "font_family", "Helvetica", "invalid_font_family")]
#[case("/api/add-page-number", "font_size", "13", "invalid_font_size")]
#[case("/api/add-page-number", "font_color", "red", "invalid_font_color")]
#[case("/api/watermark", "vertical_position", "center", "invalid_vertical_position")]
#[case("/api/watermark", "text", "", "invalid_text")]
#[case("/api/watermark", "font_family", "Helvetica", "invalid_font_family")]
#[case("/api/watermark", "font_style", "bold", "invalid_font_style")]
#[case("/api/watermark", "transparency", "30", "invalid_transparency_type")]
#[case("/api/watermark", "layer", "middle", "invalid_layer_type")]
#[case("/api/watermark", "mosaic", "yes", "invalid_mosaic_type")]
#[case("/api/watermark", "mode", "stamp", "invalid_mode_option")]
#[case("/api/convert-images-to-pdf", "mergeAfter", "maybe", "invalid_merge_after_type")]
#[case("/api/convert-images-to-pdf", "orientation", "diagonal", "invalid_orientation_type")]
#[case("/api/convert-images-to-pdf", "margin", "huge", "invalid_margin_type")]
#[case("/api/pdf-to-jpg", "mode", "all", "invalid_mode_type_pdf_to_jpg")]
#[tokio::test]
async fn test_each_field_reports_its_own_code(
    #[case] route: &str,
    #[case] field: &str,
    #[case] value: &str,
    #[case] expected: &str,
) {
    let harness = Harness::new(Reply::Bytes(b"%PDF".to_vec()));

    let response = harness.post(route, form_with(route, field, value)).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response), expected);
    assert_eq!(harness.call_count(), 0);
}

#[rstest]
#[case("/api/compress-pdf")]
#[case("/api/split-pdf")]
#[case("/api/add-page-number")]
#[case("/api/watermark")]
#[case("/api/convert-images-to-pdf")]
#[case("/api/pdf-to-jpg")]
#[tokio::test]
async fn test_valid_fields_reach_the_remote_service(#[case] route: &str) {
    let data = match route {
        "/api/pdf-to-jpg" => vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00],
        _ => b"%PDF-1.7".to_vec(),
    };
    let harness = Harness::new(Reply::Bytes(data));

    let response = harness.post(route, form_with(route, "", "")).await;

    response.assert_status_ok();
    assert_eq!(harness.call_count(), 1);
}

#[tokio::test]
async fn test_middle_position_is_watermark_only() {
    let harness = Harness::new(Reply::Bytes(b"%PDF-1.7".to_vec()));

    let response = harness
        .post("/api/watermark", form_with("/api/watermark", "vertical_position", "middle"))
        .await;
    response.assert_status_ok();

    let response = harness
        .post(
            "/api/add-page-number",
            form_with("/api/add-page-number", "vertical_position", "middle"),
        )
        .await;
    assert_eq!(error_code(&response), "invalid_vertical_position");

    assert_eq!(harness.call_count(), 1);
}

#[tokio::test]
async fn test_upload_over_body_limit_is_too_large() {
    let harness = Harness::with_config(
        Reply::Bytes(b"%PDF".to_vec()),
        ServerConfig {
            max_upload_bytes: 1024,
            ..ServerConfig::default()
        },
    );

    let form = MultipartForm::new()
        .add_part("file", file_part("big.pdf", PDF, vec![b'%'; 4096]))
        .add_text("rotate", "90");
    let response = harness.post("/api/rotate-pdf", form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response), "file_too_large");
    assert_eq!(harness.call_count(), 0);

    let form = MultipartForm::new()
        .add_part("file", file_part("small.pdf", PDF, b"%PDF-1.4".to_vec()))
        .add_text("rotate", "90");
    harness.post("/api/rotate-pdf", form).await.assert_status_ok();
}

#[tokio::test]
async fn test_declared_type_is_checked() {
    let harness = Harness::new(Reply::Bytes(b"%PDF".to_vec()));

    let form = MultipartForm::new()
        .add_part("file", file_part("a.png", "image/png", vec![0x89, 0x50]))
        .add_text("rotate", "90");
    let response = harness.post("/api/rotate-pdf", form).await;

    assert_eq!(error_code(&response), "only_pdf_is_allowed_to_rotate");
}

#[tokio::test]
async fn test_file_cap_plus_one_is_rejected() {
    let harness = Harness::new(Reply::Bytes(b"%PDF".to_vec()));

    let form = (0..3).fold(MultipartForm::new(), |form, i| {
        form.add_part("file", pdf_part(&format!("{}.pdf", i)))
    });
    let response = harness.post("/api/compress-pdf", form).await;
    assert_eq!(error_code(&response), "you_can_converted_2_files");

    let form = (0..5).fold(MultipartForm::new(), |form, i| {
        form.add_part("file", file_part(&format!("{}.jpg", i), "image/jpeg", vec![0xFF]))
    });
    let response = harness.post("/api/convert-images-to-pdf", form).await;
    assert_eq!(error_code(&response), "you_can_process_4_files");

    assert_eq!(harness.call_count(), 0);
}

#[tokio::test]
async fn test_exact_cap_proceeds_to_field_checks() {
    let harness = Harness::new(Reply::Bytes(b"%PDF".to_vec()));

    let form = (0..4)
        .fold(MultipartForm::new(), |form, i| {
            form.add_part("file", file_part(&format!("{}.png", i), "image/png", vec![0x89]))
        })
        .add_text("orientation", "diagonal");
    let response = harness.post("/api/convert-images-to-pdf", form).await;

    assert_eq!(error_code(&response), "invalid_orientation_type");
}

#[tokio::test]
async fn test_merge_needs_two_files() {
    let harness = Harness::new(Reply::Bytes(b"%PDF".to_vec()));

    let form = MultipartForm::new().add_part("file", pdf_part("a.pdf"));
    let response = harness.post("/api/merge-pdf", form).await;

    assert_eq!(error_code(&response), "require_min_2_pdf_to_merge");
}

#[tokio::test]
async fn test_lock_rejects_encrypted_before_password_check() {
    let harness = Harness::new(Reply::Bytes(b"%PDF".to_vec()));

    let form = MultipartForm::new()
        .add_part("file", file_part("secret.pdf", PDF, encrypted_pdf()))
        .add_text("password", "ab");
    let response = harness.post("/api/lock-pdf", form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response), "pdf_already_encrypted");
}

#[tokio::test]
async fn test_lock_rejects_short_password() {
    let harness = Harness::new(Reply::Bytes(b"%PDF".to_vec()));

    let form = MultipartForm::new()
        .add_part("file", file_part("plain.pdf", PDF, plain_pdf()))
        .add_text("password", "ab");
    let response = harness.post("/api/lock-pdf", form).await;

    assert_eq!(error_code(&response), "password_min_3_caracteres");
    assert_eq!(harness.call_count(), 0);
}

#[tokio::test]
async fn test_lock_plain_document() {
    let harness = Harness::new(Reply::Bytes(b"%PDF-1.7 locked".to_vec()));

    let form = MultipartForm::new()
        .add_part("file", file_part("plain.pdf", PDF, plain_pdf()))
        .add_text("password", "abc");
    let response = harness.post("/api/lock-pdf", form).await;

    response.assert_status_ok();
    assert!(header_value(&response, header::CONTENT_DISPOSITION).contains("lock.pdf"));

    let calls = harness.tasks.calls.lock().unwrap();
    assert_eq!(calls[0].task.tool, "protect");
    assert_eq!(calls[0].task.params["password"], json!("abc"));
}

#[tokio::test]
async fn test_unlock_rejects_plain_document() {
    let harness = Harness::new(Reply::Bytes(b"%PDF".to_vec()));

    let form = MultipartForm::new().add_part("file", file_part("plain.pdf", PDF, plain_pdf()));
    let response = harness.post("/api/unlock-pdf", form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response), "pdf_already_unlock");
}

#[tokio::test]
async fn test_unlock_encrypted_document() {
    let harness = Harness::new(Reply::Bytes(b"%PDF-1.7 open".to_vec()));

    let form = MultipartForm::new().add_part("file", file_part("s.pdf", PDF, encrypted_pdf()));
    let response = harness.post("/api/unlock-pdf", form).await;

    response.assert_status_ok();
    assert_eq!(harness.tasks.calls.lock().unwrap()[0].task.tool, "unlock");
}

#[tokio::test]
async fn test_rotate_end_to_end() {
    let harness = Harness::new(Reply::Bytes(b"%PDF-1.7 rotated".to_vec()));

    let form = MultipartForm::new()
        .add_part("file", pdf_part("scan.pdf"))
        .add_text("rotate", "90");
    let response = harness.post("/api/rotate-pdf", form).await;

    response.assert_status_ok();
    assert_eq!(header_value(&response, header::CONTENT_TYPE), "application/pdf");
    assert!(header_value(&response, header::CONTENT_DISPOSITION).contains("rotated.pdf"));
    assert_eq!(&response.as_bytes()[..], b"%PDF-1.7 rotated");

    let calls = harness.tasks.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].task.tool, "rotate");
    assert_eq!(calls[0].task.file_options["rotate"], json!(90));
    assert_eq!(calls[0].files[0].file_name, "scan.pdf");
    assert!(calls[0].files_existed);
}

#[tokio::test]
async fn test_split_end_to_end_returns_rebuilt_archive() {
    let remote_zip = zip_of(&[
        ("scan/scan-1.pdf", "%PDF one"),
        ("scan/scan-2.pdf", "%PDF two"),
        ("scan/log.txt", "ignored"),
    ]);
    let harness = Harness::new(Reply::Bytes(remote_zip));

    let form = MultipartForm::new()
        .add_part("file", pdf_part("scan.pdf"))
        .add_text("split_mode", "ranges")
        .add_text("pages_range", "1,3,5-7")
        .add_text("merge_after", "false");
    let response = harness.post("/api/split-pdf", form).await;

    response.assert_status_ok();
    assert_eq!(header_value(&response, header::CONTENT_TYPE), "application/zip");
    assert!(header_value(&response, header::CONTENT_DISPOSITION).contains("split.zip"));
    assert_eq!(
        entry_names(response.as_bytes()).unwrap(),
        vec!["scan-1.pdf", "scan-2.pdf"]
    );

    let calls = harness.tasks.calls.lock().unwrap();
    assert_eq!(calls[0].task.params["split_mode"], json!("ranges"));
    assert_eq!(calls[0].task.params["ranges"], json!("1,3,5-7"));
    assert_eq!(calls[0].task.params["merge_after"], json!(false));
}

#[tokio::test]
async fn test_split_rejects_empty_ranges() {
    let harness = Harness::new(Reply::Bytes(b"%PDF".to_vec()));

    let form = MultipartForm::new()
        .add_part("file", pdf_part("scan.pdf"))
        .add_text("split_mode", "ranges")
        .add_text("pages_range", " , ");
    let response = harness.post("/api/split-pdf", form).await;

    assert_eq!(error_code(&response), "invalid_page_ranges_type");
}

#[tokio::test]
async fn test_merged_request_still_follows_archive_bytes() {
    let remote_zip = zip_of(&[("out/a.pdf", "%PDF a"), ("out/b.pdf", "%PDF b")]);
    let harness = Harness::new(Reply::Bytes(remote_zip));

    let form = MultipartForm::new()
        .add_part("file", pdf_part("scan.pdf"))
        .add_text("split_mode", "ranges")
        .add_text("pages_range", "1-2")
        .add_text("merge_after", "true");
    let response = harness.post("/api/split-pdf", form).await;

    response.assert_status_ok();
    assert_eq!(header_value(&response, header::CONTENT_TYPE), "application/zip");
}

#[tokio::test]
async fn test_pdf_to_jpg_single_image() {
    let harness = Harness::new(Reply::Bytes(vec![0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x10]));

    let form = MultipartForm::new()
        .add_part("file", pdf_part("slides.pdf"))
        .add_text("mode", "pages");
    let response = harness.post("/api/pdf-to-jpg", form).await;

    response.assert_status_ok();
    assert_eq!(header_value(&response, header::CONTENT_TYPE), "image/jpeg");
    assert!(header_value(&response, header::CONTENT_DISPOSITION).contains("pdf-to-jpg.jpg"));
}

#[tokio::test]
async fn test_compress_names_result_after_upload() {
    let harness = Harness::new(Reply::Bytes(b"%PDF-1.7 small".to_vec()));

    let form = MultipartForm::new().add_part("file", pdf_part("report.pdf"));
    let response = harness.post("/api/compress-pdf", form).await;

    response.assert_status_ok();
    assert!(header_value(&response, header::CONTENT_DISPOSITION)
        .contains("compressed-report.pdf"));
    assert_eq!(
        harness.tasks.calls.lock().unwrap()[0].task.params["compression_level"],
        json!("recommended")
    );
}

#[tokio::test]
async fn test_unrecognized_output_is_service_unavailable() {
    let harness = Harness::new(Reply::Bytes(b"<html>oops</html>".to_vec()));

    let form = MultipartForm::new()
        .add_part("file", pdf_part("slides.pdf"))
        .add_text("mode", "pages");
    let response = harness.post("/api/pdf-to-jpg", form).await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(error_code(&response), "service_unavailable");
}

#[tokio::test]
async fn test_archive_without_matching_entries_is_service_unavailable() {
    let harness = Harness::new(Reply::Bytes(zip_of(&[("out/readme.txt", "x")])));

    let form = MultipartForm::new()
        .add_part("file", pdf_part("a.pdf"))
        .add_part("file", pdf_part("b.pdf"));
    let response = harness.post("/api/merge-pdf", form).await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_missing_credentials() {
    let harness = Harness::with_credentials(Reply::Bytes(b"%PDF".to_vec()), None);

    let form = MultipartForm::new()
        .add_part("file", pdf_part("a.pdf"))
        .add_text("rotate", "90");
    let response = harness.post("/api/rotate-pdf", form).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_code(&response), "missing_ilovepdf_keys|rotate_pdf");
    assert_eq!(harness.call_count(), 0);
}

#[tokio::test]
async fn test_remote_failure_cleans_up_temp_files() {
    let harness = Harness::new(Reply::Fail);

    let form = MultipartForm::new()
        .add_part("file", pdf_part("same.pdf"))
        .add_part("file", pdf_part("same.pdf"));
    let response = harness.post("/api/merge-pdf", form).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_code(&response), "internal_server_erro|merge_pdf");

    let calls = harness.tasks.calls.lock().unwrap();
    assert!(calls[0].files_existed);
    assert_ne!(calls[0].files[0].path, calls[0].files[1].path);
    assert!(calls[0].files.iter().all(|f| !f.path.exists()));
    assert!(harness.scratch_is_empty());
}

#[tokio::test]
async fn test_success_cleans_up_temp_files() {
    let harness = Harness::new(Reply::Bytes(b"%PDF-1.7".to_vec()));

    let form = MultipartForm::new()
        .add_part("file", pdf_part("a.pdf"))
        .add_text("rotate", "180");
    harness.post("/api/rotate-pdf", form).await.assert_status_ok();

    let calls = harness.tasks.calls.lock().unwrap();
    assert!(!calls[0].files[0].path.exists());
    assert!(harness.scratch_is_empty());
}
