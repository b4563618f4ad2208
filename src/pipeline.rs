//! The request pipeline shared by every tool
//!
//! parse -> validate -> map to a remote task -> write scratch files ->
//! run the remote task -> classify and repackage -> respond.
//! The scratch directory is closed on every path out of the remote step.

use crate::error::ToolError;
use crate::form::{UploadRequest, FILE_FIELD};
use crate::output::{attachment, classify, rebuild_archive, Payload, ZIP_MIME};
use crate::remote::{ILovePdfCredentials, RemoteTask};
use crate::scratch::Scratch;
use crate::server::AppState;
use crate::tools::ToolSpec;
use crate::validate::{validate, ValidatedForm};
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::Instrument;

/// Code reported when the upload exceeds the configured body limit
pub const FILE_TOO_LARGE: &str = "file_too_large";

/// Handle one tool request end to end.
pub async fn handle_tool(
    tool: &'static ToolSpec,
    state: AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("tool", tool = tool.operation, %request_id);

    async move {
        match run(tool, &state, multipart).await {
            Ok(response) => response,
            Err(err) => {
                tracing::info!(code = %err.code(), status = err.status().as_u16(), "request failed");
                err.into_response()
            }
        }
    }
    .instrument(span)
    .await
}

async fn run(
    tool: &'static ToolSpec,
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ToolError> {
    let request = read_request(tool, multipart).await?;
    let form = validate_blocking(tool, request).await?;
    let task = (tool.build_task)(&form);

    let credentials = state
        .config
        .credentials
        .as_ref()
        .ok_or(ToolError::MissingCredentials {
            operation: tool.operation,
        })?;

    let data = execute_remote(tool, state, credentials, &task, &form).await?;
    respond(tool, &form, data).await
}

/// A body that is not a readable multipart form counts as "no files";
/// one cut off by the upload limit is reported as too large.
async fn read_request(
    tool: &ToolSpec,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<UploadRequest, ToolError> {
    let missing = ToolError::validation(tool.schema.files.missing);

    let multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "request is not multipart");
        missing.clone()
    })?;

    UploadRequest::from_multipart(multipart, FILE_FIELD)
        .await
        .map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                tracing::info!(error = %e, "upload exceeds the body limit");
                return ToolError::validation(FILE_TOO_LARGE);
            }
            tracing::warn!(error = %e, "failed to read multipart body");
            missing
        })
}

/// The schema walk includes the qpdf encryption check, so it runs on the
/// blocking pool.
async fn validate_blocking(
    tool: &'static ToolSpec,
    request: UploadRequest,
) -> Result<ValidatedForm, ToolError> {
    let span = tracing::Span::current();
    tokio::task::spawn_blocking(move || span.in_scope(|| validate(&tool.schema, request)))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "validation task failed");
            ToolError::Internal {
                operation: tool.operation,
            }
        })?
}

async fn execute_remote(
    tool: &ToolSpec,
    state: &AppState,
    credentials: &ILovePdfCredentials,
    task: &RemoteTask,
    form: &ValidatedForm,
) -> Result<Vec<u8>, ToolError> {
    let internal = || ToolError::Internal {
        operation: tool.operation,
    };

    let mut scratch = Scratch::new_in(&state.config.scratch_dir).map_err(|e| {
        tracing::error!(error = %e, "failed to create scratch directory");
        internal()
    })?;

    let result: crate::Result<Vec<u8>> = async {
        let mut artifacts = Vec::with_capacity(form.files.len());
        for file in &form.files {
            artifacts.push(scratch.write(file).await?);
        }
        state.tasks.execute(credentials, task, &artifacts).await
    }
    .await;

    scratch.close();

    result.map_err(|e| {
        tracing::error!(error = %e, remote_tool = task.tool, "remote task failed");
        internal()
    })
}

/// Result bytes ready to send
#[derive(Debug)]
struct Packaged {
    content_type: &'static str,
    archive: bool,
    body: Vec<u8>,
}

/// Classify the remote output and rebuild archives down to the expected
/// document kind.
fn package(tool: &ToolSpec, data: Vec<u8>) -> Result<Packaged, ToolError> {
    let output = &tool.output;
    match classify(data, output.kind) {
        Payload::Single { kind, data } => Ok(Packaged {
            content_type: kind.mime_type(),
            archive: false,
            body: data,
        }),
        Payload::Archive(data) => match rebuild_archive(&data, output.kind.extension()) {
            Ok(Some(rebuilt)) => Ok(Packaged {
                content_type: ZIP_MIME,
                archive: true,
                body: rebuilt,
            }),
            Ok(None) => {
                tracing::warn!(
                    extension = output.kind.extension(),
                    "remote archive has no matching entries"
                );
                Err(ToolError::ServiceUnavailable)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to rebuild archive");
                Err(ToolError::Internal {
                    operation: tool.operation,
                })
            }
        },
        Payload::Unrecognized { leading } => {
            tracing::warn!(leading = ?leading, "unrecognized remote output");
            Err(ToolError::ServiceUnavailable)
        }
    }
}

async fn respond(
    tool: &'static ToolSpec,
    form: &ValidatedForm,
    data: Vec<u8>,
) -> Result<Response, ToolError> {
    let internal = || ToolError::Internal {
        operation: tool.operation,
    };

    let span = tracing::Span::current();
    let packaged = tokio::task::spawn_blocking(move || span.in_scope(|| package(tool, data)))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "packaging task failed");
            internal()
        })??;

    let file_name = if packaged.archive {
        tool.output.archive_name.to_string()
    } else {
        tool.output.single_name.render(form)
    };

    tracing::info!(
        content_type = packaged.content_type,
        file_name = %file_name,
        bytes = packaged.body.len(),
        "sending result"
    );

    attachment(packaged.content_type, &file_name, packaged.body).map_err(|e| {
        tracing::error!(error = %e, "failed to build response");
        internal()
    })
}
