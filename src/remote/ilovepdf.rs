//! iLovePDF REST client
//!
//! Protocol, per task:
//! 1. `GET  {api}/v1/start/{tool}`       -> assigned worker server + task id
//! 2. `POST {worker}/v1/upload`          -> one call per file, multipart
//! 3. `POST {worker}/v1/process`         -> JSON parameters, blocks until done
//! 4. `GET  {worker}/v1/download/{task}` -> result bytes
//!
//! Every call carries a self-signed HS256 token built from the project
//! key pair.

use super::{ILovePdfCredentials, RemoteTask, TaskService};
use crate::error::{Error, Result};
use crate::scratch::TempArtifact;
use async_trait::async_trait;
use futures_util::StreamExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use url::Url;

/// Public iLovePDF API entry point
pub const DEFAULT_API_URL: &str = "https://api.ilovepdf.com";

const TOKEN_ISSUER: &str = "api.ilovepdf.com";
const TOKEN_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iss: String,
    aud: String,
    iat: i64,
    nbf: i64,
    exp: i64,
    /// The project public key identifies the caller
    jti: String,
}

#[derive(Debug, Deserialize)]
struct StartResponse {
    server: String,
    task: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    server_filename: String,
}

/// Task runner talking to the iLovePDF REST API
#[derive(Debug, Clone)]
pub struct ILovePdfClient {
    http: reqwest::Client,
    base_url: Url,
    max_download_bytes: u64,
}

impl ILovePdfClient {
    /// Create a client.
    ///
    /// `timeout` bounds every HTTP call; `max_download_bytes` caps the result
    /// size accepted from the worker.
    pub fn new(base_url: Url, timeout: Duration, max_download_bytes: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::HttpRequest)?;

        Ok(Self {
            http,
            base_url: with_trailing_slash(base_url),
            max_download_bytes,
        })
    }

    async fn start(&self, token: &str, tool: &str) -> Result<(Url, String)> {
        let url = self.base_url.join(&format!("v1/start/{}", tool))?;
        let response = self.http.get(url).bearer_auth(token).send().await?;
        let started: StartResponse = ensure_success(response, "start")?.json().await?;

        if started.server.is_empty() || started.task.is_empty() {
            return Err(Error::RemoteProtocol {
                stage: "start",
                reason: "missing server or task id".to_string(),
            });
        }

        let worker = Url::parse(&format!("{}://{}/", self.base_url.scheme(), started.server))?;
        Ok((worker, started.task))
    }

    async fn upload(
        &self,
        worker: &Url,
        token: &str,
        task_id: &str,
        artifact: &TempArtifact,
    ) -> Result<String> {
        let data = tokio::fs::read(&artifact.path).await?;
        let part = Part::bytes(data).file_name(artifact.file_name.clone());
        let form = Form::new()
            .text("task", task_id.to_string())
            .part("file", part);

        let response = self
            .http
            .post(worker.join("v1/upload")?)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        let uploaded: UploadResponse = ensure_success(response, "upload")?.json().await?;
        Ok(uploaded.server_filename)
    }

    async fn process(&self, worker: &Url, token: &str, body: &Value) -> Result<()> {
        let response = self
            .http
            .post(worker.join("v1/process")?)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        ensure_success(response, "process")?;
        Ok(())
    }

    /// Stream the result with incremental size checking
    async fn download(&self, worker: &Url, token: &str, task_id: &str) -> Result<Vec<u8>> {
        let url = worker.join(&format!("v1/download/{}", task_id))?;
        let response = self.http.get(url).bearer_auth(token).send().await?;
        let response = ensure_success(response, "download")?;

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_download_bytes {
                return Err(Error::DownloadTooLarge {
                    size: content_length,
                    max_size: self.max_download_bytes,
                });
            }
        }

        let mut data = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(Error::HttpRequest)?;
            data.extend_from_slice(&chunk);
            if data.len() as u64 > self.max_download_bytes {
                return Err(Error::DownloadTooLarge {
                    size: data.len() as u64,
                    max_size: self.max_download_bytes,
                });
            }
        }

        Ok(data)
    }
}

#[async_trait]
impl TaskService for ILovePdfClient {
    async fn execute(
        &self,
        credentials: &ILovePdfCredentials,
        task: &RemoteTask,
        files: &[TempArtifact],
    ) -> Result<Vec<u8>> {
        let token = sign_token(credentials, chrono::Utc::now().timestamp())?;

        let (worker, task_id) = self.start(&token, task.tool).await?;
        tracing::info!(tool = task.tool, task = %task_id, server = %worker, "remote task started");

        let mut uploaded = Vec::with_capacity(files.len());
        for artifact in files {
            let server_filename = self.upload(&worker, &token, &task_id, artifact).await?;
            uploaded.push((server_filename, artifact.file_name.clone()));
        }

        let body = process_body(&task_id, task, &uploaded);
        self.process(&worker, &token, &body).await?;

        let data = self.download(&worker, &token, &task_id).await?;
        tracing::info!(task = %task_id, bytes = data.len(), "remote task finished");
        Ok(data)
    }
}

fn sign_token(credentials: &ILovePdfCredentials, now: i64) -> Result<String> {
    let claims = Claims {
        iss: TOKEN_ISSUER.to_string(),
        aud: String::new(),
        iat: now,
        nbf: now,
        exp: now + TOKEN_LIFETIME_SECS,
        jti: credentials.public_key.clone(),
    };
    let key = EncodingKey::from_secret(credentials.secret_key.as_bytes());
    Ok(encode(&Header::default(), &claims, &key)?)
}

/// Body of the `process` call: tool parameters plus task, tool and files.
fn process_body(task_id: &str, task: &RemoteTask, uploaded: &[(String, String)]) -> Value {
    let files: Vec<Value> = uploaded
        .iter()
        .map(|(server_filename, filename)| {
            let mut entry = Map::new();
            entry.insert("server_filename".to_string(), Value::from(server_filename.as_str()));
            entry.insert("filename".to_string(), Value::from(filename.as_str()));
            for (key, value) in &task.file_options {
                entry.insert(key.clone(), value.clone());
            }
            Value::Object(entry)
        })
        .collect();

    let mut body = task.params.clone();
    body.insert("task".to_string(), Value::from(task_id));
    body.insert("tool".to_string(), Value::from(task.tool));
    body.insert("files".to_string(), Value::Array(files));
    Value::Object(body)
}

fn ensure_success(response: reqwest::Response, stage: &'static str) -> Result<reqwest::Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(Error::RemoteStatus {
            stage,
            status: status.as_u16(),
        });
    }
    Ok(response)
}

/// Relative joins replace the last path segment unless the base ends in `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
