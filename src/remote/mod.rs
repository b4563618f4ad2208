//! Remote task orchestration
//!
//! Tools describe the work as a [`RemoteTask`]; a [`TaskService`] runs it
//! end to end (start, upload, process, download) and hands back the raw
//! result bytes.

mod ilovepdf;

pub use ilovepdf::{ILovePdfClient, DEFAULT_API_URL};

use crate::error::Result;
use crate::scratch::TempArtifact;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;

/// Key pair issued by iLovePDF for a project
#[derive(Clone, PartialEq, Eq)]
pub struct ILovePdfCredentials {
    pub public_key: String,
    pub secret_key: String,
}

impl ILovePdfCredentials {
    pub fn new(public_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Build from optional parts; both must be present and non-blank.
    pub fn from_parts(public_key: Option<String>, secret_key: Option<String>) -> Option<Self> {
        match (public_key, secret_key) {
            (Some(public), Some(secret)) if !public.trim().is_empty() && !secret.trim().is_empty() => {
                Some(Self::new(public, secret))
            }
            _ => None,
        }
    }
}

impl fmt::Debug for ILovePdfCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ILovePdfCredentials")
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// One unit of remote work
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteTask {
    /// Remote tool name (`compress`, `merge`, `split`, ...)
    pub tool: &'static str,
    /// Parameters merged into the `process` request body
    pub params: Map<String, Value>,
    /// Extra keys attached to every entry of the `files` array
    pub file_options: Map<String, Value>,
}

impl RemoteTask {
    pub fn new(tool: &'static str) -> Self {
        Self {
            tool,
            params: Map::new(),
            file_options: Map::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn file_option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.file_options.insert(key.to_string(), value.into());
        self
    }
}

/// Runs remote tasks to completion
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Execute `task` over `files` and return the downloaded result.
    async fn execute(
        &self,
        credentials: &ILovePdfCredentials,
        task: &RemoteTask,
        files: &[TempArtifact],
    ) -> Result<Vec<u8>>;
}
