//! PDF Toolbox Server Library
//!
//! HTTP backend for a set of PDF tools. Each endpoint validates its
//! multipart upload, hands the work to the iLovePDF API and streams the
//! result back:
//! - compress, merge, split, rotate
//! - page numbers, watermark
//! - lock / unlock
//! - images to PDF, PDF to JPEG, office documents to PDF

pub mod error;
pub mod form;
pub mod output;
pub mod pdf;
pub mod pipeline;
pub mod remote;
pub mod scratch;
pub mod server;
pub mod tools;
pub mod validate;

pub use error::{Error, Result, ToolError};
pub use remote::{ILovePdfClient, ILovePdfCredentials, RemoteTask, TaskService};
pub use server::{router, run_server, run_server_with_config, AppState, ServerConfig};
