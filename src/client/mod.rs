// src/client/mod.rs

use std::path::Path;

use crate::errors::Result;
use crate::models::{EvaluateResponse, EvaluationRequest, UploadResponse};

pub mod http;

pub use http::HttpEvaluationClient;

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    pub contents: Vec<u8>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            contents: contents.into(),
        }
    }

    /// Reads `path` from disk, keeping only its file name for the upload.
    pub async fn read(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self { filename, contents })
    }

    /// MIME type guessed from the file extension.
    pub fn mime_type(&self) -> String {
        mime_guess::from_path(&self.filename)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }
}

/// The external evaluation service.
///
/// Both calls resolve to the service's JSON envelope, whatever its HTTP status.
/// `Err` is reserved for transport failures and undecodable bodies.
pub trait EvaluationService: Send + Sync {
    /// Sends a file to `/api/upload` and returns the extracted code.
    fn upload(&self, file: UploadFile) -> impl std::future::Future<Output = Result<UploadResponse>> + Send;

    /// Sends a request to `/api/evaluate`.
    fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> impl std::future::Future<Output = Result<EvaluateResponse>> + Send;
}
