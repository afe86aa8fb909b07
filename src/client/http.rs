// src/client/http.rs

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Instant;

use crate::client::{EvaluationService, UploadFile};
use crate::config::ClientConfig;
use crate::errors::{ClientError, Result};
use crate::models::{EvaluateResponse, EvaluationRequest, UploadResponse};

/// Talks to the evaluation service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpEvaluationClient {
    client: Client,
    config: ClientConfig,
}

impl HttpEvaluationClient {
    /// Creates a new `HttpEvaluationClient`.
    pub fn new(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// Decodes the JSON envelope whatever the status; the service reports its own
/// failures as `{ success: false, error }` with a 4xx/5xx status.
async fn decode_envelope<T: DeserializeOwned>(resp: reqwest::Response, started: Instant) -> Result<T> {
    let status = resp.status();
    let latency_ms = started.elapsed().as_millis() as u64;
    log::debug!("Response status {} ({}ms)", status, latency_ms);

    let body = resp.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| {
        log::error!("Undecodable response body (status {}): {}", status, e);
        if status.is_success() {
            ClientError::JsonParse(e)
        } else {
            ClientError::Evaluation(format!(
                "service answered {} with a non-JSON body: {}",
                status.as_u16(),
                String::from_utf8_lossy(&body).trim()
            ))
        }
    })
}

impl EvaluationService for HttpEvaluationClient {
    async fn upload(&self, file: UploadFile) -> Result<UploadResponse> {
        let url = self.config.upload_url();
        log::info!("Uploading {} ({} bytes) to {}", file.filename, file.contents.len(), url);

        let mime = file.mime_type();
        let part = Part::bytes(file.contents)
            .file_name(file.filename)
            .mime_str(&mime)?;
        let form = Form::new().part("file", part);

        let started = Instant::now();
        let resp = self.client.post(&url).multipart(form).send().await?;
        decode_envelope(resp, started).await
    }

    async fn evaluate(&self, request: &EvaluationRequest) -> Result<EvaluateResponse> {
        let url = self.config.evaluate_url();
        log::info!(
            "Submitting {} bytes of {} code with {} test case(s) to {}",
            request.code.len(),
            request.language,
            request.test_cases.len(),
            url
        );

        let started = Instant::now();
        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;
        decode_envelope(resp, started).await
    }
}
