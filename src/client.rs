//! HTTP client for the remote answering service.
//!
//! Wraps the service's three endpoints (`POST /qa`, `POST /index-pdf`,
//! `GET /info`) plus its `GET /health` probe. Every failure, whether
//! transport, HTTP status or decoding, surfaces as a [`ClientError`] whose
//! message reads `Failed to <operation>: <reason>`.

use crate::models::{AnswerResult, HealthStatus, IndexRequest, IndexResponse, QaRequest};
use crate::url_validator::{endpoint, UrlValidationError};

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

// ============================================================================
// Errors
// ============================================================================

/// The backend call that failed, as it reads in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    AnswerQuestion,
    IndexPdf,
    SystemInfo,
    Health,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::AnswerQuestion => "answer question",
            Operation::IndexPdf => "index PDF",
            Operation::SystemInfo => "get system info",
            Operation::Health => "check health",
        })
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to create HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("Failed to {op}: {source}")]
    Endpoint {
        op: Operation,
        source: UrlValidationError,
    },

    #[error("Failed to {op}: {source}")]
    Request {
        op: Operation,
        source: reqwest::Error,
    },

    #[error("Failed to {op}: {}", status_reason(.status, .detail.as_deref()))]
    Status {
        op: Operation,
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("Failed to {op}: invalid response: {source}")]
    Decode {
        op: Operation,
        source: serde_json::Error,
    },
}

impl ClientError {
    pub fn operation(&self) -> Option<Operation> {
        match self {
            ClientError::Build(_) => None,
            ClientError::Endpoint { op, .. }
            | ClientError::Request { op, .. }
            | ClientError::Status { op, .. }
            | ClientError::Decode { op, .. } => Some(*op),
        }
    }
}

fn status_reason(status: &StatusCode, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("{} (status code {})", detail, status.as_u16()),
        None => format!("Request failed with status code {}", status.as_u16()),
    }
}

/// Pull a human-readable message out of a FastAPI-style error body:
/// `{"detail": "..."}` or `{"detail": [{"msg": "..."}, ...]}`.
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        serde_json::Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}

// ============================================================================
// Client
// ============================================================================

pub struct AnswerClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AnswerClient {
    /// `base_url` should come from `url_validator::validate_service_url`.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, op: Operation, path: &str) -> Result<Url, ClientError> {
        endpoint(&self.base_url, path).map_err(|source| ClientError::Endpoint { op, source })
    }

    /// `POST /qa` with `{query, top_k}`.
    pub async fn answer_question(&self, query: &str, top_k: u32) -> Result<AnswerResult, ClientError> {
        let op = Operation::AnswerQuestion;
        let body = QaRequest {
            query: query.to_string(),
            top_k: Some(top_k),
        };
        let result: AnswerResult = self
            .execute(op, self.http.post(self.url(op, "qa")?).json(&body))
            .await?;
        debug!(
            answer_len = result.answer.len(),
            citations = result.citations.len(),
            "answer received"
        );
        Ok(result)
    }

    /// `POST /index-pdf` with `{file_path}`.
    pub async fn index_pdf(&self, file_path: &str) -> Result<IndexResponse, ClientError> {
        let op = Operation::IndexPdf;
        let body = IndexRequest {
            file_path: file_path.to_string(),
        };
        self.execute(op, self.http.post(self.url(op, "index-pdf")?).json(&body))
            .await
    }

    /// `GET /info`. The payload is not interpreted.
    pub async fn system_info(&self) -> Result<serde_json::Value, ClientError> {
        let op = Operation::SystemInfo;
        self.execute(op, self.http.get(self.url(op, "info")?)).await
    }

    /// `GET /health`.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let op = Operation::Health;
        self.execute(op, self.http.get(self.url(op, "health")?)).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        op: Operation,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        debug!(operation = %op, "calling answering service");

        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Request { op, source })?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| ClientError::Request { op, source })?;

        if !status.is_success() {
            return Err(ClientError::Status {
                op,
                status,
                detail: error_detail(&text),
            });
        }

        serde_json::from_str(&text).map_err(|source| ClientError::Decode { op, source })
    }
}
