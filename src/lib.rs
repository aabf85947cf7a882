//! Evidence library - citation-aware answer viewer.
//!
//! Sends questions and PDF index requests to a remote answering service and
//! renders the returned answers with highlighted citation markers, a source
//! list and a citation frequency heatmap.
//!
//! - `citations`: marker parsing, frequency and metadata resolution
//! - `heatmap`: frequency to colour mapping
//! - `annotation`: composes the above into renderable views
//! - `client`: HTTP client for the answering service
//! - `templates` / `handlers`: the web interface

use axum::{
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::Level;
use url::Url;

pub mod annotation;
pub mod citations;
pub mod client;
pub mod handlers;
pub mod heatmap;
pub mod models;
pub mod templates;
pub mod url_validator;

#[cfg(test)]
pub(crate) mod test_support;

// ============================================================================
// Configuration
// ============================================================================

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_TOP_K: u32 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LOG_LEVEL: Level = Level::INFO;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}: invalid value {value:?}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("EVIDENCE_API_URL: {0}")]
    ServiceUrl(#[from] url_validator::UrlValidationError),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub bind_addr: SocketAddr,
    pub top_k: u32,
    pub timeout: Duration,
    pub log_level: Level,
}

impl Config {
    /// Read configuration from the environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; unset keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = url_validator::validate_service_url(
            get("EVIDENCE_API_URL").as_deref().unwrap_or(DEFAULT_API_URL),
        )?;

        let bind_addr = match get("EVIDENCE_BIND") {
            Some(v) => parse_value("EVIDENCE_BIND", &v)?,
            None => DEFAULT_BIND_ADDR
                .parse()
                .map_err(|e: std::net::AddrParseError| invalid("EVIDENCE_BIND", DEFAULT_BIND_ADDR, e))?,
        };

        let top_k = match get("EVIDENCE_TOP_K") {
            Some(v) => parse_value::<u32>("EVIDENCE_TOP_K", &v)?,
            None => DEFAULT_TOP_K,
        };
        if top_k == 0 {
            return Err(invalid("EVIDENCE_TOP_K", "0", "must be at least 1"));
        }

        let timeout_secs = match get("EVIDENCE_TIMEOUT_SECS") {
            Some(v) => parse_value::<u64>("EVIDENCE_TIMEOUT_SECS", &v)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let log_level = match get("EVIDENCE_LOG") {
            Some(v) => parse_value("EVIDENCE_LOG", &v)?,
            None => DEFAULT_LOG_LEVEL,
        };

        Ok(Self {
            api_url,
            bind_addr,
            top_k,
            timeout: Duration::from_secs(timeout_secs),
            log_level,
        })
    }
}

fn invalid(key: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| invalid(key, value, e))
}

// ============================================================================
// Request Busy Flags
// ============================================================================

/// Marks a request kind as in flight. A second request of the same kind is
/// refused rather than cancelling the first.
#[derive(Debug, Default)]
pub struct BusyFlag(AtomicBool);

impl BusyFlag {
    /// Claim the flag; `None` if a request already holds it.
    pub fn try_acquire(&self) -> Option<BusyGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(&self.0))
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Releases its flag on drop.
#[derive(Debug)]
pub struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// ============================================================================
// Q/A Session
// ============================================================================

#[derive(Debug, Clone)]
pub struct AnsweredQuery {
    pub result: models::AnswerResult,
    pub answered_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexStatus {
    Indexed(String),
    Failed(String),
}

impl IndexStatus {
    pub fn message(&self) -> &str {
        match self {
            IndexStatus::Indexed(m) | IndexStatus::Failed(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, IndexStatus::Failed(_))
    }
}

/// What the interface currently shows. The answer is replaced wholesale by
/// each successful query; a failed query only sets `error`.
#[derive(Debug, Clone, Default)]
pub struct QaSession {
    pub query: String,
    pub answer: Option<AnsweredQuery>,
    pub error: Option<String>,
    pub index_status: Option<IndexStatus>,
}

// ============================================================================
// Application State
// ============================================================================

pub struct AppState {
    pub config: Config,
    pub client: client::AnswerClient,
    pub session: Mutex<QaSession>,
    pub asking: BusyFlag,
    pub indexing: BusyFlag,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, client::ClientError> {
        let client = client::AnswerClient::new(config.api_url.clone(), config.timeout)?;
        Ok(Self {
            config,
            client,
            session: Mutex::new(QaSession::default()),
            asking: BusyFlag::default(),
            indexing: BusyFlag::default(),
        })
    }

    /// Lock the session. A poisoned lock still holds a usable session.
    pub fn session(&self) -> MutexGuard<'_, QaSession> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Interface
        .route("/", get(handlers::index))
        .route("/ask", post(handlers::ask))
        .route("/index-pdf", post(handlers::index_pdf))
        .route("/info", get(handlers::info))
        // JSON API
        .route("/api/annotate", post(handlers::api_annotate))
        .route("/api/ask", post(handlers::api_ask))
        .route("/api/info", get(handlers::api_info))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Re-export commonly used types
pub use annotation::{annotate, AnnotatedAnswer, CitationEntry, Heatmap, HeatmapTile};
pub use citations::{aggregate, compare_ids, parse, resolve, sorted_entries, FrequencyTable};
pub use client::{AnswerClient, ClientError, Operation};
pub use heatmap::{color_for, HslColor, Legend};
pub use models::{
    AnswerResult, CitationId, CitationMap, CitationMetadata, HealthStatus, IndexRequest,
    IndexResponse, Page, QaRequest, TextSegment,
};
