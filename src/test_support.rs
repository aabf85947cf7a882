//! Fake answering service for client and handler tests.
//!
//! Runs a real axum server on `127.0.0.1:0` that answers `/qa`,
//! `/index-pdf`, `/info` and `/health` with canned JSON. Individual routes
//! can be overridden to return errors or malformed bodies.

use crate::{AppState, Config};
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use url::Url;

pub(crate) const SAMPLE_ANSWER: &str = r#"{
    "answer": "The sky is blue [C1]. Water is wet [C2][C1]. See also [C3].",
    "citations": {
        "C1": {"page": 1, "source": "physics.pdf", "snippet": "Rayleigh scattering makes the sky blue."},
        "C2": {"page": "iv", "source": "chemistry.pdf", "snippet": "Water wets most surfaces.", "chunk_id": "chem-0004"}
    },
    "context": "[C1] Rayleigh scattering makes the sky blue.\n[C2] Water wets most surfaces."
}"#;

pub(crate) const SAMPLE_INDEX: &str = r#"{"message": "Successfully indexed paper.pdf", "success": true, "filename": "paper.pdf", "chunks_indexed": 12}"#;

pub(crate) const SAMPLE_INFO: &str = r#"{"model": "test-model", "documents_indexed": 3, "vector_store": {"chunks": 42}}"#;

#[derive(Debug, Clone)]
struct Reply {
    status: StatusCode,
    body: String,
}

/// One request seen by the fake service.
#[derive(Debug, Clone)]
pub(crate) struct Recorded {
    pub path: String,
    pub body: String,
}

pub(crate) struct FakeBackend {
    replies: HashMap<String, Reply>,
}

struct Inner {
    replies: HashMap<String, Reply>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// A running fake service.
pub(crate) struct RunningBackend {
    pub url: Url,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl RunningBackend {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_body(&self, path: &str) -> Option<serde_json::Value> {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.path == path)
            .map(|r| serde_json::from_str(&r.body).unwrap())
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        let mut replies = HashMap::new();
        for (path, body) in [
            ("/qa", SAMPLE_ANSWER),
            ("/index-pdf", SAMPLE_INDEX),
            ("/info", SAMPLE_INFO),
            ("/health", r#"{"status": "healthy"}"#),
        ] {
            replies.insert(
                path.to_string(),
                Reply {
                    status: StatusCode::OK,
                    body: body.to_string(),
                },
            );
        }
        Self { replies }
    }

    /// Override the reply for `path`. Takes any status that converts to a
    /// code, so both axum's and reqwest's `StatusCode` are accepted.
    pub fn reply(mut self, path: &str, status: impl Into<u16>, body: &str) -> Self {
        self.replies.insert(
            path.to_string(),
            Reply {
                status: StatusCode::from_u16(status.into()).unwrap(),
                body: body.to_string(),
            },
        );
        self
    }

    pub async fn spawn(self) -> RunningBackend {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let inner = Arc::new(Inner {
            replies: self.replies,
            requests: requests.clone(),
        });
        let app = Router::new().fallback(serve).with_state(inner);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        RunningBackend {
            url: Url::parse(&format!("http://{}/", addr)).unwrap(),
            requests,
        }
    }
}

async fn serve(State(inner): State<Arc<Inner>>, uri: Uri, body: String) -> Response {
    inner.requests.lock().unwrap().push(Recorded {
        path: uri.path().to_string(),
        body,
    });
    match inner.replies.get(uri.path()) {
        Some(reply) => (
            reply.status,
            [("content-type", "application/json")],
            reply.body.clone(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, r#"{"detail": "Not Found"}"#).into_response(),
    }
}

/// A base URL nothing listens on.
pub(crate) async fn dead_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}/", addr)).unwrap()
}

pub(crate) fn test_config(api_url: &Url) -> Config {
    let url = api_url.to_string();
    Config::from_lookup(move |key| match key {
        "EVIDENCE_API_URL" => Some(url.clone()),
        "EVIDENCE_TIMEOUT_SECS" => Some("5".to_string()),
        _ => None,
    })
    .unwrap()
}

pub(crate) fn test_state(api_url: &Url) -> Arc<AppState> {
    Arc::new(AppState::new(test_config(api_url)).unwrap())
}
