//! HTTP route handlers for the web application.
//!
//! The HTML pages follow post/redirect/get: form posts update the shared
//! `QaSession` and redirect back to `/`. The `/api/*` routes return JSON.

use crate::annotation::{annotate, AnnotatedAnswer};
use crate::models::{AnswerResult, HealthStatus, QaRequest};
use crate::templates::{render_info, render_page, Busy, ViewQuery, ViewState};
use crate::{AnsweredQuery, AppState, IndexStatus};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

#[cfg(test)]
#[path = "handlers_test.rs"]
mod handlers_test;

pub const ASK_BUSY_MESSAGE: &str = "A question is already being answered";
pub const INDEX_BUSY_MESSAGE: &str = "A PDF is already being indexed";

fn busy(state: &AppState) -> Busy {
    Busy {
        asking: state.asking.is_busy(),
        indexing: state.indexing.is_busy(),
    }
}

// ============================================================================
// Index Handler
// ============================================================================

pub async fn index(
    Query(query): Query<ViewQuery>,
    State(state): State<Arc<AppState>>,
) -> Html<String> {
    let view = ViewState::from(query);
    let busy = busy(&state);
    let session = state.session();
    Html(render_page(
        &session,
        &view,
        busy,
        state.client.base_url().as_str(),
    ))
}

// ============================================================================
// Ask Handler
// ============================================================================

#[derive(Deserialize)]
pub struct AskForm {
    pub query: String,
}

pub async fn ask(State(state): State<Arc<AppState>>, Form(form): Form<AskForm>) -> Redirect {
    let query = form.query.trim();
    if query.is_empty() {
        return Redirect::to("/");
    }

    let Some(_guard) = state.asking.try_acquire() else {
        state.session().error = Some(ASK_BUSY_MESSAGE.to_string());
        return Redirect::to("/?tab=answer");
    };

    state.session().query = query.to_string();

    let started = Instant::now();
    let outcome = state.client.answer_question(query, state.config.top_k).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let mut session = state.session();
    match outcome {
        Ok(result) => {
            info!(
                elapsed_ms,
                citations = result.citations.len(),
                "question answered"
            );
            session.answer = Some(AnsweredQuery {
                result,
                answered_at: Utc::now(),
                elapsed_ms,
            });
            session.error = None;
        }
        Err(e) => {
            warn!(error = %e, "question failed");
            session.error = Some(e.to_string());
        }
    }

    Redirect::to("/?tab=answer")
}

// ============================================================================
// PDF Indexing Handler
// ============================================================================

#[derive(Deserialize)]
pub struct IndexPdfForm {
    pub file_path: String,
}

pub async fn index_pdf(
    State(state): State<Arc<AppState>>,
    Form(form): Form<IndexPdfForm>,
) -> Redirect {
    let file_path = form.file_path.trim();
    if file_path.is_empty() {
        return Redirect::to("/");
    }

    let Some(_guard) = state.indexing.try_acquire() else {
        state.session().index_status = Some(IndexStatus::Failed(INDEX_BUSY_MESSAGE.to_string()));
        return Redirect::to("/");
    };

    let status = match state.client.index_pdf(file_path).await {
        Ok(response) => {
            info!(file_path, chunks = ?response.chunks_indexed, "PDF indexed");
            IndexStatus::Indexed(response.message)
        }
        Err(e) => {
            warn!(file_path, error = %e, "PDF indexing failed");
            IndexStatus::Failed(format!("Error: {}", e))
        }
    };
    state.session().index_status = Some(status);

    Redirect::to("/")
}

// ============================================================================
// System Info Handler
// ============================================================================

pub async fn info(State(state): State<Arc<AppState>>) -> Html<String> {
    let (info, health) = tokio::join!(state.client.system_info(), state.client.health());

    let info = info.map_err(|e| e.to_string());
    let health = health.map_err(|e| e.to_string());

    Html(render_info(
        info.as_ref().map_err(String::as_str),
        health.as_ref().map_err(String::as_str),
        state.client.base_url().as_str(),
    ))
}

// ============================================================================
// JSON API
// ============================================================================

fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(serde_json::json!({ "error": message.into() })),
    )
        .into_response()
}

/// Annotate an answer payload without calling the answering service.
pub async fn api_annotate(axum::Json(result): axum::Json<AnswerResult>) -> Response {
    axum::Json(annotate(&result)).into_response()
}

#[derive(Serialize)]
struct AskResponse<'a> {
    result: &'a AnswerResult,
    annotation: AnnotatedAnswer<'a>,
}

pub async fn api_ask(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<QaRequest>,
) -> Response {
    let query = body.query.trim();
    if query.is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "Query must not be empty");
    }
    let top_k = body.top_k.unwrap_or(state.config.top_k);
    if top_k == 0 {
        return json_error(StatusCode::BAD_REQUEST, "top_k must be at least 1");
    }

    let Some(_guard) = state.asking.try_acquire() else {
        return json_error(StatusCode::CONFLICT, ASK_BUSY_MESSAGE);
    };

    match state.client.answer_question(query, top_k).await {
        Ok(result) => axum::Json(AskResponse {
            result: &result,
            annotation: annotate(&result),
        })
        .into_response(),
        Err(e) => {
            warn!(error = %e, "question failed");
            json_error(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

pub async fn api_info(State(state): State<Arc<AppState>>) -> Response {
    match state.client.system_info().await {
        Ok(info) => axum::Json(info).into_response(),
        Err(e) => {
            warn!(error = %e, "system info failed");
            json_error(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

pub async fn health() -> axum::Json<HealthStatus> {
    axum::Json(HealthStatus::healthy())
}
