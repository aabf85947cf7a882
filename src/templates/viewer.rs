//! Answer view: the tabbed results of one question, and the system info page.
//!
//! Which tab is open and which source entry is expanded travel in the query
//! string (`?tab=sources&expand=C2`); hovering a marker is handled by CSS.
//! Nothing here is remembered between requests.

use super::components::{base_html, error_banner, index_form, loading_indicator, query_form};
use super::html_escape;
use crate::annotation::{annotate, AnnotatedAnswer, CitationEntry, Heatmap};
use crate::models::{HealthStatus, TextSegment};
use crate::{AnsweredQuery, QaSession};

use serde::Deserialize;

// ============================================================================
// View State
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Answer,
    Sources,
    Heatmap,
    Context,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Answer, Tab::Sources, Tab::Heatmap, Tab::Context];

    /// Unknown names fall back to the answer tab.
    pub fn parse(name: &str) -> Self {
        match name {
            "sources" => Tab::Sources,
            "heatmap" => Tab::Heatmap,
            "context" => Tab::Context,
            _ => Tab::Answer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Answer => "answer",
            Tab::Sources => "sources",
            Tab::Heatmap => "heatmap",
            Tab::Context => "context",
        }
    }
}

/// Query parameters of `GET /`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewQuery {
    pub tab: Option<String>,
    pub expand: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub tab: Tab,
    pub expanded: Option<String>,
}

impl From<ViewQuery> for ViewState {
    fn from(q: ViewQuery) -> Self {
        Self {
            tab: q.tab.as_deref().map(Tab::parse).unwrap_or_default(),
            expanded: q.expand.filter(|id| !id.is_empty()),
        }
    }
}

fn tab_href(tab: Tab, expanded: Option<&str>) -> String {
    match expanded {
        Some(id) => format!("/?tab={}&expand={}", tab.as_str(), urlencoding::encode(id)),
        None => format!("/?tab={}", tab.as_str()),
    }
}

// ============================================================================
// Page
// ============================================================================

/// Flags for requests currently in flight.
#[derive(Debug, Clone, Copy, Default)]
pub struct Busy {
    pub asking: bool,
    pub indexing: bool,
}

pub fn render_page(session: &QaSession, view: &ViewState, busy: Busy, service_url: &str) -> String {
    let mut html = String::from(
        r#"<div class="qa-header">
            <h1>Evidence</h1>
            <p class="subtitle">Evidence-Aware Question Answering with Citations</p>
        </div>"#,
    );

    html.push_str(&query_form(&session.query, busy.asking));
    html.push_str(&index_form(session.index_status.as_ref(), busy.indexing));
    html.push_str(&error_banner(session.error.as_deref()));

    if let Some(answered) = session.answer.as_ref().filter(|a| !a.result.answer.is_empty()) {
        html.push_str(&render_results(answered, view));
    }

    if busy.asking {
        html.push_str(loading_indicator());
    }

    base_html("Evidence", &html, service_url)
}

// ============================================================================
// Results
// ============================================================================

pub fn render_results(answered: &AnsweredQuery, view: &ViewState) -> String {
    let annotated = annotate(&answered.result);
    let expanded = view.expanded.as_deref();

    let mut html = String::from(r#"<div class="results-section"><div class="tabs">"#);
    for tab in Tab::ALL {
        let label = match tab {
            Tab::Answer => "Answer".to_string(),
            Tab::Sources => format!("Sources ({})", annotated.entries.len()),
            Tab::Heatmap => "Citation Frequency".to_string(),
            Tab::Context => "Full Context".to_string(),
        };
        html.push_str(&format!(
            r#"<a class="tab{}" href="{}">{}</a>"#,
            if tab == view.tab { " active" } else { "" },
            tab_href(tab, expanded),
            label
        ));
    }
    html.push_str(r#"</div><div class="tab-content">"#);

    match view.tab {
        Tab::Answer => {
            html.push_str(r#"<div class="answer-panel"><h3>Answer</h3>"#);
            html.push_str(&render_highlighted(&annotated));
            html.push_str(&render_answer_meta(answered, &annotated));
            html.push_str("</div>");
        }
        Tab::Sources => html.push_str(&render_sources(&annotated.entries, expanded)),
        Tab::Heatmap => html.push_str(&render_heatmap(&annotated.heatmap)),
        Tab::Context => html.push_str(&format!(
            r#"<div class="context-panel"><h3>Retrieved Context</h3><pre>{}</pre></div>"#,
            html_escape(annotated.context)
        )),
    }

    html.push_str("</div></div>");
    html
}

fn render_answer_meta(answered: &AnsweredQuery, annotated: &AnnotatedAnswer<'_>) -> String {
    let mut meta = format!(
        "Answered {} in {:.1}s &middot; {} citation marker{}",
        answered.answered_at.format("%Y-%m-%d %H:%M:%S UTC"),
        answered.elapsed_ms as f64 / 1000.0,
        annotated.marker_count(),
        if annotated.marker_count() == 1 { "" } else { "s" },
    );
    if !annotated.unresolved.is_empty() {
        meta.push_str(&format!(", {} unresolved", annotated.unresolved.len()));
    }
    format!(r#"<p class="answer-meta">{}</p>"#, meta)
}

/// The answer text with each marker wrapped in a `citation` span. Resolved
/// markers carry a tooltip with page, source and snippet.
pub fn render_highlighted(annotated: &AnnotatedAnswer<'_>) -> String {
    let mut html = String::from(r#"<div class="citation-highlight">"#);

    for segment in &annotated.segments {
        match *segment {
            TextSegment::PlainText { content } => {
                html.push_str(&format!(
                    r#"<span class="text-content">{}</span>"#,
                    html_escape(content)
                ));
            }
            TextSegment::CitationMarker { raw, id, resolved } => {
                let tooltip = annotated
                    .entry(id)
                    .and_then(|e| e.metadata)
                    .filter(|_| resolved)
                    .map(|meta| {
                        format!(
                            r#"<span class="citation-tooltip" role="tooltip"><span class="tooltip-header"><strong>{}</strong> - Page {}</span><small class="tooltip-source">{}</small><span class="tooltip-snippet">{}</span></span>"#,
                            html_escape(id),
                            html_escape(&meta.page.to_string()),
                            html_escape(&meta.source),
                            html_escape(&meta.snippet)
                        )
                    })
                    .unwrap_or_default();
                html.push_str(&format!(
                    r#"<span class="citation {}" tabindex="0" data-citation="{}">{}{}</span>"#,
                    if resolved { "valid" } else { "invalid" },
                    html_escape(id),
                    html_escape(raw),
                    tooltip
                ));
            }
        }
    }

    html.push_str("</div>");
    html
}

/// Source list. Clicking an entry's header toggles it open or closed.
pub fn render_sources(entries: &[CitationEntry<'_>], expanded: Option<&str>) -> String {
    if entries.is_empty() {
        return r#"<div class="source-panel empty"><p>No citations found</p></div>"#.to_string();
    }

    let mut html = format!(
        r#"<div class="source-panel"><div class="source-panel-header"><h3>Citation Sources ({})</h3></div><div class="source-panel-content">"#,
        entries.len()
    );

    for entry in entries {
        let is_expanded = expanded == Some(entry.id);
        let toggle = if is_expanded { None } else { Some(entry.id) };
        let page = match entry.page() {
            Some(page) => format!("Page {}", html_escape(&page.to_string())),
            None => "Unresolved citation".to_string(),
        };

        let mut classes = String::from("source-item");
        if is_expanded {
            classes.push_str(" expanded");
        }
        if !entry.is_resolved() {
            classes.push_str(" unresolved");
        }

        html.push_str(&format!(
            r#"<div class="{classes}" id="source-{anchor}">
                <a class="source-item-header" href="{href}">
                    <span class="citation-id">{id}</span>
                    <span class="page-number">{page}</span>
                    <span class="ref-count">{count}&times;</span>
                    <span class="expand-icon">{icon}</span>
                </a>"#,
            classes = classes,
            anchor = html_escape(&urlencoding::encode(entry.id)),
            href = tab_href(Tab::Sources, toggle),
            id = html_escape(entry.id),
            page = page,
            count = entry.count,
            icon = if is_expanded { "&#9660;" } else { "&#9654;" },
        ));

        if is_expanded {
            let details = match entry.metadata {
                Some(meta) => format!(
                    r#"<div class="source-field"><span class="label">Source:</span><span class="value">{}</span></div>
                    <div class="source-field"><span class="label">Snippet:</span><p class="snippet">{}</p></div>"#,
                    html_escape(&meta.source),
                    html_escape(&meta.snippet)
                ),
                None => r#"<div class="source-field"><p>No metadata was returned for this citation.</p></div>"#
                    .to_string(),
            };
            html.push_str(&format!(r#"<div class="source-item-details">{}</div>"#, details));
        }

        html.push_str("</div>");
    }

    html.push_str("</div></div>");
    html
}

pub fn render_heatmap(heatmap: &Heatmap<'_>) -> String {
    if heatmap.is_empty() {
        return r#"<div class="citation-heatmap empty"><p>No citation data available</p></div>"#
            .to_string();
    }

    let mut html = format!(
        r#"<div class="citation-heatmap">
            <div class="heatmap-header">
                <h3>Citation Frequency</h3>
                <div class="heatmap-legend">
                    <span class="legend-item"><span class="legend-color" style="background-color: {low}"></span><span>Low</span></span>
                    <span class="legend-item"><span class="legend-color" style="background-color: {high}"></span><span>High</span></span>
                </div>
            </div>
            <div class="heatmap-grid">"#,
        low = heatmap.legend.low,
        high = heatmap.legend.high,
    );

    for tile in &heatmap.tiles {
        let page = tile
            .page
            .map(|p| html_escape(&p.to_string()))
            .unwrap_or_else(|| "?".to_string());
        html.push_str(&format!(
            r#"<div class="heatmap-item{}" style="background-color: {}" title="{}">
                <div class="heatmap-id">{}</div>
                <div class="heatmap-freq">{}</div>
                <div class="heatmap-page">p{}</div>
            </div>"#,
            if tile.resolved { "" } else { " unresolved" },
            tile.color,
            html_escape(&tile.title()),
            html_escape(tile.id),
            tile.count,
            page
        ));
    }

    html.push_str("</div></div>");
    html
}

// ============================================================================
// System Info
// ============================================================================

pub fn render_info(
    info: Result<&serde_json::Value, &str>,
    health: Result<&HealthStatus, &str>,
    service_url: &str,
) -> String {
    let health_html = match health {
        Ok(h) if h.is_healthy() => r#"<span class="status-ok">healthy</span>"#.to_string(),
        Ok(h) => format!(r#"<span class="status-bad">{}</span>"#, html_escape(&h.status)),
        Err(e) => format!(r#"<span class="status-bad">{}</span>"#, html_escape(e)),
    };

    let info_html = match info {
        Ok(value) => {
            let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
            format!("<pre>{}</pre>", html_escape(&pretty))
        }
        Err(e) => error_banner(Some(e)),
    };

    let content = format!(
        r#"<h1>System Info</h1>
        <div class="meta-block">
            <div class="meta-row"><span class="meta-label">Service</span><span class="meta-value">{}</span></div>
            <div class="meta-row"><span class="meta-label">Health</span><span class="meta-value">{}</span></div>
        </div>
        <div class="info-panel">{}</div>"#,
        html_escape(service_url),
        health_html,
        info_html
    );

    base_html("System Info", &content, service_url)
}
