//! Shared HTML components for the evidence viewer.
//!
//! Contains the navigation bar, the query and PDF index forms, message
//! banners and the base HTML template.

use super::html_escape;
use super::styles::STYLE;
use crate::IndexStatus;

// ============================================================================
// Navigation Bar
// ============================================================================

pub fn nav_bar(service_url: &str) -> String {
    format!(
        r#"<nav class="nav-bar">
            <a href="/">Ask</a>
            <a href="/info">System Info</a>
            <span class="spacer"></span>
            <span class="service" title="Answering service">{}</span>
        </nav>"#,
        html_escape(service_url)
    )
}

// ============================================================================
// Forms
// ============================================================================

/// The question form. While a question is outstanding the input and button
/// are disabled and the button reads "Searching...".
pub fn query_form(query: &str, busy: bool) -> String {
    let disabled = if busy { " disabled" } else { "" };
    let label = if busy { "Searching..." } else { "Ask" };
    format!(
        r#"<form action="/ask" method="post" class="query-form" onsubmit="markBusy(this, 'Searching...')">
            <div class="input-group">
                <input type="text" name="query" value="{query}" placeholder="Ask a question..." class="query-input" autocomplete="off"{disabled}>
                <button type="submit" class="btn submit-button"{disabled}>{label}</button>
            </div>
        </form>"#,
        query = html_escape(query),
        disabled = disabled,
        label = label,
    )
}

pub fn index_form(status: Option<&IndexStatus>, busy: bool) -> String {
    let disabled = if busy { " disabled" } else { "" };
    let label = if busy { "Indexing..." } else { "Index PDF" };
    let message = match status {
        Some(status) => format!(
            r#"<p class="message {}">{}</p>"#,
            if status.is_error() { "error" } else { "success" },
            html_escape(status.message())
        ),
        None => String::new(),
    };
    format!(
        r#"<div class="indexing-section">
            <form action="/index-pdf" method="post" class="index-form" onsubmit="markBusy(this, 'Indexing...')">
                <div class="input-group">
                    <input type="text" name="file_path" placeholder="PDF file path to index..." class="pdf-input" autocomplete="off"{disabled}>
                    <button type="submit" class="btn secondary index-button"{disabled}>{label}</button>
                </div>
            </form>
            {message}
        </div>"#,
        disabled = disabled,
        label = label,
        message = message,
    )
}

// ============================================================================
// Messages
// ============================================================================

pub fn error_banner(error: Option<&str>) -> String {
    match error {
        Some(e) => format!(r#"<div class="message error error-message">{}</div>"#, html_escape(e)),
        None => String::new(),
    }
}

pub fn loading_indicator() -> &'static str {
    r#"<div class="loading-indicator">
        <div class="spinner"></div>
        <p>Processing your question...</p>
    </div>"#
}

// ============================================================================
// Base Template
// ============================================================================

pub fn base_html(title: &str, content: &str, service_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    {nav}
    <div class="container">
        {content}
    </div>
    <script>
    // Block double submission while the request is in flight
    function markBusy(form, label) {{
        const button = form.querySelector('button[type=submit]');
        if (!button) return;
        setTimeout(() => {{
            button.disabled = true;
            button.textContent = label;
        }}, 0);
    }}
    </script>
</body>
</html>"#,
        title = html_escape(title),
        STYLE = STYLE,
        nav = nav_bar(service_url),
        content = content,
    )
}
