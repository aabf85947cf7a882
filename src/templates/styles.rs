//! CSS styles for the evidence viewer.
//!
//! Contains the main STYLE constant with all CSS for the web interface.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
/* Solarized Light Theme */
:root {
    --base03: #002b36;
    --base02: #073642;
    --base01: #586e75;
    --base00: #657b83;
    --base0: #839496;
    --base1: #93a1a1;
    --base2: #eee8d5;
    --base3: #fdf6e3;

    --yellow: #b58900;
    --orange: #cb4b16;
    --red: #dc322f;
    --magenta: #d33682;
    --violet: #6c71c4;
    --blue: #268bd2;
    --cyan: #2aa198;
    --green: #859900;

    --bg: var(--base3);
    --fg: var(--base00);
    --muted: var(--base1);
    --border: var(--base2);
    --link: var(--blue);
    --link-hover: var(--cyan);
    --accent: var(--base2);
    --code-bg: var(--base2);
    --highlight: #f7f2e2;
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.6;
    color: var(--fg);
    background: var(--bg);
}

.container {
    max-width: 900px;
    margin: 0 auto;
    padding: 1rem;
}

a { color: var(--link); text-decoration: none; }
a:hover { color: var(--link-hover); text-decoration: underline; }

h1, h2, h3 { font-weight: 600; margin-top: 1.5em; margin-bottom: 0.5em; }
h1 { font-size: 1.5rem; }

.nav-bar {
    position: sticky;
    top: 0;
    background: var(--bg);
    border-bottom: 1px solid var(--border);
    padding: 0.5rem 1rem;
    display: flex;
    gap: 1rem;
    align-items: center;
    flex-wrap: wrap;
    z-index: 100;
}

.nav-bar a { font-size: 0.9rem; }
.nav-bar .spacer { flex: 1; }
.nav-bar .service { font-family: monospace; font-size: 0.75rem; color: var(--muted); }

/* Header */
.qa-header h1 { margin-bottom: 0.25rem; }
.qa-header .subtitle { color: var(--muted); margin-bottom: 1.5rem; }

/* Forms */
.input-group {
    display: flex;
    gap: 0.5rem;
    margin-bottom: 0.75rem;
}

.input-group input {
    flex: 1;
    padding: 0.6rem 0.75rem;
    border: 1px solid var(--base1);
    border-radius: 4px;
    background: var(--bg);
    color: var(--fg);
    font-size: 1rem;
    font-family: inherit;
}

.input-group input:disabled { background: var(--accent); }

.btn {
    padding: 0.5rem 1rem;
    border: 1px solid var(--base1);
    border-radius: 4px;
    background: var(--blue);
    color: var(--base3);
    cursor: pointer;
    font-size: 0.9rem;
    font-family: inherit;
    text-decoration: none;
    display: inline-block;
    white-space: nowrap;
}

.btn:hover { background: var(--cyan); border-color: var(--cyan); }
.btn:disabled { background: var(--base1); cursor: wait; }
.btn.secondary { background: var(--base2); color: var(--base00); border-color: var(--base1); }
.btn.secondary:hover { background: var(--base3); }

.indexing-section {
    padding: 0.75rem 1rem 0.25rem;
    background: var(--accent);
    border-radius: 4px;
    margin-bottom: 1rem;
}

.message {
    padding: 0.75rem 1rem;
    border-radius: 4px;
    margin-bottom: 1rem;
}
.message.error { background: #fdf2f2; color: var(--red); border: 1px solid var(--red); }
.message.success { background: #f5f9f5; color: var(--green); border: 1px solid var(--green); }

/* Loading */
.loading-indicator {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    padding: 1rem;
    color: var(--muted);
}
.spinner {
    width: 20px;
    height: 20px;
    border: 2px solid var(--border);
    border-top-color: var(--link);
    border-radius: 50%;
    animation: spin 1s linear infinite;
}
@keyframes spin {
    to { transform: rotate(360deg); }
}

/* Tabs */
.tabs {
    display: flex;
    gap: 0;
    border-bottom: 1px solid var(--base1);
    margin-top: 1rem;
}

.tab {
    padding: 0.5rem 1rem;
    color: var(--fg);
    border: 1px solid transparent;
    border-bottom: none;
    border-radius: 4px 4px 0 0;
    font-size: 0.9rem;
}
.tab:hover { background: var(--accent); text-decoration: none; }
.tab.active {
    background: var(--link);
    color: white;
}

.tab-content { padding: 1rem 0; }
.tab-content h3 { margin-top: 0; }

.answer-meta { font-size: 0.8rem; color: var(--muted); margin-top: 1rem; }

/* Highlighted answer */
.citation-highlight { white-space: pre-wrap; line-height: 1.8; }

.citation {
    position: relative;
    font-family: monospace;
    font-size: 0.85em;
    padding: 0 0.15rem;
    border-radius: 3px;
    cursor: help;
}
.citation.valid { background: #e3effa; color: var(--blue); }
.citation.invalid {
    background: #fdf2f2;
    color: var(--red);
    text-decoration: line-through wavy;
    cursor: not-allowed;
}

.citation-tooltip {
    display: none;
    position: absolute;
    left: 0;
    top: 100%;
    margin-top: 5px;
    width: 320px;
    padding: 0.6rem 0.75rem;
    background: var(--base02);
    color: var(--base2);
    border-radius: 4px;
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    font-size: 0.8rem;
    line-height: 1.4;
    white-space: normal;
    z-index: 200;
    box-shadow: 0 2px 8px rgba(0, 0, 0, 0.25);
}
.citation:hover .citation-tooltip,
.citation:focus .citation-tooltip { display: block; }
.tooltip-header, .tooltip-source { display: block; margin-bottom: 0.3rem; }
.tooltip-source { color: var(--base1); }
.tooltip-snippet { display: block; font-style: italic; }

/* Source list */
.source-panel.empty, .citation-heatmap.empty { color: var(--muted); padding: 1rem 0; }

.source-item {
    border: 1px solid var(--border);
    border-radius: 4px;
    margin-bottom: 0.5rem;
}
.source-item.expanded { border-color: var(--base1); }
.source-item.unresolved { border-left: 3px solid var(--red); }

.source-item-header {
    display: flex;
    gap: 1rem;
    align-items: center;
    padding: 0.5rem 0.75rem;
    color: var(--fg);
}
.source-item-header:hover { background: var(--highlight); text-decoration: none; }
.source-item-header .citation-id { font-family: monospace; font-weight: 600; color: var(--blue); }
.source-item-header .page-number { flex: 1; font-size: 0.85rem; color: var(--muted); }
.source-item-header .ref-count { font-size: 0.8rem; color: var(--muted); }

.source-item-details {
    padding: 0.5rem 0.75rem 0.75rem;
    border-top: 1px solid var(--border);
    font-size: 0.9rem;
}
.source-field { margin-bottom: 0.5rem; }
.source-field .label { font-weight: 600; margin-right: 0.5rem; }
.source-field .snippet {
    margin-top: 0.25rem;
    padding: 0.5rem;
    background: var(--accent);
    border-radius: 4px;
    white-space: pre-wrap;
}

/* Heatmap */
.heatmap-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 1rem;
}
.heatmap-legend { display: flex; gap: 1rem; font-size: 0.8rem; }
.legend-item { display: flex; align-items: center; gap: 0.3rem; }
.legend-color {
    display: inline-block;
    width: 16px;
    height: 16px;
    border-radius: 3px;
    border: 1px solid var(--border);
}

.heatmap-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(90px, 1fr));
    gap: 0.5rem;
}
.heatmap-item {
    padding: 0.5rem;
    border-radius: 4px;
    text-align: center;
    color: var(--base02);
}
.heatmap-item.unresolved { outline: 2px dashed var(--red); }
.heatmap-id { font-family: monospace; font-weight: 600; }
.heatmap-freq { font-size: 1.4rem; font-weight: 600; }
.heatmap-page { font-size: 0.75rem; }

/* Context and info */
.context-panel pre, .info-panel pre {
    background: var(--accent);
    padding: 1rem;
    overflow-x: auto;
    border-radius: 4px;
    white-space: pre-wrap;
    font-family: "SF Mono", "Consolas", "Liberation Mono", monospace;
    font-size: 0.85rem;
}

.meta-block {
    background: var(--accent);
    padding: 1rem;
    border-radius: 4px;
    margin-bottom: 1rem;
    font-size: 0.9rem;
}
.meta-row { display: flex; gap: 0.5rem; margin-bottom: 0.25rem; }
.meta-label { font-weight: 600; min-width: 120px; }
.status-ok { color: var(--green); }
.status-bad { color: var(--red); }
"#;
