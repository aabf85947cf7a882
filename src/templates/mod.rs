//! HTML templates and styling for the evidence viewer.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants and theme definitions
//! - `components` - Shared HTML components (nav bar, forms, base template)
//! - `viewer` - Answer tabs, source list, heatmap and system info pages

mod components;
mod styles;
mod viewer;

pub use components::{base_html, error_banner, index_form, loading_indicator, nav_bar, query_form};
pub use styles::STYLE;
pub use viewer::{
    render_heatmap, render_highlighted, render_info, render_page, render_results, render_sources,
    Busy, Tab, ViewQuery, ViewState,
};

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
