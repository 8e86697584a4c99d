//! HTML dashboard served at `GET /`
//!
//! Shows the store counters and every entry inside the read window, newest
//! first. Building the page happens on the blocking pool; if that fails the
//! page still renders with zeroed stats and an error banner.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::Html};

use super::state::AppState;
use crate::event_store::EventStore;
use crate::types::{Entry, StoreStats};
use crate::utils::{escape, to_iso8601, to_readable};

/// Banner shown when the view could not be loaded
pub const LOAD_ERROR: &str = "Error loading webhook data";

/// Everything the page needs
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    pub stats: StoreStats,
    pub entries: Vec<Entry>,
    pub error: Option<&'static str>,
}

impl DashboardView {
    pub fn load(store: &EventStore, window: Duration) -> Self {
        Self {
            entries: store.recent_entries(window),
            stats: store.stats(window),
            error: None,
        }
    }

    /// Empty view with the error banner set
    pub fn unavailable() -> Self {
        Self {
            stats: StoreStats::empty(),
            entries: Vec::new(),
            error: Some(LOAD_ERROR),
        }
    }

    pub fn render(&self) -> String {
        let mut html = String::with_capacity(4096 + self.entries.len() * 512);

        html.push_str(PAGE_HEAD);

        if let Some(error) = self.error {
            html.push_str(&format!(
                "<div class=\"error\">{}</div>\n",
                escape(error)
            ));
        }

        let last_received = self
            .stats
            .last_received
            .as_ref()
            .map(to_readable)
            .unwrap_or_else(|| "Never".to_string());

        html.push_str(&format!(
            concat!(
                "<section class=\"stats\">\n",
                "  <div class=\"stat\"><span class=\"label\">Total</span><span class=\"value\" id=\"total-count\">{}</span></div>\n",
                "  <div class=\"stat\"><span class=\"label\">Recent</span><span class=\"value\" id=\"recent-count\">{}</span></div>\n",
                "  <div class=\"stat\"><span class=\"label\">Last received</span><span class=\"value\" id=\"last-received\">{}</span></div>\n",
                "</section>\n",
            ),
            self.stats.total_count,
            self.stats.recent_count,
            escape(&last_received),
        ));

        if self.entries.is_empty() {
            html.push_str(
                "<p class=\"empty\">No webhooks received yet. POST JSON to <code>/webhook</code>.</p>\n",
            );
        } else {
            html.push_str("<section class=\"entries\">\n");
            for entry in &self.entries {
                html.push_str(&render_entry(entry));
            }
            html.push_str("</section>\n");
        }

        html.push_str(PAGE_TAIL);
        html
    }
}

fn render_entry(entry: &Entry) -> String {
    format!(
        concat!(
            "<article class=\"entry\" id=\"webhook-{id}\">\n",
            "  <header><span class=\"id\">#{id}</span>",
            "<time datetime=\"{iso}\">{readable}</time></header>\n",
            "  <pre>{payload}</pre>\n",
            "</article>\n",
        ),
        id = entry.id,
        iso = escape(&to_iso8601(&entry.received_at)),
        readable = escape(&to_readable(&entry.received_at)),
        payload = escape(&entry.pretty_payload()),
    )
}

/// GET / - Render the dashboard
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let store = state.store.clone();
    let window = state.window;

    let page = tokio::task::spawn_blocking(move || DashboardView::load(&store, window).render()).await;

    match page {
        Ok(html) => Html(html),
        Err(e) => {
            tracing::error!(error = %e, "Error rendering index page");
            Html(DashboardView::unavailable().render())
        }
    }
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta http-equiv="refresh" content="30">
<title>Webhook Inspector</title>
<style>
  body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 960px; color: #222; }
  .error { background: #fde8e8; color: #9b1c1c; padding: .75rem 1rem; border-radius: 4px; margin-bottom: 1rem; }
  .stats { display: flex; gap: 1rem; margin-bottom: 1.5rem; }
  .stat { flex: 1; border: 1px solid #ddd; border-radius: 4px; padding: .75rem; }
  .stat .label { display: block; font-size: .8rem; color: #666; }
  .stat .value { font-size: 1.25rem; font-weight: 600; }
  .entry { border: 1px solid #ddd; border-radius: 4px; margin-bottom: 1rem; }
  .entry header { display: flex; justify-content: space-between; background: #f6f6f6; padding: .5rem .75rem; }
  .entry pre { margin: 0; padding: .75rem; overflow-x: auto; }
  .empty { color: #666; }
</style>
</head>
<body>
<h1>Webhook Inspector</h1>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_empty_store() {
        let store = EventStore::new();
        let html = DashboardView::load(&store, Duration::from_secs(3600)).render();

        assert!(html.contains("No webhooks received yet"));
        assert!(html.contains("<span class=\"value\" id=\"total-count\">0</span>"));
        assert!(html.contains("Never"));
        assert!(!html.contains(LOAD_ERROR));
    }

    #[test]
    fn test_render_entries_newest_first_and_escaped() {
        let store = EventStore::new();
        store.add(json!({"first": true}));
        store.add(json!({"html": "<b>bold</b>"}));

        let html = DashboardView::load(&store, Duration::from_secs(3600)).render();

        let second = html.find("id=\"webhook-2\"").unwrap();
        let first = html.find("id=\"webhook-1\"").unwrap();
        assert!(second < first);
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("<b>bold</b>"));
    }

    #[test]
    fn test_unavailable_view() {
        let html = DashboardView::unavailable().render();

        assert!(html.contains(LOAD_ERROR));
        assert!(html.contains("<span class=\"value\" id=\"recent-count\">0</span>"));
        assert!(html.contains("No webhooks received yet"));
    }
}
