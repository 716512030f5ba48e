use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::chart;
use crate::error::HubError;
use crate::normalize;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(chart_page))
        .route("/health", get(health))
}

// ── Handlers ─────────────────────────────────────────────────────────────

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "ok": true,
        "pair": state.config.pair,
    }))
}

/// Fetch, normalize, and render the daily kline chart for the configured pair.
async fn chart_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, HubError> {
    let body = state.bibox.fetch_klines().await?;
    let series = normalize::normalize(&body)?;

    for issue in &series.issues {
        tracing::warn!(
            index = issue.index,
            field = issue.field,
            raw = %issue.raw,
            "kline field failed to parse, substituted 0.0"
        );
    }

    let mut dates = Vec::with_capacity(series.points.len());
    let mut ohlc = Vec::with_capacity(series.points.len());
    for p in series.points {
        dates.push(p.date);
        ohlc.push(p.ohlc);
    }

    tracing::info!(
        pair = %state.config.pair,
        candles = dates.len(),
        "rendering kline chart"
    );

    let page = chart::render_page(&state.chart_options(), dates, ohlc);

    write_file_sink(&state, &page).await;

    Ok(Html(page))
}

/// Best-effort copy of the rendered page to the configured file path.
///
/// Held under the sink lock so concurrent requests do not interleave writes
/// to the same file. A failed write degrades to a log line; the HTTP
/// response is unaffected.
async fn write_file_sink(state: &AppState, page: &str) {
    let path = state.config.out_file.trim();
    if path.is_empty() {
        return;
    }

    let _guard = state.file_sink.lock().await;
    if let Err(e) = tokio::fs::write(path, page).await {
        tracing::warn!(path, "failed to write chart file: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_config(out_file: &str) -> Config {
        Config {
            bind: "127.0.0.1".to_string(),
            port: 0,
            api_base: "https://api.bibox.com".to_string(),
            pair: "BTC_USDT".to_string(),
            fetch_timeout_s: 1,
            title: "BIBOX BTC".to_string(),
            split_number: 20,
            zoom_start: 50.0,
            zoom_end: 100.0,
            out_file: out_file.to_string(),
        }
    }

    #[tokio::test]
    async fn file_sink_writes_the_page() {
        let path = std::env::temp_dir().join("kline_hub_sink_test.html");
        let state = AppState::new(test_config(path.to_str().unwrap()));

        write_file_sink(&state, "<html>chart</html>").await;

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(written, "<html>chart</html>");

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn empty_out_file_skips_the_sink() {
        let state = AppState::new(test_config(""));
        // Must not panic or create anything; nothing to assert beyond return.
        write_file_sink(&state, "<html>chart</html>").await;
    }

    #[tokio::test]
    async fn unwritable_path_is_logged_not_fatal() {
        let state = AppState::new(test_config("/nonexistent-dir/kline.html"));
        write_file_sink(&state, "<html>chart</html>").await;
    }
}
