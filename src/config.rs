use std::env;

/// Hub configuration derived from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    pub port: u16,

    // ── Upstream ───────────────────────────────────────────────────
    pub api_base: String,
    pub pair: String,
    pub fetch_timeout_s: u64,

    // ── Chart display ──────────────────────────────────────────────
    pub title: String,
    pub split_number: u32,
    pub zoom_start: f64,
    pub zoom_end: f64,

    // ── File sink ──────────────────────────────────────────────────
    /// Path the rendered page is copied to. Empty ⇒ file sink disabled.
    pub out_file: String,
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_f64(name: &str, default: f64) -> f64 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        let api_base = env_str("KLINE_HUB_API_BASE", "https://api.bibox.com")
            .trim_end_matches('/')
            .to_string();

        // Unlike env_str, an explicitly empty value is kept here: it turns
        // the file sink off.
        let out_file = env::var("KLINE_HUB_OUT_FILE")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| "kline.html".to_string());

        Self {
            bind: env_str("KLINE_HUB_BIND", "0.0.0.0"),
            port: env_u16("KLINE_HUB_PORT", 8080),
            api_base,
            pair: env_str("KLINE_HUB_PAIR", "BTC_USDT"),
            fetch_timeout_s: env_u64("KLINE_HUB_FETCH_TIMEOUT_S", 10).max(1),
            title: env_str("KLINE_HUB_TITLE", "BIBOX BTC"),
            split_number: env_u32("KLINE_HUB_SPLIT_NUMBER", 20).max(1),
            zoom_start: env_f64("KLINE_HUB_ZOOM_START", 50.0).clamp(0.0, 100.0),
            zoom_end: env_f64("KLINE_HUB_ZOOM_END", 100.0).clamp(0.0, 100.0),
            out_file,
        }
    }
}
