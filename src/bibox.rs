use std::time::Duration;

use crate::config::Config;
use crate::error::HubError;

/// Thin client for the Bibox public market-data API.
///
/// One outbound `GET` per call, no retries. Status codes are deliberately
/// not inspected here: whatever body the exchange returns is handed to the
/// normalizer, which rejects anything that is not a kline envelope.
pub struct BiboxClient {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

/// Daily kline query for a pair. The period is fixed.
fn kline_url(base: &str, pair: &str) -> String {
    format!(
        "{}/v1/mdata?cmd=kline&pair={}&period=day",
        base.trim_end_matches('/'),
        pair
    )
}

impl BiboxClient {
    pub fn new(cfg: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: kline_url(&cfg.api_base, &cfg.pair),
            timeout: Duration::from_secs(cfg.fetch_timeout_s.max(1)),
        }
    }

    /// Fetch the raw kline response body for the configured pair.
    pub async fn fetch_klines(&self) -> Result<Vec<u8>, HubError> {
        let resp = self
            .http
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await?;

        let body = resp.bytes().await?;
        Ok(body.to_vec())
    }
}
