use chrono::DateTime;
use serde::Deserialize;

use crate::error::HubError;

/// Bibox kline envelope: `{ result: [...], cmd, ver }`.
#[derive(Debug, Deserialize)]
pub struct BiboxResponse {
    pub result: Vec<RawKlineEntry>,
    pub cmd: String,
    pub ver: String,
}

/// One day of exchange-native kline data. Prices arrive as strings.
#[derive(Debug, Deserialize)]
pub struct RawKlineEntry {
    pub time: i64,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    // Present in the envelope; nothing downstream consumes volume.
    #[allow(dead_code)]
    pub vol: String,
}

/// One normalized candle: calendar day plus (open, close, high, low).
///
/// The tuple order is what the candlestick series consumes verbatim:
/// open/close first, then the extremes. Keep it that way.
#[derive(Debug, Clone, PartialEq)]
pub struct KlinePoint {
    pub date: String,
    pub ohlc: [f32; 4],
}

/// A field that failed to parse. The emitted value falls back to zero, but
/// the failure stays visible to the caller instead of masquerading as a
/// legitimate price.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    pub index: usize,
    pub field: &'static str,
    pub raw: String,
}

#[derive(Debug, Default)]
pub struct NormalizedSeries {
    pub points: Vec<KlinePoint>,
    pub issues: Vec<FieldIssue>,
}

/// Decode a Bibox kline response body into chart-ready points.
///
/// Output order and length always match the envelope's `result` array: no
/// sorting, no filtering, no deduplication. Records with bad price fields
/// are kept with `0.0` substituted and an issue recorded.
pub fn normalize(body: &[u8]) -> Result<NormalizedSeries, HubError> {
    let resp: BiboxResponse = serde_json::from_slice(body)?;

    tracing::debug!(
        cmd = %resp.cmd,
        ver = %resp.ver,
        entries = resp.result.len(),
        "decoded kline envelope"
    );

    let mut out = NormalizedSeries {
        points: Vec::with_capacity(resp.result.len()),
        issues: Vec::new(),
    };

    for (i, entry) in resp.result.iter().enumerate() {
        let date = match format_day_utc(entry.time) {
            Some(d) => d,
            None => {
                out.issues.push(FieldIssue {
                    index: i,
                    field: "time",
                    raw: entry.time.to_string(),
                });
                "1970/01/01".to_string()
            }
        };

        let open = parse_price(i, "open", &entry.open, &mut out.issues);
        let close = parse_price(i, "close", &entry.close, &mut out.issues);
        let high = parse_price(i, "high", &entry.high, &mut out.issues);
        let low = parse_price(i, "low", &entry.low, &mut out.issues);

        out.points.push(KlinePoint {
            date,
            ohlc: [open, close, high, low],
        });
    }

    Ok(out)
}

/// Calendar day for an epoch-millisecond timestamp, as `YYYY/MM/DD`.
///
/// Days are taken in UTC so the reported trading day does not shift with
/// the server's timezone. Sub-second precision is truncated.
fn format_day_utc(time_ms: i64) -> Option<String> {
    let dt = DateTime::from_timestamp(time_ms / 1000, 0)?;
    Some(dt.format("%Y/%m/%d").to_string())
}

fn parse_price(index: usize, field: &'static str, raw: &str, issues: &mut Vec<FieldIssue>) -> f32 {
    match raw.trim().parse::<f32>() {
        Ok(v) => v,
        Err(_) => {
            issues.push(FieldIssue {
                index,
                field,
                raw: raw.to_string(),
            });
            0.0
        }
    }
}
