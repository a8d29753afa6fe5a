use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::time_utils::parse_log_timestamp;

/// Label used for requests without a referer.
pub const DIRECT_REFERER: &str = "(Direct)";

/// Label used for requests without a user agent.
pub const UNKNOWN_USER_AGENT: &str = "(Unknown)";

/// The four status classes that always get a series in the time chart.
pub const STANDARD_STATUS_CLASSES: [&str; 4] = ["2xx", "3xx", "4xx", "5xx"];

/// One request line from a CDN / edge access log.
///
/// Field names on the wire follow the CloudFront standard log columns, so the
/// same struct decodes both the JSON export and the CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Request date, `YYYY-MM-DD` (UTC).
    pub date: String,
    /// Request time of day, `HH:MM:SS` (UTC).
    pub time: String,
    /// Edge location that served the request, e.g. `"ATH50-C1"`.
    #[serde(rename = "x-edge-location")]
    pub edge_location: String,
    /// Bytes sent to the client.
    #[serde(rename = "sc-bytes")]
    pub bytes_sent: u64,
    /// Client IP address.
    #[serde(rename = "c-ip")]
    pub client_ip: String,
    /// HTTP method.
    #[serde(rename = "cs-method")]
    pub method: String,
    /// Request path without query string.
    #[serde(rename = "cs-uri-stem")]
    pub uri_path: String,
    /// HTTP status code returned to the client.
    #[serde(rename = "sc-status")]
    pub status: u16,
    /// Referer header, if any.
    #[serde(rename = "cs(Referer)", default)]
    pub referer: Option<String>,
    /// User-Agent header, if any.
    #[serde(rename = "cs(User-Agent)", default)]
    pub user_agent: Option<String>,
}

impl LogRecord {
    /// Combined UTC timestamp of `date` and `time`, or `None` when either
    /// part does not parse.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_log_timestamp(&self.date, &self.time)
    }

    /// Referer label used in rankings; empty and missing referers collapse
    /// into [`DIRECT_REFERER`].
    pub fn referer_label(&self) -> &str {
        match self.referer.as_deref() {
            Some(r) if !r.is_empty() => r,
            _ => DIRECT_REFERER,
        }
    }

    /// User-agent label used in rankings.
    pub fn user_agent_label(&self) -> &str {
        match self.user_agent.as_deref() {
            Some(ua) if !ua.is_empty() => ua,
            _ => UNKNOWN_USER_AGENT,
        }
    }

    /// Browser family of this record's user agent.
    pub fn browser(&self) -> &'static str {
        browser_family(self.user_agent.as_deref().unwrap_or(""))
    }

    /// Status class of this record, e.g. `"4xx"`.
    pub fn status_class(&self) -> String {
        status_class(self.status)
    }
}

/// Hundreds-digit group of an HTTP status code: `404` → `"4xx"`.
pub fn status_class(status: u16) -> String {
    format!("{}xx", status / 100)
}

/// Classify a user agent by first substring match in the order
/// Chrome, Firefox, Safari, Edge.
///
/// Chromium-based agents also contain `Safari` (and Edge contains `Chrome`),
/// so they land in `"Chrome"`. That ordering is intentional.
pub fn browser_family(user_agent: &str) -> &'static str {
    const FAMILIES: [&str; 4] = ["Chrome", "Firefox", "Safari", "Edge"];
    FAMILIES
        .into_iter()
        .find(|family| user_agent.contains(family))
        .unwrap_or("Other")
}

// ── Summary components ────────────────────────────────────────────────────────

/// Earliest and latest request timestamps in a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Requests that fell into one clock hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBucket {
    /// Hour key, `YYYY-MM-DDTHH:00`.
    pub key: String,
    /// Number of requests in the hour.
    pub total: u64,
    /// Request count per status class; only classes that occurred appear.
    pub by_status: BTreeMap<String, u64>,
}

/// Sparse hourly series, ascending by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub buckets: Vec<TimeBucket>,
}

impl TimeSeries {
    /// Bucket keys in chronological order.
    pub fn keys(&self) -> Vec<&str> {
        self.buckets.iter().map(|b| b.key.as_str()).collect()
    }

    /// Per-bucket totals.
    pub fn totals(&self) -> Vec<u64> {
        self.buckets.iter().map(|b| b.total).collect()
    }

    /// Zero-filled counts of one status class across all buckets.
    pub fn series(&self, class: &str) -> Vec<u64> {
        self.buckets
            .iter()
            .map(|b| b.by_status.get(class).copied().unwrap_or(0))
            .collect()
    }

    /// Largest bucket total, 0 for an empty series.
    pub fn peak(&self) -> u64 {
        self.buckets.iter().map(|b| b.total).max().unwrap_or(0)
    }
}

/// A resolved map point for one base location code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Base location code, e.g. `"ATH"`.
    pub location: String,
    pub lat: f64,
    pub lng: f64,
    pub count: u64,
}

/// Map points plus the request total over every base code, including the
/// ones that could not be placed on the map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoDistribution {
    pub locations: Vec<GeoPoint>,
    pub total: u64,
}

/// A single label / count pair in a ranked breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub label: String,
    pub count: u64,
}

/// Labels with their counts, sorted descending by count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranking {
    entries: Vec<RankedEntry>,
}

impl Ranking {
    /// Wrap entries that are already in rank order.
    pub fn new(entries: Vec<RankedEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn counts(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.count).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count of the top entry, 0 when empty.
    pub fn max_count(&self) -> u64 {
        self.entries.first().map(|e| e.count).unwrap_or(0)
    }

    /// Sum of all counts in the ranking.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }
}

// ── Summary ───────────────────────────────────────────────────────────────────

/// Every derived view of a non-empty dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryData {
    pub total_requests: u64,
    pub unique_visitors: u64,
    pub data_transferred: u64,
    pub time_range: TimeRange,
    pub requests_over_time: TimeSeries,
    pub geo_distribution: GeoDistribution,
    pub top_paths: Ranking,
    pub top_referers: Ranking,
    pub top_user_agents: Ranking,
    pub edge_locations: Ranking,
    pub browser_distribution: Ranking,
    pub status_codes: Ranking,
}

/// Result of one aggregation pass.
///
/// Either every view is present or none is: the empty dataset yields
/// [`Summary::empty`], whose accessors all return `None` and which
/// serializes with every field set to `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary(Option<SummaryData>);

impl Summary {
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn data(&self) -> Option<&SummaryData> {
        self.0.as_ref()
    }

    pub fn total_requests(&self) -> Option<u64> {
        self.data().map(|d| d.total_requests)
    }

    pub fn unique_visitors(&self) -> Option<u64> {
        self.data().map(|d| d.unique_visitors)
    }

    pub fn data_transferred(&self) -> Option<u64> {
        self.data().map(|d| d.data_transferred)
    }

    pub fn time_range(&self) -> Option<&TimeRange> {
        self.data().map(|d| &d.time_range)
    }

    pub fn requests_over_time(&self) -> Option<&TimeSeries> {
        self.data().map(|d| &d.requests_over_time)
    }

    pub fn geo_distribution(&self) -> Option<&GeoDistribution> {
        self.data().map(|d| &d.geo_distribution)
    }

    pub fn top_paths(&self) -> Option<&Ranking> {
        self.data().map(|d| &d.top_paths)
    }

    pub fn top_referers(&self) -> Option<&Ranking> {
        self.data().map(|d| &d.top_referers)
    }

    pub fn top_user_agents(&self) -> Option<&Ranking> {
        self.data().map(|d| &d.top_user_agents)
    }

    pub fn edge_locations(&self) -> Option<&Ranking> {
        self.data().map(|d| &d.edge_locations)
    }

    pub fn browser_distribution(&self) -> Option<&Ranking> {
        self.data().map(|d| &d.browser_distribution)
    }

    pub fn status_codes(&self) -> Option<&Ranking> {
        self.data().map(|d| &d.status_codes)
    }
}

impl From<SummaryData> for Summary {
    fn from(data: SummaryData) -> Self {
        Self(Some(data))
    }
}

/// Flat, camelCase view of a [`Summary`] as consumed by the presentation
/// layer and the `--output json` mode.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryWire<'a> {
    total_requests: Option<u64>,
    unique_visitors: Option<u64>,
    data_transferred: Option<u64>,
    time_range: Option<&'a TimeRange>,
    requests_over_time: Option<&'a TimeSeries>,
    geo_distribution: Option<&'a GeoDistribution>,
    top_paths: Option<&'a Ranking>,
    top_referers: Option<&'a Ranking>,
    top_user_agents: Option<&'a Ranking>,
    edge_locations: Option<&'a Ranking>,
    browser_distribution: Option<&'a Ranking>,
    status_codes: Option<&'a Ranking>,
}

impl Serialize for Summary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SummaryWire {
            total_requests: self.total_requests(),
            unique_visitors: self.unique_visitors(),
            data_transferred: self.data_transferred(),
            time_range: self.time_range(),
            requests_over_time: self.requests_over_time(),
            geo_distribution: self.geo_distribution(),
            top_paths: self.top_paths(),
            top_referers: self.top_referers(),
            top_user_agents: self.top_user_agents(),
            edge_locations: self.edge_locations(),
            browser_distribution: self.browser_distribution(),
            status_codes: self.status_codes(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(referer: Option<&str>, user_agent: Option<&str>) -> LogRecord {
        LogRecord {
            date: "2024-01-01".to_string(),
            time: "10:15:00".to_string(),
            edge_location: "ATH50-C1".to_string(),
            bytes_sent: 512,
            client_ip: "192.0.2.1".to_string(),
            method: "GET".to_string(),
            uri_path: "/index.html".to_string(),
            status: 200,
            referer: referer.map(str::to_string),
            user_agent: user_agent.map(str::to_string),
        }
    }

    // ── status_class ─────────────────────────────────────────────────────────

    #[test]
    fn test_status_class() {
        assert_eq!(status_class(200), "2xx");
        assert_eq!(status_class(304), "3xx");
        assert_eq!(status_class(404), "4xx");
        assert_eq!(status_class(599), "5xx");
    }

    // ── browser_family ───────────────────────────────────────────────────────

    #[test]
    fn test_browser_family_priority_order() {
        let chrome = "Mozilla/5.0 (X11) AppleWebKit/537.36 Chrome/120.0 Safari/537.36";
        let edge = "Mozilla/5.0 AppleWebKit/537.36 Chrome/120.0 Safari/537.36 Edg/120.0";
        let firefox = "Mozilla/5.0 (X11; rv:121.0) Gecko/20100101 Firefox/121.0";
        let safari = "Mozilla/5.0 (Macintosh) AppleWebKit/605.1.15 Version/17.1 Safari/605.1.15";
        assert_eq!(browser_family(chrome), "Chrome");
        assert_eq!(browser_family(edge), "Chrome");
        assert_eq!(browser_family(firefox), "Firefox");
        assert_eq!(browser_family(safari), "Safari");
        assert_eq!(browser_family("Mozilla/5.0 Edge/18.0"), "Edge");
        assert_eq!(browser_family("curl/8.4.0"), "Other");
        assert_eq!(browser_family(""), "Other");
    }

    // ── LogRecord ────────────────────────────────────────────────────────────

    #[test]
    fn test_referer_label_direct() {
        assert_eq!(record(None, None).referer_label(), DIRECT_REFERER);
        assert_eq!(record(Some(""), None).referer_label(), DIRECT_REFERER);
        assert_eq!(
            record(Some("https://example.com/"), None).referer_label(),
            "https://example.com/"
        );
    }

    #[test]
    fn test_user_agent_label_unknown() {
        assert_eq!(record(None, None).user_agent_label(), UNKNOWN_USER_AGENT);
        assert_eq!(record(None, None).browser(), "Other");
    }

    #[test]
    fn test_record_deserializes_wire_names() {
        let json = serde_json::json!({
            "date": "2024-01-01",
            "time": "10:00:00",
            "x-edge-location": "FRA56-P1",
            "sc-bytes": 1024,
            "c-ip": "198.51.100.7",
            "cs-method": "GET",
            "cs-uri-stem": "/app.js",
            "sc-status": 304,
            "cs(Referer)": "https://example.com/",
        });
        let rec: LogRecord = serde_json::from_value(json).unwrap();
        assert_eq!(rec.edge_location, "FRA56-P1");
        assert_eq!(rec.bytes_sent, 1024);
        assert_eq!(rec.status, 304);
        assert_eq!(rec.referer.as_deref(), Some("https://example.com/"));
        assert!(rec.user_agent.is_none());
    }

    #[test]
    fn test_record_timestamp() {
        let ts = record(None, None).timestamp().unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-01T10:15:00+00:00");
    }

    // ── TimeSeries ───────────────────────────────────────────────────────────

    #[test]
    fn test_time_series_zero_fill() {
        let series = TimeSeries {
            buckets: vec![
                TimeBucket {
                    key: "2024-01-01T10:00".to_string(),
                    total: 2,
                    by_status: BTreeMap::from([("2xx".to_string(), 2)]),
                },
                TimeBucket {
                    key: "2024-01-01T12:00".to_string(),
                    total: 3,
                    by_status: BTreeMap::from([
                        ("2xx".to_string(), 1),
                        ("5xx".to_string(), 2),
                    ]),
                },
            ],
        };
        assert_eq!(series.series("2xx"), vec![2, 1]);
        assert_eq!(series.series("5xx"), vec![0, 2]);
        assert_eq!(series.series("3xx"), vec![0, 0]);
        assert_eq!(series.keys(), vec!["2024-01-01T10:00", "2024-01-01T12:00"]);
        assert_eq!(series.peak(), 3);
    }

    // ── Summary ──────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_summary_accessors_are_none() {
        let summary = Summary::empty();
        assert!(summary.is_empty());
        assert!(summary.total_requests().is_none());
        assert!(summary.time_range().is_none());
        assert!(summary.geo_distribution().is_none());
        assert!(summary.status_codes().is_none());
    }

    #[test]
    fn test_empty_summary_serializes_nulls() {
        let value = serde_json::to_value(Summary::empty()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 12);
        assert!(obj.values().all(|v| v.is_null()));
        assert!(obj.contains_key("totalRequests"));
        assert!(obj.contains_key("requestsOverTime"));
        assert!(obj.contains_key("browserDistribution"));
    }

    #[test]
    fn test_ranking_serializes_as_list() {
        let ranking = Ranking::new(vec![
            RankedEntry {
                label: "/".to_string(),
                count: 3,
            },
            RankedEntry {
                label: "/about".to_string(),
                count: 1,
            },
        ]);
        let value = serde_json::to_value(&ranking).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"label": "/", "count": 3},
                {"label": "/about", "count": 1},
            ])
        );
        assert_eq!(ranking.max_count(), 3);
        assert_eq!(ranking.total(), 4);
    }
}
