//! Log aggregation: one pass over a record slice producing a [`Summary`].

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use edgelog_core::error::{DashboardError, Result};
use edgelog_core::geo;
use edgelog_core::models::{
    GeoDistribution, GeoPoint, LogRecord, RankedEntry, Ranking, Summary, SummaryData, TimeBucket,
    TimeRange, TimeSeries,
};
use edgelog_core::time_utils::hour_key;
use tracing::{debug, warn};

/// Length of the truncated top-N rankings.
pub const TOP_N: usize = 10;

// ── RankedHistogram ───────────────────────────────────────────────────────────

/// Exact frequency count over string keys that remembers the order in which
/// keys were first seen, so ties rank in discovery order.
#[derive(Debug, Clone, Default)]
pub struct RankedHistogram {
    positions: HashMap<String, usize>,
    counts: Vec<(String, u64)>,
}

impl RankedHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `key`.
    pub fn add(&mut self, key: &str) {
        self.add_n(key, 1);
    }

    /// Count `n` occurrences of `key`.
    pub fn add_n(&mut self, key: &str, n: u64) {
        match self.positions.get(key) {
            Some(&i) => self.counts[i].1 += n,
            None => {
                self.positions.insert(key.to_string(), self.counts.len());
                self.counts.push((key.to_string(), n));
            }
        }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of every count.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// Keys and counts in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, n)| (k.as_str(), *n))
    }

    /// Every key, sorted descending by count; ties keep first-seen order.
    pub fn ranked(self) -> Ranking {
        let mut entries = self.counts;
        // `sort_by` is stable.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Ranking::new(
            entries
                .into_iter()
                .map(|(label, count)| RankedEntry { label, count })
                .collect(),
        )
    }

    /// The `n` highest-count keys in rank order.
    pub fn top(self, n: usize) -> Ranking {
        let ranked = self.ranked();
        Ranking::new(ranked.entries().iter().take(n).cloned().collect())
    }
}

// ── Breakdown key extractors ──────────────────────────────────────────────────

type KeyFn = for<'r> fn(&'r LogRecord) -> Cow<'r, str>;

fn path_key(r: &LogRecord) -> Cow<'_, str> {
    Cow::Borrowed(&r.uri_path)
}

fn referer_key(r: &LogRecord) -> Cow<'_, str> {
    Cow::Borrowed(r.referer_label())
}

fn user_agent_key(r: &LogRecord) -> Cow<'_, str> {
    Cow::Borrowed(r.user_agent_label())
}

fn edge_location_key(r: &LogRecord) -> Cow<'_, str> {
    Cow::Borrowed(&r.edge_location)
}

fn browser_key(r: &LogRecord) -> Cow<'_, str> {
    Cow::Borrowed(r.browser())
}

fn status_class_key(r: &LogRecord) -> Cow<'_, str> {
    Cow::Owned(r.status_class())
}

/// Ranked breakdowns, in the order their histograms are stored.
const BREAKDOWNS: [KeyFn; 6] = [
    path_key,
    referer_key,
    user_agent_key,
    edge_location_key,
    browser_key,
    status_class_key,
];

// ── Accumulator ───────────────────────────────────────────────────────────────

/// Running state of a single aggregation pass.
struct Accumulator<'a> {
    total_requests: u64,
    unique_ips: HashSet<&'a str>,
    bytes: u64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    buckets: BTreeMap<String, TimeBucket>,
    geo: RankedHistogram,
    breakdowns: [RankedHistogram; 6],
}

impl<'a> Accumulator<'a> {
    fn new(first: DateTime<Utc>) -> Self {
        Self {
            total_requests: 0,
            unique_ips: HashSet::new(),
            bytes: 0,
            start: first,
            end: first,
            buckets: BTreeMap::new(),
            geo: RankedHistogram::new(),
            breakdowns: Default::default(),
        }
    }

    fn add(&mut self, record: &'a LogRecord, ts: DateTime<Utc>) {
        self.total_requests += 1;
        self.unique_ips.insert(record.client_ip.as_str());
        // Clamps at u64::MAX rather than wrapping.
        self.bytes = self.bytes.saturating_add(record.bytes_sent);

        self.start = self.start.min(ts);
        self.end = self.end.max(ts);

        let key = hour_key(ts);
        let bucket = self.buckets.entry(key.clone()).or_insert_with(|| TimeBucket {
            key,
            total: 0,
            by_status: BTreeMap::new(),
        });
        bucket.total += 1;
        *bucket.by_status.entry(record.status_class()).or_insert(0) += 1;

        self.geo.add(&geo::base_code(&record.edge_location));

        for (hist, key_fn) in self.breakdowns.iter_mut().zip(BREAKDOWNS) {
            hist.add(&key_fn(record));
        }
    }

    fn finish(self) -> SummaryData {
        let geo_distribution = resolve_geo(&self.geo);
        let [paths, referers, user_agents, edges, browsers, statuses] = self.breakdowns;

        SummaryData {
            total_requests: self.total_requests,
            unique_visitors: self.unique_ips.len() as u64,
            data_transferred: self.bytes,
            time_range: TimeRange {
                start: self.start,
                end: self.end,
            },
            requests_over_time: TimeSeries {
                buckets: self.buckets.into_values().collect(),
            },
            geo_distribution,
            top_paths: paths.top(TOP_N),
            top_referers: referers.top(TOP_N),
            top_user_agents: user_agents.top(TOP_N),
            edge_locations: edges.top(TOP_N),
            browser_distribution: browsers.ranked(),
            status_codes: statuses.ranked(),
        }
    }
}

/// Place every base code on the map; unknown codes are reported and left
/// out of the point list but still count towards the total.
fn resolve_geo(hist: &RankedHistogram) -> GeoDistribution {
    let mut locations = Vec::with_capacity(hist.len());
    for (code, count) in hist.iter() {
        match geo::resolve(code) {
            Some(c) => locations.push(GeoPoint {
                location: code.to_string(),
                lat: c.lat,
                lng: c.lng,
                count,
            }),
            None => warn!("No coordinates found for edge location base code {:?}", code),
        }
    }
    GeoDistribution {
        locations,
        total: hist.total(),
    }
}

// ── LogAggregator ─────────────────────────────────────────────────────────────

/// Stateless entry point for turning log records into a [`Summary`].
pub struct LogAggregator;

impl LogAggregator {
    /// Aggregate `records` into a fully populated summary.
    ///
    /// An empty slice yields [`Summary::empty`]. Any record whose date and
    /// time do not form a valid timestamp fails the whole call.
    pub fn aggregate(records: &[LogRecord]) -> Result<Summary> {
        let Some(first) = records.first() else {
            debug!("aggregate called with no records");
            return Ok(Summary::empty());
        };

        let mut acc = Accumulator::new(timestamp_of(0, first)?);
        for (index, record) in records.iter().enumerate() {
            let ts = timestamp_of(index, record)?;
            acc.add(record, ts);
        }

        let data = acc.finish();
        debug!(
            "Aggregated {} records: {} visitors, {} hourly buckets, {} map points",
            data.total_requests,
            data.unique_visitors,
            data.requests_over_time.buckets.len(),
            data.geo_distribution.locations.len(),
        );
        Ok(data.into())
    }
}

fn timestamp_of(index: usize, record: &LogRecord) -> Result<DateTime<Utc>> {
    record
        .timestamp()
        .ok_or_else(|| DashboardError::InvalidTimestamp {
            index,
            value: format!("{}T{}", record.date, record.time),
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
