//! Dashboard session state.
//!
//! A [`DashboardSession`] owns the loaded records, their search index, the
//! active query and the summary currently on screen. Every change re-runs
//! aggregation from scratch over the visible records, and a failed
//! aggregation leaves the previous state untouched.

use edgelog_core::error::Result;
use edgelog_core::models::{LogRecord, Summary};
use edgelog_data::aggregator::LogAggregator;
use edgelog_data::reader::{LoadMetadata, LoadedLogs};
use edgelog_data::search::{FuzzyIndex, RecordSearch};

// ── DashboardSession ──────────────────────────────────────────────────────────

/// Records plus the summary derived from them.
///
/// # Example
/// ```
/// use edgelog_runtime::session::DashboardSession;
///
/// let session: DashboardSession = DashboardSession::new();
/// assert!(session.summary().is_empty());
/// assert_eq!(session.visible_count(), 0);
/// ```
#[derive(Debug)]
pub struct DashboardSession<S: RecordSearch = FuzzyIndex> {
    records: Vec<LogRecord>,
    index: S,
    query: String,
    visible: usize,
    summary: Summary,
    metadata: Option<LoadMetadata>,
}

impl<S: RecordSearch> Default for DashboardSession<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RecordSearch> DashboardSession<S> {
    /// Session with no data; every summary field reads as "no data".
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            index: S::index(&[]),
            query: String::new(),
            visible: 0,
            summary: Summary::empty(),
            metadata: None,
        }
    }

    /// Build a session from decoded logs, keeping their load metadata.
    pub fn from_logs(logs: LoadedLogs) -> Result<Self> {
        let mut session = Self::new();
        session.load_logs(logs)?;
        Ok(session)
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Replace the dataset, clear the query and re-aggregate.
    pub fn load(&mut self, records: Vec<LogRecord>) -> Result<()> {
        let summary = LogAggregator::aggregate(&records)?;
        self.index = S::index(&records);
        self.visible = records.len();
        self.records = records;
        self.query.clear();
        self.summary = summary;
        self.metadata = None;
        tracing::debug!(records = self.visible, "session dataset replaced");
        Ok(())
    }

    /// Like [`load`](Self::load), also recording where the logs came from.
    pub fn load_logs(&mut self, logs: LoadedLogs) -> Result<()> {
        self.load(logs.records)?;
        self.metadata = Some(logs.metadata);
        Ok(())
    }

    /// Filter by `query` and re-aggregate. A blank query shows everything.
    pub fn set_query(&mut self, query: &str) -> Result<()> {
        let query = query.trim();
        if query.is_empty() {
            let summary = LogAggregator::aggregate(&self.records)?;
            self.commit(String::new(), self.records.len(), summary);
            return Ok(());
        }

        let subset: Vec<LogRecord> = self
            .index
            .search(query)
            .into_iter()
            .map(|i| self.records[i].clone())
            .collect();
        let summary = LogAggregator::aggregate(&subset)?;
        self.commit(query.to_string(), subset.len(), summary);
        Ok(())
    }

    /// Drop the active query.
    pub fn clear_query(&mut self) -> Result<()> {
        self.set_query("")
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Full dataset, unfiltered.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Number of records behind the current summary.
    pub fn visible_count(&self) -> usize {
        self.visible
    }

    pub fn metadata(&self) -> Option<&LoadMetadata> {
        self.metadata.as_ref()
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn commit(&mut self, query: String, visible: usize, summary: Summary) {
        tracing::debug!(
            query = %query,
            visible,
            total = self.records.len(),
            "session summary recomputed"
        );
        self.query = query;
        self.visible = visible;
        self.summary = summary;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
