//! Free-text filtering of log records.
//!
//! [`FuzzyIndex`] performs case-insensitive approximate substring matching
//! over the request path, user agent, referer and edge location of each
//! record. Callers that want a different matcher implement [`RecordSearch`].

use edgelog_core::models::LogRecord;
use tracing::debug;

/// Highest `errors / query length` score that still counts as a match.
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// A searchable view over a slice of records.
///
/// `search` returns indices into the slice the index was built from, best
/// match first. An empty result means nothing matched.
pub trait RecordSearch {
    fn index(records: &[LogRecord]) -> Self
    where
        Self: Sized;

    fn search(&self, query: &str) -> Vec<usize>;
}

/// Approximate substring index over the searchable fields of each record.
#[derive(Debug, Clone)]
pub struct FuzzyIndex {
    /// Lowercased searchable keys per record.
    entries: Vec<Vec<Vec<char>>>,
    threshold: f64,
}

impl Default for FuzzyIndex {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl FuzzyIndex {
    /// Replace the match threshold (`0.0` means exact substring only).
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score of `pattern` across the keys of record `i`.
    fn score(&self, i: usize, pattern: &[char]) -> Option<f64> {
        let errors = self.entries[i]
            .iter()
            .map(|key| approximate_distance(pattern, key))
            .min()?;
        Some(errors as f64 / pattern.len() as f64)
    }
}

impl RecordSearch for FuzzyIndex {
    fn index(records: &[LogRecord]) -> Self {
        let entries = records.iter().map(searchable_keys).collect();
        FuzzyIndex {
            entries,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    fn search(&self, query: &str) -> Vec<usize> {
        let pattern: Vec<char> = query.trim().to_lowercase().chars().collect();
        if pattern.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(usize, f64)> = (0..self.entries.len())
            .filter_map(|i| {
                self.score(i, &pattern)
                    .filter(|score| *score <= self.threshold)
                    .map(|score| (i, score))
            })
            .collect();
        // Stable: equal scores keep record order.
        hits.sort_by(|a, b| a.1.total_cmp(&b.1));

        debug!(
            "Search {:?} matched {} of {} records",
            query,
            hits.len(),
            self.entries.len()
        );
        hits.into_iter().map(|(i, _)| i).collect()
    }
}

fn searchable_keys(record: &LogRecord) -> Vec<Vec<char>> {
    [
        Some(record.uri_path.as_str()),
        record.user_agent.as_deref(),
        record.referer.as_deref(),
        Some(record.edge_location.as_str()),
    ]
    .into_iter()
    .flatten()
    .filter(|key| !key.is_empty())
    .map(|key| key.to_lowercase().chars().collect())
    .collect()
}

/// Fewest edits needed to turn `pattern` into any substring of `text`.
///
/// Column-wise edit distance where starting anywhere in `text` is free.
fn approximate_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    let mut column: Vec<usize> = (0..=m).collect();
    let mut best = m;

    for &tc in text {
        let mut diagonal = 0;
        for i in 1..=m {
            let above = column[i];
            let substitution = diagonal + usize::from(pattern[i - 1] != tc);
            column[i] = substitution.min(above + 1).min(column[i - 1] + 1);
            diagonal = above;
        }
        best = best.min(column[m]);
        if best == 0 {
            break;
        }
    }
    best
}

// ── Tests ─────────────────────────────────────────────────────────────────────
