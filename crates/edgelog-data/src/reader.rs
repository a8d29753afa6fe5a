//! Log file discovery and decoding.
//!
//! Reads CDN access logs exported as JSON (an array of records, or an object
//! with a `logs` array) or CSV (header row naming the log columns) and turns
//! them into [`LogRecord`]s for aggregation.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use edgelog_core::error::{DashboardError, Result};
use edgelog_core::models::LogRecord;
use regex::Regex;
use tracing::{debug, info};

// ── Public types ──────────────────────────────────────────────────────────────

/// Encoding of a log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Csv,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Json => "json",
            LogFormat::Csv => "csv",
        }
    }
}

/// Where a dataset came from.
#[derive(Debug, Clone)]
pub struct LoadMetadata {
    /// File or directory that was loaded.
    pub source: PathBuf,
    /// Format shared by every file, `None` when a directory mixed formats.
    pub format: Option<LogFormat>,
    /// Number of files decoded.
    pub files: usize,
    /// When loading finished.
    pub loaded_at: DateTime<Utc>,
}

/// Records decoded from one file or directory.
#[derive(Debug, Clone)]
pub struct LoadedLogs {
    pub records: Vec<LogRecord>,
    pub metadata: LoadMetadata,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.json` and `.csv` files recursively under `dir`, sorted by path.
pub fn find_log_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && format_from_extension(entry.path()).is_some())
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Load a single log file, or every log file below a directory.
pub fn load_path(path: &Path) -> Result<LoadedLogs> {
    let files = if path.is_dir() {
        let files = find_log_files(path);
        if files.is_empty() {
            return Err(DashboardError::NoLogFiles(path.to_path_buf()));
        }
        files
    } else {
        vec![path.to_path_buf()]
    };

    let mut records = Vec::new();
    let mut formats = Vec::with_capacity(files.len());
    for file in &files {
        let (format, mut decoded) = load_file(file)?;
        debug!(
            "File {}: {} records ({})",
            file.display(),
            decoded.len(),
            format.as_str()
        );
        formats.push(format);
        records.append(&mut decoded);
    }

    let format = match formats.split_first() {
        Some((first, rest)) if rest.iter().all(|f| f == first) => Some(*first),
        _ => None,
    };

    info!(
        "Loaded {} records from {} file(s) under {}",
        records.len(),
        files.len(),
        path.display()
    );

    Ok(LoadedLogs {
        records,
        metadata: LoadMetadata {
            source: path.to_path_buf(),
            format,
            files: files.len(),
            loaded_at: Utc::now(),
        },
    })
}

/// Read and decode one file, returning the detected format with its records.
pub fn load_file(path: &Path) -> Result<(LogFormat, Vec<LogRecord>)> {
    let content = std::fs::read_to_string(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let format = detect_format(path, &content)?;
    let records = match format {
        LogFormat::Json => parse_json(&content)?,
        LogFormat::Csv => parse_csv(&content)?,
    };
    Ok((format, records))
}

/// Pick the format from the file extension, falling back to sniffing the
/// content: `[` or `{` first means JSON, a comma-separated first line means
/// CSV.
pub fn detect_format(path: &Path, content: &str) -> Result<LogFormat> {
    if let Some(format) = format_from_extension(path) {
        return Ok(format);
    }
    let trimmed = content.trim_start();
    match trimmed.chars().next() {
        Some('[') | Some('{') => Ok(LogFormat::Json),
        None => Ok(LogFormat::Csv),
        Some(_) if trimmed.lines().next().is_some_and(|line| line.contains(',')) => Ok(LogFormat::Csv),
        Some(_) => Err(DashboardError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Decode a JSON upload: either a bare array of records or `{ "logs": [...] }`.
pub fn parse_json(content: &str) -> Result<Vec<LogRecord>> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let logs = match value {
        serde_json::Value::Array(_) => value,
        serde_json::Value::Object(mut map) => map.remove("logs").ok_or(DashboardError::MissingLogs)?,
        _ => return Err(DashboardError::MissingLogs),
    };
    if logs.is_null() {
        return Err(DashboardError::MissingLogs);
    }
    Ok(serde_json::from_value(logs)?)
}

/// Decode a CSV export whose header row names the log columns.
///
/// Header names may carry backslash-escaped parentheses (`cs\(Referer\)`);
/// they are unescaped before matching. Empty lines are skipped.
pub fn parse_csv(content: &str) -> Result<Vec<LogRecord>> {
    let escaped_paren = Regex::new(r"\\([()])").map_err(|e| DashboardError::Other(e.into()))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: csv::StringRecord = reader
        .headers()?
        .iter()
        .map(|h| unescape_header(&escaped_paren, h).into_owned())
        .collect();
    if headers.iter().all(str::is_empty) {
        return Ok(Vec::new());
    }
    reader.set_headers(headers);

    let mut records = Vec::new();
    for (i, result) in reader.deserialize::<LogRecord>().enumerate() {
        let record = result.map_err(|e| DashboardError::CsvRecord {
            row: e.position().map(|p| p.line()).unwrap_or(i as u64 + 2),
            message: e.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn format_from_extension(path: &Path) -> Option<LogFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "json" => Some(LogFormat::Json),
        "csv" => Some(LogFormat::Csv),
        _ => None,
    }
}

/// `cs\(Referer\)` → `cs(Referer)`.
fn unescape_header<'h>(pattern: &Regex, header: &'h str) -> Cow<'h, str> {
    pattern.replace_all(header, "$1")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
