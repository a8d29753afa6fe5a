use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the edge log dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The CSV reader failed before any record could be decoded.
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A single CSV row could not be decoded into a log record.
    #[error("Invalid CSV record at row {row}: {message}")]
    CsvRecord { row: u64, message: String },

    /// A JSON object was uploaded without a `logs` array.
    #[error("Invalid file format: missing logs data")]
    MissingLogs,

    /// The file is neither JSON nor CSV.
    #[error("Unsupported log format: {0}")]
    UnsupportedFormat(PathBuf),

    /// A directory contained no `.json` or `.csv` files.
    #[error("No log files found in {0}")]
    NoLogFiles(PathBuf),

    /// A record's date and time could not be combined into a timestamp.
    #[error("Invalid timestamp in record {index}: {value:?}")]
    InvalidTimestamp { index: usize, value: String },

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the edgelog crates.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = DashboardError::FileRead {
            path: PathBuf::from("/logs/cloudfront.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/logs/cloudfront.json"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_invalid_timestamp() {
        let err = DashboardError::InvalidTimestamp {
            index: 3,
            value: "2024-13-01T25:00:00".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid timestamp in record 3: \"2024-13-01T25:00:00\""
        );
    }

    #[test]
    fn test_error_display_missing_logs() {
        assert_eq!(
            DashboardError::MissingLogs.to_string(),
            "Invalid file format: missing logs data"
        );
    }

    #[test]
    fn test_error_display_csv_record() {
        let err = DashboardError::CsvRecord {
            row: 7,
            message: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid CSV record at row 7: invalid digit found in string"
        );
    }

    #[test]
    fn test_error_display_no_log_files() {
        let err = DashboardError::NoLogFiles(PathBuf::from("/empty/dir"));
        assert_eq!(err.to_string(), "No log files found in /empty/dir");
    }

    #[test]
    fn test_error_display_unsupported_format() {
        let err = DashboardError::UnsupportedFormat(PathBuf::from("access.log.gz"));
        assert_eq!(err.to_string(), "Unsupported log format: access.log.gz");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DashboardError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: DashboardError = json_err.into();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }
}
