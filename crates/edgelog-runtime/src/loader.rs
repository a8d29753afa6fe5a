//! Async file loading.
//!
//! Decoding is blocking file I/O plus CPU-bound parsing, so it runs on the
//! tokio blocking pool and leaves the UI task responsive.

use std::path::PathBuf;

use edgelog_core::error::{DashboardError, Result};
use edgelog_data::reader::{load_path, LoadedLogs};

use crate::session::DashboardSession;

/// Load a log file or directory on a blocking task.
pub async fn load_records(path: impl Into<PathBuf>) -> Result<LoadedLogs> {
    let path = path.into();
    tracing::info!(path = %path.display(), "loading access logs");

    tokio::task::spawn_blocking(move || load_path(&path))
        .await
        .map_err(|e| DashboardError::Other(e.into()))?
}

/// Load `path`, aggregate it and apply an optional initial query.
pub async fn load_session(path: impl Into<PathBuf>, query: Option<&str>) -> Result<DashboardSession> {
    let logs = load_records(path).await?;
    let mut session = DashboardSession::from_logs(logs)?;
    if let Some(query) = query {
        session.set_query(query)?;
    }
    Ok(session)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_logs(dir: &TempDir, name: &str, records: serde_json::Value) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", records).unwrap();
        path
    }

    fn entry(path: &str, time: &str) -> serde_json::Value {
        serde_json::json!({
            "date": "2024-01-01",
            "time": time,
            "x-edge-location": "FRA56-P1",
            "sc-bytes": 100,
            "c-ip": "192.0.2.1",
            "cs-method": "GET",
            "cs-uri-stem": path,
            "sc-status": 200,
        })
    }

    #[tokio::test]
    async fn test_load_records_from_file() {
        let dir = TempDir::new().unwrap();
        let path = write_logs(&dir, "logs.json", serde_json::json!([entry("/", "10:00:00")]));

        let logs = load_records(&path).await.unwrap();
        assert_eq!(logs.records.len(), 1);
        assert_eq!(logs.metadata.source, path);
    }

    #[tokio::test]
    async fn test_load_records_missing_path() {
        let dir = TempDir::new().unwrap();
        let err = load_records(dir.path().join("absent.json")).await.unwrap_err();
        assert!(matches!(err, DashboardError::FileRead { .. }));
    }

    #[tokio::test]
    async fn test_load_session_applies_query() {
        let dir = TempDir::new().unwrap();
        write_logs(
            &dir,
            "logs.json",
            serde_json::json!({"logs": [entry("/api/users", "10:00:00"), entry("/blog", "11:00:00")]}),
        );

        let session = load_session(dir.path(), Some("/api")).await.unwrap();
        assert_eq!(session.query(), "/api");
        assert_eq!(session.visible_count(), 1);
        assert_eq!(session.records().len(), 2);
        assert_eq!(session.metadata().map(|m| m.files), Some(1));
    }

    #[tokio::test]
    async fn test_load_session_rejects_bad_timestamp() {
        let dir = TempDir::new().unwrap();
        let path = write_logs(&dir, "logs.json", serde_json::json!([entry("/", "late")]));
        let err = load_session(&path, None).await.unwrap_err();
        assert!(matches!(err, DashboardError::InvalidTimestamp { index: 0, .. }));
    }
}
