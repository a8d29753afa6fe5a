//! Plain-text rendering of a dashboard session for `--output text`.

use std::fmt::{self, Write};

use chrono_tz::Tz;
use edgelog_core::formatting::{format_bytes, format_count, format_optional_count, format_time_range};
use edgelog_core::models::{Ranking, Summary};
use edgelog_runtime::session::DashboardSession;

const LABEL_WIDTH: usize = 18;

/// Stats, hourly volume and every ranked breakdown as aligned text.
pub fn render_text_report(session: &DashboardSession, tz: Tz) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let summary = session.summary();

    writeln!(out, "Edge access log report")?;
    writeln!(out, "{}", "=".repeat(60))?;
    if let Some(meta) = session.metadata() {
        writeln!(
            out,
            "{:<LABEL_WIDTH$}{} ({} file{}, {})",
            "Source:",
            meta.source.display(),
            meta.files,
            if meta.files == 1 { "" } else { "s" },
            meta.format.map_or("mixed", |f| f.as_str())
        )?;
        writeln!(
            out,
            "{:<LABEL_WIDTH$}{}",
            "Loaded:",
            meta.loaded_at.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S %Z")
        )?;
    }
    if !session.query().is_empty() {
        writeln!(
            out,
            "{:<LABEL_WIDTH$}{:?} ({} of {} requests)",
            "Filter:",
            session.query(),
            format_count(session.visible_count() as u64),
            format_count(session.records().len() as u64)
        )?;
    }
    write_stats(&mut out, summary, tz)?;

    if let Some(series) = summary.requests_over_time() {
        writeln!(out)?;
        writeln!(out, "Requests per hour")?;
        writeln!(out, "{}", "-".repeat(60))?;
        for bucket in &series.buckets {
            let classes: Vec<String> = bucket
                .by_status
                .iter()
                .map(|(class, count)| format!("{class} {count}"))
                .collect();
            writeln!(
                out,
                "  {}  {:>8}  {}",
                bucket.key,
                format_count(bucket.total),
                classes.join(", ")
            )?;
        }
    }

    let sections: [(&str, Option<&Ranking>); 6] = [
        ("Top Paths", summary.top_paths()),
        ("Top Referers", summary.top_referers()),
        ("Top User Agents", summary.top_user_agents()),
        ("Edge Locations", summary.edge_locations()),
        ("Browsers", summary.browser_distribution()),
        ("Status Codes", summary.status_codes()),
    ];
    for (title, ranking) in sections {
        if let Some(ranking) = ranking {
            write_ranking(&mut out, title, ranking)?;
        }
    }

    if let Some(geo) = summary.geo_distribution() {
        writeln!(out)?;
        writeln!(out, "Map locations")?;
        writeln!(out, "{}", "-".repeat(60))?;
        for point in &geo.locations {
            writeln!(
                out,
                "  {}  ({:.4}, {:.4})  {}",
                point.location,
                point.lat,
                point.lng,
                format_count(point.count)
            )?;
        }
    }

    Ok(out)
}

fn write_stats(out: &mut String, summary: &Summary, tz: Tz) -> fmt::Result {
    let bytes = summary
        .data_transferred()
        .map(format_bytes)
        .unwrap_or_else(|| "No data".to_string());
    let range = summary
        .time_range()
        .map(|r| format_time_range(r, tz))
        .unwrap_or_else(|| "No data".to_string());

    writeln!(out)?;
    writeln!(
        out,
        "{:<LABEL_WIDTH$}{}",
        "Total Requests:",
        format_optional_count(summary.total_requests())
    )?;
    writeln!(
        out,
        "{:<LABEL_WIDTH$}{}",
        "Unique Visitors:",
        format_optional_count(summary.unique_visitors())
    )?;
    writeln!(out, "{:<LABEL_WIDTH$}{}", "Data Transferred:", bytes)?;
    writeln!(out, "{:<LABEL_WIDTH$}{}", "Time Range:", range)
}

fn write_ranking(out: &mut String, title: &str, ranking: &Ranking) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(60))?;
    for (i, entry) in ranking.entries().iter().enumerate() {
        writeln!(
            out,
            "{:>4}. {:>10}  {}",
            i + 1,
            format_count(entry.count),
            entry.label
        )?;
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use edgelog_core::models::LogRecord;
    use edgelog_runtime::data::reader::{LoadMetadata, LoadedLogs, LogFormat};
    use std::path::PathBuf;

    fn record(path: &str, time: &str, status: u16, referer: Option<&str>) -> LogRecord {
        LogRecord {
            date: "2024-01-01".to_string(),
            time: time.to_string(),
            edge_location: "ATH50-C1".to_string(),
            bytes_sent: 1024,
            client_ip: "192.0.2.7".to_string(),
            method: "GET".to_string(),
            uri_path: path.to_string(),
            status,
            referer: referer.map(str::to_string),
            user_agent: Some("Mozilla/5.0 Chrome/120.0 Safari/537.36".to_string()),
        }
    }

    fn session() -> DashboardSession {
        let mut session: DashboardSession = DashboardSession::new();
        session
            .load(vec![
                record("/index.html", "10:00:00", 200, None),
                record("/index.html", "10:30:00", 404, Some("https://example.com/")),
                record("/about", "11:05:00", 200, Some("")),
            ])
            .unwrap();
        session
    }

    #[test]
    fn test_report_stats() {
        let report = render_text_report(&session(), Tz::UTC).unwrap();
        assert!(report.starts_with("Edge access log report\n"));
        assert!(report.contains("Total Requests:   3\n"), "{report}");
        assert!(report.contains("Unique Visitors:  1\n"));
        assert!(report.contains("Data Transferred: 3 KB\n"));
        assert!(report.contains("Time Range:       2024-01-01 - 2024-01-01\n"));
    }

    #[test]
    fn test_report_sections() {
        let report = render_text_report(&session(), Tz::UTC).unwrap();
        assert!(report.contains("  2024-01-01T10:00         2  2xx 1, 4xx 1\n"), "{report}");
        assert!(report.contains("   1.          2  /index.html\n"));
        assert!(report.contains("   1.          2  (Direct)\n"));
        assert!(report.contains("Browsers"));
        assert!(report.contains("   1.          3  Chrome\n"));
        assert!(report.contains("  ATH  (37.9364, 23.9445)  3\n"));
    }

    #[test]
    fn test_report_source_metadata() {
        let logs = LoadedLogs {
            records: vec![record("/", "10:00:00", 200, None)],
            metadata: LoadMetadata {
                source: PathBuf::from("logs"),
                format: Some(LogFormat::Csv),
                files: 2,
                loaded_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap(),
            },
        };
        let session: DashboardSession = DashboardSession::from_logs(logs).unwrap();
        let report = render_text_report(&session, Tz::UTC).unwrap();
        assert!(report.contains("Source:           logs (2 files, csv)\n"), "{report}");
        assert!(report.contains("Loaded:           2024-03-01 08:30:00 UTC\n"));
    }

    #[test]
    fn test_report_with_filter() {
        let mut session = session();
        session.set_query("/about").unwrap();
        let report = render_text_report(&session, Tz::UTC).unwrap();
        assert!(report.contains("Filter:           \"/about\" (1 of 3 requests)\n"), "{report}");
        assert!(report.contains("Total Requests:   1\n"));
    }

    #[test]
    fn test_report_empty_session() {
        let empty: DashboardSession = DashboardSession::new();
        let report = render_text_report(&empty, Tz::UTC).unwrap();
        assert!(report.contains("Total Requests:   No data\n"));
        assert!(report.contains("Time Range:       No data\n"));
        assert!(!report.contains("Top Paths"));
    }
}
