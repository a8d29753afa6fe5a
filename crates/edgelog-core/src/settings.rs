use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Terminal dashboard for CDN / edge access logs
#[derive(Parser, Debug, Clone)]
#[command(
    name = "edgelog",
    about = "Terminal dashboard for CDN / edge access logs",
    version
)]
pub struct Settings {
    /// Log file (JSON or CSV) or a directory of log files
    #[arg(env = "EDGELOG_PATH")]
    pub path: PathBuf,

    /// Output mode
    #[arg(long, env = "EDGELOG_OUTPUT", default_value = "tui", value_parser = ["tui", "json", "text"])]
    pub output: String,

    /// Initial fuzzy search query applied before aggregation
    #[arg(long, short = 'q', env = "EDGELOG_QUERY")]
    pub query: Option<String>,

    /// Display theme
    #[arg(long, env = "EDGELOG_THEME", default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Timezone used to display dates (auto-detected if not specified)
    #[arg(long, env = "EDGELOG_TIMEZONE", default_value = "auto")]
    pub timezone: String,

    /// Logging level
    #[arg(long, env = "EDGELOG_LOG_LEVEL", default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long, env = "EDGELOG_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse process arguments and resolve `"auto"` values.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve_auto_values(Settings::parse_from(args))
    }

    /// Whether the interactive dashboard was requested.
    pub fn is_interactive(&self) -> bool {
        self.output == "tui"
    }

    /// Resolve `"auto"` sentinel values and apply the `--debug` flag.
    ///
    /// `theme = "auto"` is left for the UI layer, which inspects the terminal.
    fn resolve_auto_values(mut settings: Settings) -> Settings {
        if settings.timezone == "auto" {
            settings.timezone = crate::time_utils::get_system_timezone();
        }

        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Vec<String> {
        let mut v = vec!["edgelog".to_string()];
        v.extend(extra.iter().map(|s| s.to_string()));
        v
    }

    #[test]
    fn test_defaults() {
        let s = Settings::try_parse_from(args(&["logs.json"])).unwrap();
        assert_eq!(s.path, PathBuf::from("logs.json"));
        assert_eq!(s.output, "tui");
        assert_eq!(s.theme, "auto");
        assert_eq!(s.timezone, "auto");
        assert_eq!(s.log_level, "INFO");
        assert!(s.query.is_none());
        assert!(s.log_file.is_none());
        assert!(!s.debug);
    }

    #[test]
    fn test_explicit_values() {
        let s = Settings::try_parse_from(args(&[
            "logs.csv",
            "--output",
            "json",
            "-q",
            "/api",
            "--theme",
            "light",
            "--timezone",
            "Europe/Athens",
        ]))
        .unwrap();
        assert_eq!(s.output, "json");
        assert_eq!(s.query.as_deref(), Some("/api"));
        assert_eq!(s.theme, "light");
        assert_eq!(s.timezone, "Europe/Athens");
        assert!(!s.is_interactive());
    }

    #[test]
    fn test_invalid_output_rejected() {
        assert!(Settings::try_parse_from(args(&["logs.json", "--output", "html"])).is_err());
    }

    #[test]
    fn test_path_required() {
        assert!(Settings::try_parse_from(args(&[])).is_err());
    }

    #[test]
    fn test_debug_overrides_log_level() {
        let s = Settings::load_from_args(args(&["logs.json", "--debug"]));
        assert_eq!(s.log_level, "DEBUG");
    }

    #[test]
    fn test_auto_timezone_resolved() {
        let s = Settings::load_from_args(args(&["logs.json"]));
        assert_ne!(s.timezone, "auto");
        assert!(!s.timezone.is_empty());
    }

    #[test]
    fn test_explicit_timezone_kept() {
        let s = Settings::load_from_args(args(&["logs.json", "--timezone", "Asia/Tokyo"]));
        assert_eq!(s.timezone, "Asia/Tokyo");
    }
}
