mod bootstrap;
mod report;

use anyhow::{Context, Result};
use edgelog_core::settings::Settings;
use edgelog_core::time_utils::resolve_timezone;
use edgelog_runtime::loader::load_session;
use edgelog_ui::app::{restore_terminal, App};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    // The TUI owns the screen, so its logs go to a file unless told otherwise.
    let log_file = match (&settings.log_file, settings.is_interactive()) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(bootstrap::ensure_directories()?.join(bootstrap::LOG_FILE_NAME)),
        (None, false) => None,
    };
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;

    tracing::info!("edgelog v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Source: {}, Output: {}, Theme: {}, Timezone: {}",
        settings.path.display(),
        settings.output,
        settings.theme,
        settings.timezone
    );

    let session = load_session(&settings.path, settings.query.as_deref())
        .await
        .with_context(|| format!("Failed to load access logs from {}", settings.path.display()))?;

    match settings.output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(session.summary())
                .context("Failed to serialize summary")?;
            println!("{json}");
        }
        "text" => {
            let tz = resolve_timezone(&settings.timezone);
            let report = report::render_text_report(&session, tz)
                .context("Failed to render report")?;
            print!("{report}");
        }
        _ => {
            let app = App::new(&settings.theme, &settings.timezone, session);

            // Raw mode swallows Ctrl+C as a key press; an OS-level SIGINT
            // still has to restore the terminal.
            tokio::select! {
                result = app.run() => {
                    result.context("Terminal UI failed")?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; shutting down");
                    restore_terminal().context("Failed to restore terminal")?;
                }
            }
        }
    }

    Ok(())
}
