use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Marker drawn either side of the dashboard title.
pub const TITLE_MARK: &str = "◆";

/// Dashboard header, three lines:
///
/// 1. Title.
/// 2. A 60-column `=` separator.
/// 3. `[ source | timezone | visible of total requests ]`.
pub struct Header<'a> {
    /// File or directory the logs were loaded from.
    pub source: &'a str,
    pub timezone: &'a str,
    /// Records behind the current summary.
    pub visible: usize,
    /// Records loaded.
    pub total: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(source: &'a str, timezone: &'a str, visible: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            source,
            timezone,
            visible,
            total,
            theme,
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let records = if self.visible == self.total {
            format!("{} requests", edgelog_core::formatting::format_count(self.total as u64))
        } else {
            format!(
                "{} of {} requests",
                edgelog_core::formatting::format_count(self.visible as u64),
                edgelog_core::formatting::format_count(self.total as u64)
            )
        };

        vec![
            Line::from(vec![
                Span::styled(TITLE_MARK, self.theme.header_accent),
                Span::styled(" EDGE ACCESS LOG DASHBOARD ", self.theme.header),
                Span::styled(TITLE_MARK, self.theme.header_accent),
            ]),
            Line::from(Span::styled("=".repeat(60), self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.source, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.timezone, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(records, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
