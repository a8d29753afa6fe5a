use chrono_tz::Tz;
use edgelog_core::formatting::{format_bytes, format_optional_count, format_time_range};
use edgelog_core::models::Summary;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::themes::Theme;

const NO_DATA: &str = "No data";

/// Title and formatted value of one headline figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
}

/// The four headline figures, each `"No data"` for an empty summary.
pub fn stat_cards(summary: &Summary, tz: Tz) -> [StatCard; 4] {
    [
        StatCard {
            title: "Total Requests",
            value: format_optional_count(summary.total_requests()),
        },
        StatCard {
            title: "Unique Visitors",
            value: format_optional_count(summary.unique_visitors()),
        },
        StatCard {
            title: "Data Transferred",
            value: summary
                .data_transferred()
                .map(format_bytes)
                .unwrap_or_else(|| NO_DATA.to_string()),
        },
        StatCard {
            title: "Time Range",
            value: summary
                .time_range()
                .map(|range| format_time_range(range, tz))
                .unwrap_or_else(|| NO_DATA.to_string()),
        },
    ]
}

/// Render the cards side by side, one bordered box each.
pub fn render_stat_cards(frame: &mut Frame, area: Rect, summary: &Summary, tz: Tz, theme: &Theme) {
    let columns = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for (card, column) in stat_cards(summary, tz).into_iter().zip(columns.iter()) {
        let style = if card.value == NO_DATA {
            theme.dim
        } else {
            theme.value
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(card.value, style))).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(Span::styled(format!(" {} ", card.title), theme.label)),
        );
        frame.render_widget(paragraph, *column);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
