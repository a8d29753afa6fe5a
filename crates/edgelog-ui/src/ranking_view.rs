//! Ranked breakdown tables.
//!
//! Each ranking renders as a bordered [`ratatui::widgets::Table`] with rank,
//! label, count and a bar scaled against the leading entry. The Rankings tab
//! lays out top paths, referers, user agents and edge locations in a 2×2
//! grid.

use std::borrow::Cow;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use edgelog_core::formatting::format_count;
use edgelog_core::models::{Ranking, Summary};

use crate::components::rank_bar::RankBar;
use crate::themes::Theme;

/// Picks the style of a label cell.
pub type LabelStyle = fn(&Theme, &str) -> Style;

/// Default label style: the regular row colour.
pub fn plain_label(theme: &Theme, _label: &str) -> Style {
    theme.table_row
}

/// Render one ranking into `area`, or a "No data" box when it is empty.
pub fn render_ranking(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    ranking: Option<&Ranking>,
    theme: &Theme,
    label_style: LabelStyle,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(Span::styled(format!(" {} ", title), theme.table_header));

    let ranking = match ranking {
        Some(r) if !r.is_empty() => r,
        _ => {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled("No data", theme.dim))).block(block),
                area,
            );
            return;
        }
    };

    let bar_width = (area.width / 4).clamp(4, 20);
    // Borders, the rank and count columns and column spacing.
    let label_width = area.width.saturating_sub(bar_width + 2 + 4 + 10 + 3) as usize;
    let max = ranking.max_count();

    let rows: Vec<Row> = ranking
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let row_style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(format!("{}.", i + 1)).style(theme.dim),
                Cell::from(truncate_label(&entry.label, label_width).into_owned())
                    .style(label_style(theme, &entry.label)),
                Cell::from(format_count(entry.count)),
                Cell::from(Line::from(
                    RankBar::new(entry.count, max, bar_width, theme).to_span(),
                )),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(label_width as u16),
        Constraint::Length(10),
        Constraint::Length(bar_width),
    ];

    let table = Table::new(rows, widths).block(block).style(theme.text);
    frame.render_widget(table, area);
}

/// The Rankings tab: paths, referers, user agents, edge locations.
pub fn render_rankings(frame: &mut Frame, area: Rect, summary: &Summary, theme: &Theme) {
    let [top, bottom] = Layout::vertical([Constraint::Percentage(50); 2]).areas(area);
    let [paths, referers] = Layout::horizontal([Constraint::Percentage(50); 2]).areas(top);
    let [agents, edges] = Layout::horizontal([Constraint::Percentage(50); 2]).areas(bottom);

    render_ranking(frame, paths, "Top Paths", summary.top_paths(), theme, plain_label);
    render_ranking(frame, referers, "Top Referers", summary.top_referers(), theme, plain_label);
    render_ranking(frame, agents, "Top User Agents", summary.top_user_agents(), theme, plain_label);
    render_ranking(frame, edges, "Edge Locations", summary.edge_locations(), theme, plain_label);
}

/// Shorten `label` to at most `max_width` display columns, marking the cut
/// with `…`.
pub fn truncate_label(label: &str, max_width: usize) -> Cow<'_, str> {
    if label.width() <= max_width {
        return Cow::Borrowed(label);
    }
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in label.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    Cow::Owned(out)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
