//! Overview tab: hourly request volume by status class, plus the browser
//! and status-class distributions.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use edgelog_core::formatting::format_count;
use edgelog_core::models::{Summary, TimeSeries, STANDARD_STATUS_CLASSES};

use crate::ranking_view::{plain_label, render_ranking};
use crate::themes::Theme;

/// One chart line: status class and `(bucket index, count)` points.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSeries {
    pub class: String,
    pub points: Vec<(f64, f64)>,
}

/// Chart lines for every standard status class, followed by any other class
/// that occurs in the series (e.g. `1xx`).
pub fn chart_series(series: &TimeSeries) -> Vec<ClassSeries> {
    let mut classes: Vec<String> = STANDARD_STATUS_CLASSES.iter().map(|c| c.to_string()).collect();
    for bucket in &series.buckets {
        for class in bucket.by_status.keys() {
            if !classes.contains(class) {
                classes.push(class.clone());
            }
        }
    }

    classes
        .into_iter()
        .map(|class| {
            let points = series
                .series(&class)
                .into_iter()
                .enumerate()
                .map(|(i, count)| (i as f64, count as f64))
                .collect();
            ClassSeries { class, points }
        })
        .collect()
}

pub fn render_overview(frame: &mut Frame, area: Rect, summary: &Summary, theme: &Theme) {
    let [chart_area, bottom] = Layout::vertical([Constraint::Min(8), Constraint::Length(9)]).areas(area);
    let [browsers, statuses] = Layout::horizontal([Constraint::Percentage(50); 2]).areas(bottom);

    match summary.requests_over_time() {
        Some(series) if !series.buckets.is_empty() => render_chart(frame, chart_area, series, theme),
        _ => frame.render_widget(
            Paragraph::new(Line::from(Span::styled("No data", theme.dim))).block(chart_block(theme)),
            chart_area,
        ),
    }

    render_ranking(
        frame,
        browsers,
        "Browsers",
        summary.browser_distribution(),
        theme,
        plain_label,
    );
    render_ranking(
        frame,
        statuses,
        "Status Codes",
        summary.status_codes(),
        theme,
        Theme::status_style,
    );
}

fn chart_block(theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(Span::styled(" Requests per Hour ", theme.table_header))
}

fn render_chart(frame: &mut Frame, area: Rect, series: &TimeSeries, theme: &Theme) {
    let lines = chart_series(series);
    let datasets: Vec<Dataset> = lines
        .iter()
        .map(|line| {
            Dataset::default()
                .name(line.class.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(theme.status_style(&line.class))
                .data(&line.points)
        })
        .collect();

    let keys = series.keys();
    let last = keys.len().saturating_sub(1);
    let x_labels: Vec<Span> = match keys.as_slice() {
        [] => Vec::new(),
        [only] => vec![Span::styled(only.to_string(), theme.label)],
        [first, .., end] => vec![
            Span::styled(first.to_string(), theme.label),
            Span::styled(keys[last / 2].to_string(), theme.label),
            Span::styled(end.to_string(), theme.label),
        ],
    };

    let peak = series.peak().max(1);
    let y_labels = vec![
        Span::styled("0", theme.label),
        Span::styled(format_count(peak / 2), theme.label),
        Span::styled(format_count(peak), theme.label),
    ];

    let chart = Chart::new(datasets)
        .block(chart_block(theme))
        .x_axis(
            Axis::default()
                .style(theme.dim)
                .bounds([0.0, last.max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme.dim)
                .bounds([0.0, peak as f64])
                .labels(y_labels),
        );
    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
