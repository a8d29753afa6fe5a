//! Map tab: world map with one point per resolved edge location, next to
//! ranked location and region lists.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

use edgelog_core::formatting::format_count;
use edgelog_core::geo;
use edgelog_core::models::{GeoDistribution, RankedEntry, Ranking, Summary};
use edgelog_runtime::data::aggregator::RankedHistogram;

use crate::ranking_view::{plain_label, render_ranking};
use crate::themes::Theme;

/// Points labelled with their code on the map.
const LABELLED_POINTS: usize = 10;

/// Resolved locations as a ranking, labelled `"ATH Athens"`, largest first.
pub fn location_ranking(geo_distribution: &GeoDistribution) -> Ranking {
    let mut entries: Vec<RankedEntry> = geo_distribution
        .locations
        .iter()
        .map(|point| RankedEntry {
            label: match geo::lookup(&point.location) {
                Some(edge) => format!("{} {}", point.location, edge.city),
                None => point.location.clone(),
            },
            count: point.count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    Ranking::new(entries)
}

/// Mapped requests per region, largest first.
pub fn region_ranking(geo_distribution: &GeoDistribution) -> Ranking {
    let mut hist = RankedHistogram::new();
    for point in &geo_distribution.locations {
        if let Some(edge) = geo::lookup(&point.location) {
            hist.add_n(edge.region.as_str(), point.count);
        }
    }
    hist.ranked()
}

/// Requests whose edge location has no known coordinates.
pub fn unmapped_requests(geo_distribution: &GeoDistribution) -> u64 {
    let mapped: u64 = geo_distribution.locations.iter().map(|p| p.count).sum();
    geo_distribution.total.saturating_sub(mapped)
}

pub fn render_map(frame: &mut Frame, area: Rect, summary: &Summary, theme: &Theme) {
    let [map_area, side] = Layout::horizontal([Constraint::Min(40), Constraint::Length(36)]).areas(area);
    let [list_area, region_area, note_area] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(8),
        Constraint::Length(3),
    ])
    .areas(side);

    let empty = GeoDistribution::default();
    let geo_distribution = summary.geo_distribution().unwrap_or(&empty);

    let coords: Vec<(f64, f64)> = geo_distribution
        .locations
        .iter()
        .map(|p| (p.lng, p.lat))
        .collect();
    let mut by_count: Vec<_> = geo_distribution.locations.iter().collect();
    by_count.sort_by(|a, b| b.count.cmp(&a.count));
    let labels: Vec<(f64, f64, String)> = by_count
        .iter()
        .take(LABELLED_POINTS)
        .map(|p| (p.lng, p.lat, p.location.clone()))
        .collect();

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(Span::styled(" Edge Locations ", theme.table_header)),
        )
        .x_bounds([-180.0, 180.0])
        .y_bounds([-90.0, 90.0])
        .paint(|ctx| {
            ctx.draw(&Map {
                color: theme.map_land,
                resolution: MapResolution::High,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &coords,
                color: theme.map_point,
            });
            for (x, y, code) in &labels {
                ctx.print(*x, *y, Span::styled(format!(" {}", code), theme.value));
            }
        });
    frame.render_widget(canvas, map_area);

    let ranking = location_ranking(geo_distribution);
    render_ranking(frame, list_area, "Locations", Some(&ranking), theme, plain_label);
    let regions = summary.geo_distribution().map(region_ranking);
    render_ranking(frame, region_area, "Regions", regions.as_ref(), theme, plain_label);

    let note = match summary.geo_distribution() {
        Some(g) => format!(
            "{} requests, {} not on map",
            format_count(g.total),
            format_count(unmapped_requests(g))
        ),
        None => "No data".to_string(),
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(note, theme.dim)))
            .block(Block::default().borders(Borders::ALL).border_style(theme.table_border)),
        note_area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
