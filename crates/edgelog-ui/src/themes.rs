use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are considered dark; 7–15 are considered light.
pub fn detect_background() -> BackgroundType {
    match std::env::var("COLORFGBG") {
        Ok(val) => background_from_colorfgbg(&val),
        Err(_) => BackgroundType::Unknown,
    }
}

fn background_from_colorfgbg(val: &str) -> BackgroundType {
    match val.split(';').next_back().map(str::parse::<u8>) {
        Some(Ok(bg)) if bg <= 6 => BackgroundType::Dark,
        Some(Ok(_)) => BackgroundType::Light,
        _ => BackgroundType::Unknown,
    }
}

/// Styles used by every dashboard widget.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub warning: Style,
    pub error: Style,

    // ── HTTP status classes ──────────────────────────────────────────────────
    pub status_2xx: Style,
    pub status_3xx: Style,
    pub status_4xx: Style,
    pub status_5xx: Style,
    /// 1xx and anything outside the four standard classes.
    pub status_other: Style,

    // ── Ranking bars ─────────────────────────────────────────────────────────
    /// Bar for an entry holding at least half of the leader's count.
    pub bar_strong: Style,
    pub bar_weak: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,

    // ── Tabs / search ────────────────────────────────────────────────────────
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub search_idle: Style,
    pub search_editing: Style,

    // ── Map ──────────────────────────────────────────────────────────────────
    pub map_land: Color,
    pub map_point: Color,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            status_2xx: Style::default().fg(Color::Green),
            status_3xx: Style::default().fg(Color::Blue),
            status_4xx: Style::default().fg(Color::Yellow),
            status_5xx: Style::default().fg(Color::Red),
            status_other: Style::default().fg(Color::Gray),

            bar_strong: Style::default().fg(Color::Cyan),
            bar_weak: Style::default().fg(Color::DarkGray),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),

            tab_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            search_idle: Style::default().fg(Color::Gray),
            search_editing: Style::default().fg(Color::Yellow),

            map_land: Color::DarkGray,
            map_point: Color::LightRed,
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            warning: Style::default().fg(Color::Magenta),
            error: Style::default().fg(Color::Red),

            status_2xx: Style::default().fg(Color::Green),
            status_3xx: Style::default().fg(Color::Blue),
            status_4xx: Style::default().fg(Color::Magenta),
            status_5xx: Style::default().fg(Color::Red),
            status_other: Style::default().fg(Color::DarkGray),

            bar_strong: Style::default().fg(Color::Blue),
            bar_weak: Style::default().fg(Color::Gray),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),

            tab_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            search_idle: Style::default().fg(Color::DarkGray),
            search_editing: Style::default().fg(Color::Magenta),

            map_land: Color::Gray,
            map_point: Color::Red,
        }
    }

    /// Basic 8-colour ANSI palette without bold modifiers.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_accent: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            status_2xx: Style::default().fg(Color::Green),
            status_3xx: Style::default().fg(Color::Cyan),
            status_4xx: Style::default().fg(Color::Yellow),
            status_5xx: Style::default().fg(Color::Red),
            status_other: Style::default().fg(Color::White),

            bar_strong: Style::default().fg(Color::Green),
            bar_weak: Style::default().fg(Color::DarkGray),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),

            tab_active: Style::default().fg(Color::Yellow),
            tab_inactive: Style::default().fg(Color::Gray),
            search_idle: Style::default().fg(Color::Gray),
            search_editing: Style::default().fg(Color::Yellow),

            map_land: Color::White,
            map_point: Color::Red,
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name. Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Style for a status class label such as `"4xx"`.
    pub fn status_style(&self, class: &str) -> Style {
        match class {
            "2xx" => self.status_2xx,
            "3xx" => self.status_3xx,
            "4xx" => self.status_4xx,
            "5xx" => self.status_5xx,
            _ => self.status_other,
        }
    }

    /// Bar style for `count` relative to the leading entry's `max`.
    pub fn bar_style(&self, count: u64, max: u64) -> Style {
        if max > 0 && count * 2 >= max {
            self.bar_strong
        } else {
            self.bar_weak
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
