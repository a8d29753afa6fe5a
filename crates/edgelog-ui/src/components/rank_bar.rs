use crate::themes::Theme;
use ratatui::text::Span;

/// Character for the filled part of a bar.
pub const FILLED: char = '\u{2588}'; // █  FULL BLOCK
/// Character for the unfilled part of a bar.
pub const EMPTY: char = '\u{2591}'; // ░  LIGHT SHADE

/// Horizontal bar showing one ranked entry relative to the leading entry.
pub struct RankBar<'a> {
    pub count: u64,
    /// Count of the top entry in the same ranking.
    pub max: u64,
    /// Bar width in columns.
    pub width: u16,
    pub theme: &'a Theme,
}

impl<'a> RankBar<'a> {
    pub fn new(count: u64, max: u64, width: u16, theme: &'a Theme) -> Self {
        Self {
            count,
            max,
            width,
            theme,
        }
    }

    /// Number of filled columns; a non-zero count always gets at least one.
    pub fn filled(&self) -> u16 {
        if self.max == 0 || self.count == 0 || self.width == 0 {
            return 0;
        }
        let ratio = (self.count as f64 / self.max as f64).min(1.0);
        ((ratio * self.width as f64).round() as u16).clamp(1, self.width)
    }

    pub fn to_span(&self) -> Span<'a> {
        let filled = self.filled() as usize;
        let empty = (self.width as usize).saturating_sub(filled);
        let mut bar = String::with_capacity((filled + empty) * 3);
        bar.extend(std::iter::repeat(FILLED).take(filled));
        bar.extend(std::iter::repeat(EMPTY).take(empty));
        Span::styled(bar, self.theme.bar_style(self.count, self.max))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
