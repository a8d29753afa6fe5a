use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// One-line search prompt.
///
/// While editing, shows the pending input followed by a cursor block.
/// Otherwise shows the applied query, or a hint when none is active.
pub struct SearchBar<'a> {
    /// Text being typed (only shown while editing).
    pub input: &'a str,
    /// Query currently applied to the dashboard.
    pub applied: &'a str,
    pub editing: bool,
    pub theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    pub fn new(input: &'a str, applied: &'a str, editing: bool, theme: &'a Theme) -> Self {
        Self {
            input,
            applied,
            editing,
            theme,
        }
    }

    pub fn to_line(&self) -> Line<'a> {
        if self.editing {
            return Line::from(vec![
                Span::styled("Search: ", self.theme.search_editing),
                Span::styled(self.input, self.theme.text),
                Span::styled("█", self.theme.search_editing),
            ]);
        }
        if self.applied.is_empty() {
            Line::from(Span::styled(
                "Press / to search paths, user agents, referers and edge locations",
                self.theme.dim,
            ))
        } else {
            Line::from(vec![
                Span::styled("Filter: ", self.theme.search_idle),
                Span::styled(self.applied, self.theme.value),
                Span::styled("  (c to clear)", self.theme.dim),
            ])
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
