//! Main application state and TUI event loop.
//!
//! [`App`] owns the theme, the dashboard session and the interaction state
//! (active tab, search input). Key handling is a pure state transition so it
//! can be tested without a terminal.

use std::io;
use std::time::Duration;

use chrono_tz::Tz;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    text::{Line, Span, Text},
    widgets::{Paragraph, Tabs},
    Frame, Terminal,
};

use edgelog_core::time_utils::resolve_timezone;
use edgelog_runtime::session::DashboardSession;

use crate::components::header::Header;
use crate::components::search_bar::SearchBar;
use crate::components::stat_cards::render_stat_cards;
use crate::themes::Theme;
use crate::{map_view, overview_view, ranking_view};

const KEY_HINTS: &str = "/ search  Enter apply  Esc cancel  Tab switch view  c clear  q quit";

// ── Tab / InputMode ───────────────────────────────────────────────────────────

/// Dashboard tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Rankings,
    Map,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Overview, Tab::Rankings, Tab::Map];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Rankings => "Rankings",
            Tab::Map => "Map",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Overview => 0,
            Tab::Rankings => 1,
            Tab::Map => 2,
        }
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Whether keystrokes go to the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    pub theme: Theme,
    /// Zone used to display dates.
    pub timezone: Tz,
    pub session: DashboardSession,
    pub tab: Tab,
    pub input_mode: InputMode,
    /// Search text being edited.
    pub input: String,
    /// Last error from applying a query, shown in the footer.
    pub status: Option<String>,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, timezone: &str, session: DashboardSession) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            timezone: resolve_timezone(timezone),
            session,
            tab: Tab::Overview,
            input_mode: InputMode::Normal,
            input: String::new(),
            status: None,
            should_quit: false,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until `q` or `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout. The terminal is
    /// restored even when drawing fails.
    pub async fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal).await;

        restore_terminal()?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        let tick_rate = Duration::from_millis(250);
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
            // Let the caller's select! observe SIGINT between ticks.
            tokio::task::yield_now().await;
        }
        Ok(())
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Editing => self.handle_editing_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('/') => {
                self.input = self.session.query().to_string();
                self.input_mode = InputMode::Editing;
            }
            KeyCode::Char('c') => {
                self.input.clear();
                self.apply_query();
            }
            KeyCode::Tab | KeyCode::Right => self.tab = self.tab.next(),
            KeyCode::BackTab | KeyCode::Left => self.tab = self.tab.previous(),
            KeyCode::Char('1') => self.tab = Tab::Overview,
            KeyCode::Char('2') => self.tab = Tab::Rankings,
            KeyCode::Char('3') => self.tab = Tab::Map,
            _ => {}
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.apply_query();
            }
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input.clear();
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    fn apply_query(&mut self) {
        match self.session.set_query(&self.input) {
            Ok(()) => self.status = None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to apply search query");
                self.status = Some(e.to_string());
            }
        }
        self.input.clear();
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame) {
        let [header_area, cards_area, tabs_area, search_area, body_area, footer_area] =
            Layout::vertical([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .areas(frame.area());

        let source = self
            .session
            .metadata()
            .map(|m| m.source.display().to_string())
            .unwrap_or_else(|| "no source".to_string());
        let tz_name = self.timezone.name();
        let header = Header::new(
            &source,
            tz_name,
            self.session.visible_count(),
            self.session.records().len(),
            &self.theme,
        );
        frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);

        let summary = self.session.summary();
        render_stat_cards(frame, cards_area, summary, self.timezone, &self.theme);

        let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()))
            .select(self.tab.index())
            .style(self.theme.tab_inactive)
            .highlight_style(self.theme.tab_active)
            .divider(" | ");
        frame.render_widget(tabs, tabs_area);

        let search = SearchBar::new(
            &self.input,
            self.session.query(),
            self.input_mode == InputMode::Editing,
            &self.theme,
        );
        frame.render_widget(Paragraph::new(search.to_line()), search_area);

        match self.tab {
            Tab::Overview => overview_view::render_overview(frame, body_area, summary, &self.theme),
            Tab::Rankings => ranking_view::render_rankings(frame, body_area, summary, &self.theme),
            Tab::Map => map_view::render_map(frame, body_area, summary, &self.theme),
        }

        let footer = match &self.status {
            Some(message) => Line::from(Span::styled(message.as_str(), self.theme.error)),
            None => Line::from(Span::styled(KEY_HINTS, self.theme.dim)),
        };
        frame.render_widget(Paragraph::new(footer), footer_area);
    }
}

/// Leave raw mode and the alternate screen.
///
/// Also called by the binary when a signal interrupts [`App::run`].
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
