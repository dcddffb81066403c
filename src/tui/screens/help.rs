//! Help screen: scrollable keybinding reference.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;

static BOOKING_KEYS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "next / prev control"),
    ("Enter (text field)", "next control"),
    ("Space / Enter", "open dropdown, tick option, toggle checkbox"),
    ("↑/↓", "move in open dropdown or suggestions"),
    ("→ / ←", "expand / collapse category; change day"),
    ("Backspace", "clear dropdown selection"),
    ("Enter (attachments)", "attach files, separated by ;"),
    ("Enter (Book Now)", "send booking"),
    ("Esc", "close dropdowns; quit"),
    ("Mouse click", "focus control; close dropdowns outside"),
    ("Ctrl+C", "quit"),
    ("F1", "help"),
];

static THANK_YOU_KEYS: &[(&str, &str)] = &[
    ("Enter / Space", "book another service"),
    ("q / Esc", "quit"),
    ("F1", "help"),
];

static HELP_KEYS: &[(&str, &str)] = &[("↑/↓", "scroll"), ("q / Esc", "back")];

/// State for the help screen.
#[derive(Debug, Clone)]
pub struct HelpState {
    scroll: u16,
    origin: Screen,
}

impl Default for HelpState {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpState {
    /// Creates a new [`HelpState`] scrolled to the top with origin [`Screen::Booking`].
    pub fn new() -> Self {
        Self {
            scroll: 0,
            origin: Screen::Booking,
        }
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Returns the screen that opened help.
    pub fn origin(&self) -> Screen {
        self.origin
    }

    /// Sets the screen to return to when help is dismissed.
    pub fn set_origin(&mut self, screen: Screen) {
        self.origin = screen;
    }

    pub fn reset(&mut self) {
        self.scroll = 0;
    }
}

impl ScreenState for HelpState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Action::None
            }
            KeyCode::Char('q') | KeyCode::Esc => Action::Navigate(self.origin),
            _ => Action::None,
        }
    }
}

fn screen_name(screen: Screen) -> &'static str {
    match screen {
        Screen::Booking => "Booking",
        Screen::ThankYou => "Thank You",
        Screen::Help => "Help",
    }
}

fn build_section(title: &'static str, keys: &[(&'static str, &'static str)]) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Yellow);
    let dim_style = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(title, header_style)),
    ];
    for (key, desc) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<22}"), key_style),
            Span::styled(*desc, dim_style),
        ]));
    }
    lines
}

fn help_content(origin: Screen) -> Vec<Line<'static>> {
    match origin {
        Screen::Booking => build_section("Booking", BOOKING_KEYS),
        Screen::ThankYou => build_section("Thank You", THANK_YOU_KEYS),
        Screen::Help => build_section("Help", HELP_KEYS),
    }
}

/// Renders the help screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_help(state: &HelpState, frame: &mut Frame, area: Rect) {
    let title = format!(" Help – {} ", screen_name(state.origin()));
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [content_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let content_lines = help_content(state.origin());
    let total = content_lines.len() as u16;
    let height = content_area.height;
    let capped_scroll = state.scroll().min(total.saturating_sub(height));

    let paragraph = Paragraph::new(content_lines).scroll((capped_scroll, 0));
    frame.render_widget(paragraph, content_area);

    let footer =
        Paragraph::new("↑/↓: scroll  q/Esc: back").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
