//! Thank-you screen shown once a booking has been accepted.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::{Action, ScreenState};

/// State for the thank-you screen. There is nothing to remember beyond
/// which screen is showing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThankYouState;

impl ThankYouState {
    pub fn new() -> Self {
        Self
    }
}

impl ScreenState for ThankYouState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Action::BookAnother,
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }
}

/// Renders the confirmation message and the "book another" control.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_thank_you(_state: &ThankYouState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Book Your Service ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            "\u{2714}",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Thank You!",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("We've received your booking request and will contact you shortly."),
        Line::from(""),
        Line::from(Span::styled(
            "[ Book Another Service ]",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    let height = lines.len() as u16;
    let [centered] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(inner);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered,
    );

    let [_, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
    let footer = Paragraph::new("Enter: book another  q/Esc: quit  F1: help")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
