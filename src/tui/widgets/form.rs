//! Form controls: single-line text inputs, checkboxes and dropdown triggers.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Applies an editing key to a single-line value.
///
/// Returns `true` if the value changed. Keys that do not edit text (Tab,
/// arrows, Enter) are left for the caller.
pub fn edit_line(value: &mut String, key: KeyEvent) -> bool {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return false;
    }
    match key.code {
        KeyCode::Char(ch) => {
            value.push(ch);
            true
        }
        KeyCode::Backspace => value.pop().is_some(),
        _ => false,
    }
}

/// How a control should be highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub focused: bool,
    pub has_error: bool,
}

impl ControlState {
    pub fn border_color(self) -> Color {
        if self.has_error {
            Color::Red
        } else if self.focused {
            Color::Yellow
        } else {
            Color::DarkGray
        }
    }
}

/// Draws `error` over the bottom border of a boxed control.
#[mutants::skip]
pub fn draw_error_line(error: &str, frame: &mut Frame, area: Rect) {
    if area.height < 2 {
        return;
    }
    let err_area = Rect {
        x: area.x + 2,
        y: area.y + area.height - 1,
        width: area.width.saturating_sub(4),
        height: 1,
    };
    let line = Paragraph::new(Span::styled(error, Style::default().fg(Color::Red)));
    frame.render_widget(line, err_area);
}

/// Renders a boxed single-line text input.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_text_input(
    label: &str,
    value: &str,
    required: bool,
    error: Option<&str>,
    control: ControlState,
    frame: &mut Frame,
    area: Rect,
) {
    let title = if required {
        format!("{label} *")
    } else {
        label.to_string()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(control.border_color()));

    let mut spans = vec![Span::raw(value)];
    if control.focused {
        spans.push(Span::styled(
            "\u{2588}",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);

    if let Some(error) = error {
        draw_error_line(error, frame, area);
    }
}

/// Renders a boxed dropdown trigger showing `summary`; `placeholder` is
/// dimmed.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_trigger(
    summary: &str,
    placeholder: bool,
    open: bool,
    error: Option<&str>,
    control: ControlState,
    frame: &mut Frame,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(control.border_color()));
    let text_style = if placeholder {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let arrow = if open { "\u{25b2}" } else { "\u{25bc}" };
    let inner_width = area.width.saturating_sub(2) as usize;
    let pad = inner_width.saturating_sub(summary.chars().count() + 2);
    let line = Line::from(vec![
        Span::styled(summary.to_string(), text_style),
        Span::raw(" ".repeat(pad)),
        Span::styled(arrow, Style::default().fg(Color::Cyan)),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);

    if let Some(error) = error {
        draw_error_line(error, frame, area);
    }
}

/// Renders a one-line checkbox, with its error (if any) on the next line.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_checkbox(
    label: &str,
    checked: bool,
    error: Option<&str>,
    control: ControlState,
    frame: &mut Frame,
    area: Rect,
) {
    let mark = if checked { "[x]" } else { "[ ]" };
    let mark_style = if control.has_error {
        Style::default().fg(Color::Red)
    } else if control.focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let mut lines = vec![Line::from(vec![
        Span::styled(mark, mark_style),
        Span::raw(" "),
        Span::styled(label.to_string(), Style::default().fg(Color::Gray)),
    ])];
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            format!("    {error}"),
            Style::default().fg(Color::Red),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}
