//! Status bar widget: where bookings go and whether address lookup is live.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::form::SubmissionStatus;
use crate::places::ScriptStatus;

/// Data passed to the status bar widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBarContext {
    /// Where submitted bookings are sent (endpoint URL or outbox path).
    pub destination: String,
    /// Address lookup state; `None` when lookups are not configured.
    pub lookup: Option<ScriptStatus>,
    pub submission: SubmissionStatus,
}

fn lookup_span(lookup: Option<ScriptStatus>) -> Span<'static> {
    match lookup {
        None => Span::styled("lookup off", Style::default().fg(Color::DarkGray)),
        Some(ScriptStatus::Loading) => {
            Span::styled("lookup loading", Style::default().fg(Color::Yellow))
        }
        Some(ScriptStatus::Ready) => Span::styled("lookup ready", Style::default().fg(Color::Green)),
        Some(ScriptStatus::Failed) => {
            Span::styled("lookup unavailable", Style::default().fg(Color::DarkGray))
        }
    }
}

/// Renders a one-line status bar:
///
/// `→ https://intake.example.com  |  lookup ready  |  submitting`
///
/// The submission segment is omitted while idle.
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let cyan = Style::default().fg(Color::Cyan);
    let dim = Style::default().fg(Color::DarkGray);

    let mut spans = vec![
        Span::styled(format!("\u{2192} {}", ctx.destination), cyan),
        Span::styled("  |  ", dim),
        lookup_span(ctx.lookup),
    ];
    let submission = match ctx.submission {
        SubmissionStatus::Idle => None,
        SubmissionStatus::Submitting => Some(Span::styled("submitting", Style::default().fg(Color::Yellow))),
        SubmissionStatus::Success => Some(Span::styled("sent", Style::default().fg(Color::Green))),
        SubmissionStatus::Error => Some(Span::styled("failed", Style::default().fg(Color::Red))),
    };
    if let Some(span) = submission {
        spans.push(Span::styled("  |  ", dim));
        spans.push(span);
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
