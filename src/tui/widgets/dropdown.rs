//! Open dropdown panels drawn as overlays below their trigger.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// One row of an open dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRow {
    pub label: String,
    /// `Some` draws a checkbox in front of the label.
    pub checked: Option<bool>,
    pub indent: u16,
    /// Category header rows get an expand/collapse marker.
    pub expanded: Option<bool>,
}

impl PanelRow {
    pub fn plain(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checked: None,
            indent: 0,
            expanded: None,
        }
    }

    pub fn checkbox(label: impl Into<String>, checked: bool) -> Self {
        Self {
            checked: Some(checked),
            ..Self::plain(label)
        }
    }

    pub fn indented(mut self, indent: u16) -> Self {
        self.indent = indent;
        self
    }

    pub fn expandable(mut self, expanded: bool) -> Self {
        self.expanded = Some(expanded);
        self
    }

    fn to_line(&self, highlighted: bool) -> Line<'static> {
        let mut spans = vec![Span::raw(" ".repeat(self.indent as usize))];
        if let Some(expanded) = self.expanded {
            spans.push(Span::styled(
                if expanded { "\u{25be} " } else { "\u{25b8} " },
                Style::default().fg(Color::Cyan),
            ));
        }
        if let Some(checked) = self.checked {
            spans.push(Span::raw(if checked { "[x] " } else { "[ ] " }));
        }
        spans.push(Span::raw(self.label.clone()));
        let style = if highlighted {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        Line::from(spans).style(style)
    }
}

/// Where a panel of `rows` rows goes below `anchor`, clipped to `bounds`.
pub fn panel_area(anchor: Rect, rows: usize, bounds: Rect) -> Rect {
    let wanted = rows as u16 + 2;
    let y = anchor.bottom().min(bounds.bottom());
    let height = wanted.min(bounds.bottom().saturating_sub(y));
    Rect {
        x: anchor.x,
        y,
        width: anchor.width,
        height,
    }
}

/// Renders `rows` in a bordered overlay below `anchor`, keeping the row at
/// `cursor` visible. Returns the area drawn.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_panel(
    rows: &[PanelRow],
    cursor: usize,
    anchor: Rect,
    frame: &mut Frame,
) -> Rect {
    let area = panel_area(anchor, rows.len(), frame.area());
    if area.height < 3 {
        return area;
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    let visible = inner.height as usize;
    let first = cursor.saturating_sub(visible.saturating_sub(1));

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(i, row)| row.to_line(i == cursor))
        .collect();

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
    area
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
            }
            s.push('\n');
        }
        s
    }

    fn render_panel(rows: &[PanelRow], cursor: usize, height: u16) -> String {
        let backend = TestBackend::new(40, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                draw_panel(rows, cursor, Rect::new(0, 0, 40, 3), frame);
            })
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn panel_sits_below_anchor() {
        let area = panel_area(Rect::new(5, 4, 20, 3), 4, Rect::new(0, 0, 80, 30));
        assert_eq!(area, Rect::new(5, 7, 20, 6));
    }

    #[test]
    fn panel_is_clipped_to_bounds() {
        let area = panel_area(Rect::new(0, 20, 20, 3), 10, Rect::new(0, 0, 80, 26));
        assert_eq!(area.y, 23);
        assert_eq!(area.height, 3);
    }

    #[test]
    fn renders_checkbox_rows() {
        let rows = vec![
            PanelRow::checkbox("Roofing", false).expandable(true),
            PanelRow::checkbox("Roof Repairs", true).indented(2),
        ];
        let output = render_panel(&rows, 0, 10);
        assert!(output.contains("[ ] Roofing"));
        assert!(output.contains("[x] Roof Repairs"));
    }

    #[test]
    fn scrolls_to_keep_cursor_visible() {
        let rows: Vec<_> = (0..10).map(|i| PanelRow::plain(format!("Row {i}"))).collect();
        // 3 rows for the anchor, 2 for the panel border, leaves 3 visible.
        let output = render_panel(&rows, 8, 8);
        assert!(output.contains("Row 8"));
        assert!(!output.contains("Row 0"));
    }
}
