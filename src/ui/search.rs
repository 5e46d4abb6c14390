use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    let intro = Paragraph::new(vec![
        Line::from(Span::styled(
            "Discover who appreciates your code.",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Enter a GitHub username or repository to start.",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(intro, chunks[1]);

    let input_area = centered_columns(60, chunks[2]);
    let placeholder = app.input.is_empty();
    let text = if placeholder {
        Span::styled(
            "username or username/repo",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(app.input.as_str())
    };
    let input = Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if app.state().loading {
                Color::Yellow
            } else {
                Color::Cyan
            }))
            .title(" Search "),
    );
    frame.render_widget(input, input_area);

    // Cursor sits after the typed text, inside the border.
    if !app.state().loading {
        let typed = if placeholder { 0 } else { app.input.chars().count() };
        frame.set_cursor_position((cursor_x(input_area, typed), input_area.y + 1));
    }

    if let Some(message) = app.state().error_message() {
        let error = Paragraph::new(Span::styled(message, Style::default().fg(Color::Red)))
            .alignment(Alignment::Center);
        frame.render_widget(error, chunks[3]);
    }
}

/// Column of the input cursor, clamped to the last cell inside the border.
fn cursor_x(area: Rect, typed: usize) -> u16 {
    let offset = u16::try_from(typed).unwrap_or(u16::MAX);
    area.x
        .saturating_add(1)
        .saturating_add(offset)
        .min(area.right().saturating_sub(2))
}

fn centered_columns(width: u16, outer: Rect) -> Rect {
    let width = width.min(outer.width);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((outer.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(outer);

    horizontal[1]
}
