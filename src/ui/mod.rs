mod repo_list;
mod repo_view;
mod search;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::session::View;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    match app.state().view {
        View::Search => search::render(frame, app, chunks[1]),
        View::UserRepos => repo_list::render(frame, app, chunks[1]),
        View::RepoDetails => repo_view::render(frame, app, chunks[1]),
    }

    render_status_bar(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.state();
    let title = match state.view {
        View::Search => "gazer - Search".to_string(),
        View::UserRepos => match &state.current_user {
            Some(user) => format!("gazer - {}", user),
            None => "gazer - Repositories".to_string(),
        },
        View::RepoDetails => match &state.repo {
            Some(repo) => format!("gazer - {}", repo.full_name),
            None => "gazer - Repository".to_string(),
        },
    };

    let header = Paragraph::new(Line::from(vec![Span::styled(
        title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )]))
    .style(Style::default().bg(Color::DarkGray));

    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.state();
    let status = if let Some(message) = state.error_message() {
        Line::from(vec![Span::styled(
            format!("Error: {}", message),
            Style::default().fg(Color::Red),
        )])
    } else if state.loading {
        Line::from(vec![Span::styled(
            "Loading...",
            Style::default().fg(Color::Yellow),
        )])
    } else if state.loading_more {
        Line::from(vec![Span::styled(
            "Loading more...",
            Style::default().fg(Color::Yellow),
        )])
    } else if let Some(notice) = &app.notice {
        Line::from(vec![Span::styled(
            notice.clone(),
            Style::default().fg(Color::Green),
        )])
    } else {
        let help = match state.view {
            View::Search => "Enter: search | Esc: quit | Ctrl+r: reset",
            View::UserRepos => {
                "j/k/g/G: nav | Enter: stargazers | m: more | o: open | y: yank | q: back"
            }
            View::RepoDetails => {
                "h/l: tabs | j/k/g/G: nav | m: more | o: open | y: yank | /: new search | q: back"
            }
        };
        Line::from(vec![Span::styled(help, Style::default().fg(Color::Gray))])
    };

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status_bar, area);
}

/// Shorten `text` to `width` columns, marking the cut with "...".
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

/// Footer line for a paginated list
pub(crate) fn more_hint(has_more: bool, loading_more: bool) -> &'static str {
    match (has_more, loading_more) {
        (_, true) => " loading more... ",
        (true, false) => " m: load more ",
        (false, false) => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_long_text() {
        assert_eq!(truncate("octocat/Hello-World", 10), "octocat...");
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("ünïcödé", 7), "ünïcödé");
        assert_eq!(truncate("ünïcödé-repo", 7), "ünïc...");
    }

    #[test]
    fn more_hint_states() {
        assert_eq!(more_hint(true, false), " m: load more ");
        assert_eq!(more_hint(false, false), "");
        assert_eq!(more_hint(true, true), " loading more... ");
    }
}
