use chrono::Utc;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::types::RepoSummary;
use crate::ui::{more_hint, truncate};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.state();
    let owner = state.current_user.as_deref().unwrap_or("Repositories");

    if state.repos.is_empty() && !state.loading {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", owner));
        let empty = Paragraph::new("No public repositories")
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let w = area.width.saturating_sub(2) as usize;
    let fixed = 62; // name(30) + stars(8) + forks(8) + language(12) + age(4)
    let flex = w.saturating_sub(fixed).max(10);
    let now = Utc::now();

    let items: Vec<ListItem> = state
        .repos
        .items
        .iter()
        .enumerate()
        .map(|(i, repo)| {
            let style = if i == app.repo_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let description = repo
                .description
                .as_deref()
                .map(|d| truncate(d, flex))
                .unwrap_or_default();
            let language = repo.language.as_deref().unwrap_or("-");
            let age_days = (now - repo.updated_at).num_days().max(0);

            let line = Line::from(vec![
                Span::styled(repo_label(repo), style),
                Span::styled(
                    format!("★ {:>5} ", repo.stars),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    format!("⑂ {:>5} ", repo.forks),
                    Style::default().fg(Color::Blue),
                ),
                Span::styled(
                    format!("{:<12}", truncate(language, 12)),
                    Style::default().fg(Color::Magenta),
                ),
                Span::styled(
                    format!("{:>3}d ", age_days),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<flex$}", description),
                    Style::default().fg(Color::Gray),
                ),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ({}) ", owner, state.repos.len()))
                .title_bottom(more_hint(state.repos.has_more, state.loading_more)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut list_state = ListState::default();
    list_state.select(Some(app.repo_index));

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// `owner/name`, padded to the fixed name column
fn repo_label(repo: &RepoSummary) -> String {
    format!("{:<30}", truncate(&repo.full_name, 30))
}
