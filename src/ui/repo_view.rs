use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use crate::action::Tab;
use crate::app::App;
use crate::paginated::Paginated;
use crate::types::UserSummary;
use crate::ui::{more_hint, truncate};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    render_repo_card(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);

    let state = app.state();
    match state.tab {
        Tab::Stars => render_users(
            frame,
            app,
            chunks[2],
            &state.stargazers,
            app.star_index,
            "Stargazers",
            "No stargazers yet. Be the first!",
        ),
        Tab::Forks => render_users(
            frame,
            app,
            chunks[2],
            &state.forks,
            app.fork_index,
            "Forks",
            "No forks yet.",
        ),
    }
}

fn render_repo_card(frame: &mut Frame, app: &App, area: Rect) {
    let Some(repo) = &app.state().repo else {
        return;
    };

    let description = repo
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or("No description available.");

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("★ {} Stars", repo.stars),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("   "),
            Span::styled(
                format!("⑂ {} Forks", repo.forks),
                Style::default().fg(Color::Blue),
            ),
            Span::raw("   "),
            Span::styled(
                repo.language.clone().unwrap_or_default(),
                Style::default().fg(Color::Magenta),
            ),
        ]),
        Line::from(Span::styled(
            description.to_string(),
            Style::default().fg(Color::Gray),
        )),
    ];

    let card = Paragraph::new(lines)
        .block(
            Block::default().borders(Borders::ALL).title(Span::styled(
                format!(" {} ", repo.full_name),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(card, area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.state();
    let titles = vec![
        format!("[S] Stargazers ({})", state.stargazers.len()),
        format!("[F] Forks ({})", state.forks.len()),
    ];

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(match state.tab {
            Tab::Stars => 0,
            Tab::Forks => 1,
        })
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_users(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    users: &Paginated<UserSummary>,
    selected: usize,
    title: &str,
    empty_text: &str,
) {
    let state = app.state();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ({}) ", title, users.len()))
        .title_bottom(more_hint(users.has_more, state.loading_more));

    if users.is_empty() {
        let empty = Paragraph::new(empty_text)
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let w = area.width.saturating_sub(2) as usize;
    let fixed = 25; // @login(25)
    let flex = w.saturating_sub(fixed).max(10);

    let items: Vec<ListItem> = users
        .items
        .iter()
        .enumerate()
        .map(|(i, user)| {
            let style = if i == selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let profile = [user.name.as_deref(), user.location.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" · ");

            let line = Line::from(vec![
                Span::styled(
                    format!("@{:<24}", truncate(&user.login, 23)),
                    style,
                ),
                Span::styled(
                    format!("{:<flex$}", truncate(&profile, flex)),
                    Style::default().fg(Color::Gray),
                ),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut list_state = ListState::default();
    list_state.select(Some(selected));

    frame.render_stateful_widget(list, area, &mut list_state);
}
