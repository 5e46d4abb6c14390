use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::{Action, Tab};
use crate::session::{Session, SessionState, View};
use crate::tui::Event;

pub struct App {
    pub session: Session,
    pub input: String,
    pub repo_index: usize,
    pub star_index: usize,
    pub fork_index: usize,
    /// One-off status message (clipboard, browser)
    pub notice: Option<String>,
    pub should_quit: bool,
    initial_query: Option<String>,
}

impl App {
    pub fn new(session: Session, initial_query: Option<String>) -> Self {
        Self {
            session,
            input: initial_query.clone().unwrap_or_default(),
            repo_index: 0,
            star_index: 0,
            fork_index: 0,
            notice: None,
            should_quit: false,
            initial_query,
        }
    }

    pub fn state(&self) -> &SessionState {
        self.session.state()
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Init => match &self.initial_query {
                Some(query) => Action::SubmitSearch(query.clone()),
                None => Action::None,
            },
            Event::Key(key) => self.handle_key(key),
            Event::Render => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('r') => Action::Reset,
                KeyCode::Char('d') => Action::GoToBottom,
                KeyCode::Char('u') => Action::GoToTop,
                _ => Action::None,
            };
        }

        if self.state().view == View::Search {
            return match key.code {
                KeyCode::Esc => Action::Quit,
                KeyCode::Enter => Action::SearchConfirm,
                KeyCode::Backspace => Action::SearchBackspace,
                KeyCode::Char(c) => Action::SearchInput(c),
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Back,
            KeyCode::Char('/') => Action::Reset,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Char('g') | KeyCode::Home => Action::GoToTop,
            KeyCode::Char('G') | KeyCode::End => Action::GoToBottom,
            KeyCode::Enter => Action::Select,
            KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') | KeyCode::Left
            | KeyCode::Right => Action::NextTab,
            KeyCode::Char('s') => Action::SwitchTab(Tab::Stars),
            KeyCode::Char('f') => Action::SwitchTab(Tab::Forks),
            KeyCode::Char('m') => Action::LoadMore,
            KeyCode::Char('o') => Action::OpenInBrowser,
            KeyCode::Char('y') => Action::YankUrl,
            _ => Action::None,
        }
    }

    pub fn update(&mut self, action: Action) {
        if !matches!(action, Action::None) && is_user_intent(&action) {
            self.notice = None;
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Back => {
                if self.state().view == View::Search {
                    self.should_quit = true;
                } else {
                    self.apply(Action::Back);
                }
            }
            Action::Reset => {
                self.apply(Action::Reset);
                self.input.clear();
            }
            Action::SearchInput(c) => {
                self.input.push(c);
            }
            Action::SearchBackspace => {
                self.input.pop();
            }
            Action::SearchConfirm => {
                let text = self.input.clone();
                self.apply(Action::SubmitSearch(text));
            }
            Action::ScrollUp => {
                if let Some(index) = self.cursor_mut() {
                    *index = index.saturating_sub(1);
                }
            }
            Action::ScrollDown => {
                let len = self.active_len();
                if let Some(index) = self.cursor_mut() {
                    if len > 0 && *index < len - 1 {
                        *index += 1;
                    }
                }
                self.load_more_at_end();
            }
            Action::GoToTop => {
                if let Some(index) = self.cursor_mut() {
                    *index = 0;
                }
            }
            Action::GoToBottom => {
                let len = self.active_len();
                if let Some(index) = self.cursor_mut() {
                    *index = len.saturating_sub(1);
                }
                self.load_more_at_end();
            }
            Action::Select => {
                if self.state().view == View::UserRepos {
                    if let Some(repo) = self.state().repos.items.get(self.repo_index) {
                        let intent = Action::SelectRepo {
                            owner: repo.owner.login.clone(),
                            repo: repo.name.clone(),
                        };
                        self.apply(intent);
                    }
                }
            }
            Action::NextTab => {
                let tab = self.state().tab.toggle();
                self.apply(Action::SwitchTab(tab));
            }
            Action::OpenInBrowser => {
                if let Some(url) = self.selected_url() {
                    if let Err(e) = open::that(&url) {
                        self.notice = Some(format!("Could not open browser: {}", e));
                    }
                }
            }
            Action::YankUrl => {
                if let Some(url) = self.selected_url() {
                    self.notice = Some(match copy_to_clipboard(&url) {
                        Ok(()) => format!("Copied {}", url),
                        Err(e) => format!("Could not copy: {}", e),
                    });
                }
            }
            Action::None => {}
            other => self.apply(other),
        }
    }

    /// Forward to the session and keep list cursors in range of what it shows.
    fn apply(&mut self, action: Action) {
        let before = self.state().view;
        self.session.update(action);
        let after = self.state().view;

        if before != after {
            match after {
                View::Search => {
                    self.input.clear();
                    self.repo_index = 0;
                    self.star_index = 0;
                    self.fork_index = 0;
                }
                View::UserRepos if before == View::Search => {
                    self.repo_index = 0;
                }
                View::RepoDetails => {
                    self.star_index = 0;
                    self.fork_index = 0;
                }
                View::UserRepos => {}
            }
        }
    }

    fn load_more_at_end(&mut self) {
        let len = self.active_len();
        let at_end = self.cursor().is_some_and(|i| len > 0 && i + 1 >= len);
        if at_end && self.state().can_load_more() && !self.state().loading_more {
            self.apply(Action::LoadMore);
        }
    }

    /// Number of rows in the list the cursor keys move through.
    pub fn active_len(&self) -> usize {
        let state = self.state();
        match state.view {
            View::Search => 0,
            View::UserRepos => state.repos.len(),
            View::RepoDetails => match state.tab {
                Tab::Stars => state.stargazers.len(),
                Tab::Forks => state.forks.len(),
            },
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        let state = self.state();
        match state.view {
            View::Search => None,
            View::UserRepos => Some(self.repo_index),
            View::RepoDetails => match state.tab {
                Tab::Stars => Some(self.star_index),
                Tab::Forks => Some(self.fork_index),
            },
        }
    }

    fn cursor_mut(&mut self) -> Option<&mut usize> {
        let view = self.state().view;
        let tab = self.state().tab;
        match view {
            View::Search => None,
            View::UserRepos => Some(&mut self.repo_index),
            View::RepoDetails => match tab {
                Tab::Stars => Some(&mut self.star_index),
                Tab::Forks => Some(&mut self.fork_index),
            },
        }
    }

    fn selected_url(&self) -> Option<String> {
        let state = self.state();
        match state.view {
            View::Search => None,
            View::UserRepos => state
                .repos
                .items
                .get(self.repo_index)
                .map(|r| r.html_url.clone()),
            View::RepoDetails => {
                let users = match state.tab {
                    Tab::Stars => &state.stargazers.items,
                    Tab::Forks => &state.forks.items,
                };
                users
                    .get(self.cursor().unwrap_or(0))
                    .map(|u| u.html_url.clone())
                    .or_else(|| state.repo.as_ref().map(|r| r.html_url.clone()))
            }
        }
    }
}

fn is_user_intent(action: &Action) -> bool {
    !matches!(
        action,
        Action::UserReposLoaded { .. }
            | Action::RepoDetailsLoaded { .. }
            | Action::LoadFailed { .. }
            | Action::ReposAppended { .. }
            | Action::StargazersAppended { .. }
            | Action::ForksAppended { .. }
            | Action::LoadMoreFailed { .. }
    )
}

fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())
}
