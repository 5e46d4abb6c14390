//! Navigation and pagination state machine.
//!
//! A [`Session`] owns the single [`SessionState`] of a browsing session.
//! Intents arrive one at a time through [`Session::update`] (or the matching
//! methods); every fetch runs as a spawned task that reports back through the
//! action channel. Results carry the generation they were issued under, so a
//! response that lands after a reset or a newer navigation is dropped.
//!
//! Observers either read [`Session::state`] or hold a [`Session::subscribe`]
//! receiver that sees a fresh snapshot after every mutation.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::action::{Action, ListKind, RepoDetails, Tab};
use crate::diagnostics::{Diagnostic, DiagnosticsHook};
use crate::error::{ErrorKind, GazerError};
use crate::gateway::Gateway;
use crate::paginated::Paginated;
use crate::parse::parse_input;
use crate::types::{NavigationTarget, RepoSummary, UserSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Search,
    UserRepos,
    RepoDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub view: View,
    /// Only meaningful in `View::RepoDetails`
    pub tab: Tab,
    pub current_user: Option<String>,
    pub repo: Option<RepoSummary>,
    pub repos: Paginated<RepoSummary>,
    pub stargazers: Paginated<UserSummary>,
    pub forks: Paginated<UserSummary>,
    pub loading: bool,
    pub loading_more: bool,
    pub error: Option<ErrorKind>,
}

impl SessionState {
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(|kind| kind.message())
    }

    /// Whether the list `loadMore` would grow right now can grow at all.
    pub fn can_load_more(&self) -> bool {
        match self.view {
            View::Search => false,
            View::UserRepos => self.repos.has_more,
            View::RepoDetails => match self.tab {
                Tab::Stars => self.stargazers.has_more,
                Tab::Forks => self.forks.has_more,
            },
        }
    }
}

pub struct Session {
    state: SessionState,
    generation: u64,
    gateway: Arc<dyn Gateway>,
    action_tx: mpsc::UnboundedSender<Action>,
    diagnostics: DiagnosticsHook,
    publisher: watch::Sender<SessionState>,
}

impl Session {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        action_tx: mpsc::UnboundedSender<Action>,
        diagnostics: DiagnosticsHook,
    ) -> Self {
        let (publisher, _) = watch::channel(SessionState::default());
        Self {
            state: SessionState::default(),
            generation: 0,
            gateway,
            action_tx,
            diagnostics,
            publisher,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.publisher.subscribe()
    }

    /// Apply an intent or a fetch result. Actions that do not concern the
    /// session are ignored.
    pub fn update(&mut self, action: Action) {
        match action {
            Action::SubmitSearch(text) => self.submit_search(&text),
            Action::SelectRepo { owner, repo } => self.select_repo(owner, repo),
            Action::SwitchTab(tab) => self.switch_tab(tab),
            Action::LoadMore => self.load_more(),
            Action::Back => self.go_back(),
            Action::Reset => self.reset(),

            Action::UserReposLoaded {
                username,
                repos,
                generation,
            } => {
                if self.is_current(generation, "user repos") {
                    tracing::info!(%username, count = repos.len(), "entered user repos");
                    self.state.loading = false;
                    self.state.error = None;
                    self.state.repos = Paginated::first_page(repos);
                    self.state.current_user = Some(username);
                    self.state.repo = None;
                    self.state.view = View::UserRepos;
                }
                self.publish();
            }
            Action::RepoDetailsLoaded {
                details,
                generation,
            } => {
                if self.is_current(generation, "repo details") {
                    let RepoDetails {
                        repo,
                        stargazers,
                        forks,
                    } = *details;
                    tracing::info!(repo = %repo.full_name, "entered repo details");
                    self.state.loading = false;
                    self.state.error = None;
                    self.state.repo = Some(repo);
                    self.state.stargazers = Paginated::first_page(stargazers);
                    self.state.forks = Paginated::first_page(forks);
                    self.state.tab = Tab::Stars;
                    self.state.view = View::RepoDetails;
                }
                self.publish();
            }
            Action::LoadFailed {
                kind,
                detail,
                generation,
            } => {
                self.report("navigate", kind, detail);
                if self.is_current(generation, "navigation failure") {
                    self.state.loading = false;
                    self.state.error = Some(kind);
                }
                self.publish();
            }

            Action::ReposAppended {
                page,
                repos,
                generation,
            } => {
                if self.is_current(generation, "repos page") {
                    self.state.loading_more = false;
                    if !self.state.repos.append_page(page, repos) {
                        tracing::debug!(page, "dropping out-of-sequence repos page");
                    }
                }
                self.publish();
            }
            Action::StargazersAppended {
                page,
                users,
                generation,
            } => {
                if self.is_current(generation, "stargazers page") {
                    self.state.loading_more = false;
                    if !self.state.stargazers.append_page(page, users) {
                        tracing::debug!(page, "dropping out-of-sequence stargazers page");
                    }
                }
                self.publish();
            }
            Action::ForksAppended {
                page,
                users,
                generation,
            } => {
                if self.is_current(generation, "forks page") {
                    self.state.loading_more = false;
                    if !self.state.forks.append_page(page, users) {
                        tracing::debug!(page, "dropping out-of-sequence forks page");
                    }
                }
                self.publish();
            }
            Action::LoadMoreFailed {
                list,
                kind,
                detail,
                generation,
            } => {
                // Never surfaced to the user; cursor and has-more stay put for a retry.
                self.report(load_more_operation(list), kind, detail);
                if self.is_current(generation, "load more failure") {
                    self.state.loading_more = false;
                }
                self.publish();
            }

            _ => {}
        }
    }

    pub fn submit_search(&mut self, text: &str) {
        if self.state.loading {
            tracing::debug!("search ignored while loading");
            return;
        }

        let Some(target) = parse_input(text) else {
            self.state.error = Some(ErrorKind::InvalidInput);
            self.publish();
            return;
        };

        tracing::debug!(%target, "search submitted");
        // New top-level navigation starts from a clean session.
        self.reset();
        match target {
            NavigationTarget::User { username } => self.enter_user_repos(username),
            NavigationTarget::Repo { owner, repo } => self.enter_repo_details(owner, repo),
        }
    }

    pub fn enter_user_repos(&mut self, username: String) {
        if self.state.loading {
            tracing::debug!(%username, "navigation ignored while loading");
            return;
        }

        let generation = self.begin_navigation();
        self.state.repos = Paginated::default();
        self.state.stargazers = Paginated::default();
        self.state.forks = Paginated::default();

        let tx = self.action_tx.clone();
        let gateway = Arc::clone(&self.gateway);
        tokio::spawn(async move {
            let action = match gateway.fetch_user_repos(&username, 1).await {
                Ok(repos) => Action::UserReposLoaded {
                    username,
                    repos,
                    generation,
                },
                Err(e) => load_failed(e, generation),
            };
            tx.send(action).ok();
        });

        self.publish();
    }

    /// Fetch repo metadata, then page 1 of stargazers and forks together.
    /// Nothing becomes visible unless all three succeed. The user repo list
    /// and `current_user` are left alone so `go_back` can return to them.
    pub fn enter_repo_details(&mut self, owner: String, repo: String) {
        if self.state.loading {
            tracing::debug!(%owner, %repo, "navigation ignored while loading");
            return;
        }

        let generation = self.begin_navigation();
        self.state.stargazers = Paginated::default();
        self.state.forks = Paginated::default();

        let tx = self.action_tx.clone();
        let gateway = Arc::clone(&self.gateway);
        tokio::spawn(async move {
            let action = match fetch_repo_details(gateway.as_ref(), &owner, &repo).await {
                Ok(details) => Action::RepoDetailsLoaded {
                    details: Box::new(details),
                    generation,
                },
                Err(e) => load_failed(e, generation),
            };
            tx.send(action).ok();
        });

        self.publish();
    }

    pub fn select_repo(&mut self, owner: String, repo: String) {
        self.enter_repo_details(owner, repo);
    }

    pub fn load_more(&mut self) {
        if self.state.loading_more {
            return;
        }

        let generation = self.generation;
        let tx = self.action_tx.clone();
        let gateway = Arc::clone(&self.gateway);

        match self.state.view {
            View::Search => return,
            View::UserRepos => {
                let Some(username) = self.state.current_user.clone() else {
                    return;
                };
                if !self.state.repos.has_more {
                    tracing::debug!(%username, "no more repos");
                    return;
                }
                let page = self.state.repos.next_page();
                self.state.loading_more = true;
                tokio::spawn(async move {
                    let action = match gateway.fetch_user_repos(&username, page).await {
                        Ok(repos) => Action::ReposAppended {
                            page,
                            repos,
                            generation,
                        },
                        Err(e) => load_more_failed(ListKind::Repos, e, generation),
                    };
                    tx.send(action).ok();
                });
            }
            View::RepoDetails => {
                let Some(NavigationTarget::Repo { owner, repo }) = self
                    .state
                    .repo
                    .as_ref()
                    .and_then(|r| parse_input(&r.html_url))
                else {
                    tracing::debug!("cannot derive owner/repo from repo url");
                    return;
                };

                let tab = self.state.tab;
                let list = match tab {
                    Tab::Stars => &self.state.stargazers,
                    Tab::Forks => &self.state.forks,
                };
                if !list.has_more {
                    tracing::debug!(?tab, "no more users");
                    return;
                }
                let page = list.next_page();
                self.state.loading_more = true;
                tokio::spawn(async move {
                    let action = match tab {
                        Tab::Stars => match gateway.fetch_stargazers(&owner, &repo, page).await {
                            Ok(users) => Action::StargazersAppended {
                                page,
                                users,
                                generation,
                            },
                            Err(e) => load_more_failed(ListKind::Stargazers, e, generation),
                        },
                        Tab::Forks => match gateway.fetch_forks(&owner, &repo, page).await {
                            Ok(users) => Action::ForksAppended {
                                page,
                                users,
                                generation,
                            },
                            Err(e) => load_more_failed(ListKind::Forks, e, generation),
                        },
                    };
                    tx.send(action).ok();
                });
            }
        }

        self.publish();
    }

    /// Both tabs are loaded up front, so switching never fetches.
    pub fn switch_tab(&mut self, tab: Tab) {
        if self.state.view != View::RepoDetails {
            return;
        }
        self.state.tab = tab;
        self.publish();
    }

    pub fn go_back(&mut self) {
        if self.state.view == View::RepoDetails && self.state.current_user.is_some() {
            self.generation += 1;
            self.state.view = View::UserRepos;
            self.state.tab = Tab::default();
            self.state.repo = None;
            self.state.stargazers = Paginated::default();
            self.state.forks = Paginated::default();
            self.state.loading = false;
            self.state.loading_more = false;
            self.state.error = None;
            self.publish();
        } else {
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = SessionState::default();
        self.publish();
    }

    fn begin_navigation(&mut self) -> u64 {
        self.generation += 1;
        self.state.loading = true;
        self.state.loading_more = false;
        self.state.error = None;
        self.generation
    }

    fn is_current(&self, generation: u64, what: &str) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "discarding stale {}",
                what
            );
            return false;
        }
        true
    }

    fn report(&self, operation: &'static str, kind: ErrorKind, detail: String) {
        (self.diagnostics)(&Diagnostic {
            operation,
            kind,
            detail,
        });
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}

async fn fetch_repo_details(
    gateway: &dyn Gateway,
    owner: &str,
    repo: &str,
) -> crate::error::Result<RepoDetails> {
    let repo_info = gateway.fetch_repo(owner, repo).await?;

    let (stargazers, forks) = tokio::join!(
        gateway.fetch_stargazers(owner, repo, 1),
        gateway.fetch_forks(owner, repo, 1)
    );

    Ok(RepoDetails {
        repo: repo_info,
        stargazers: stargazers?,
        forks: forks?,
    })
}

fn load_failed(err: GazerError, generation: u64) -> Action {
    Action::LoadFailed {
        kind: err.kind(),
        detail: err.to_string(),
        generation,
    }
}

fn load_more_failed(list: ListKind, err: GazerError, generation: u64) -> Action {
    Action::LoadMoreFailed {
        list,
        kind: err.kind(),
        detail: err.to_string(),
        generation,
    }
}

fn load_more_operation(list: ListKind) -> &'static str {
    match list {
        ListKind::Repos => "load more repos",
        ListKind::Stargazers => "load more stargazers",
        ListKind::Forks => "load more forks",
    }
}
