use crate::error::ErrorKind;
use crate::types::{RepoSummary, UserSummary};

/// Tab selection for repo details
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Stars,
    Forks,
}

impl Tab {
    pub fn toggle(self) -> Self {
        match self {
            Tab::Stars => Tab::Forks,
            Tab::Forks => Tab::Stars,
        }
    }
}

/// Which paginated list a page belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Repos,
    Stargazers,
    Forks,
}

/// Everything the repo details view needs, fetched as one unit.
#[derive(Debug, Clone)]
pub struct RepoDetails {
    pub repo: RepoSummary,
    pub stargazers: Vec<UserSummary>,
    pub forks: Vec<UserSummary>,
}

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    Back,
    Reset,
    ScrollUp,
    ScrollDown,
    GoToTop,
    GoToBottom,
    Select,
    NextTab,

    // Search input
    SearchInput(char),
    SearchBackspace,
    SearchConfirm,

    // Intents consumed by the session
    SubmitSearch(String),
    SelectRepo { owner: String, repo: String },
    SwitchTab(Tab),
    LoadMore,

    // Navigation results
    UserReposLoaded {
        username: String,
        repos: Vec<RepoSummary>,
        generation: u64,
    },
    RepoDetailsLoaded {
        details: Box<RepoDetails>,
        generation: u64,
    },
    LoadFailed {
        kind: ErrorKind,
        detail: String,
        generation: u64,
    },

    // Pagination: append next page to existing list
    ReposAppended {
        page: u32,
        repos: Vec<RepoSummary>,
        generation: u64,
    },
    StargazersAppended {
        page: u32,
        users: Vec<UserSummary>,
        generation: u64,
    },
    ForksAppended {
        page: u32,
        users: Vec<UserSummary>,
        generation: u64,
    },
    LoadMoreFailed {
        list: ListKind,
        kind: ErrorKind,
        detail: String,
        generation: u64,
    },

    OpenInBrowser,
    YankUrl,

    None,
}
