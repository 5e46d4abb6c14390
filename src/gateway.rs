use async_trait::async_trait;

use crate::error::Result;
use crate::types::{RepoSummary, UserSummary};

/// Page size used for every paginated listing.
pub const PAGE_SIZE: usize = 30;

/// Read-only access to a GitHub-compatible API.
///
/// Implementations neither cache nor retry: a failed request is returned
/// to the caller as-is.
#[async_trait]
pub trait Gateway: Send + Sync + std::fmt::Debug {
    async fn fetch_repo(&self, owner: &str, repo: &str) -> Result<RepoSummary>;

    /// Repositories owned by `username`, most recently updated first.
    async fn fetch_user_repos(&self, username: &str, page: u32) -> Result<Vec<RepoSummary>>;

    async fn fetch_stargazers(&self, owner: &str, repo: &str, page: u32)
        -> Result<Vec<UserSummary>>;

    /// Owners of the repository's forks, in server order.
    async fn fetch_forks(&self, owner: &str, repo: &str, page: u32) -> Result<Vec<UserSummary>>;
}
