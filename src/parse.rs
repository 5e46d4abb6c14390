use url::Url;

use crate::types::NavigationTarget;

pub const GITHUB_WEB_HOST: &str = "github.com";

/// Classify free-form input as a user or repository.
///
/// Accepts `username`, `owner/repo`, or a `https://github.com/...` URL.
/// Absolute URLs on any other host fall through to the slash-split rule
/// applied to the whole string, which rejects them.
pub fn parse_input(input: &str) -> Option<NavigationTarget> {
    let trimmed = input.trim();
    let clean = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if clean.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(clean) {
        if url.host_str() == Some(GITHUB_WEB_HOST) {
            return from_url_path(&url);
        }
    }

    let parts: Vec<&str> = clean.split('/').collect();
    match parts.as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => Some(NavigationTarget::Repo {
            owner: owner.to_string(),
            repo: repo.to_string(),
        }),
        [username] => Some(NavigationTarget::User {
            username: username.to_string(),
        }),
        _ => None,
    }
}

fn from_url_path(url: &Url) -> Option<NavigationTarget> {
    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    match segments.as_slice() {
        [] => None,
        [username] => Some(NavigationTarget::User {
            username: username.to_string(),
        }),
        [owner, repo, ..] => Some(NavigationTarget::Repo {
            owner: owner.to_string(),
            repo: repo.to_string(),
        }),
    }
}
