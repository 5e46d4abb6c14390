use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// Where a search submission should take the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    Repo { owner: String, repo: String },
    User { username: String },
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationTarget::Repo { owner, repo } => write!(f, "{}/{}", owner, repo),
            NavigationTarget::User { username } => write!(f, "{}", username),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepoOwner {
    pub login: String,
    pub avatar_url: String,
}

/// GitHub repository as returned by `/repos/{owner}/{repo}` and `/users/{user}/repos`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepoSummary {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    #[serde(rename = "stargazers_count")]
    pub stars: u32,
    #[serde(rename = "forks_count")]
    pub forks: u32,
    pub html_url: String,
    pub language: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub owner: RepoOwner,
}

/// GitHub user, used for both stargazers and fork owners
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserSummary {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    pub html_url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub twitter_username: Option<String>,
}

/// Raw entry of the forks listing; only the owner is kept.
#[derive(Debug, Deserialize)]
pub struct ForkRecord {
    pub owner: UserSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_summary_from_api_json() {
        let json = r#"{
            "id": 1296269,
            "name": "Hello-World",
            "full_name": "octocat/Hello-World",
            "description": null,
            "stargazers_count": 80,
            "forks_count": 9,
            "html_url": "https://github.com/octocat/Hello-World",
            "language": "Ruby",
            "updated_at": "2011-01-26T19:14:43Z",
            "private": false,
            "owner": {
                "login": "octocat",
                "id": 1,
                "avatar_url": "https://github.com/images/error/octocat_happy.gif"
            }
        }"#;
        let repo: RepoSummary = serde_json::from_str(json).unwrap();
        assert_eq!(repo.full_name, "octocat/Hello-World");
        assert_eq!(repo.stars, 80);
        assert_eq!(repo.forks, 9);
        assert_eq!(repo.description, None);
        assert_eq!(repo.owner.login, "octocat");
    }

    #[test]
    fn user_summary_optional_profile_fields() {
        let json = r#"{
            "login": "octocat",
            "id": 1,
            "avatar_url": "https://github.com/images/error/octocat_happy.gif",
            "html_url": "https://github.com/octocat",
            "site_admin": false
        }"#;
        let user: UserSummary = serde_json::from_str(json).unwrap();
        assert_eq!(user.login, "octocat");
        assert!(user.name.is_none());
        assert!(user.bio.is_none());
    }

    #[test]
    fn navigation_target_display() {
        let repo = NavigationTarget::Repo {
            owner: "rust-lang".into(),
            repo: "rust".into(),
        };
        assert_eq!(repo.to_string(), "rust-lang/rust");
        let user = NavigationTarget::User {
            username: "octocat".into(),
        };
        assert_eq!(user.to_string(), "octocat");
    }
}
