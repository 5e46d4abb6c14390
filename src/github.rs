use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{GazerError, Result};
use crate::gateway::{Gateway, PAGE_SIZE};
use crate::types::{ForkRecord, RepoSummary, UserSummary};

pub struct GitHub {
    client: Client,
    api_url: String,
}

impl std::fmt::Debug for GitHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHub")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl GitHub {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn repo_path(&self, owner: &str, repo: &str) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_url,
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        tracing::debug!(url, ?query, "GET");
        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(classify_status(status, url, &text));
        }

        response.json().await.map_err(GazerError::from)
    }
}

fn page_query(page: u32) -> Vec<(&'static str, String)> {
    vec![("page", page.to_string()), ("per_page", PAGE_SIZE.to_string())]
}

/// Map a non-success HTTP status to the error taxonomy.
pub(crate) fn classify_status(status: StatusCode, url: &str, body: &str) -> GazerError {
    match status {
        StatusCode::NOT_FOUND => GazerError::NotFound(url.to_string()),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            GazerError::RateLimited(format!("{}: {}", status, body))
        }
        _ => GazerError::Api(format!("GitHub API {}: {}", status, body)),
    }
}

pub(crate) fn fork_owners(forks: Vec<ForkRecord>) -> Vec<UserSummary> {
    forks.into_iter().map(|f| f.owner).collect()
}

#[async_trait]
impl Gateway for GitHub {
    async fn fetch_repo(&self, owner: &str, repo: &str) -> Result<RepoSummary> {
        self.get_json(&self.repo_path(owner, repo), &[]).await
    }

    async fn fetch_user_repos(&self, username: &str, page: u32) -> Result<Vec<RepoSummary>> {
        let url = format!(
            "{}/users/{}/repos",
            self.api_url,
            urlencoding::encode(username)
        );
        let mut query = page_query(page);
        query.push(("sort", "updated".to_string()));
        query.push(("direction", "desc".to_string()));
        self.get_json(&url, &query).await
    }

    async fn fetch_stargazers(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
    ) -> Result<Vec<UserSummary>> {
        let url = format!("{}/stargazers", self.repo_path(owner, repo));
        self.get_json(&url, &page_query(page)).await
    }

    async fn fetch_forks(&self, owner: &str, repo: &str, page: u32) -> Result<Vec<UserSummary>> {
        let url = format!("{}/forks", self.repo_path(owner, repo));
        let forks: Vec<ForkRecord> = self.get_json(&url, &page_query(page)).await?;
        Ok(fork_owners(forks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ACCEPT: &str = "application/vnd.github+json";

    fn client_for(server: &MockServer) -> GitHub {
        GitHub::new(&Config {
            api_url: server.uri(),
            ..Config::default()
        })
        .unwrap()
    }

    fn repo_json(owner: &str, name: &str) -> serde_json::Value {
        json!({
            "id": 1296269,
            "name": name,
            "full_name": format!("{}/{}", owner, name),
            "description": "My first repository on GitHub!",
            "stargazers_count": 80,
            "forks_count": 9,
            "html_url": format!("https://github.com/{}/{}", owner, name),
            "language": null,
            "updated_at": "2011-01-26T19:14:43Z",
            "owner": {
                "login": owner,
                "id": 1,
                "avatar_url": "https://avatars.githubusercontent.com/u/1"
            }
        })
    }

    fn user_json(login: &str, id: u64) -> serde_json::Value {
        json!({
            "login": login,
            "id": id,
            "avatar_url": format!("https://avatars.githubusercontent.com/u/{}", id),
            "html_url": format!("https://github.com/{}", login)
        })
    }

    #[test]
    fn not_found_status() {
        let err = classify_status(StatusCode::NOT_FOUND, "/repos/a/b", "{}");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn forbidden_and_too_many_requests_are_rate_limits() {
        let err = classify_status(StatusCode::FORBIDDEN, "/users/a/repos", "rate limit");
        assert_eq!(err.kind(), ErrorKind::RateLimited);
        let err = classify_status(StatusCode::TOO_MANY_REQUESTS, "/users/a/repos", "");
        assert_eq!(err.kind(), ErrorKind::RateLimited);
    }

    #[test]
    fn other_status_is_unknown() {
        let err = classify_status(StatusCode::INTERNAL_SERVER_ERROR, "/repos/a/b", "boom");
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }

    #[test]
    fn fork_owners_keep_server_order() {
        let json = r#"[
            {"id": 10, "owner": {"login": "zed", "id": 3, "avatar_url": "a", "html_url": "https://github.com/zed"}},
            {"id": 11, "owner": {"login": "amy", "id": 1, "avatar_url": "b", "html_url": "https://github.com/amy"}}
        ]"#;
        let forks: Vec<ForkRecord> = serde_json::from_str(json).unwrap();
        let owners = fork_owners(forks);
        let logins: Vec<&str> = owners.iter().map(|u| u.login.as_str()).collect();
        assert_eq!(logins, vec!["zed", "amy"]);
    }

    #[test]
    fn repo_path_escapes_segments() {
        let config = Config {
            api_url: "https://api.github.com/".to_string(),
            ..Config::default()
        };
        let github = GitHub::new(&config).unwrap();
        assert_eq!(
            github.repo_path("octocat", "Hello World"),
            "https://api.github.com/repos/octocat/Hello%20World"
        );
    }

    #[tokio::test]
    async fn fetch_repo_escapes_path_and_sends_accept_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello%20World"))
            .and(header("Accept", ACCEPT))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(repo_json("octocat", "Hello World")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let repo = client_for(&server)
            .fetch_repo("octocat", "Hello World")
            .await
            .unwrap();
        assert_eq!(repo.full_name, "octocat/Hello World");
        assert_eq!(repo.stars, 80);
        assert_eq!(repo.forks, 9);
    }

    #[tokio::test]
    async fn user_repos_are_sorted_by_recent_update() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/repos"))
            .and(header("Accept", ACCEPT))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "30"))
            .and(query_param("sort", "updated"))
            .and(query_param("direction", "desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                repo_json("octocat", "Spoon-Knife"),
                repo_json("octocat", "Hello-World"),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let repos = client_for(&server)
            .fetch_user_repos("octocat", 2)
            .await
            .unwrap();
        let names: Vec<&str> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Spoon-Knife", "Hello-World"]);
    }

    #[tokio::test]
    async fn stargazers_request_one_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World/stargazers"))
            .and(header("Accept", ACCEPT))
            .and(query_param("page", "3"))
            .and(query_param("per_page", "30"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([user_json("schacon", 70), user_json("mojombo", 1)])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let users = client_for(&server)
            .fetch_stargazers("octocat", "Hello-World", 3)
            .await
            .unwrap();
        let logins: Vec<&str> = users.iter().map(|u| u.login.as_str()).collect();
        assert_eq!(logins, vec!["schacon", "mojombo"]);
    }

    #[tokio::test]
    async fn forks_yield_owners_in_server_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World/forks"))
            .and(header("Accept", ACCEPT))
            .and(query_param("page", "1"))
            .and(query_param("per_page", "30"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 10, "full_name": "zed/Hello-World", "owner": user_json("zed", 3)},
                {"id": 11, "full_name": "amy/Hello-World", "owner": user_json("amy", 1)},
                {"id": 12, "full_name": "kim/Hello-World", "owner": user_json("kim", 2)},
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let owners = client_for(&server)
            .fetch_forks("octocat", "Hello-World", 1)
            .await
            .unwrap();
        let logins: Vec<&str> = owners.iter().map(|u| u.login.as_str()).collect();
        assert_eq!(logins, vec!["zed", "amy", "kim"]);
    }

    async fn kind_for_response(response: ResponseTemplate) -> ErrorKind {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World"))
            .respond_with(response)
            .mount(&server)
            .await;

        client_for(&server)
            .fetch_repo("octocat", "Hello-World")
            .await
            .unwrap_err()
            .kind()
    }

    #[tokio::test]
    async fn http_statuses_map_to_error_kinds() {
        let not_found = ResponseTemplate::new(404).set_body_string(r#"{"message":"Not Found"}"#);
        assert_eq!(kind_for_response(not_found).await, ErrorKind::NotFound);
        let forbidden = ResponseTemplate::new(403).set_body_string("API rate limit exceeded");
        assert_eq!(kind_for_response(forbidden).await, ErrorKind::RateLimited);
        assert_eq!(
            kind_for_response(ResponseTemplate::new(429)).await,
            ErrorKind::RateLimited
        );
        assert_eq!(
            kind_for_response(ResponseTemplate::new(500).set_body_string("boom")).await,
            ErrorKind::Unknown
        );
    }

    #[tokio::test]
    async fn malformed_body_is_unknown() {
        let kind = kind_for_response(ResponseTemplate::new(200).set_body_string("not json")).await;
        assert_eq!(kind, ErrorKind::Unknown);
    }
}
