use super::{
    observer::RateObserver,
    response::{Issue, PullRequest, RateLimit, Repository},
    template::{self, TemplateContext},
};
use crate::http::{client::ClientRequestBuilder, Client};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const GITHUB_API_URL: &str = "https://api.github.com";

const REPOS_PER_PAGE: &str = "100";

#[derive(Clone)]
pub struct GithubClient {
    http: Client,
    base_url: String,
    observer: Arc<RwLock<RateObserver>>,
}

impl GithubClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        GithubClient {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            observer: Arc::new(RwLock::new(RateObserver::noop())),
        }
    }

    /// Replaces the currently registered observer.
    pub async fn set_observer(&self, observer: RateObserver) {
        *self.observer.write().await = observer;
    }

    /// Resolves `template` against `context`, issues a GET and returns the
    /// decoded JSON body. Unless the request targets the rate-limit endpoint,
    /// the observer runs to completion before this returns.
    pub async fn query(
        &self,
        template: &str,
        context: &TemplateContext,
        params: &[(&str, &str)],
    ) -> Result<Value> {
        let url = template::resolve(template, context);

        let payload: Value = self
            .http
            .clone()
            .get(&url)
            .api_headers()
            .query(params)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?;

        if !template::is_rate_limit(&url) {
            let observer = self.observer.read().await.clone();
            observer.notify(self.clone()).await;
        }

        Ok(payload)
    }

    pub async fn base_query(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        self.query(&url, &TemplateContext::new(), params).await
    }

    /// First page (up to 100) of an organization's repositories sorted by
    /// full name, without archived or disabled ones.
    pub async fn list_org_repos(&self, org: &str) -> Result<Vec<Repository>> {
        let payload = self
            .base_query(
                &format!("/orgs/{}/repos", org),
                &[("sort", "full_name"), ("per_page", REPOS_PER_PAGE)],
            )
            .await?;

        let repos: Vec<Repository> = serde_json::from_value(payload)
            .with_context(|| format!("unexpected repository listing for {}", org))?;

        Ok(repos.into_iter().filter(Repository::is_active).collect())
    }

    pub async fn list_open_pulls(&self, repo: &Repository) -> Result<Vec<PullRequest>> {
        let payload = self
            .query(&repo.pulls_url, &TemplateContext::new(), &[("state", "open")])
            .await?;

        let pulls = serde_json::from_value(payload)
            .with_context(|| format!("unexpected pull request listing for {}", repo.full_name))?;

        Ok(pulls)
    }

    /// Open issues of `repo`. The endpoint also lists pull requests; those
    /// carry a `pull_request` key and are dropped.
    pub async fn list_open_issues(&self, repo: &Repository) -> Result<Vec<Issue>> {
        let payload = self
            .query(&repo.issues_url, &TemplateContext::new(), &[("state", "open")])
            .await?;

        let entries: Vec<Value> = serde_json::from_value(payload)
            .with_context(|| format!("unexpected issue listing for {}", repo.full_name))?;

        entries
            .into_iter()
            .filter(|entry| entry.get("pull_request").is_none())
            .map(serde_json::from_value::<Issue>)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("unexpected issue in {}", repo.full_name))
    }

    pub async fn rate_limit(&self) -> Result<RateLimit> {
        let payload = self.base_query("/rate_limit", &[]).await?;

        let limit = serde_json::from_value(payload).context("unexpected rate limit payload")?;

        Ok(limit)
    }

    pub async fn rate_limit_reset(&self) -> Result<DateTime<Utc>> {
        self.rate_limit()
            .await?
            .reset_at()
            .context("rate limit reset timestamp out of range")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;
    use std::{
        sync::atomic::{AtomicBool, AtomicUsize, Ordering},
        time::Duration,
    };

    fn repo_json(server: &ServerGuard, name: &str, archived: bool, disabled: bool) -> Value {
        json!({
            "full_name": format!("demo/{}", name),
            "html_url": format!("https://github.com/demo/{}", name),
            "pulls_url": format!("{}/repos/demo/{}/pulls{{/number}}", server.url(), name),
            "issues_url": format!("{}/repos/demo/{}/issues{{/number}}", server.url(), name),
            "archived": archived,
            "disabled": disabled,
        })
    }

    fn user_json(login: &str) -> Value {
        json!({
            "login": login,
            "avatar_url": format!("https://avatars.example/{}", login),
            "html_url": format!("https://github.com/{}", login),
        })
    }

    fn issue_json(number: u64, is_pull: bool) -> Value {
        let mut issue = json!({
            "number": number,
            "title": format!("Issue {}", number),
            "body": "body",
            "html_url": format!("https://github.com/demo/r1/issues/{}", number),
            "user": user_json("alice"),
            "assignees": [],
        });
        if is_pull {
            issue["pull_request"] = json!({"url": "https://api.example/pulls/1"});
        }
        issue
    }

    fn rate_limit_json() -> String {
        json!({"resources": {"core": {"limit": 60, "remaining": 59, "reset": 1700000000}}})
            .to_string()
    }

    #[tokio::test]
    async fn should_list_only_active_org_repos() -> Result<()> {
        let mut server = Server::new_async().await;
        let body = json!([
            repo_json(&server, "archived", true, false),
            repo_json(&server, "disabled", false, true),
            repo_json(&server, "ok", false, false),
        ]);

        let m = server
            .mock("GET", "/orgs/demo/repos")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("sort".into(), "full_name".into()),
                Matcher::UrlEncoded("per_page".into(), "100".into()),
            ]))
            .match_header("accept", "application/vnd.github.v3+json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = GithubClient::new(server.url());
        let repos = client.list_org_repos("demo").await?;

        m.assert_async().await;
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].full_name, "demo/ok");

        Ok(())
    }

    #[tokio::test]
    async fn should_drop_issues_referencing_pull_requests() -> Result<()> {
        let mut server = Server::new_async().await;
        let repo: Repository = serde_json::from_value(repo_json(&server, "r1", false, false))?;
        let body = json!([
            issue_json(1, false),
            issue_json(2, true),
            issue_json(3, false),
            issue_json(4, true),
            issue_json(5, false),
        ]);

        let m = server
            .mock("GET", "/repos/demo/r1/issues")
            .match_query(Matcher::UrlEncoded("state".into(), "open".into()))
            .with_body(body.to_string())
            .create_async()
            .await;

        let issues = GithubClient::new(server.url())
            .list_open_issues(&repo)
            .await?;

        m.assert_async().await;
        let numbers: Vec<u64> = issues.iter().map(|issue| issue.number).collect();
        assert_eq!(numbers, vec![1, 3, 5]);

        Ok(())
    }

    #[tokio::test]
    async fn should_resolve_pulls_url_template() -> Result<()> {
        let mut server = Server::new_async().await;
        let repo: Repository = serde_json::from_value(repo_json(&server, "r1", false, false))?;
        let body = json!([{
            "number": 7,
            "title": "Fix",
            "body": null,
            "html_url": "https://github.com/demo/r1/pull/7",
            "user": user_json("alice"),
            "requested_reviewers": [],
            "assignees": [],
        }]);

        let m = server
            .mock("GET", "/repos/demo/r1/pulls")
            .match_query(Matcher::UrlEncoded("state".into(), "open".into()))
            .with_body(body.to_string())
            .create_async()
            .await;

        let pulls = GithubClient::new(server.url())
            .list_open_pulls(&repo)
            .await?;

        m.assert_async().await;
        assert_eq!(pulls.len(), 1);
        assert_eq!(pulls[0].number, 7);
        assert_eq!(pulls[0].body, None);

        Ok(())
    }

    #[tokio::test]
    async fn should_notify_observer_once_per_non_rate_limit_query() -> Result<()> {
        let mut server = Server::new_async().await;

        let data = server
            .mock("GET", "/data")
            .with_body("[]")
            .expect(3)
            .create_async()
            .await;
        let limit = server
            .mock("GET", "/rate_limit")
            .with_body(rate_limit_json())
            .expect(2)
            .create_async()
            .await;

        let client = GithubClient::new(server.url());
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        client
            .set_observer(RateObserver::new(move |_| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            }))
            .await;

        client.base_query("/data", &[]).await?;
        client.rate_limit().await?;
        client.base_query("/data", &[]).await?;
        client.rate_limit_reset().await?;
        client.base_query("/data", &[]).await?;

        data.assert_async().await;
        limit.assert_async().await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        Ok(())
    }

    #[tokio::test]
    async fn should_wait_for_observer_before_returning() -> Result<()> {
        let mut server = Server::new_async().await;
        let _m = server.mock("GET", "/data").with_body("{}").create_async().await;

        let client = GithubClient::new(server.url());
        let done = Arc::new(AtomicBool::new(false));
        let flag = done.clone();
        client
            .set_observer(RateObserver::new(move |_| {
                let flag = flag.clone();
                async move {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    flag.store(true, Ordering::SeqCst);
                }
            }))
            .await;

        client.base_query("/data", &[]).await?;

        assert!(done.load(Ordering::SeqCst));

        Ok(())
    }

    #[tokio::test]
    async fn should_let_observer_query_rate_limit_without_recursion() -> Result<()> {
        let mut server = Server::new_async().await;
        let _data = server.mock("GET", "/data").with_body("{}").create_async().await;
        let limit = server
            .mock("GET", "/rate_limit")
            .with_body(rate_limit_json())
            .expect(1)
            .create_async()
            .await;

        let client = GithubClient::new(server.url());
        let remaining = Arc::new(AtomicUsize::new(0));
        let readout = remaining.clone();
        client
            .set_observer(RateObserver::new(move |client| {
                let readout = readout.clone();
                async move {
                    if let Ok(limit) = client.rate_limit().await {
                        readout.store(limit.remaining() as usize, Ordering::SeqCst);
                    }
                }
            }))
            .await;

        client.base_query("/data", &[]).await?;

        limit.assert_async().await;
        assert_eq!(remaining.load(Ordering::SeqCst), 59);

        Ok(())
    }

    #[tokio::test]
    async fn should_replace_previous_observer() -> Result<()> {
        let mut server = Server::new_async().await;
        let _m = server.mock("GET", "/data").with_body("{}").create_async().await;

        let client = GithubClient::new(server.url());
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let counter = first.clone();
        client
            .set_observer(RateObserver::new(move |_| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            }))
            .await;
        let counter = second.clone();
        client
            .set_observer(RateObserver::new(move |_| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            }))
            .await;

        client.base_query("/data", &[]).await?;

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);

        Ok(())
    }

    #[tokio::test]
    async fn should_propagate_failures_without_notifying() -> Result<()> {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/orgs/demo/repos")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = GithubClient::new(server.url());
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        client
            .set_observer(RateObserver::new(move |_| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            }))
            .await;

        assert!(client.list_org_repos("demo").await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        Ok(())
    }

    #[tokio::test]
    async fn should_convert_rate_limit_reset() -> Result<()> {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/rate_limit")
            .with_body(rate_limit_json())
            .create_async()
            .await;

        let reset = GithubClient::new(server.url()).rate_limit_reset().await?;

        assert_eq!(reset.timestamp(), 1700000000);

        Ok(())
    }
}
