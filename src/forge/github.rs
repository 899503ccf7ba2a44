//! Implements the Forge trait for GitHub
use async_trait::async_trait;
use chrono::DateTime;
use log::*;
use reqwest::{
    Client, Url,
    header::{HeaderMap, HeaderValue},
};
use secrecy::ExposeSecret;
use tokio::task::JoinHandle;

use crate::{
    error::MonologueError,
    forge::{
        cache::ResponseCache,
        config::RemoteConfig,
        traits::Forge,
        types::{PullRequestFile, PullRequestRaw, SearchResponse},
    },
    result::Result,
};

/// GitHub client for the merged pull request search and per-PR file
/// listings, using reqwest for API interactions.
pub struct Github {
    config: RemoteConfig,
    fetcher: Fetcher,
}

/// Request plumbing shared with spawned fetch tasks.
#[derive(Clone)]
struct Fetcher {
    client: Client,
    cache: Option<ResponseCache>,
}

impl Fetcher {
    /// GET `url`, consulting the cache first. Non-2xx responses surface as
    /// a fetch error carrying the status text and response body.
    async fn get(&self, url: Url) -> Result<String> {
        let key = url.to_string();

        if let Some(cache) = &self.cache
            && let Some(body) = cache.get(&key).await
        {
            debug!("cache hit for {key}");
            return Ok(body);
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(
                MonologueError::fetch(status.to_string(), body).into()
            );
        }

        if let Some(cache) = &self.cache {
            cache.put(&key, &body).await;
        }

        Ok(body)
    }
}

impl Github {
    /// Create a GitHub client with token authentication preconfigured on
    /// every request.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let token = config.token.expose_secret();

        let mut headers = HeaderMap::new();

        let mut token_value =
            HeaderValue::from_str(format!("token {}", token).as_str())?;
        token_value.set_sensitive(true);

        headers.append("Authorization", token_value);

        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .default_headers(headers)
            .build()?;

        let cache = config
            .cache_dir
            .as_ref()
            .map(|dir| ResponseCache::new(dir.join("github")));

        Ok(Self {
            config,
            fetcher: Fetcher { client, cache },
        })
    }

    fn search_url(&self, since: &str) -> Result<Url> {
        let merged_after = to_search_timestamp(since)?;
        let url = format!(
            "{}/search/issues?q=repo:{}+is:pr+is:merged+merged:>{}",
            self.config.api_base, self.config.repo, merged_after
        );
        Ok(Url::parse(&url)?)
    }

    fn files_url(&self, number: u64) -> Result<Url> {
        let url = format!(
            "{}/repos/{}/pulls/{}/files",
            self.config.api_base, self.config.repo, number
        );
        Ok(Url::parse(&url)?)
    }
}

#[async_trait]
impl Forge for Github {
    async fn merged_pull_requests(
        &self,
        since: &str,
    ) -> Result<Vec<PullRequestRaw>> {
        let url = self.search_url(since)?;

        info!(
            "searching {} for pull requests merged after {since}",
            self.config.repo
        );

        let body = self.fetcher.get(url).await?;
        let search: SearchResponse = serde_json::from_str(&body)?;

        // fan out the per-PR file listings, joining in search-response
        // order so issue ordering never depends on fetch completion
        let mut handles: Vec<JoinHandle<Result<PullRequestRaw>>> =
            Vec::with_capacity(search.items.len());

        for item in search.items {
            let fetcher = self.fetcher.clone();
            let url = self.files_url(item.number)?;

            handles.push(tokio::spawn(async move {
                let files = fetch_files(&fetcher, url).await?;

                Ok(PullRequestRaw {
                    number: item.number,
                    title: item.title,
                    username: item.user.login,
                    files,
                })
            }));
        }

        let mut pull_requests = Vec::with_capacity(handles.len());

        for handle in handles {
            pull_requests.push(handle.await??);
        }

        Ok(pull_requests)
    }
}

/// Changed file paths for one pull request. A malformed listing normalizes
/// to an empty file list.
async fn fetch_files(fetcher: &Fetcher, url: Url) -> Result<Vec<String>> {
    let body = fetcher.get(url).await?;

    let files: Vec<PullRequestFile> =
        serde_json::from_str(&body).unwrap_or_default();

    Ok(files.into_iter().map(|f| f.filename).collect())
}

/// Convert a git `%ai` timestamp to the UTC ISO-8601 form the search API
/// expects.
fn to_search_timestamp(date: &str) -> Result<String> {
    let parsed = DateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S %z")?;
    Ok(parsed.to_utc().format("%Y-%m-%dT%H:%M:%SZ").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn test_config() -> RemoteConfig {
        RemoteConfig {
            repo: "vega-ds/vega-ui".into(),
            token: SecretString::from("test-token".to_string()),
            cache_dir: None,
            api_base: "https://api.github.com".into(),
        }
    }

    #[test]
    fn converts_git_timestamp_to_utc_iso8601() {
        let converted =
            to_search_timestamp("2023-05-01 12:00:00 +0300").unwrap();

        assert_eq!(converted, "2023-05-01T09:00:00Z");
    }

    #[test]
    fn rejects_unparseable_timestamp() {
        assert!(to_search_timestamp("May 1st 2023").is_err());
    }

    #[test]
    fn builds_search_url_with_merge_filter() {
        let github = Github::new(test_config()).unwrap();

        let url = github
            .search_url("2023-05-01 12:00:00 +0000")
            .unwrap()
            .to_string();

        assert!(url.starts_with("https://api.github.com/search/issues?q="));
        assert!(url.contains("repo:vega-ds/vega-ui"));
        assert!(url.contains("is:pr+is:merged"));
        // the url crate percent-encodes `>` in the query string
        assert!(url.contains("merged:%3E2023-05-01T12:00:00Z"));
    }

    #[test]
    fn builds_files_url_for_pull_request() {
        let github = Github::new(test_config()).unwrap();

        let url = github.files_url(12).unwrap().to_string();

        assert_eq!(
            url,
            "https://api.github.com/repos/vega-ds/vega-ui/pulls/12/files"
        );
    }
}
