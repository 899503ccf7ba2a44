//! Wire types for the GitHub search and pull request endpoints.
use serde::Deserialize;

/// Response envelope for the issue search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

/// One merged pull request returned by the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub number: u64,
    pub title: String,
    pub user: SearchUser,
}

/// Author of a pull request.
#[derive(Debug, Deserialize)]
pub struct SearchUser {
    pub login: String,
}

/// One entry of the per-PR file listing.
#[derive(Debug, Deserialize)]
pub struct PullRequestFile {
    pub filename: String,
}

/// A merged pull request normalized at the API boundary, with its changed
/// file list resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRaw {
    pub number: u64,
    pub title: String,
    pub username: String,
    pub files: Vec<String>,
}
