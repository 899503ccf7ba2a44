//! Traits related to remote git forges
use async_trait::async_trait;

use crate::{forge::types::PullRequestRaw, result::Result};

/// Source of merged pull requests for the configured repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    /// Merged pull requests with a merge date after `since` (git `%ai`
    /// format), in search-response order, each with its changed file list
    /// resolved.
    async fn merged_pull_requests(
        &self,
        since: &str,
    ) -> Result<Vec<PullRequestRaw>>;
}
