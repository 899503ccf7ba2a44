//! Git subprocess queries used to resolve release windows.
//!
//! Everything here shells out to the `git` CLI in a working directory and
//! parses its output. Tag listings come back in creation order, which the
//! window resolver relies on.
use async_trait::async_trait;
use log::*;
use regex::Regex;
use std::path::PathBuf;
use tokio::process::Command;

use crate::{error::MonologueError, result::Result};

/// `git log` format producing the delimiter-based commit lines.
const COMMIT_PRETTY_FORMAT: &str = "hash<%h> ref<%D> message<%s> date<%cd>";

/// Pattern matching one commit line. Lines that don't match yield no record.
const COMMIT_LINE_PATTERN: &str = "hash<(.+)> ref<(.*)> message<(.*)> date<(.*)>";

/// One commit parsed from the delimiter-based log format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitListItem {
    pub sha: String,
    pub ref_name: String,
    pub summary: String,
    pub date: String,
}

/// Queries against the local version-control history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Vcs: Send + Sync {
    /// Commit timestamp of a ref in git `%ai` format
    /// (`YYYY-MM-DD HH:MM:SS +ZZZZ`).
    async fn date_of_tag(&self, tag: &str) -> Result<String>;

    /// Tags whose names contain `package`, in creation order (oldest first).
    async fn package_tags(&self, package: &str) -> Result<Vec<String>>;

    /// Most recent tag for `package`, or empty when the package has none.
    async fn last_tag(&self, package: &str) -> Result<String>;

    /// Commits in `from..to`, parsed from the delimiter format. Malformed
    /// lines are dropped.
    async fn commits_between(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<CommitListItem>>;

    /// Paths touched by a commit. A failing subprocess degrades to an
    /// empty list.
    async fn changed_paths(&self, sha: &str) -> Vec<String>;
}

/// [`Vcs`] implementation backed by the `git` binary.
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    /// Create a client running git commands in `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        debug!("running git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .await?;

        if !output.status.success() {
            let stderr =
                String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(MonologueError::git_command(args.join(" "), stderr)
                .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .trim_end_matches('\n')
            .to_string())
    }
}

#[async_trait]
impl Vcs for GitCli {
    async fn date_of_tag(&self, tag: &str) -> Result<String> {
        self.run(&["log", "-1", "--format=%ai", tag]).await
    }

    async fn package_tags(&self, package: &str) -> Result<Vec<String>> {
        // %(tag) is only populated for annotated tags, which is what release
        // tooling creates
        let stdout = self
            .run(&[
                "for-each-ref",
                "--sort=creatordate",
                "--format=%(tag)",
                "refs/tags",
            ])
            .await?;

        Ok(stdout
            .lines()
            .filter(|tag| !tag.is_empty() && tag.contains(package))
            .map(str::to_string)
            .collect())
    }

    async fn last_tag(&self, package: &str) -> Result<String> {
        let tags = self.package_tags(package).await?;
        Ok(tags.last().cloned().unwrap_or_default())
    }

    async fn commits_between(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<CommitListItem>> {
        let pattern = Regex::new(COMMIT_LINE_PATTERN)?;
        let pretty = format!("--pretty={COMMIT_PRETTY_FORMAT}");
        let range = format!("{from}..{to}");

        let stdout = self
            .run(&["log", "--oneline", &pretty, "--date=short", &range])
            .await?;

        Ok(stdout
            .lines()
            .filter_map(|line| parse_log_message(&pattern, line))
            .collect())
    }

    async fn changed_paths(&self, sha: &str) -> Vec<String> {
        let result = self
            .run(&[
                "show",
                "-m",
                "--name-only",
                "--pretty=format:",
                "--first-parent",
                sha,
            ])
            .await;

        match result {
            Ok(stdout) => stdout
                .lines()
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Err(err) => {
                warn!("failed to list changed paths for {sha}: {err}");
                vec![]
            }
        }
    }
}

/// Parse one commit line in the delimiter format, or nothing when the line
/// doesn't match.
fn parse_log_message(pattern: &Regex, line: &str) -> Option<CommitListItem> {
    let captures = pattern.captures(line)?;

    Some(CommitListItem {
        sha: captures[1].to_string(),
        ref_name: captures[2].to_string(),
        summary: captures[3].to_string(),
        date: captures[4].to_string(),
    })
}
