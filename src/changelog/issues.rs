//! Aggregation of pull requests into normalized issues.
use serde::Serialize;

use crate::{changelog::classify, forge::types::PullRequestRaw};

/// One merged pull request normalized for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub title: String,
    /// Distinct package names in first-seen order.
    pub packages: Vec<String>,
    pub username: String,
    /// Pull request number in string form.
    pub number: String,
}

/// Project pull requests into issues, attributing each to the packages its
/// files touched. In monorepo mode, issues without any attributable package
/// are dropped. Fetched pull requests are never mutated; each issue is a
/// fresh record.
pub fn aggregate(
    pull_requests: &[PullRequestRaw],
    ignore: &[String],
    monorepo: bool,
) -> Vec<Issue> {
    pull_requests
        .iter()
        .map(|pr| Issue {
            title: pr.title.clone(),
            packages: distinct_packages(&pr.files, ignore),
            username: pr.username.clone(),
            number: pr.number.to_string(),
        })
        .filter(|issue| !monorepo || !issue.packages.is_empty())
        .collect()
}

/// Distinct package names for a file list, preserving first-seen order.
/// Pass-through directory names never count as packages themselves.
fn distinct_packages(files: &[String], ignore: &[String]) -> Vec<String> {
    let mut packages: Vec<String> = vec![];

    for file in files {
        let package = classify::package_from_path(file, ignore);

        if package.is_empty() || ignore.iter().any(|dir| dir == package) {
            continue;
        }

        if !packages.iter().any(|seen| seen == package) {
            packages.push(package.to_string());
        }
    }

    packages
}
