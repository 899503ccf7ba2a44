//! Release construction for a resolved window.
use log::*;
use serde::Serialize;

use crate::{
    changelog::{
        issues::{self, Issue},
        window::Window,
    },
    config::{Config, Mode},
    forge::Forge,
    repo::Vcs,
    result::Result,
};

/// A fully assembled release ready for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Release {
    /// Issues in pull-request response order.
    pub issues: Vec<Issue>,
    /// Tag labeling the release. Empty when the main package has no tags.
    pub tag: String,
    /// Date-only portion of the window's upper bound.
    pub release_date: String,
}

/// Assemble the release for `window`.
///
/// Pull requests are selected by merge date after `window.from` only; the
/// upper bound labels the release (date, and tag via the caller's override)
/// but does not constrain which pull requests are included.
pub async fn build(
    vcs: &dyn Vcs,
    forge: &dyn Forge,
    config: &Config,
    window: &Window,
) -> Result<Release> {
    // the search and the tag lookup do not depend on each other
    let (pull_requests, tag) = tokio::try_join!(
        forge.merged_pull_requests(&window.from),
        vcs.last_tag(&config.main_package),
    )?;

    info!(
        "found {} merged pull requests since {}",
        pull_requests.len(),
        window.from
    );

    let issues = issues::aggregate(
        &pull_requests,
        &config.ignore_paths,
        config.mode == Mode::Monorepo,
    );

    Ok(Release {
        issues,
        tag,
        release_date: release_date(&window.to),
    })
}

/// Date-only portion (text before the first space) of a timestamp.
fn release_date(timestamp: &str) -> String {
    timestamp.split(' ').next().unwrap_or_default().to_string()
}
