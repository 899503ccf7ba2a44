//! Resolution of the release window boundaries.
use crate::{repo::Vcs, result::Result};

/// Symbolic ref for the current position.
const HEAD: &str = "HEAD";

/// Timestamp pair bounding a release, in git `%ai` format. `from` is an
/// exclusive lower bound on merge dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub from: String,
    pub to: String,
}

/// Lower bound of the window: the explicit tag's commit date when given,
/// otherwise the date of the tag preceding the latest one for
/// `main_package`.
pub async fn resolve_from(
    vcs: &dyn Vcs,
    tag_from: Option<&str>,
    main_package: &str,
) -> Result<String> {
    if let Some(tag) = tag_from {
        return vcs.date_of_tag(tag).await;
    }

    previous_tag_date(vcs, main_package).await
}

/// Upper bound of the window: the explicit tag's commit date when given,
/// otherwise the date of HEAD.
pub async fn resolve_to(vcs: &dyn Vcs, tag_to: Option<&str>) -> Result<String> {
    vcs.date_of_tag(tag_to.unwrap_or(HEAD)).await
}

/// Commit date of the second-most-recent tag for `package`.
///
/// Tags arrive in creation order, so the previous release is the
/// second-to-last entry; the collaborator's ordering is trusted as-is. With
/// fewer than two tags the lookup falls through to git with an empty ref
/// name and surfaces git's error: the first release of a package cannot be
/// resolved implicitly and needs explicit tags.
async fn previous_tag_date(vcs: &dyn Vcs, package: &str) -> Result<String> {
    let tags = vcs.package_tags(package).await?;

    let previous = tags
        .iter()
        .nth_back(1)
        .map(String::as_str)
        .unwrap_or_default();

    vcs.date_of_tag(previous).await
}
