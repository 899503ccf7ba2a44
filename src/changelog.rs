//! Release assembly: window resolution, issue aggregation, rendering.
pub mod classify;
pub mod issues;
pub mod release;
pub mod window;

use log::*;

use crate::{
    config::Config,
    forge::Forge,
    render::{DEFAULT_UNRELEASED_NAME, MarkdownRenderer, RendererOptions},
    repo::Vcs,
    result::Result,
};

/// Options accepted by [`Changelog::create_markdown`].
#[derive(Debug, Default, Clone)]
pub struct ChangelogOptions {
    /// Tag opening the release window.
    pub tag_from: Option<String>,
    /// Tag labeling the release.
    pub tag_to: Option<String>,
}

/// Top-level changelog generator wiring the collaborators together.
pub struct Changelog {
    config: Config,
    vcs: Box<dyn Vcs>,
    forge: Box<dyn Forge>,
    renderer: MarkdownRenderer,
}

impl Changelog {
    /// Create a generator from configuration and collaborator instances.
    pub fn new(
        config: Config,
        vcs: Box<dyn Vcs>,
        forge: Box<dyn Forge>,
    ) -> Self {
        let renderer = MarkdownRenderer::new(RendererOptions {
            categories: config.labels.values().cloned().collect(),
            base_issue_url: format!(
                "https://github.com/{}/issues/",
                config.repo
            ),
            unreleased_name: config
                .next_version
                .clone()
                .unwrap_or_else(|| DEFAULT_UNRELEASED_NAME.to_string()),
            repo: config.repo.clone(),
            body: config.body.clone(),
        });

        Self {
            config,
            vcs,
            forge,
            renderer,
        }
    }

    /// Generate the changelog for the requested window and return it as
    /// markdown. This is the sole public operation of the pipeline.
    pub async fn create_markdown(
        &self,
        options: &ChangelogOptions,
    ) -> Result<String> {
        // the window bounds resolve independently
        let (from, to) = tokio::try_join!(
            window::resolve_from(
                self.vcs.as_ref(),
                options.tag_from.as_deref(),
                &self.config.main_package,
            ),
            window::resolve_to(self.vcs.as_ref(), options.tag_to.as_deref()),
        )?;

        let window = window::Window { from, to };

        debug!("resolved release window: {window:?}");

        let mut release = release::build(
            self.vcs.as_ref(),
            self.forge.as_ref(),
            &self.config,
            &window,
        )
        .await?;

        // an explicit upper tag always labels the release, regardless of
        // what the tag lookup returned
        if let Some(tag_to) = &options.tag_to {
            release.tag = tag_to.clone();
        }

        self.renderer.render(&release)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Mode,
        forge::{traits::MockForge, types::PullRequestRaw},
        repo::MockVcs,
    };
    use mockall::predicate::eq;
    use std::collections::HashMap;

    fn test_config() -> Config {
        Config {
            repo: "vega-ds/vega-ui".into(),
            main_package: "vega-ui".into(),
            mode: Mode::Monorepo,
            ignore_paths: vec!["components".into()],
            labels: HashMap::new(),
            next_version: None,
            cache_dir: None,
            body: crate::render::DEFAULT_BODY.into(),
        }
    }

    fn fix_bug_pull_request() -> PullRequestRaw {
        PullRequestRaw {
            number: 12,
            title: "Fix bug".into(),
            username: "alice".into(),
            files: vec![
                "packages/core/index.js".into(),
                "packages/core/util.js".into(),
            ],
        }
    }

    #[tokio::test]
    async fn generates_markdown_for_implicit_window() {
        let mut vcs = MockVcs::new();
        vcs.expect_package_tags().with(eq("vega-ui")).returning(|_| {
            Ok(vec!["vega-ui@1.1.0".into(), "vega-ui@1.2.0".into()])
        });
        vcs.expect_date_of_tag()
            .with(eq("vega-ui@1.1.0"))
            .returning(|_| Ok("2023-04-01 10:00:00 +0000".into()));
        vcs.expect_date_of_tag()
            .with(eq("HEAD"))
            .returning(|_| Ok("2023-05-01 12:00:00 +0000".into()));
        vcs.expect_last_tag()
            .with(eq("vega-ui"))
            .returning(|_| Ok("vega-ui@1.2.0".into()));

        let mut forge = MockForge::new();
        forge
            .expect_merged_pull_requests()
            .with(eq("2023-04-01 10:00:00 +0000"))
            .returning(|_| Ok(vec![fix_bug_pull_request()]));

        let changelog =
            Changelog::new(test_config(), Box::new(vcs), Box::new(forge));

        let markdown = changelog
            .create_markdown(&ChangelogOptions::default())
            .await
            .unwrap();

        let expected = "\
## vega-ui@1.2.0 (2023-05-01)

* Fix bug [#12](https://github.com/vega-ds/vega-ui/pull/12)
  * Packages: `core`
  * Author: [@alice](https://github.com/alice)";

        assert_eq!(markdown, expected);
    }

    #[tokio::test]
    async fn explicit_to_tag_overrides_resolved_tag() {
        let mut vcs = MockVcs::new();
        vcs.expect_date_of_tag()
            .with(eq("vega-ui@1.1.0"))
            .returning(|_| Ok("2023-04-01 10:00:00 +0000".into()));
        vcs.expect_date_of_tag()
            .with(eq("vega-ui@2.0.0"))
            .returning(|_| Ok("2023-05-01 12:00:00 +0000".into()));
        // the lookup returns an older tag; the override must win
        vcs.expect_last_tag()
            .returning(|_| Ok("vega-ui@1.2.0".into()));

        let mut forge = MockForge::new();
        forge
            .expect_merged_pull_requests()
            .returning(|_| Ok(vec![fix_bug_pull_request()]));

        let changelog =
            Changelog::new(test_config(), Box::new(vcs), Box::new(forge));

        let options = ChangelogOptions {
            tag_from: Some("vega-ui@1.1.0".into()),
            tag_to: Some("vega-ui@2.0.0".into()),
        };

        let markdown = changelog.create_markdown(&options).await.unwrap();

        assert!(
            markdown.starts_with("## vega-ui@2.0.0 (2023-05-01)"),
            "got {markdown}"
        );
        assert!(!markdown.contains("vega-ui@1.2.0"));
    }

    #[tokio::test]
    async fn window_resolution_failure_propagates() {
        let mut vcs = MockVcs::new();
        vcs.expect_package_tags().returning(|_| Ok(vec![]));
        vcs.expect_date_of_tag().with(eq("")).returning(|_| {
            Err(crate::error::MonologueError::git_command(
                "log -1 --format=%ai",
                "fatal: ambiguous argument ''",
            )
            .into())
        });
        vcs.expect_date_of_tag()
            .with(eq("HEAD"))
            .returning(|_| Ok("2023-05-01 12:00:00 +0000".into()));

        let forge = MockForge::new();

        let changelog =
            Changelog::new(test_config(), Box::new(vcs), Box::new(forge));

        let result = changelog
            .create_markdown(&ChangelogOptions::default())
            .await;

        assert!(result.is_err());
    }
}
