//! Markdown rendering of releases.
//!
//! Rendering goes through a tera template over the serialized release, so
//! the body format can be swapped out in configuration without touching
//! code.
use tera::{Context, Tera};

use crate::{changelog::release::Release, result::Result};

/// Heading used when a release has no resolved tag.
pub const DEFAULT_UNRELEASED_NAME: &str = "Unreleased";

/// Default changelog body template.
pub const DEFAULT_BODY: &str = r#"## {{ heading }} ({{ release_date }})
{%- for issue in issues %}

* {{ issue.title }} [#{{ issue.number }}](https://github.com/{{ repo }}/pull/{{ issue.number }})
{%- if issue.packages %}
  * Packages: {% for package in issue.packages %}`{{ package }}`{% if not loop.last %}, {% endif %}{% endfor %}
{%- endif %}
  * Author: [@{{ issue.username }}](https://github.com/{{ issue.username }})
{%- endfor %}
"#;

/// Options threaded into every render.
#[derive(Debug, Clone)]
pub struct RendererOptions {
    /// Changelog categories, in label-map order.
    pub categories: Vec<String>,
    /// Base URL for issue links.
    pub base_issue_url: String,
    /// Heading used when a release has no resolved tag.
    pub unreleased_name: String,
    /// Repository identifier in `owner/name` form.
    pub repo: String,
    /// Tera template for the body.
    pub body: String,
}

/// Renders releases as markdown.
pub struct MarkdownRenderer {
    options: RendererOptions,
}

impl MarkdownRenderer {
    pub fn new(options: RendererOptions) -> Self {
        Self { options }
    }

    /// Render a release as markdown: a heading line with the tag and
    /// release date, then one block per issue.
    pub fn render(&self, release: &Release) -> Result<String> {
        let mut context = Context::from_serialize(release)?;

        let heading = if release.tag.is_empty() {
            self.options.unreleased_name.as_str()
        } else {
            release.tag.as_str()
        };

        context.insert("heading", heading);
        context.insert("repo", &self.options.repo);

        let markdown = Tera::one_off(&self.options.body, &context, false)?;

        Ok(markdown.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::issues::Issue;

    fn renderer() -> MarkdownRenderer {
        MarkdownRenderer::new(RendererOptions {
            categories: vec![],
            base_issue_url: "https://github.com/vega-ds/vega-ui/issues/"
                .into(),
            unreleased_name: DEFAULT_UNRELEASED_NAME.into(),
            repo: "vega-ds/vega-ui".into(),
            body: DEFAULT_BODY.into(),
        })
    }

    fn issue(
        title: &str,
        packages: &[&str],
        username: &str,
        number: &str,
    ) -> Issue {
        Issue {
            title: title.into(),
            packages: packages.iter().map(|p| p.to_string()).collect(),
            username: username.into(),
            number: number.into(),
        }
    }

    #[test]
    fn renders_release_with_package_lines() {
        let release = Release {
            issues: vec![
                issue("Fix bug", &["core"], "alice", "12"),
                issue("Refactor theming", &["ui", "core"], "bob", "13"),
            ],
            tag: "vega-ui@1.2.0".into(),
            release_date: "2023-05-01".into(),
        };

        let markdown = renderer().render(&release).unwrap();

        let expected = "\
## vega-ui@1.2.0 (2023-05-01)

* Fix bug [#12](https://github.com/vega-ds/vega-ui/pull/12)
  * Packages: `core`
  * Author: [@alice](https://github.com/alice)

* Refactor theming [#13](https://github.com/vega-ds/vega-ui/pull/13)
  * Packages: `ui`, `core`
  * Author: [@bob](https://github.com/bob)";

        assert_eq!(markdown, expected);
    }

    #[test]
    fn omits_package_line_for_empty_package_set() {
        let release = Release {
            issues: vec![issue("Fix docs", &[], "alice", "14")],
            tag: "v1.0.0".into(),
            release_date: "2023-05-01".into(),
        };

        let markdown = renderer().render(&release).unwrap();

        let expected = "\
## v1.0.0 (2023-05-01)

* Fix docs [#14](https://github.com/vega-ds/vega-ui/pull/14)
  * Author: [@alice](https://github.com/alice)";

        assert_eq!(markdown, expected);
    }

    #[test]
    fn empty_tag_renders_under_unreleased_heading() {
        let release = Release {
            issues: vec![],
            tag: "".into(),
            release_date: "2023-05-01".into(),
        };

        let markdown = renderer().render(&release).unwrap();

        assert_eq!(markdown, "## Unreleased (2023-05-01)");
    }

    #[test]
    fn heading_uses_release_tag_verbatim() {
        let release = Release {
            issues: vec![],
            tag: "vega-ui@2.0.0-rc.1".into(),
            release_date: "2023-06-15".into(),
        };

        let markdown = renderer().render(&release).unwrap();

        assert!(markdown.starts_with("## vega-ui@2.0.0-rc.1 (2023-06-15)"));
    }
}
