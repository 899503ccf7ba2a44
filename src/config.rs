//! Configuration loading and parsing for `monologue.toml` files.
//!
//! Describes the repository, its package layout, and how releases are
//! labeled. `repo` and `main_package` are required; everything else has a
//! sensible default.
use color_eyre::eyre::Context;
use serde::Deserialize;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{error::MonologueError, render::DEFAULT_BODY, result::Result};

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "monologue.toml";

/// Repository layout mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Multiple packages under `packages/`; issues without an attributable
    /// package are dropped.
    #[default]
    Monorepo,
    /// Everything belongs to the implicit sole package; no filtering.
    SinglePackage,
}

/// Root configuration structure for `monologue.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Repository identifier in `owner/name` form.
    pub repo: String,
    /// Package whose tag history defines release boundaries.
    pub main_package: String,
    /// Repository layout mode (default: monorepo).
    #[serde(default)]
    pub mode: Mode,
    /// Directory names under `packages/` treated as pass-through: their
    /// children are the real packages.
    #[serde(default)]
    pub ignore_paths: Vec<String>,
    /// Label name to changelog category mapping.
    #[serde(default)]
    pub labels: HashMap<String, String>,
    /// Heading used when a release has no resolved tag.
    #[serde(default)]
    pub next_version: Option<String>,
    /// Directory for cached API responses, relative to the working
    /// directory.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    /// Tera template for the rendered changelog body.
    #[serde(default = "default_body")]
    pub body: String,
}

fn default_body() -> String {
    DEFAULT_BODY.to_string()
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).wrap_err_with(|| {
            format!("failed to read config file: {}", path.display())
        })?;

        let config: Config = toml::from_str(&content)?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.repo.split('/').filter(|p| !p.is_empty()).count() != 2 {
            return Err(MonologueError::invalid_config(format!(
                "repo must be in owner/name form, got {:?}",
                self.repo
            ))
            .into());
        }

        if self.main_package.is_empty() {
            return Err(MonologueError::invalid_config(
                "main_package must not be empty",
            )
            .into());
        }

        Ok(())
    }
}
