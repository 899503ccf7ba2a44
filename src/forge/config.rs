//! Configuration for the GitHub API connection.
use secrecy::SecretString;
use std::{env, path::PathBuf};

use crate::{config::Config, error::MonologueError, result::Result};

/// GitHub API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Environment variable holding the API token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Remote repository connection configuration for authenticating against
/// the GitHub API.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Repository identifier in `owner/name` form.
    pub repo: String,
    /// Access token for authentication.
    pub token: SecretString,
    /// Directory for cached responses.
    pub cache_dir: Option<PathBuf>,
    /// API base URL.
    pub api_base: String,
}

impl RemoteConfig {
    /// Build the remote configuration from loaded file configuration,
    /// reading the access token from the environment. A missing token is
    /// fatal.
    pub fn from_config(config: &Config) -> Result<Self> {
        let token =
            env::var(TOKEN_ENV_VAR).map_err(|_| MonologueError::MissingToken)?;

        Ok(Self {
            repo: config.repo.clone(),
            token: SecretString::from(token),
            cache_dir: config.cache_dir.clone(),
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }
}
