//! Typed errors for monologue operations.

use thiserror::Error;

/// Main error type for monologue operations.
#[derive(Error, Debug)]
pub enum MonologueError {
    // Configuration errors
    #[error("Must provide GITHUB_TOKEN")]
    MissingToken,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Network/API errors
    #[error("Fetch error: {status}\n{body}")]
    Fetch { status: String, body: String },

    // Git subprocess errors
    #[error("git {command} failed: {stderr}")]
    GitCommand { command: String, stderr: String },
}

impl MonologueError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a fetch error from a response status and body
    pub fn fetch(status: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Fetch {
            status: status.into(),
            body: body.into(),
        }
    }

    /// Create a git command error
    pub fn git_command(
        command: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::GitCommand {
            command: command.into(),
            stderr: stderr.into(),
        }
    }
}
