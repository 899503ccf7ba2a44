//! CLI argument parsing.
use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

/// Arguments selecting the release window and runtime behavior.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long)]
    /// Tag opening the release window. Defaults to the previous tag of the
    /// configured main package.
    pub tag_from: Option<String>,

    #[arg(long)]
    /// Tag labeling the release. Defaults to the last tag of the configured
    /// main package, with the window extending to HEAD.
    pub tag_to: Option<String>,

    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    /// Path to the configuration file.
    pub config: PathBuf,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}
