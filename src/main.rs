use clap::Parser;

use monologue::{
    Changelog, ChangelogOptions,
    cli::Args,
    config::Config,
    forge::{config::RemoteConfig, github::Github},
    repo::GitCli,
    result::Result,
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("monologue")
        .build();

    // markdown goes to stdout; keep logs on stderr
    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    initialize_logger(args.debug)?;

    let config = Config::load(&args.config)?;
    let remote = RemoteConfig::from_config(&config)?;

    let vcs = GitCli::new(std::env::current_dir()?);
    let forge = Github::new(remote)?;

    let changelog = Changelog::new(config, Box::new(vcs), Box::new(forge));

    let options = ChangelogOptions {
        tag_from: args.tag_from,
        tag_to: args.tag_to,
    };

    let markdown = changelog.create_markdown(&options).await?;

    println!("{markdown}");

    Ok(())
}
